use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::application::ports::embedding_provider::{EmbeddingError, EmbeddingProvider};

#[derive(Serialize)]
struct EmbeddingsRequestBody<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingsResponseBody {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Clone)]
pub struct OpenAiEmbeddingsConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl OpenAiEmbeddingsConfig {
    pub fn from_env() -> Self {
        Self {
            api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            model: env::var("OPENAI_EMBEDDING_MODEL")
                .unwrap_or_else(|_| "text-embedding-3-large".to_string()),
            timeout_secs: 30,
        }
    }
}

/// OpenAI `/v1/embeddings` adapter. The provider timeout lives on the HTTP
/// client; failures surface as `EmbeddingError` with no retry here (retry
/// policy belongs to the caller).
pub struct OpenAiEmbeddingProvider {
    client: Client,
    config: OpenAiEmbeddingsConfig,
}

impl OpenAiEmbeddingProvider {
    pub fn new(config: OpenAiEmbeddingsConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, ReqwestError> {
        Self::new(OpenAiEmbeddingsConfig::from_env())
    }

    async fn request_embeddings(
        &self,
        inputs: &[String],
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }
        if inputs.iter().any(|text| text.trim().is_empty()) {
            return Err(EmbeddingError::InvalidInput(
                "cannot embed empty text".to_string(),
            ));
        }

        let body = EmbeddingsRequestBody {
            model: &self.config.model,
            input: inputs,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EmbeddingError::NetworkError(e.without_url().to_string()))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::TOO_MANY_REQUESTS => return Err(EmbeddingError::RateLimitExceeded),
            StatusCode::SERVICE_UNAVAILABLE => return Err(EmbeddingError::ServiceUnavailable),
            status => {
                let detail = response.text().await.unwrap_or_default();
                return Err(EmbeddingError::ApiError(format!(
                    "status {}: {}",
                    status, detail
                )));
            }
        }

        let mut parsed = response
            .json::<EmbeddingsResponseBody>()
            .await
            .map_err(|e| EmbeddingError::ApiError(e.to_string()))?;

        if parsed.data.len() != inputs.len() {
            return Err(EmbeddingError::ApiError(format!(
                "expected {} embeddings, got {}",
                inputs.len(),
                parsed.data.len()
            )));
        }

        // The API may return entries out of order; `index` is authoritative.
        parsed.data.sort_by_key(|datum| datum.index);
        Ok(parsed.data.into_iter().map(|datum| datum.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.request_embeddings(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| EmbeddingError::ApiError("no embedding returned".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.request_embeddings(texts).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn dimension(&self) -> usize {
        match self.config.model.as_str() {
            "text-embedding-3-small" => 1536,
            "text-embedding-ada-002" => 1536,
            _ => 3072,
        }
    }
}
