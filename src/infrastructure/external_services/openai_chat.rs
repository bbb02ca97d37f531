use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::application::ports::answer_generator::{
    AnswerGenerator, GenerationError, GenerationRequest,
};

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: usize,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenAiChatConfig {
    pub api_base: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl OpenAiChatConfig {
    pub fn from_env() -> Self {
        Self {
            api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            timeout_secs: 60,
        }
    }
}

/// OpenAI `/v1/chat/completions` adapter. The model name travels with each
/// request, so a config-store model change applies on the very next query
/// without rebuilding the client.
pub struct OpenAiChatGenerator {
    client: Client,
    config: OpenAiChatConfig,
}

impl OpenAiChatGenerator {
    pub fn new(config: OpenAiChatConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, ReqwestError> {
        Self::new(OpenAiChatConfig::from_env())
    }
}

#[async_trait]
impl AnswerGenerator for OpenAiChatGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let body = ChatCompletionBody {
            model: &request.model,
            messages: vec![ChatMessage {
                role: "system",
                content: &request.system_prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::NetworkError(e.without_url().to_string()))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::TOO_MANY_REQUESTS => return Err(GenerationError::RateLimitExceeded),
            status => {
                let detail = response.text().await.unwrap_or_default();
                return Err(GenerationError::ApiError(format!(
                    "status {}: {}",
                    status, detail
                )));
            }
        }

        let parsed = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                GenerationError::InvalidResponse("completion contained no content".to_string())
            })
    }
}
