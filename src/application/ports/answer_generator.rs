use async_trait::async_trait;

#[derive(Debug)]
pub enum GenerationError {
    NetworkError(String),
    ApiError(String),
    InvalidResponse(String),
    RateLimitExceeded,
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            GenerationError::ApiError(msg) => write!(f, "API error: {}", msg),
            GenerationError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            GenerationError::RateLimitExceeded => write!(f, "Rate limit exceeded"),
        }
    }
}

impl std::error::Error for GenerationError {}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: usize,
}

/// Wraps the language-model provider. One call per query, no retries here;
/// retry policy belongs to the caller.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;
}
