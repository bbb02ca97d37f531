use async_trait::async_trait;

#[derive(Debug)]
pub enum EmbeddingError {
    NetworkError(String),
    ApiError(String),
    InvalidInput(String),
    RateLimitExceeded,
    ServiceUnavailable,
}

impl std::fmt::Display for EmbeddingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            EmbeddingError::ApiError(msg) => write!(f, "API error: {}", msg),
            EmbeddingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            EmbeddingError::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            EmbeddingError::ServiceUnavailable => write!(f, "Embedding service unavailable"),
        }
    }
}

impl std::error::Error for EmbeddingError {}

/// The sole source of vector representations. A provider failure during a
/// document batch aborts the whole document's indexing; no chunk is left
/// half-embedded.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Batched variant to amortize provider round-trips. Returns one vector
    /// per input text, in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    fn model_name(&self) -> &str;

    fn dimension(&self) -> usize;
}
