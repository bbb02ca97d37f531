use std::sync::Arc;

use crate::application::ports::vector_index::ScoredChunk;
use crate::application::ports::{EmbeddingProvider, VectorIndex};
use crate::application::services::ConfigStore;

#[derive(Debug)]
pub enum SearchChunksError {
    EmptyQuery,
    EmbeddingError(String),
    IndexError(String),
}

impl std::fmt::Display for SearchChunksError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchChunksError::EmptyQuery => write!(f, "Query cannot be empty"),
            SearchChunksError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            SearchChunksError::IndexError(msg) => write!(f, "Vector index failure: {}", msg),
        }
    }
}

impl std::error::Error for SearchChunksError {}

#[derive(Debug, Clone)]
pub struct SearchChunksRequest {
    pub query: String,
    pub top_k: Option<usize>,
}

/// Raw similarity search without answer generation; the retrieval half of
/// the pipeline exposed for inspection.
pub struct SearchChunksUseCase {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_index: Arc<dyn VectorIndex>,
    config_store: Arc<ConfigStore>,
}

impl SearchChunksUseCase {
    pub fn new(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        vector_index: Arc<dyn VectorIndex>,
        config_store: Arc<ConfigStore>,
    ) -> Self {
        Self {
            embedding_provider,
            vector_index,
            config_store,
        }
    }

    pub async fn execute(
        &self,
        request: SearchChunksRequest,
    ) -> Result<Vec<ScoredChunk>, SearchChunksError> {
        if request.query.trim().is_empty() {
            return Err(SearchChunksError::EmptyQuery);
        }

        let config = self.config_store.get().await;
        let top_k = request.top_k.unwrap_or(config.top_k);

        let query_vector = self
            .embedding_provider
            .embed(&request.query)
            .await
            .map_err(|e| SearchChunksError::EmbeddingError(e.to_string()))?;

        self.vector_index
            .search(&query_vector, top_k, config.similarity_threshold)
            .await
            .map_err(|e| SearchChunksError::IndexError(e.to_string()))
    }
}
