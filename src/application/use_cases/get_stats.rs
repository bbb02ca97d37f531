use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::application::ports::{DocumentRegistry, VectorIndex};
use crate::application::services::ConfigStore;
use crate::domain::value_objects::RagConfig;

#[derive(Debug)]
pub enum GetStatsError {
    RegistryError(String),
    IndexError(String),
}

impl std::fmt::Display for GetStatsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetStatsError::RegistryError(msg) => write!(f, "Registry error: {}", msg),
            GetStatsError::IndexError(msg) => write!(f, "Vector index failure: {}", msg),
        }
    }
}

impl std::error::Error for GetStatsError {}

/// Read-only aggregate derived from the registry and the vector index; no
/// storage of its own.
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeBaseStats {
    pub total_documents: i64,
    pub documents_by_status: HashMap<String, i64>,
    pub total_chunks: i64,
    pub config: RagConfig,
}

pub struct GetStatsUseCase {
    registry: Arc<dyn DocumentRegistry>,
    vector_index: Arc<dyn VectorIndex>,
    config_store: Arc<ConfigStore>,
}

impl GetStatsUseCase {
    pub fn new(
        registry: Arc<dyn DocumentRegistry>,
        vector_index: Arc<dyn VectorIndex>,
        config_store: Arc<ConfigStore>,
    ) -> Self {
        Self {
            registry,
            vector_index,
            config_store,
        }
    }

    pub async fn execute(&self) -> Result<KnowledgeBaseStats, GetStatsError> {
        let documents_by_status = self
            .registry
            .count_by_status()
            .await
            .map_err(|e| GetStatsError::RegistryError(e.to_string()))?;

        let total_documents: i64 = documents_by_status.values().sum();

        let total_chunks = self
            .vector_index
            .total_chunks()
            .await
            .map_err(|e| GetStatsError::IndexError(e.to_string()))?;

        Ok(KnowledgeBaseStats {
            total_documents,
            documents_by_status,
            total_chunks,
            config: self.config_store.get().await,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::test_support::{InMemoryIndex, InMemoryRegistry};
    use crate::domain::entities::Document;
    use crate::domain::value_objects::{DocumentStatus, DocumentType};

    #[tokio::test]
    async fn test_stats_aggregate_registry_and_index() {
        let registry = Arc::new(InMemoryRegistry::new());
        let index = Arc::new(InMemoryIndex::new());

        let indexed = Document::new("a.txt".to_string(), DocumentType::Txt, 10);
        registry.create(&indexed).await.unwrap();
        registry
            .update_status(indexed.id(), &DocumentStatus::Indexed, Some(2), None)
            .await
            .unwrap();
        let pending = Document::new("b.txt".to_string(), DocumentType::Txt, 10);
        registry.create(&pending).await.unwrap();

        let use_case = GetStatsUseCase::new(registry, index, Arc::new(ConfigStore::default()));
        let stats = use_case.execute().await.unwrap();

        assert_eq!(stats.total_documents, 2);
        assert_eq!(stats.documents_by_status.get("INDEXED"), Some(&1));
        assert_eq!(stats.documents_by_status.get("INDEXING"), Some(&1));
        assert_eq!(stats.total_chunks, 0);
        assert_eq!(stats.config, RagConfig::default());
    }
}
