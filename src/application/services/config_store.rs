use tokio::sync::RwLock;
use tracing::info;

use crate::domain::value_objects::{ConfigError, ConfigUpdate, RagConfig};

/// Process-wide retrieval configuration, shared by the chunker, the
/// indexing service, and the answer pipeline.
///
/// Readers clone the whole struct under the read guard and writers swap the
/// whole struct under the write guard, so no reader ever observes a
/// half-applied update (in particular, never an overlap >= size pair).
/// Last writer wins; guards are never held across provider calls.
pub struct ConfigStore {
    config: RwLock<RagConfig>,
}

impl ConfigStore {
    pub fn new(config: RagConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config: RwLock::new(config),
        })
    }

    pub async fn get(&self) -> RagConfig {
        self.config.read().await.clone()
    }

    /// Merges the provided fields into the current config, validates the
    /// merged result, and publishes it atomically. Components that depend on
    /// `chunk_size`/`chunk_overlap` or `model` re-read the store on each
    /// operation, so the new parameters take effect on the next run.
    pub async fn update(&self, update: ConfigUpdate) -> Result<RagConfig, ConfigError> {
        let mut guard = self.config.write().await;
        let merged = guard.merged_with(&update);
        merged.validate()?;
        *guard = merged.clone();
        drop(guard);

        info!(
            model = %merged.model,
            chunk_size = merged.chunk_size,
            chunk_overlap = merged.chunk_overlap,
            top_k = merged.top_k,
            similarity_threshold = merged.similarity_threshold,
            "RAG configuration updated"
        );

        Ok(merged)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            config: RwLock::new(RagConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_returns_current_config() {
        let store = ConfigStore::default();
        let config = store.get().await;

        assert_eq!(config, RagConfig::default());
    }

    #[tokio::test]
    async fn test_partial_update_merges_fields() {
        let store = ConfigStore::default();

        let updated = store
            .update(ConfigUpdate {
                chunk_size: Some(500),
                ..ConfigUpdate::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.chunk_size, 500);
        assert_eq!(updated.chunk_overlap, 200);
        assert_eq!(store.get().await.chunk_size, 500);
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_config_untouched() {
        let store = ConfigStore::default();

        let result = store
            .update(ConfigUpdate {
                chunk_overlap: Some(2000),
                ..ConfigUpdate::default()
            })
            .await;

        assert!(result.is_err());
        assert_eq!(store.get().await, RagConfig::default());
    }

    #[tokio::test]
    async fn test_concurrent_readers_never_see_mismatched_pair() {
        let store = Arc::new(ConfigStore::default());

        let mut tasks = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                // Writers flip between two internally consistent configs.
                let (size, overlap) = if i % 2 == 0 { (1000, 200) } else { (400, 50) };
                store
                    .update(ConfigUpdate {
                        chunk_size: Some(size),
                        chunk_overlap: Some(overlap),
                        ..ConfigUpdate::default()
                    })
                    .await
                    .unwrap();
            }));
        }
        for _ in 0..64 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                let config = store.get().await;
                assert!(
                    config.chunk_overlap < config.chunk_size,
                    "reader observed half-applied config: {:?}",
                    config
                );
            }));
        }

        for task in tasks {
            task.await.unwrap();
        }
    }
}
