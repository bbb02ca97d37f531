use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ConfigError {
    InvalidChunkSize(String),
    InvalidChunkOverlap(String),
    InvalidTopK(String),
    InvalidThreshold(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidChunkSize(msg) => write!(f, "Invalid chunk size: {}", msg),
            ConfigError::InvalidChunkOverlap(msg) => write!(f, "Invalid chunk overlap: {}", msg),
            ConfigError::InvalidTopK(msg) => write!(f, "Invalid top_k: {}", msg),
            ConfigError::InvalidThreshold(msg) => {
                write!(f, "Invalid similarity threshold: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime-tunable retrieval parameters. A single shared instance lives in
/// the `ConfigStore`; every mutation validates the merged struct before it
/// becomes visible, so a reader never sees an overlap >= size pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagConfig {
    pub model: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
    pub similarity_threshold: f32,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 5,
            similarity_threshold: 0.75,
        }
    }
}

impl RagConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(ConfigError::InvalidChunkOverlap(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.top_k == 0 {
            return Err(ConfigError::InvalidTopK(
                "top_k must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::InvalidThreshold(format!(
                "similarity_threshold ({}) must be within [0, 1]",
                self.similarity_threshold
            )));
        }
        Ok(())
    }

    /// Applies a partial update, returning the merged config. The caller is
    /// responsible for validating before publishing it.
    pub fn merged_with(&self, update: &ConfigUpdate) -> Self {
        Self {
            model: update.model.clone().unwrap_or_else(|| self.model.clone()),
            chunk_size: update.chunk_size.unwrap_or(self.chunk_size),
            chunk_overlap: update.chunk_overlap.unwrap_or(self.chunk_overlap),
            top_k: update.top_k.unwrap_or(self.top_k),
            similarity_threshold: update
                .similarity_threshold
                .unwrap_or(self.similarity_threshold),
        }
    }
}

/// Partial config mutation: only provided fields are merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigUpdate {
    pub model: Option<String>,
    pub chunk_size: Option<usize>,
    pub chunk_overlap: Option<usize>,
    pub top_k: Option<usize>,
    pub similarity_threshold: Option<f32>,
}

impl ConfigUpdate {
    pub fn changes_chunking(&self) -> bool {
        self.chunk_size.is_some() || self.chunk_overlap.is_some()
    }

    pub fn changes_model(&self) -> bool {
        self.model.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RagConfig::default().validate().is_ok());
    }

    #[test]
    fn test_overlap_must_be_below_size() {
        let config = RagConfig {
            chunk_size: 200,
            chunk_overlap: 200,
            ..RagConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidChunkOverlap(_))
        ));
    }

    #[test]
    fn test_threshold_bounds() {
        let config = RagConfig {
            similarity_threshold: 1.5,
            ..RagConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_merge_partial_update() {
        let base = RagConfig::default();
        let update = ConfigUpdate {
            chunk_size: Some(500),
            ..ConfigUpdate::default()
        };

        let merged = base.merged_with(&update);
        assert_eq!(merged.chunk_size, 500);
        assert_eq!(merged.chunk_overlap, base.chunk_overlap);
        assert_eq!(merged.model, base.model);
        assert!(update.changes_chunking());
        assert!(!update.changes_model());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = RagConfig {
            chunk_size: 0,
            chunk_overlap: 0,
            ..RagConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidChunkSize(_))
        ));
    }
}
