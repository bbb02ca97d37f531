use serde::Deserialize;

use crate::domain::value_objects::ConfigUpdate;

/// Partial config update payload; omitted fields keep their current values.
#[derive(Debug, Deserialize)]
pub struct ConfigUpdateDto {
    pub model: Option<String>,
    pub chunk_size: Option<usize>,
    pub chunk_overlap: Option<usize>,
    pub top_k: Option<usize>,
    pub similarity_threshold: Option<f32>,
}

impl From<ConfigUpdateDto> for ConfigUpdate {
    fn from(dto: ConfigUpdateDto) -> Self {
        Self {
            model: dto.model,
            chunk_size: dto.chunk_size,
            chunk_overlap: dto.chunk_overlap,
            top_k: dto.top_k,
            similarity_threshold: dto.similarity_threshold,
        }
    }
}
