use chrono::{DateTime, Utc};
use diesel::prelude::*;
use pgvector::Vector;
use serde_json::Value;
use uuid::Uuid;

use crate::application::ports::vector_index::{ChunkRecord, ScoredChunk};
use crate::infrastructure::database::schema::knowledge_chunks;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(belongs_to(super::DocumentModel, foreign_key = document_id))]
#[diesel(table_name = knowledge_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChunkModel {
    pub id: Uuid,
    pub document_id: Uuid,
    pub content: String,
    pub embedding: Option<Vector>,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = knowledge_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewChunkModel {
    pub id: Uuid,
    pub document_id: Uuid,
    pub content: String,
    pub embedding: Option<Vector>,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

impl From<&ChunkRecord> for NewChunkModel {
    fn from(record: &ChunkRecord) -> Self {
        Self {
            id: record.id,
            document_id: record.document_id,
            content: record.content.clone(),
            embedding: Some(Vector::from(record.embedding.clone())),
            metadata: record.metadata.clone(),
            created_at: Utc::now(),
        }
    }
}

impl ChunkModel {
    /// Converts a row plus its cosine distance into the port's scored form.
    /// Similarity is normalized to [0, 1] with higher meaning more similar.
    pub fn into_scored(self, cosine_distance: f64) -> ScoredChunk {
        ScoredChunk {
            content: self.content,
            metadata: self.metadata,
            score: (1.0 - cosine_distance as f32).clamp(0.0, 1.0),
        }
    }
}
