use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A bounded slice of a document's extracted text, the unit of embedding and
/// retrieval. `chunk_index` is contiguous from 0 within a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    id: Uuid,
    document_id: Uuid,
    content: String,
    chunk_index: i32,
    page: Option<i32>,
    created_at: DateTime<Utc>,
}

impl Chunk {
    pub fn new(document_id: Uuid, content: String, chunk_index: i32, page: Option<i32>) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            content,
            chunk_index,
            page,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document_id(&self) -> Uuid {
        self.document_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn chunk_index(&self) -> i32 {
        self.chunk_index
    }

    pub fn page(&self) -> Option<i32> {
        self.page
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn character_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Metadata stored alongside the vector: page and position, used for
    /// source attribution when the chunk is retrieved.
    pub fn metadata(&self, document_name: &str) -> Value {
        serde_json::json!({
            "page": self.page.unwrap_or(1),
            "chunk_index": self.chunk_index,
            "document_name": document_name,
        })
    }
}
