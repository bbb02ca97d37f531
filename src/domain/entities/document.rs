use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{DocumentStatus, DocumentType};

/// Durable record of one uploaded document's lifecycle, owned by the
/// registry. A document is never visible as `Indexed` until every chunk has
/// been embedded and persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: Uuid,
    name: String,
    doc_type: DocumentType,
    size_bytes: i64,
    status: DocumentStatus,
    chunk_count: i32,
    created_at: DateTime<Utc>,
    indexed_at: Option<DateTime<Utc>>,
}

impl Document {
    pub fn new(name: String, doc_type: DocumentType, size_bytes: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            doc_type,
            size_bytes,
            status: DocumentStatus::Indexing,
            chunk_count: 0,
            created_at: Utc::now(),
            indexed_at: None,
        }
    }

    /// Rebuilds a document from its stored representation.
    pub fn from_parts(
        id: Uuid,
        name: String,
        doc_type: DocumentType,
        size_bytes: i64,
        status: DocumentStatus,
        chunk_count: i32,
        created_at: DateTime<Utc>,
        indexed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name,
            doc_type,
            size_bytes,
            status,
            chunk_count,
            created_at,
            indexed_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc_type(&self) -> DocumentType {
        self.doc_type
    }

    pub fn size_bytes(&self) -> i64 {
        self.size_bytes
    }

    pub fn status(&self) -> &DocumentStatus {
        &self.status
    }

    pub fn chunk_count(&self) -> i32 {
        self.chunk_count
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn indexed_at(&self) -> Option<DateTime<Utc>> {
        self.indexed_at
    }

    pub fn mark_indexed(&mut self, chunk_count: i32) -> Result<(), String> {
        if !self.status.can_transition_to(&DocumentStatus::Indexed) {
            return Err(format!(
                "Document {} cannot transition from {} to INDEXED",
                self.id, self.status
            ));
        }
        self.status = DocumentStatus::Indexed;
        self.chunk_count = chunk_count;
        self.indexed_at = Some(Utc::now());
        Ok(())
    }

    pub fn mark_failed(&mut self, error: String) -> Result<(), String> {
        let failed = DocumentStatus::Failed(error);
        if !self.status.can_transition_to(&failed) {
            return Err(format!(
                "Document {} cannot transition from {} to FAILED",
                self.id, self.status
            ));
        }
        self.status = failed;
        Ok(())
    }

    pub fn is_indexed(&self) -> bool {
        self.status.is_indexed()
    }
}
