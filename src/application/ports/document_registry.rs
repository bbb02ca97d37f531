use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::domain::value_objects::DocumentStatus;

#[derive(Debug)]
pub enum RegistryError {
    NotFound(Uuid),
    DatabaseError(String),
    ValidationError(String),
    /// The registry and the vector index disagree after a delete: vectors
    /// were removed but the registry row could not be. Reported, never
    /// swallowed.
    Inconsistency(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::NotFound(id) => write!(f, "Document not found: {}", id),
            RegistryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            RegistryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            RegistryError::Inconsistency(msg) => {
                write!(f, "Registry/index inconsistency: {}", msg)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Durable record of each document's lifecycle, independent of vector
/// storage.
#[async_trait]
pub trait DocumentRegistry: Send + Sync {
    async fn create(&self, document: &Document) -> Result<(), RegistryError>;

    async fn update_status(
        &self,
        id: Uuid,
        status: &DocumentStatus,
        chunk_count: Option<i32>,
        indexed_at: Option<DateTime<Utc>>,
    ) -> Result<(), RegistryError>;

    async fn get(&self, id: Uuid) -> Result<Option<Document>, RegistryError>;

    /// All documents, newest first.
    async fn list(&self) -> Result<Vec<Document>, RegistryError>;

    /// Removes the registry row only. Vector cleanup is ordered by the
    /// indexing service, which deletes vectors before calling this.
    async fn delete(&self, id: Uuid) -> Result<bool, RegistryError>;

    async fn count_by_status(&self) -> Result<HashMap<String, i64>, RegistryError>;
}
