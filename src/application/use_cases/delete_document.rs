use std::sync::Arc;

use uuid::Uuid;

use crate::application::services::IndexingService;
use crate::application::services::indexing_service::IndexingError;

#[derive(Debug)]
pub enum DeleteDocumentError {
    NotFound(Uuid),
    /// Vectors were removed but the registry row was not; surfaced so the
    /// caller can retry instead of silently diverging.
    Inconsistency(String),
    IndexError(String),
    RegistryError(String),
}

impl std::fmt::Display for DeleteDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteDocumentError::NotFound(id) => write!(f, "Document not found: {}", id),
            DeleteDocumentError::Inconsistency(msg) => {
                write!(f, "Registry/index inconsistency: {}", msg)
            }
            DeleteDocumentError::IndexError(msg) => write!(f, "Vector index failure: {}", msg),
            DeleteDocumentError::RegistryError(msg) => write!(f, "Registry error: {}", msg),
        }
    }
}

impl std::error::Error for DeleteDocumentError {}

pub struct DeleteDocumentUseCase {
    indexing_service: Arc<IndexingService>,
}

impl DeleteDocumentUseCase {
    pub fn new(indexing_service: Arc<IndexingService>) -> Self {
        Self { indexing_service }
    }

    pub async fn execute(&self, id: Uuid) -> Result<(), DeleteDocumentError> {
        self.indexing_service
            .delete_document(id)
            .await
            .map_err(|e| match e {
                IndexingError::DocumentNotFound(id) => DeleteDocumentError::NotFound(id),
                IndexingError::Inconsistency(msg) => DeleteDocumentError::Inconsistency(msg),
                IndexingError::IndexFailed(msg) => DeleteDocumentError::IndexError(msg),
                other => DeleteDocumentError::RegistryError(other.to_string()),
            })
    }
}
