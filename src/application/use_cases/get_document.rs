use std::sync::Arc;

use uuid::Uuid;

use crate::application::ports::DocumentRegistry;
use crate::domain::entities::Document;

#[derive(Debug)]
pub enum GetDocumentError {
    NotFound(Uuid),
    RegistryError(String),
}

impl std::fmt::Display for GetDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetDocumentError::NotFound(id) => write!(f, "Document not found: {}", id),
            GetDocumentError::RegistryError(msg) => write!(f, "Registry error: {}", msg),
        }
    }
}

impl std::error::Error for GetDocumentError {}

pub struct GetDocumentUseCase {
    registry: Arc<dyn DocumentRegistry>,
}

impl GetDocumentUseCase {
    pub fn new(registry: Arc<dyn DocumentRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, id: Uuid) -> Result<Document, GetDocumentError> {
        self.registry
            .get(id)
            .await
            .map_err(|e| GetDocumentError::RegistryError(e.to_string()))?
            .ok_or(GetDocumentError::NotFound(id))
    }
}
