use std::sync::Arc;

use crate::application::ports::DocumentRegistry;
use crate::domain::entities::Document;

#[derive(Debug)]
pub enum ListDocumentsError {
    RegistryError(String),
}

impl std::fmt::Display for ListDocumentsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListDocumentsError::RegistryError(msg) => write!(f, "Registry error: {}", msg),
        }
    }
}

impl std::error::Error for ListDocumentsError {}

pub struct ListDocumentsUseCase {
    registry: Arc<dyn DocumentRegistry>,
}

impl ListDocumentsUseCase {
    pub fn new(registry: Arc<dyn DocumentRegistry>) -> Self {
        Self { registry }
    }

    /// All documents, newest first.
    pub async fn execute(&self) -> Result<Vec<Document>, ListDocumentsError> {
        self.registry
            .list()
            .await
            .map_err(|e| ListDocumentsError::RegistryError(e.to_string()))
    }
}
