use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::use_cases::submit_document::SubmitDocumentResponse;
use crate::domain::entities::Document;

#[derive(Debug, Serialize)]
pub struct DocumentResponseDto {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub size_bytes: i64,
    pub status: String,
    pub error: Option<String>,
    pub chunk_count: i32,
    pub created_at: DateTime<Utc>,
    pub indexed_at: Option<DateTime<Utc>>,
}

impl From<Document> for DocumentResponseDto {
    fn from(document: Document) -> Self {
        Self {
            id: document.id(),
            name: document.name().to_string(),
            doc_type: document.doc_type().as_str().to_string(),
            size_bytes: document.size_bytes(),
            status: document.status().as_str().to_string(),
            error: document.status().error_message().map(str::to_string),
            chunk_count: document.chunk_count(),
            created_at: document.created_at(),
            indexed_at: document.indexed_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponseDto {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub message: String,
}

impl From<SubmitDocumentResponse> for UploadResponseDto {
    fn from(response: SubmitDocumentResponse) -> Self {
        Self {
            id: response.document_id,
            name: response.name,
            status: response.status.as_str().to_string(),
            message: "Document accepted; indexing runs in the background.".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentListResponseDto {
    pub documents: Vec<DocumentResponseDto>,
}
