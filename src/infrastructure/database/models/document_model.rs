use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::domain::value_objects::{DocumentStatus, DocumentType};
use crate::infrastructure::database::schema::knowledge_documents;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = knowledge_documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentModel {
    pub id: Uuid,
    pub name: String,
    pub doc_type: String,
    pub size_bytes: i64,
    pub status: String,
    pub error_message: Option<String>,
    pub chunk_count: i32,
    pub created_at: DateTime<Utc>,
    pub indexed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = knowledge_documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentModel {
    pub id: Uuid,
    pub name: String,
    pub doc_type: String,
    pub size_bytes: i64,
    pub status: String,
    pub error_message: Option<String>,
    pub chunk_count: i32,
    pub created_at: DateTime<Utc>,
    pub indexed_at: Option<DateTime<Utc>>,
}

/// Status columns updated together; `None` fields are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = knowledge_documents)]
pub struct DocumentStatusChangeset {
    pub status: String,
    pub error_message: Option<String>,
    pub chunk_count: Option<i32>,
    pub indexed_at: Option<DateTime<Utc>>,
}

impl From<&Document> for NewDocumentModel {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id(),
            name: document.name().to_string(),
            doc_type: document.doc_type().as_str().to_string(),
            size_bytes: document.size_bytes(),
            status: document.status().as_str().to_string(),
            error_message: document.status().error_message().map(str::to_string),
            chunk_count: document.chunk_count(),
            created_at: document.created_at(),
            indexed_at: document.indexed_at(),
        }
    }
}

impl TryFrom<DocumentModel> for Document {
    type Error = String;

    fn try_from(model: DocumentModel) -> Result<Self, Self::Error> {
        let doc_type = DocumentType::from_extension(&model.doc_type)?;
        let status = DocumentStatus::from_str_with_error(&model.status, model.error_message)?;

        Ok(Document::from_parts(
            model.id,
            model.name,
            doc_type,
            model.size_bytes,
            status,
            model.chunk_count,
            model.created_at,
            model.indexed_at,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_model() {
        let document = Document::new("report.pdf".to_string(), DocumentType::Pdf, 4096);
        let model = NewDocumentModel::from(&document);

        assert_eq!(model.status, "INDEXING");
        assert_eq!(model.doc_type, "pdf");

        let loaded = Document::try_from(DocumentModel {
            id: model.id,
            name: model.name,
            doc_type: model.doc_type,
            size_bytes: model.size_bytes,
            status: model.status,
            error_message: model.error_message,
            chunk_count: model.chunk_count,
            created_at: model.created_at,
            indexed_at: model.indexed_at,
        })
        .unwrap();

        assert_eq!(loaded, document);
    }

    #[test]
    fn test_failed_status_carries_error_message() {
        let mut document = Document::new("broken.txt".to_string(), DocumentType::Txt, 10);
        document.mark_failed("provider exploded".to_string()).unwrap();

        let model = NewDocumentModel::from(&document);
        assert_eq!(model.status, "FAILED");
        assert_eq!(model.error_message.as_deref(), Some("provider exploded"));
    }

    #[test]
    fn test_unknown_stored_type_is_an_error() {
        let model = DocumentModel {
            id: Uuid::new_v4(),
            name: "x".to_string(),
            doc_type: "tar".to_string(),
            size_bytes: 0,
            status: "INDEXED".to_string(),
            error_message: None,
            chunk_count: 0,
            created_at: Utc::now(),
            indexed_at: None,
        };

        assert!(Document::try_from(model).is_err());
    }
}
