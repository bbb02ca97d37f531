use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::collections::HashMap;
use uuid::Uuid;

use crate::application::ports::document_registry::{DocumentRegistry, RegistryError};
use crate::domain::entities::Document;
use crate::domain::value_objects::DocumentStatus;
use crate::infrastructure::database::models::{
    DocumentModel, DocumentStatusChangeset, NewDocumentModel,
};
use crate::infrastructure::database::schema::knowledge_documents::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresDocumentRegistry {
    pool: DbPool,
}

impl PostgresDocumentRegistry {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRegistry for PostgresDocumentRegistry {
    async fn create(&self, document: &Document) -> Result<(), RegistryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RegistryError::DatabaseError(e.to_string()))?;

        let new_document = NewDocumentModel::from(document);

        diesel::insert_into(knowledge_documents)
            .values(&new_document)
            .execute(&mut conn)
            .map_err(|e| RegistryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn update_status(
        &self,
        document_id: Uuid,
        new_status: &DocumentStatus,
        new_chunk_count: Option<i32>,
        new_indexed_at: Option<DateTime<Utc>>,
    ) -> Result<(), RegistryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RegistryError::DatabaseError(e.to_string()))?;

        let changeset = DocumentStatusChangeset {
            status: new_status.as_str().to_string(),
            error_message: new_status.error_message().map(str::to_string),
            chunk_count: new_chunk_count,
            indexed_at: new_indexed_at,
        };

        let updated = diesel::update(knowledge_documents.find(document_id))
            .set(&changeset)
            .execute(&mut conn)
            .map_err(|e| RegistryError::DatabaseError(e.to_string()))?;

        if updated == 0 {
            return Err(RegistryError::NotFound(document_id));
        }

        Ok(())
    }

    async fn get(&self, document_id: Uuid) -> Result<Option<Document>, RegistryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RegistryError::DatabaseError(e.to_string()))?;

        let result = knowledge_documents
            .find(document_id)
            .first::<DocumentModel>(&mut conn)
            .optional()
            .map_err(|e| RegistryError::DatabaseError(e.to_string()))?;

        match result {
            Some(model) => {
                let document =
                    Document::try_from(model).map_err(RegistryError::ValidationError)?;
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Document>, RegistryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RegistryError::DatabaseError(e.to_string()))?;

        let models = knowledge_documents
            .order(created_at.desc())
            .load::<DocumentModel>(&mut conn)
            .map_err(|e| RegistryError::DatabaseError(e.to_string()))?;

        models
            .into_iter()
            .map(|model| Document::try_from(model).map_err(RegistryError::ValidationError))
            .collect()
    }

    async fn delete(&self, document_id: Uuid) -> Result<bool, RegistryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RegistryError::DatabaseError(e.to_string()))?;

        let deleted_count = diesel::delete(knowledge_documents.find(document_id))
            .execute(&mut conn)
            .map_err(|e| RegistryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count > 0)
    }

    async fn count_by_status(&self) -> Result<HashMap<String, i64>, RegistryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RegistryError::DatabaseError(e.to_string()))?;

        let rows: Vec<(String, i64)> = knowledge_documents
            .group_by(status)
            .select((status, diesel::dsl::count_star()))
            .load(&mut conn)
            .map_err(|e| RegistryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().collect())
    }
}
