use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use pgvector::{Vector, VectorExpressionMethods};
use uuid::Uuid;

use crate::application::ports::vector_index::{
    ChunkRecord, IndexError, ScoredChunk, VectorIndex,
};
use crate::infrastructure::database::models::{ChunkModel, NewChunkModel};
use crate::infrastructure::database::schema::knowledge_chunks::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

/// Records per insert statement; bounds the size of a single request.
const UPSERT_BATCH_SIZE: usize = 100;

/// pgvector-backed vector index over `knowledge_chunks`.
///
/// The store works in cosine distance (lower = closer); this adapter
/// normalizes everything to a similarity score in [0, 1] where higher is
/// more similar, so callers never see provider-specific score semantics.
pub struct PgVectorIndex {
    pool: DbPool,
    dimension: usize,
}

impl PgVectorIndex {
    pub fn new(pool: DbPool, dimension: usize) -> Self {
        Self { pool, dimension }
    }

    fn check_dimension(&self, vector: &[f32]) -> Result<(), IndexError> {
        if vector.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl VectorIndex for PgVectorIndex {
    async fn upsert(&self, records: &[ChunkRecord]) -> Result<(), IndexError> {
        for record in records {
            self.check_dimension(&record.embedding)?;
        }

        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| IndexError::ConnectionError(e.to_string()))?;

        // One bounded statement per batch; the failing batch index makes a
        // partial failure visible to the caller instead of silently losing
        // records.
        for (batch_index, batch) in records.chunks(UPSERT_BATCH_SIZE).enumerate() {
            let models: Vec<NewChunkModel> = batch.iter().map(NewChunkModel::from).collect();

            diesel::insert_into(knowledge_chunks)
                .values(&models)
                .on_conflict(id)
                .do_update()
                .set((
                    content.eq(excluded(content)),
                    embedding.eq(excluded(embedding)),
                    metadata.eq(excluded(metadata)),
                ))
                .execute(&mut conn)
                .map_err(|e| IndexError::UpsertFailed {
                    batch: batch_index,
                    message: e.to_string(),
                })?;
        }

        Ok(())
    }

    async fn search(
        &self,
        query_vector: &[f32],
        top_k: usize,
        min_score: f32,
    ) -> Result<Vec<ScoredChunk>, IndexError> {
        self.check_dimension(query_vector)?;

        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| IndexError::ConnectionError(e.to_string()))?;

        let query_vec = Vector::from(query_vector.to_vec());
        // similarity = 1 - cosine_distance, so the score floor becomes a
        // distance ceiling.
        let max_distance = f64::from(1.0 - min_score);

        let rows: Vec<(ChunkModel, Option<f64>)> = knowledge_chunks
            .select((
                ChunkModel::as_select(),
                embedding.cosine_distance(query_vec.clone()),
            ))
            .filter(embedding.is_not_null())
            .filter(embedding.cosine_distance(query_vec.clone()).le(max_distance))
            .order(embedding.cosine_distance(query_vec))
            .limit(top_k as i64)
            .load(&mut conn)
            .map_err(|e| IndexError::SearchFailed(e.to_string()))?;

        Ok(rows
            .into_iter()
            .filter_map(|(model, distance)| distance.map(|d| model.into_scored(d)))
            .collect())
    }

    async fn delete_by_document(&self, doc_id: Uuid) -> Result<u64, IndexError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| IndexError::ConnectionError(e.to_string()))?;

        let deleted = diesel::delete(knowledge_chunks.filter(document_id.eq(doc_id)))
            .execute(&mut conn)
            .map_err(|e| IndexError::DeleteFailed(e.to_string()))?;

        Ok(deleted as u64)
    }

    async fn total_chunks(&self) -> Result<i64, IndexError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| IndexError::ConnectionError(e.to_string()))?;

        knowledge_chunks
            .count()
            .get_result(&mut conn)
            .map_err(|e| IndexError::SearchFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dimension_check() {
        // Pool construction needs a live database; the dimension guard is
        // pure and testable on its own.
        let record = ChunkRecord {
            id: Uuid::new_v4(),
            document_id: Uuid::new_v4(),
            content: "text".to_string(),
            embedding: vec![0.1, 0.2, 0.3],
            metadata: json!({}),
        };

        assert_eq!(record.embedding.len(), 3);
        let err = IndexError::DimensionMismatch {
            expected: 3072,
            actual: record.embedding.len(),
        };
        assert!(err.to_string().contains("expected 3072"));
    }
}
