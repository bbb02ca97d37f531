use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug)]
pub enum IndexError {
    UpsertFailed { batch: usize, message: String },
    SearchFailed(String),
    DeleteFailed(String),
    DimensionMismatch { expected: usize, actual: usize },
    ConnectionError(String),
}

impl std::fmt::Display for IndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexError::UpsertFailed { batch, message } => {
                write!(f, "Upsert failed at batch {}: {}", batch, message)
            }
            IndexError::SearchFailed(msg) => write!(f, "Search failed: {}", msg),
            IndexError::DeleteFailed(msg) => write!(f, "Delete failed: {}", msg),
            IndexError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Vector dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
            IndexError::ConnectionError(msg) => write!(f, "Index connection error: {}", msg),
        }
    }
}

impl std::error::Error for IndexError {}

/// One vector plus its chunk payload, as stored in the index.
#[derive(Debug, Clone)]
pub struct ChunkRecord {
    pub id: Uuid,
    pub document_id: Uuid,
    pub content: String,
    pub embedding: Vec<f32>,
    pub metadata: Value,
}

/// A search hit. `score` is a normalized similarity in [0, 1], higher is
/// more similar, regardless of what the underlying store reports.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub content: String,
    pub metadata: Value,
    pub score: f32,
}

impl ScoredChunk {
    pub fn document_name(&self) -> &str {
        self.metadata
            .get("document_name")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
    }

    pub fn page(&self) -> i32 {
        self.metadata
            .get("page")
            .and_then(Value::as_i64)
            .unwrap_or(1) as i32
    }
}

/// Wraps the remote vector store. Upserts are batched so no single request
/// grows unbounded; a failed batch is reported by position rather than
/// silently dropped.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn upsert(&self, records: &[ChunkRecord]) -> Result<(), IndexError>;

    /// Returns up to `top_k` hits with `score >= min_score`, sorted by score
    /// descending.
    async fn search(
        &self,
        query_vector: &[f32],
        top_k: usize,
        min_score: f32,
    ) -> Result<Vec<ScoredChunk>, IndexError>;

    /// Removes every chunk vector belonging to the document. Returns the
    /// number of vectors removed. Leaving stale vectors behind after a
    /// document deletion is a data-integrity bug, not a best-effort miss.
    async fn delete_by_document(&self, document_id: Uuid) -> Result<u64, IndexError>;

    async fn total_chunks(&self) -> Result<i64, IndexError>;
}
