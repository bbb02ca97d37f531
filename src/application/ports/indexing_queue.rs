use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::value_objects::DocumentType;

#[derive(Debug)]
pub enum QueueError {
    ConnectionError(String),
    InvalidJob(String),
}

impl std::fmt::Display for QueueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueError::ConnectionError(msg) => write!(f, "Queue connection error: {}", msg),
            QueueError::InvalidJob(msg) => write!(f, "Invalid job: {}", msg),
        }
    }
}

impl std::error::Error for QueueError {}

/// One pending document-indexing run. The registry row already exists in
/// `INDEXING` state when the job is enqueued.
#[derive(Debug, Clone)]
pub struct IndexingJob {
    pub document_id: Uuid,
    pub document_name: String,
    pub doc_type: DocumentType,
    pub payload: Vec<u8>,
}

/// Fire-and-forget handoff between the upload entry point and the
/// background workers. The core itself only enqueues; draining is the
/// worker pool's business.
#[async_trait]
pub trait IndexingQueue: Send + Sync {
    async fn enqueue(&self, job: IndexingJob) -> Result<(), QueueError>;

    async fn size(&self) -> Result<usize, QueueError>;
}
