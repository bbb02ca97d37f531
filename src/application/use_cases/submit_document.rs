use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::application::ports::indexing_queue::IndexingJob;
use crate::application::ports::{DocumentRegistry, IndexingQueue};
use crate::domain::entities::Document;
use crate::domain::value_objects::{DocumentStatus, DocumentType};

#[derive(Debug)]
pub enum SubmitDocumentError {
    UnsupportedFileType(String),
    EmptyFile,
    RegistryError(String),
    QueueError(String),
}

impl std::fmt::Display for SubmitDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitDocumentError::UnsupportedFileType(msg) => write!(f, "{}", msg),
            SubmitDocumentError::EmptyFile => write!(f, "Uploaded file is empty"),
            SubmitDocumentError::RegistryError(msg) => write!(f, "Registry error: {}", msg),
            SubmitDocumentError::QueueError(msg) => write!(f, "Queue error: {}", msg),
        }
    }
}

impl std::error::Error for SubmitDocumentError {}

#[derive(Debug, Clone)]
pub struct SubmitDocumentRequest {
    pub file_name: String,
    pub file_data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct SubmitDocumentResponse {
    pub document_id: Uuid,
    pub name: String,
    pub status: DocumentStatus,
}

/// Upload-and-index entry point. Rejects unsupported extensions before any
/// processing, records the document as `INDEXING`, enqueues the actual work
/// and returns immediately; chunking and embedding happen off the request
/// path.
pub struct SubmitDocumentUseCase {
    registry: Arc<dyn DocumentRegistry>,
    queue: Arc<dyn IndexingQueue>,
}

impl SubmitDocumentUseCase {
    pub fn new(registry: Arc<dyn DocumentRegistry>, queue: Arc<dyn IndexingQueue>) -> Self {
        Self { registry, queue }
    }

    pub async fn execute(
        &self,
        request: SubmitDocumentRequest,
    ) -> Result<SubmitDocumentResponse, SubmitDocumentError> {
        let doc_type = DocumentType::from_filename(&request.file_name)
            .map_err(SubmitDocumentError::UnsupportedFileType)?;

        if request.file_data.is_empty() {
            return Err(SubmitDocumentError::EmptyFile);
        }

        let document = Document::new(
            request.file_name.clone(),
            doc_type,
            request.file_data.len() as i64,
        );

        self.registry
            .create(&document)
            .await
            .map_err(|e| SubmitDocumentError::RegistryError(e.to_string()))?;

        self.queue
            .enqueue(IndexingJob {
                document_id: document.id(),
                document_name: document.name().to_string(),
                doc_type,
                payload: request.file_data,
            })
            .await
            .map_err(|e| SubmitDocumentError::QueueError(e.to_string()))?;

        info!(
            document_id = %document.id(),
            name = document.name(),
            "document accepted for indexing"
        );

        Ok(SubmitDocumentResponse {
            document_id: document.id(),
            name: document.name().to_string(),
            status: document.status().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::indexing_queue::QueueError;
    use crate::application::ports::test_support::InMemoryRegistry;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingQueue {
        jobs: Mutex<Vec<IndexingJob>>,
    }

    impl RecordingQueue {
        fn new() -> Self {
            Self {
                jobs: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl IndexingQueue for RecordingQueue {
        async fn enqueue(&self, job: IndexingJob) -> Result<(), QueueError> {
            self.jobs.lock().unwrap().push(job);
            Ok(())
        }

        async fn size(&self) -> Result<usize, QueueError> {
            Ok(self.jobs.lock().unwrap().len())
        }
    }

    #[tokio::test]
    async fn test_accepted_upload_is_registered_and_enqueued() {
        let registry = Arc::new(InMemoryRegistry::new());
        let queue = Arc::new(RecordingQueue::new());
        let use_case = SubmitDocumentUseCase::new(registry.clone(), queue.clone());

        let response = use_case
            .execute(SubmitDocumentRequest {
                file_name: "handbook.pdf".to_string(),
                file_data: vec![1, 2, 3],
            })
            .await
            .unwrap();

        assert!(response.status.is_indexing());

        let stored = registry.get(response.document_id).await.unwrap().unwrap();
        assert!(stored.status().is_indexing());
        assert_eq!(stored.size_bytes(), 3);

        let jobs = queue.jobs.lock().unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].document_id, response.document_id);
        assert_eq!(jobs[0].doc_type, DocumentType::Pdf);
    }

    #[tokio::test]
    async fn test_unsupported_extension_rejected_before_any_processing() {
        let registry = Arc::new(InMemoryRegistry::new());
        let queue = Arc::new(RecordingQueue::new());
        let use_case = SubmitDocumentUseCase::new(registry.clone(), queue.clone());

        let result = use_case
            .execute(SubmitDocumentRequest {
                file_name: "malware.exe".to_string(),
                file_data: vec![1, 2, 3],
            })
            .await;

        assert!(matches!(
            result,
            Err(SubmitDocumentError::UnsupportedFileType(_))
        ));
        assert!(registry.list().await.unwrap().is_empty());
        assert_eq!(queue.size().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_file_rejected() {
        let use_case = SubmitDocumentUseCase::new(
            Arc::new(InMemoryRegistry::new()),
            Arc::new(RecordingQueue::new()),
        );

        let result = use_case
            .execute(SubmitDocumentRequest {
                file_name: "empty.txt".to_string(),
                file_data: Vec::new(),
            })
            .await;

        assert!(matches!(result, Err(SubmitDocumentError::EmptyFile)));
    }
}
