use std::sync::Arc;

use tracing::{error, info, warn};

use crate::application::ports::DocumentRegistry;
use crate::application::ports::indexing_queue::IndexingJob;
use crate::application::services::IndexingService;
use crate::infrastructure::messaging::MpscIndexingQueueReceiver;

/// Drains the indexing queue with a small worker pool. Documents own
/// disjoint id/chunk namespaces, so several can index concurrently without
/// interference; a failed job marks its document FAILED and never takes the
/// process down.
pub struct BackgroundIndexer {
    job_receiver: Arc<MpscIndexingQueueReceiver>,
    registry: Arc<dyn DocumentRegistry>,
    indexing_service: Arc<IndexingService>,
    worker_count: usize,
}

impl BackgroundIndexer {
    pub fn new(
        job_receiver: Arc<MpscIndexingQueueReceiver>,
        registry: Arc<dyn DocumentRegistry>,
        indexing_service: Arc<IndexingService>,
    ) -> Self {
        Self {
            job_receiver,
            registry,
            indexing_service,
            worker_count: 3,
        }
    }

    pub fn with_worker_count(mut self, count: usize) -> Self {
        self.worker_count = count.max(1);
        self
    }

    pub async fn start(&self) {
        info!(workers = self.worker_count, "starting background indexer");

        let mut handles = Vec::new();
        for worker_id in 0..self.worker_count {
            let worker = self.clone_for_worker();
            handles.push(tokio::spawn(async move {
                worker.worker_loop(worker_id).await;
            }));
        }

        for (worker_id, handle) in handles.into_iter().enumerate() {
            if let Err(e) = handle.await {
                error!(worker_id, error = %e, "indexing worker panicked");
            }
        }

        info!("background indexer stopped");
    }

    async fn worker_loop(&self, worker_id: usize) {
        info!(worker_id, "indexing worker started");

        while let Some(job) = self.job_receiver.recv().await {
            info!(
                worker_id,
                document_id = %job.document_id,
                document_name = %job.document_name,
                "processing indexing job"
            );
            self.process_job(job).await;
        }

        info!(worker_id, "indexing worker stopped, queue closed");
    }

    async fn process_job(&self, job: IndexingJob) {
        let document = match self.registry.get(job.document_id).await {
            Ok(Some(document)) => document,
            Ok(None) => {
                warn!(
                    document_id = %job.document_id,
                    "indexing job references a document that no longer exists"
                );
                return;
            }
            Err(e) => {
                error!(
                    document_id = %job.document_id,
                    error = %e,
                    "failed to load document for indexing job"
                );
                return;
            }
        };

        // Errors are already recorded on the document (status FAILED) and
        // logged by the service; nothing propagates past the worker.
        let _ = self
            .indexing_service
            .index_document(&document, &job.payload)
            .await;
    }

    fn clone_for_worker(&self) -> Self {
        Self {
            job_receiver: self.job_receiver.clone(),
            registry: self.registry.clone(),
            indexing_service: self.indexing_service.clone(),
            worker_count: self.worker_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::test_support::{
        InMemoryIndex, InMemoryRegistry, StaticExtractor, StubEmbedder,
    };
    use crate::application::ports::{IndexingQueue, VectorIndex};
    use crate::application::services::ConfigStore;
    use crate::domain::entities::Document;
    use crate::domain::value_objects::DocumentType;
    use crate::infrastructure::messaging::MpscIndexingQueue;
    use std::time::Duration;

    #[tokio::test]
    async fn test_enqueued_document_ends_up_indexed() {
        let registry = Arc::new(InMemoryRegistry::new());
        let index = Arc::new(InMemoryIndex::new());
        let indexing_service = Arc::new(IndexingService::new(
            Arc::new(StaticExtractor::flat("background indexed text".to_string())),
            Arc::new(StubEmbedder::new(8)),
            index.clone(),
            registry.clone(),
            Arc::new(ConfigStore::default()),
        ));

        let (queue, receiver) = MpscIndexingQueue::create_pair();
        let indexer = BackgroundIndexer::new(
            Arc::new(receiver),
            registry.clone(),
            indexing_service,
        )
        .with_worker_count(1);

        let document = Document::new("note.txt".to_string(), DocumentType::Txt, 23);
        registry.create(&document).await.unwrap();
        queue
            .enqueue(crate::application::ports::indexing_queue::IndexingJob {
                document_id: document.id(),
                document_name: document.name().to_string(),
                doc_type: document.doc_type(),
                payload: b"background indexed text".to_vec(),
            })
            .await
            .unwrap();

        // Closing the sender lets the worker loop drain and exit.
        drop(queue);
        tokio::time::timeout(Duration::from_secs(5), indexer.start())
            .await
            .unwrap();

        let stored = registry.get(document.id()).await.unwrap().unwrap();
        assert!(stored.is_indexed());
        assert!(index.total_chunks().await.unwrap() > 0);
    }
}
