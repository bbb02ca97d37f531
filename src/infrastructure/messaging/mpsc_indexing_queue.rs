use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, mpsc};

use crate::application::ports::indexing_queue::{IndexingJob, IndexingQueue, QueueError};

/// In-process indexing queue over an unbounded tokio channel. The sending
/// half implements the port; the receiving half is handed to the background
/// worker pool.
pub struct MpscIndexingQueue {
    sender: mpsc::UnboundedSender<IndexingJob>,
    depth: Arc<AtomicUsize>,
}

impl MpscIndexingQueue {
    pub fn create_pair() -> (Self, MpscIndexingQueueReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let depth = Arc::new(AtomicUsize::new(0));

        let queue = Self {
            sender,
            depth: depth.clone(),
        };
        let queue_receiver = MpscIndexingQueueReceiver {
            receiver: Mutex::new(receiver),
            depth,
        };

        (queue, queue_receiver)
    }
}

#[async_trait]
impl IndexingQueue for MpscIndexingQueue {
    async fn enqueue(&self, job: IndexingJob) -> Result<(), QueueError> {
        self.sender
            .send(job)
            .map_err(|_| QueueError::ConnectionError("queue receiver dropped".to_string()))?;
        self.depth.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn size(&self) -> Result<usize, QueueError> {
        Ok(self.depth.load(Ordering::SeqCst))
    }
}

/// Receiving half, shared between workers behind an async mutex.
pub struct MpscIndexingQueueReceiver {
    receiver: Mutex<mpsc::UnboundedReceiver<IndexingJob>>,
    depth: Arc<AtomicUsize>,
}

impl MpscIndexingQueueReceiver {
    pub async fn recv(&self) -> Option<IndexingJob> {
        let job = {
            let mut receiver = self.receiver.lock().await;
            receiver.recv().await
        };
        if job.is_some() {
            self.depth.fetch_sub(1, Ordering::SeqCst);
        }
        job
    }
}
