pub mod background_indexer;
pub mod mpsc_indexing_queue;

pub use background_indexer::BackgroundIndexer;
pub use mpsc_indexing_queue::{MpscIndexingQueue, MpscIndexingQueueReceiver};
