pub mod answer_service;
pub mod chunker;
pub mod config_store;
pub mod indexing_service;

pub use answer_service::AnswerService;
pub use chunker::TextChunker;
pub use config_store::ConfigStore;
pub use indexing_service::IndexingService;
