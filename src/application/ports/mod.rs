pub mod answer_generator;
pub mod document_registry;
pub mod embedding_provider;
pub mod indexing_queue;
pub mod text_extractor;
pub mod vector_index;

#[cfg(test)]
pub mod test_support;

pub use answer_generator::AnswerGenerator;
pub use document_registry::DocumentRegistry;
pub use embedding_provider::EmbeddingProvider;
pub use indexing_queue::IndexingQueue;
pub use text_extractor::TextExtractor;
pub use vector_index::VectorIndex;
