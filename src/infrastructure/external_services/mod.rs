pub mod extractors;
pub mod openai_chat;
pub mod openai_embeddings;

pub use extractors::CompositeExtractor;
pub use openai_chat::OpenAiChatGenerator;
pub use openai_embeddings::OpenAiEmbeddingProvider;
