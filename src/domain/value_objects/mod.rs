pub mod document_status;
pub mod document_type;
pub mod rag_config;

pub use document_status::DocumentStatus;
pub use document_type::DocumentType;
pub use rag_config::{ConfigError, ConfigUpdate, RagConfig};
