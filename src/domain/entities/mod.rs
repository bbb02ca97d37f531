pub mod chunk;
pub mod document;
pub mod query_result;

pub use chunk::Chunk;
pub use document::Document;
pub use query_result::{QueryResult, SourceRef};
