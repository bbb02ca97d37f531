pub mod pgvector_index;
pub mod postgres_registry;

pub use pgvector_index::PgVectorIndex;
pub use postgres_registry::PostgresDocumentRegistry;
