pub mod chat_routes;
pub mod config_routes;
pub mod document_routes;

pub use chat_routes::chat_routes;
pub use config_routes::config_routes;
pub use document_routes::document_routes;
