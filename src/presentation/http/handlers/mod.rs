pub mod chat_handler;
pub mod config_handler;
pub mod document_handler;

pub use chat_handler::ChatHandler;
pub use config_handler::ConfigHandler;
pub use document_handler::DocumentHandler;
