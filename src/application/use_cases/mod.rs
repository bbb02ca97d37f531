pub mod answer_question;
pub mod delete_document;
pub mod get_document;
pub mod get_stats;
pub mod list_documents;
pub mod search_chunks;
pub mod submit_document;

pub use answer_question::AnswerQuestionUseCase;
pub use delete_document::DeleteDocumentUseCase;
pub use get_document::GetDocumentUseCase;
pub use get_stats::GetStatsUseCase;
pub use list_documents::ListDocumentsUseCase;
pub use search_chunks::SearchChunksUseCase;
pub use submit_document::SubmitDocumentUseCase;
