use std::sync::Arc;

use uuid::Uuid;

use crate::application::services::AnswerService;
use crate::application::services::answer_service::PipelineError;
use crate::domain::entities::QueryResult;

#[derive(Debug)]
pub enum AnswerQuestionError {
    EmptyQuestion,
    Pipeline(PipelineError),
}

impl std::fmt::Display for AnswerQuestionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerQuestionError::EmptyQuestion => write!(f, "Question cannot be empty"),
            AnswerQuestionError::Pipeline(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AnswerQuestionError {}

#[derive(Debug, Clone)]
pub struct AnswerQuestionRequest {
    pub question: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AnswerQuestionResponse {
    pub result: QueryResult,
    pub session_id: String,
}

pub struct AnswerQuestionUseCase {
    answer_service: Arc<AnswerService>,
}

impl AnswerQuestionUseCase {
    pub fn new(answer_service: Arc<AnswerService>) -> Self {
        Self { answer_service }
    }

    pub async fn execute(
        &self,
        request: AnswerQuestionRequest,
    ) -> Result<AnswerQuestionResponse, AnswerQuestionError> {
        if request.question.trim().is_empty() {
            return Err(AnswerQuestionError::EmptyQuestion);
        }

        let result = self
            .answer_service
            .answer(&request.question)
            .await
            .map_err(AnswerQuestionError::Pipeline)?;

        let session_id = request
            .session_id
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(AnswerQuestionResponse { result, session_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::test_support::{CountingGenerator, StaticIndex, StubEmbedder};
    use crate::application::services::ConfigStore;

    fn use_case() -> AnswerQuestionUseCase {
        let service = AnswerService::new(
            Arc::new(StubEmbedder::new(8)),
            Arc::new(StaticIndex::empty()),
            Arc::new(CountingGenerator::new("ignored")),
            Arc::new(ConfigStore::default()),
        );
        AnswerQuestionUseCase::new(Arc::new(service))
    }

    #[tokio::test]
    async fn test_empty_question_rejected() {
        let result = use_case()
            .execute(AnswerQuestionRequest {
                question: "   ".to_string(),
                session_id: None,
            })
            .await;

        assert!(matches!(result, Err(AnswerQuestionError::EmptyQuestion)));
    }

    #[tokio::test]
    async fn test_session_id_is_preserved_or_generated() {
        let response = use_case()
            .execute(AnswerQuestionRequest {
                question: "anything?".to_string(),
                session_id: Some("session-42".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(response.session_id, "session-42");

        let response = use_case()
            .execute(AnswerQuestionRequest {
                question: "anything?".to_string(),
                session_id: None,
            })
            .await
            .unwrap();
        assert!(Uuid::parse_str(&response.session_id).is_ok());
    }
}
