use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::answer_question::{
    AnswerQuestionError, AnswerQuestionRequest,
};
use crate::application::use_cases::search_chunks::{SearchChunksError, SearchChunksRequest};
use crate::application::use_cases::{AnswerQuestionUseCase, SearchChunksUseCase};
use crate::presentation::http::dto::{
    ApiResponse, ChatRequestDto, ChatResponseDto, SearchRequestDto, SearchResultDto,
};

pub struct ChatHandler {
    answer_use_case: Arc<AnswerQuestionUseCase>,
    search_use_case: Arc<SearchChunksUseCase>,
}

impl ChatHandler {
    pub fn new(
        answer_use_case: Arc<AnswerQuestionUseCase>,
        search_use_case: Arc<SearchChunksUseCase>,
    ) -> Self {
        Self {
            answer_use_case,
            search_use_case,
        }
    }

    pub async fn chat(
        State(handler): State<Arc<ChatHandler>>,
        Json(request): Json<ChatRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let start_time = std::time::Instant::now();

        let result = handler
            .answer_use_case
            .execute(AnswerQuestionRequest {
                question: request.message,
                session_id: request.session_id,
            })
            .await;

        match result {
            Ok(response) => {
                let processing_time =
                    (start_time.elapsed().as_secs_f64() * 1000.0).round() / 1000.0;
                let dto = ChatResponseDto::from_response(response, processing_time);
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(AnswerQuestionError::EmptyQuestion) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "EMPTY_QUESTION",
                    "Message cannot be empty".to_string(),
                )),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("QUERY_FAILED", e.to_string())),
            )),
        }
    }

    pub async fn search(
        State(handler): State<Arc<ChatHandler>>,
        Json(request): Json<SearchRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let result = handler
            .search_use_case
            .execute(SearchChunksRequest {
                query: request.query,
                top_k: request.top_k,
            })
            .await;

        match result {
            Ok(hits) => {
                let results: Vec<SearchResultDto> =
                    hits.into_iter().map(SearchResultDto::from).collect();
                Ok((StatusCode::OK, Json(ApiResponse::success(results))))
            }
            Err(SearchChunksError::EmptyQuery) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "EMPTY_QUERY",
                    "Query cannot be empty".to_string(),
                )),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("SEARCH_FAILED", e.to_string())),
            )),
        }
    }
}
