use serde::{Deserialize, Serialize};

use crate::application::ports::vector_index::ScoredChunk;
use crate::application::use_cases::answer_question::AnswerQuestionResponse;
use crate::domain::entities::SourceRef;

#[derive(Debug, Deserialize)]
pub struct ChatRequestDto {
    pub message: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponseDto {
    pub response: String,
    pub sources: Vec<SourceDto>,
    pub confidence: f32,
    pub session_id: String,
    pub processing_time: f64,
}

#[derive(Debug, Serialize)]
pub struct SourceDto {
    pub document: String,
    pub page: i32,
    pub score: f32,
}

impl From<SourceRef> for SourceDto {
    fn from(source: SourceRef) -> Self {
        Self {
            document: source.document,
            page: source.page,
            score: source.score,
        }
    }
}

impl ChatResponseDto {
    pub fn from_response(response: AnswerQuestionResponse, processing_time: f64) -> Self {
        Self {
            response: response.result.response,
            sources: response
                .result
                .sources
                .into_iter()
                .map(SourceDto::from)
                .collect(),
            confidence: response.result.confidence,
            session_id: response.session_id,
            processing_time,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchRequestDto {
    pub query: String,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResultDto {
    pub content: String,
    pub document: String,
    pub page: i32,
    pub score: f32,
}

impl From<ScoredChunk> for SearchResultDto {
    fn from(hit: ScoredChunk) -> Self {
        Self {
            document: hit.document_name().to_string(),
            page: hit.page(),
            score: hit.score,
            content: hit.content,
        }
    }
}
