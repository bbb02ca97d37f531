use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::delete_document::DeleteDocumentError;
use crate::application::use_cases::get_document::GetDocumentError;
use crate::application::use_cases::submit_document::{
    SubmitDocumentError, SubmitDocumentRequest,
};
use crate::application::use_cases::{
    DeleteDocumentUseCase, GetDocumentUseCase, ListDocumentsUseCase, SubmitDocumentUseCase,
};
use crate::presentation::http::dto::{
    ApiResponse, DocumentListResponseDto, DocumentResponseDto, UploadResponseDto,
};

pub struct DocumentHandler {
    submit_use_case: Arc<SubmitDocumentUseCase>,
    list_use_case: Arc<ListDocumentsUseCase>,
    get_use_case: Arc<GetDocumentUseCase>,
    delete_use_case: Arc<DeleteDocumentUseCase>,
}

impl DocumentHandler {
    pub fn new(
        submit_use_case: Arc<SubmitDocumentUseCase>,
        list_use_case: Arc<ListDocumentsUseCase>,
        get_use_case: Arc<GetDocumentUseCase>,
        delete_use_case: Arc<DeleteDocumentUseCase>,
    ) -> Self {
        Self {
            submit_use_case,
            list_use_case,
            get_use_case,
            delete_use_case,
        }
    }

    pub async fn upload_document(
        State(handler): State<Arc<DocumentHandler>>,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, StatusCode> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?
        {
            let Some(file_name) = field.file_name().map(str::to_string) else {
                continue;
            };

            let data = field
                .bytes()
                .await
                .map_err(|_| StatusCode::BAD_REQUEST)?
                .to_vec();

            let result = handler
                .submit_use_case
                .execute(SubmitDocumentRequest {
                    file_name,
                    file_data: data,
                })
                .await;

            return match result {
                Ok(response) => Ok((
                    StatusCode::ACCEPTED,
                    Json(ApiResponse::success(UploadResponseDto::from(response))),
                )),
                Err(e @ SubmitDocumentError::UnsupportedFileType(_)) => Ok((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error("UNSUPPORTED_FILE_TYPE", e.to_string())),
                )),
                Err(e @ SubmitDocumentError::EmptyFile) => Ok((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error("EMPTY_FILE", e.to_string())),
                )),
                Err(e) => Ok((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error("UPLOAD_FAILED", e.to_string())),
                )),
            };
        }

        Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "NO_FILE_PROVIDED",
                "No file provided in the request".to_string(),
            )),
        ))
    }

    pub async fn list_documents(
        State(handler): State<Arc<DocumentHandler>>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.list_use_case.execute().await {
            Ok(documents) => {
                let dto = DocumentListResponseDto {
                    documents: documents
                        .into_iter()
                        .map(DocumentResponseDto::from)
                        .collect(),
                };
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("LIST_FAILED", e.to_string())),
            )),
        }
    }

    pub async fn get_document(
        State(handler): State<Arc<DocumentHandler>>,
        Path(document_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.get_use_case.execute(document_id).await {
            Ok(document) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(DocumentResponseDto::from(document))),
            )),
            Err(e @ GetDocumentError::NotFound(_)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("DOCUMENT_NOT_FOUND", e.to_string())),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("GET_FAILED", e.to_string())),
            )),
        }
    }

    pub async fn delete_document(
        State(handler): State<Arc<DocumentHandler>>,
        Path(document_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.delete_use_case.execute(document_id).await {
            Ok(()) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(
                    "Document deleted successfully".to_string(),
                )),
            )),
            Err(e @ DeleteDocumentError::NotFound(_)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("DOCUMENT_NOT_FOUND", e.to_string())),
            )),
            Err(e @ DeleteDocumentError::Inconsistency(_)) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("DELETE_INCONSISTENT", e.to_string())),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("DELETE_FAILED", e.to_string())),
            )),
        }
    }
}
