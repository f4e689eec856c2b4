use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::backend::BackendError;
use crate::notifications::repository::RepositoryError;
use crate::resume::parser::{ResumeParseError, StrategyFailure};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cannot score against an empty requirement set: {0}")]
    DivisionGuard(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Resume parsing failed after {} strategies", .0.len())]
    ResumeParse(Vec<StrategyFailure>),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// `Json` extractor whose rejections use the `AppError` envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            // The registration backend reports form problems as `{message}` with a 4xx.
            BackendError::Rejected { status, message } if (400..500).contains(&status) => {
                AppError::Validation(message)
            }
            other => AppError::Backend(other.to_string()),
        }
    }
}

impl From<ResumeParseError> for AppError {
    fn from(err: ResumeParseError) -> Self {
        match err {
            ResumeParseError::Cancelled => AppError::Cancelled,
            ResumeParseError::Exhausted(failures) => AppError::ResumeParse(failures),
            ResumeParseError::NoStrategies => {
                AppError::Internal(anyhow::anyhow!("resume parser has no strategies configured"))
            }
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Internal(anyhow::anyhow!(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details: Option<Value> = None;

        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::DivisionGuard(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "DIVISION_GUARD",
                msg.clone(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Backend(msg) => {
                tracing::error!("Backend error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "BACKEND_ERROR",
                    "The upstream backend request failed".to_string(),
                )
            }
            AppError::ResumeParse(failures) => {
                tracing::error!("Resume parsing failed: {failures:?}");
                details = Some(json!({ "attempts": failures }));
                (
                    StatusCode::BAD_GATEWAY,
                    "RESUME_PARSE_FAILED",
                    "Failed to parse resume. Please try again later.".to_string(),
                )
            }
            AppError::Cancelled => (
                // 499: client closed request
                StatusCode::from_u16(499).unwrap_or(StatusCode::BAD_REQUEST),
                "CANCELLED",
                "The request was cancelled".to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
