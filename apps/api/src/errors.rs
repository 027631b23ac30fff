use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] redis::RedisError),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Correlation id attached to 5xx bodies and their log lines.
fn error_id() -> String {
    let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
    let tail = Uuid::new_v4().simple().to_string();
    format!("err-{stamp}-{}", &tail[..6])
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, error_id) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
            }
            AppError::Storage(e) => {
                let id = error_id();
                tracing::error!("[{id}] Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                    Some(id),
                )
            }
            AppError::Archive(msg) => {
                let id = error_id();
                tracing::error!("[{id}] Archive error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ARCHIVE_ERROR",
                    "A document archive error occurred".to_string(),
                    Some(id),
                )
            }
            AppError::Llm(msg) => {
                let id = error_id();
                tracing::error!("[{id}] LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                    Some(id),
                )
            }
            AppError::Internal(e) => {
                let id = error_id();
                tracing::error!("[{id}] Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    Some(id),
                )
            }
        };

        let mut body = json!({
            "error": {
                "code": code,
                "message": message
            }
        });
        if let Some(id) = error_id {
            body["error"]["error_id"] = json!(id);
        }

        (status, Json(body)).into_response()
    }
}
