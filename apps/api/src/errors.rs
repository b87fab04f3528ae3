use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// "No more questions" is deliberately NOT an error anywhere in this crate:
/// selection returns `None` and the session transitions to completed. Only
/// hard failures travel through `AppError`, so callers can always distinguish
/// "you're done" from "something is broken".
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Stage {0} does not exist in the question bank")]
    InvalidStage(u8),

    #[error("An answer evaluation is already in flight for this session")]
    EvaluationInFlight,

    #[error("Evaluation failed transiently: {0}")]
    EvaluationTransient(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidStage(stage) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_STAGE",
                format!("Stage {stage} does not exist in the question bank"),
            ),
            AppError::EvaluationInFlight => (
                StatusCode::CONFLICT,
                "EVALUATION_IN_FLIGHT",
                "An answer is already being evaluated; wait for it to resolve".to_string(),
            ),
            AppError::EvaluationTransient(msg) => {
                tracing::warn!("Transient evaluation failure: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "EVALUATION_TRANSIENT",
                    "The answer evaluator is unavailable; your answer was kept, resubmit"
                        .to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
