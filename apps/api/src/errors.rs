use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::advice::AdviceError;

/// Message shown to the user when no advice provider produced an answer.
pub const ADVICE_UNAVAILABLE_MESSAGE: &str = "AI is currently unavailable. Please try again later.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Advice unavailable")]
    AdviceUnavailable,

    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AdviceError> for AppError {
    fn from(err: AdviceError) -> Self {
        match err {
            AdviceError::MissingConfig(msg) => AppError::MissingConfig(msg),
            AdviceError::Database(e) => AppError::Database(e),
            _ => AppError::AdviceUnavailable,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::AdviceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "ADVICE_UNAVAILABLE",
                ADVICE_UNAVAILABLE_MESSAGE.to_string(),
            ),
            AppError::MissingConfig(msg) => {
                tracing::error!("Missing configuration: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CONFIG_ERROR",
                    msg.clone(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advice_unavailable_maps_to_503() {
        let response = AppError::from(AdviceError::Unavailable).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_missing_config_keeps_specific_message() {
        let err = AppError::from(AdviceError::MissingConfig(
            "OpenAI API key not configured".to_string(),
        ));
        match &err {
            AppError::MissingConfig(msg) => assert_eq!(msg, "OpenAI API key not configured"),
            other => panic!("unexpected variant: {other:?}"),
        }
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_validation_is_bad_request() {
        let response = AppError::Validation("name cannot be empty".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
