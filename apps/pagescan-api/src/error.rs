//! Error types for PageScan API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pagescan_core::AnalysisError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("Unreadable PDF: {0}")]
    UnreadablePdf(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::DocumentOpen(msg) => ApiError::UnreadablePdf(msg),
            AnalysisError::InvalidThreshold(msg) => ApiError::InvalidThreshold(msg),
            AnalysisError::InvalidRange(msg) => ApiError::InvalidRequest(msg),
            other => ApiError::InvalidRequest(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::InvalidThreshold(msg) => {
                (StatusCode::BAD_REQUEST, format!("Invalid threshold: {}", msg))
            }
            ApiError::UnreadablePdf(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Unreadable PDF: {}", msg),
            ),
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
