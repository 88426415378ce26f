//! Bridge errors and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use pushgate_protocols::FeedError;
use pushgate_worker::WorkerError;

/// Errors starting the bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to bind: {0}")]
    Bind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Notification not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Worker(#[from] WorkerError),

    #[error(transparent)]
    Feed(#[from] FeedError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::Feed(FeedError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Worker(WorkerError::QueueClosed) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "Request failed");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
