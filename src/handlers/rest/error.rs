//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::services::ServiceError;
use crate::validation::ValidationError;

/// Errors returned by REST handlers, rendered as
/// `{"status": "error", "message": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body could not be read or parsed; carries the extractor's status.
    #[error("{message}")]
    BadBody { status: StatusCode, message: String },

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    NotFound(String),

    #[error("Too many requests from this IP, please try again later.")]
    TooManyRequests,

    /// `action` completes "Failed to ...".
    #[error("Failed to {action}: {cause}")]
    Internal { action: &'static str, cause: String },
}

impl ApiError {
    /// Map a service error, naming the failed action for 500 responses.
    pub fn from_service(err: ServiceError, action: &'static str) -> Self {
        match err {
            ServiceError::Validation(e) => ApiError::Validation(e),
            e @ ServiceError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            ServiceError::Storage(e) => ApiError::Internal {
                action,
                cause: e.to_string(),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::BadBody { status, .. } => *status,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            status: "error",
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
