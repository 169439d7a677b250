//! Error types for the student API
//!
//! Provides unified error handling using thiserror. Every error renders as
//! a JSON object with a single `message` field.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{FormRejection, JsonRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::responses::{MessageResponse, NOT_FOUND};
use crate::repository::RepositoryError;

// == API Error Enum ==
/// Unified error type for the HTTP layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No row matched the requested identifier
    #[error("{0}")]
    NotFound(String),

    /// Any failure reported by the store driver, message kept verbatim
    #[error("{0}")]
    Database(String),

    /// Request body could not be read
    #[error("{0}")]
    BadRequest(String),

    /// Filesystem failure while storing an upload
    #[error("{0}")]
    Io(String),
}

impl ApiError {
    /// The not-found error used by the student routes.
    pub fn student_not_found() -> Self {
        ApiError::NotFound(NOT_FOUND.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) | ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        ApiError::Database(err.message().to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::BadRequest(err.body_text())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Io(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, "Request failed: {}", self);
        } else {
            warn!(%status, "Request rejected: {}", self);
        }

        (status, Json(MessageResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the student API.
pub type Result<T> = std::result::Result<T, ApiError>;
