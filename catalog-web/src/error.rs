//! Error types for catalog-web
//!
//! Validation failures and blocked deletes are not errors: controllers render
//! those as ordinary pages. `ApiError` covers what ends the request.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::upload::UploadError;
use crate::views;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Request-terminating error
#[derive(Debug, Error)]
pub enum ApiError {
    /// Record not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Malformed request (400), e.g. an unreadable multipart body
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unreadable or oversized multipart body
    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    /// catalog-common error (storage faults, vanished records)
    #[error(transparent)]
    Common(#[from] catalog_common::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Multipart(e) => e.status(),
            ApiError::Common(catalog_common::Error::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Common(catalog_common::Error::Database(err))
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::DisallowedExtension(name) => {
                ApiError::BadRequest(format!("Disallowed upload: {}", name))
            }
            UploadError::Io(e) => ApiError::Io(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Faults are logged in full; the page only says something went wrong
        let message = if status.is_server_error() {
            error!("Request failed: {}", self);
            "Something went wrong while handling this request.".to_string()
        } else {
            self.to_string()
        };

        (status, views::error_page(status, &message)).into_response()
    }
}
