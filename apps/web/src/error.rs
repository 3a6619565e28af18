//! Error handling for the web front-end.
//!
//! Validation problems never reach this type: the convert handler re-renders
//! the form with a message instead. `AppError` covers transport and I/O
//! failures the user cannot fix by editing their input.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Multipart(_) => StatusCode::BAD_REQUEST,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!("request failed: {}", self);
        (status, self.to_string()).into_response()
    }
}

/// Result type alias for handler operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_are_internal_server_errors() {
        let error = AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn io_error_display() {
        let error = AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert_eq!(error.to_string(), "I/O error: disk full");
    }
}
