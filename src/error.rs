// Error types for the engine and their conversion into HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// Precondition violations raised by the filtering/pagination engine and the
// finance calculator. These never come from I/O.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    #[error("page {requested} is out of range ({total_pages} pages available)")]
    PageOutOfRange { requested: usize, total_pages: usize },

    #[error("loan term must be at least one month")]
    InvalidLoanTerm,

    #[error("invalid amount for {field}: {value}")]
    InvalidAmount { field: &'static str, value: f64 },
}

// Application error type returned by handlers
#[derive(Debug)]
pub enum AppError {
    InternalServerError(anyhow::Error),
    // The backend collaborator could not be reached or returned garbage
    Upstream(anyhow::Error),
    BadRequest(String),
    NotFound(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::InternalServerError(error)
    }
}

impl From<EngineError> for AppError {
    fn from(error: EngineError) -> Self {
        AppError::BadRequest(error.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(e) => {
                tracing::error!("Internal server error: {:?}", e);
                // Don't expose internal details to the client
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            AppError::Upstream(e) => {
                tracing::error!("Backend request failed: {:?}", e);
                (StatusCode::BAD_GATEWAY, "Failed to load data".to_string())
            }
            AppError::BadRequest(message) => {
                tracing::warn!("Bad request: {}", message);
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::NotFound(message) => {
                tracing::debug!("Not found: {}", message);
                (StatusCode::NOT_FOUND, message)
            }
        };

        (status, error_message).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
