use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum AppError {
    /// One or more payload fields failed structural validation.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A natural key (email, category name, ISBN) is already taken.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// A payload references an author or category that does not exist.
    #[error("Reference not found: {0}")]
    ReferenceNotFound(String),

    /// Delete blocked because books still reference the row.
    #[error("Has dependents: {0}")]
    HasDependents(String),

    /// Resource not found error.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unexpected persistence failure.
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Client-facing messages for errors the caller can fix.
    pub fn messages(&self) -> Vec<String> {
        match self {
            AppError::Validation(messages) => messages.clone(),
            AppError::DuplicateKey(msg)
            | AppError::ReferenceNotFound(msg)
            | AppError::HasDependents(msg)
            | AppError::NotFound(msg) => vec![msg.clone()],
            _ => vec!["Internal server error".to_string()],
        }
    }

    /// Whether the error stems from caller input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::DuplicateKey(_)
                | AppError::ReferenceNotFound(_)
                | AppError::HasDependents(_)
                | AppError::NotFound(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_)
            | AppError::DuplicateKey(_)
            | AppError::ReferenceNotFound(_)
            | AppError::HasDependents(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if self.is_client_error() {
            tracing::debug!(error = %self, "Request rejected");
        } else {
            tracing::error!(error = %self, "Request error");
        }

        match self {
            AppError::NotFound(msg) => (status, Json(msg)).into_response(),
            other => (status, Json(other.messages())).into_response(),
        }
    }
}

/// Result type alias for the application.
pub type Result<T> = std::result::Result<T, AppError>;
