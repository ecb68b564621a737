/// Error types for the Unlinked API
///
/// Errors are converted to appropriate HTTP responses for API clients.
/// Store-level failures are logged once where the response is rendered and
/// surfaced with a generic body so internal detail never reaches the caller.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    /// Caller-supplied input violates a constraint
    #[error("{0}")]
    Validation(String),

    /// A referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Store unreachable or liveness probe failed
    #[error("Database connection failed: {0}")]
    Connection(String),

    /// A store operation failed for reasons other than the above
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Invalid or missing configuration, startup-only
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // 4xx reasons are for the caller; 5xx detail stays in the logs.
        let message = match self {
            AppError::Validation(_) | AppError::NotFound(_) => self.to_string(),
            AppError::Connection(_) => {
                tracing::error!(error = %self, "service unavailable");
                "Service unavailable".to_string()
            }
            AppError::Database(_) | AppError::Config(_) => {
                tracing::error!(error = %self, "request failed");
                "Internal server error".to_string()
            }
        };

        HttpResponse::build(status).json(serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        }))
    }
}
