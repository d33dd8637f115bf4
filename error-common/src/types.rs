use thiserror::Error;

use crate::codes;

/// Error enum for process-level failures
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Socket binding and network errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// HTTP server runtime errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Internal system errors
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServiceError {
    /// Stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::ConfigError(_) => codes::configuration::INVALID_CONFIG,
            ServiceError::NetworkError(_) => codes::server::NETWORK_FAILURE,
            ServiceError::ServerError(_) => codes::server::SERVE_FAILURE,
            ServiceError::InternalError(_) => codes::server::INTERNAL,
        }
    }
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Log an error with its code
pub fn log_error(context: &str, error: &ServiceError) {
    tracing::error!(
        context = context,
        error_code = error.code(),
        error = %error,
        "Service error occurred"
    );
}
