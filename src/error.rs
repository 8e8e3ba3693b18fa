//! Error types for the PTI service
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, thiserror::Error)]
pub enum PtiError {
    #[error("Invalid calculation request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Calculation produced a non-finite value: {field}")]
    NonFiniteResult { field: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
