//! Error types for the review client
//!
//! Every fallible operation in the crate returns [`ClientError`]. Store
//! operations also copy the error's message into the shared error field, so
//! the `Display` text of each variant is what a rendering layer shows.

use thiserror::Error;

/// Client-level error types
#[derive(Error, Debug)]
pub enum ClientError {
    /// Upload endpoint answered with a non-success status
    ///
    /// The message is fixed and never taken from the response body.
    #[error("上传失败")]
    Upload,

    /// Suggestions endpoint answered with a non-success status
    #[error("获取建议失败")]
    Fetch,

    /// Health check could not be completed (transport or decode failure)
    #[error("Health check failed: {0}")]
    HealthCheck(String),

    /// HTTP transport failure (connection refused, timeout, ...)
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A success response whose body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Upload file could not be read from disk
    #[error("Failed to read upload file: {0}")]
    Io(#[from] std::io::Error),

    /// Expert id outside the three known categories
    #[error("Unknown expert id: {0}")]
    UnknownExpert(u8),

    /// Configuration value is invalid
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ClientError>;
