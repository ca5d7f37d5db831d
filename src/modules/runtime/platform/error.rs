//! Integration platform error types

use thiserror::Error;

/// Errors that can occur while calling the integration platform
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request to '{path}' timed out")]
    Timeout { path: String },

    #[error("Tool execution failed: {message}")]
    ToolFailed { message: String },

    #[error("Unexpected response: {reason}")]
    Decode { reason: String },

    #[error("HTTP error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },
}
