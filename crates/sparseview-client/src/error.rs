//! Error types for the workspace API client.

use thiserror::Error;

/// Errors produced while talking to the workspace API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure (connection refused, timeout, bad URL, decode).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("server returned {status} for {url}")]
    Status { status: u16, url: String },
}

/// A specialized Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
