//! Error types for sparseview.

use thiserror::Error;

/// The main error type for sparseview operations.
#[derive(Error, Debug)]
pub enum SparseviewError {
    /// Sparseview has not been initialized.
    #[error("sparseview not initialized - call sparseview::init() first")]
    NotInitialized,

    /// Sparseview has already been initialized.
    #[error("sparseview already initialized")]
    AlreadyInitialized,

    /// A structure with the given name already exists.
    #[error("structure '{0}' already exists")]
    StructureExists(String),

    /// A structure with the given name was not found.
    #[error("structure '{0}' not found")]
    StructureNotFound(String),

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Rendering error.
    #[error("render error: {0}")]
    RenderError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for sparseview operations.
pub type Result<T> = std::result::Result<T, SparseviewError>;
