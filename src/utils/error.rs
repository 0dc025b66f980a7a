//! Error handling for Gridmark operations
//!
//! The inference pass and both renderers are infallible: a malformed
//! marker is ordinary content, a structural miss degrades to a local
//! no-op. Errors exist at the edges only - file I/O and input handling in
//! the CLI and bindings.

use std::fmt;

/// Gridmark error type
#[derive(Debug, Clone)]
pub enum GridmarkError {
    /// Invalid input
    InvalidInput { message: String },
    /// IO error (for file operations)
    IoError { message: String },
    /// Internal error
    InternalError { message: String },
}

impl fmt::Display for GridmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridmarkError::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
            GridmarkError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
            GridmarkError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for GridmarkError {}

impl From<std::io::Error> for GridmarkError {
    fn from(err: std::io::Error) -> Self {
        GridmarkError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for Gridmark operations
pub type GridmarkResult<T> = Result<T, GridmarkError>;

// Convenience constructors
impl GridmarkError {
    pub fn invalid(message: impl Into<String>) -> Self {
        GridmarkError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        GridmarkError::InternalError {
            message: message.into(),
        }
    }
}
