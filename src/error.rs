//! Error types for the Stemma library.
//!
//! All errors are represented by the [`StemmaError`] enum. Constructor helpers
//! such as [`StemmaError::invalid_argument`] keep call sites short.
//!
//! # Examples
//!
//! ```
//! use stemma::error::{StemmaError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(StemmaError::invalid_argument("max must be >= min"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Stemma operations.
#[derive(Error, Debug)]
pub enum StemmaError {
    /// I/O errors raised while reading a character input or a word list.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis errors (malformed input text, tokenizer failures)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// A stage parameter is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Named configuration errors (unknown keys, unparsable values).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A bundled or default resource could not be loaded.
    #[error("Resource error: {0}")]
    Resource(String),

    /// The stream protocol was violated by the caller.
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// Mutation attempted on a read-only container.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with StemmaError.
pub type Result<T> = std::result::Result<T, StemmaError>;

impl StemmaError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        StemmaError::Analysis(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        StemmaError::InvalidArgument(msg.into())
    }

    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        StemmaError::Configuration(msg.into())
    }

    /// Create a new resource error.
    pub fn resource<S: Into<String>>(msg: S) -> Self {
        StemmaError::Resource(msg.into())
    }

    /// Create a new illegal state error.
    pub fn illegal_state<S: Into<String>>(msg: S) -> Self {
        StemmaError::IllegalState(msg.into())
    }

    /// Create a new unsupported operation error.
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        StemmaError::UnsupportedOperation(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        StemmaError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = StemmaError::invalid_argument("min must be <= max");
        assert_eq!(error.to_string(), "Invalid argument: min must be <= max");

        let error = StemmaError::configuration("Unknown parameters: [foo]");
        assert_eq!(error.to_string(), "Configuration error: Unknown parameters: [foo]");

        let error = StemmaError::illegal_state("reset() not called");
        assert_eq!(error.to_string(), "Illegal state: reset() not called");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = StemmaError::from(io_error);

        match error {
            StemmaError::Io(_) => {} // Expected
            _ => panic!("Expected IO error"),
        }
    }
}
