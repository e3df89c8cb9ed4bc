//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to read a test vector file
    #[error("failed to load vectors '{path}': {message}")]
    VectorLoad { path: String, message: String },

    /// Malformed line in a test vector file
    #[error("bad vector at {path}:{line}: {message}")]
    VectorParse {
        path: String,
        line: usize,
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
