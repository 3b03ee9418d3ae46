//! Error types for the revenue engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, QueryError>;

/// Main error type for the revenue engine
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Execution error: {0}")]
    Execution(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<rayon::ThreadPoolBuildError> for QueryError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        QueryError::Execution(format!("failed to build worker pool: {}", e))
    }
}
