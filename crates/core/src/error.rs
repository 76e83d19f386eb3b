//! Error types shared across the workspace

use thiserror::Error;

/// Top-level error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Retrieval error: {0}")]
    Retrieval(String),
}

/// Convenience result type
pub type Result<T> = std::result::Result<T, Error>;
