//! Common error types for seqplay

use thiserror::Error;

/// Common result type for seqplay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across seqplay crates
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP server errors
    #[error("HTTP server error: {0}")]
    Http(String),

    /// Playback sink rejected or failed an operation
    #[error("Sink error: {0}")]
    Sink(String),

    /// Operation not valid in the current session state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}
