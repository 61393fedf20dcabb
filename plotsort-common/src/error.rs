//! Common error types for plotsort

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for plotsort operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared by the library and the web service
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A persisted selection file exists but does not hold a classification map
    #[error("Malformed selection file {}: {source}", .path.display())]
    MalformedSelection {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Glob pattern could not be compiled
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
