//! Error types for the redraft library.

use std::io;
use thiserror::Error;

/// Result type alias for redraft operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, revising, or saving documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error decoding or encoding the document JSON.
    #[error("document serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A unit index is out of range.
    #[error("unit {0} is out of range (document has {1} units)")]
    UnitOutOfRange(usize, usize),

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
