//! Error types for routedoclib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading route data or writing reports.
///
/// Lookup misses and empty route batches are not errors: they are normal
/// outcomes handled by the annotator and the formatter.
#[derive(Error, Debug)]
pub enum RoutedocError {
    /// Failed to read an input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write an output file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Input file is not valid JSON for the expected shape
    #[error("invalid JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Invalid grep pattern
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
