//! Error types for esgboard

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EsgError {
    // Decode errors, fatal to the pipeline run that hit them
    #[error("Failed to decode tabular source: {reason}")]
    Decode { reason: String },

    #[error("Source not found at {path}")]
    SourceNotFound { path: PathBuf },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EsgError>;
