//! Error types for profile ingestion.

use std::path::PathBuf;

use sonde_model::ProfileError;
use thiserror::Error;

/// Errors that can occur while loading profiles or options.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// A column holds a value that cannot be stored as its variable type.
    #[error("invalid value in column '{column}' of {path}: {message}")]
    Column {
        path: PathBuf,
        column: String,
        message: String,
    },

    /// Options file is not valid TOML for [`sonde_model::QcOptions`].
    #[error("failed to parse options {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Options parsed but cannot be used.
    #[error("invalid options in {path}: {source}")]
    InvalidOptions {
        path: PathBuf,
        #[source]
        source: ProfileError,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
