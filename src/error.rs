// SPDX-License-Identifier: MIT

//! Error types for animesort

use thiserror::Error;

/// Result type alias for animesort operations
pub type Result<T> = std::result::Result<T, SorterError>;

/// animesort error types
#[derive(Error, Debug)]
pub enum SorterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// One of the fatal API codes (maintenance, quota, overload) ended the run
    #[error("{}", crate::client::error_message(*.0))]
    ApiFatal(i64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("No images found in {0}")]
    NoImages(String),
}

impl From<zip::result::ZipError> for SorterError {
    fn from(e: zip::result::ZipError) -> Self {
        SorterError::Archive(e.to_string())
    }
}
