//! Error types

use thiserror::Error;

/// Result type for scanner operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running a scan
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid scan configuration, detected before any projection work
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pixel data does not fit the stated image dimensions
    #[error("Image data does not match dimensions: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// The run was cancelled between two projection angles
    #[error("Scan cancelled")]
    Cancelled,

    /// Failed to read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration file
    #[error("Could not parse configuration file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self { Self::Config(message.into()) }
}
