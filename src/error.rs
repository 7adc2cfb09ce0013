//! Error types for the Rockit gateway

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Rockit gateway
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// MIDI transport error (connect/write failure or timeout)
    #[error("transport error: {0}")]
    Transport(String),

    /// Speech recognition capability error
    #[error("recognition error: {0}")]
    Recognition(String),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
