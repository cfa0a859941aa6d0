//! Error types for the vitalize_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for vitalize_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Required submission field missing or out of domain
    #[error("Validation error: {0}")]
    Validation(String),

    /// BMI computation received inputs outside its domain
    #[error("Computation error: {0}")]
    Computation(String),

    /// Server unreachable or non-success response
    #[error("Transport error: {0}")]
    Transport(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
