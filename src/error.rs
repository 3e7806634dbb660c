//! Error types for the watchface.
//!
//! The display core itself never fails. These errors come from the edges:
//! durable storage, configuration files, companion payloads and the event
//! channel.

use thiserror::Error;

/// Errors that can occur around the display core.
#[derive(Debug, Error)]
pub enum Error {
    /// Durable key-value storage failed (read or write)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Face configuration could not be read or is invalid
    #[error("Config error: {0}")]
    Config(String),

    /// JSON (or YAML) (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File I/O failed
    #[error("I/O error: {0}")]
    Io(String),

    /// The event channel feeding the face was closed
    #[error("Event channel closed: {0}")]
    Channel(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

#[cfg(feature = "config")]
impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(format!("Invalid face config YAML: {}", err))
    }
}
