// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines the errors raised while retrieving, decoding, validating and
//! publishing configuration documents. All errors use `thiserror` for proper error
//! handling and conversion.

use crate::domain::category::ConfigCategory;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// Retrieval, decode and validation failures always carry the category they concern,
/// and retrieval and decode failures also carry the source name, so a failed
/// aggregate load can be traced back to the exact document that broke it. It is
/// marked as `#[non_exhaustive]` to allow for future additions without breaking
/// backwards compatibility.
///
/// # Examples
///
/// ```
/// use vib34d_config::domain::{ConfigCategory, ConfigError};
///
/// let error = ConfigError::ValidationError {
///     category: ConfigCategory::Visuals,
/// };
/// assert_eq!(error.to_string(), "Invalid configuration format for visuals");
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The source could not be reached, or answered with a non-success status.
    #[error("Failed to fetch {source_name} for {category}: {message}")]
    RetrievalError {
        /// The category being retrieved
        category: ConfigCategory,
        /// The source name that was requested
        source_name: String,
        /// The status reported by the source, if it answered at all
        status: Option<u16>,
        /// The error message
        message: String,
        /// The underlying transport error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The retrieved bytes are not a well-formed document.
    #[error("Failed to decode {source_name} for {category}: {source}")]
    DecodeError {
        /// The category being decoded
        category: ConfigCategory,
        /// The source name the bytes came from
        source_name: String,
        /// The underlying parser error
        #[source]
        source: serde_json::Error,
    },

    /// The document does not have the top-level shape its category requires.
    #[error("Invalid configuration format for {category}")]
    ValidationError {
        /// The category whose validator rejected the document
        category: ConfigCategory,
    },

    /// A string did not name one of the known configuration categories.
    #[error("Unknown configuration category: {name}")]
    UnknownCategory {
        /// The unrecognised name
        name: String,
    },

    /// A string did not name one of the published events.
    #[error("Unknown configuration event: {name}")]
    UnknownEvent {
        /// The unrecognised name
        name: String,
    },

    /// One or more listeners failed while an event was being dispatched.
    ///
    /// Every registered listener was still invoked; this error only reports the ones
    /// that failed.
    #[error("{} listener(s) failed handling {event}: {}", failures.len(), failures.join("; "))]
    ListenerError {
        /// The name of the event being dispatched
        event: String,
        /// One message per failed listener, in dispatch order
        failures: Vec<String>,
    },

    /// The configuration system was built without a document source.
    #[error("No document source was configured")]
    SourceMissing,

    /// An error occurred in a configuration watcher.
    #[error("Configuration watcher error: {message}")]
    WatcherError {
        /// The error message
        message: String,
        /// The underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a `RetrievalError` for a source that answered with a failure status.
    pub fn from_status(category: ConfigCategory, source_name: &str, status: u16) -> Self {
        ConfigError::RetrievalError {
            category,
            source_name: source_name.to_string(),
            status: Some(status),
            message: format!("status {}", status),
            source: None,
        }
    }

    /// Creates a `RetrievalError` wrapping a transport failure.
    pub fn from_transport_error(
        category: ConfigCategory,
        source_name: &str,
        err: ConfigError,
    ) -> Self {
        ConfigError::RetrievalError {
            category,
            source_name: source_name.to_string(),
            status: None,
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Returns the category this error concerns, if it concerns exactly one.
    pub fn category(&self) -> Option<ConfigCategory> {
        match self {
            ConfigError::RetrievalError { category, .. }
            | ConfigError::DecodeError { category, .. }
            | ConfigError::ValidationError { category } => Some(*category),
            _ => None,
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
