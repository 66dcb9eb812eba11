//! Error types for Sextant operations.
//!
//! [`XmlParseError`] is the failure that aborts a parse pass on a fatal
//! parser error. [`SextantError`] wraps it together with the I/O and input
//! problems a complete validation run can hit.

use std::io;

use thiserror::Error;

use crate::event::{RawLocation, SourceException};

/// A fatal parser error that aborts the current parse.
///
/// Carries the formatted message of the error and, as its
/// [`source`](std::error::Error::source), the exception the engine attached to
/// the report.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct XmlParseError {
    message: String,
    key: String,
    location: Option<RawLocation>,
    #[source]
    cause: Option<SourceException>,
}

impl XmlParseError {
    /// Create a new parse error.
    pub fn new(
        message: impl Into<String>,
        key: impl Into<String>,
        location: Option<RawLocation>,
        cause: Option<SourceException>,
    ) -> Self {
        Self {
            message: message.into(),
            key: key.into(),
            location,
            cause,
        }
    }

    /// Get the formatted message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the message key of the error.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the parser location of the error, if known.
    pub fn location(&self) -> Option<RawLocation> {
        self.location
    }
}

/// The main error type for Sextant operations.
#[derive(Debug, Error)]
pub enum SextantError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Fatal error: {0}")]
    Fatal(#[from] XmlParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid error events: {0}")]
    Events(String),
}
