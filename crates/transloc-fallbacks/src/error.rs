//! Error types for fallback resolution.

use thiserror::Error;

/// Errors raised while resolving a translated read.
#[derive(Debug, Error)]
pub enum FallbackError {
    /// A locale tag was malformed.
    #[error("invalid locale: {0}")]
    InvalidLocale(String),

    /// A `fallback` option value had an unsupported shape.
    #[error("invalid fallback option: {0}")]
    InvalidOption(String),

    /// The value source failed; the read was aborted.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Errors raised by a [`ValueSource`](crate::ValueSource).
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {locale}: {message}")]
    Read { locale: String, message: String },

    #[error("failed to write {locale}: {message}")]
    Write { locale: String, message: String },

    #[error("type mismatch for {locale}: expected {expected}, got {actual}")]
    TypeMismatch {
        locale: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl SourceError {
    /// Create a read error.
    pub fn read(locale: impl ToString, message: impl Into<String>) -> Self {
        Self::Read {
            locale: locale.to_string(),
            message: message.into(),
        }
    }

    /// Create a write error.
    pub fn write(locale: impl ToString, message: impl Into<String>) -> Self {
        Self::Write {
            locale: locale.to_string(),
            message: message.into(),
        }
    }
}
