//! CLI error handling.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use transloc_config::ConfigError;
use transloc_fallbacks::FallbackError;

use crate::Exit;

/// CLI error type with context for the user.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<ConfigError>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
        path: Option<PathBuf>,
    },

    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Exit status for this error.
    pub fn exit(&self) -> Exit {
        match self {
            Self::Config { .. } => Exit::ConfigError,
            Self::Io { .. } => Exit::IoError,
            Self::Validation { .. } => Exit::ValidationError,
            Self::Other(_) => Exit::GeneralError,
        }
    }

    /// Hint shown under the error, if any.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }

    /// Wrap an I/O failure on `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        Self::Io {
            message: format!("{}: {source}", path.display()),
            source,
            path: Some(path),
        }
    }

    /// A rejected value for `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        let hint = match &error {
            ConfigError::NotFound { .. } => {
                Some("pass an existing file with --config or unset TRANSLOC_CONFIG_PATH".to_string())
            }
            ConfigError::EnvVarNotFound { var } => Some(format!("set {var} or give it a default with ${{{var}:-value}}")),
            _ => None,
        };
        Self::Config {
            message: format!("configuration error: {error}"),
            source: Some(error),
            hint,
        }
    }
}

impl From<FallbackError> for CliError {
    fn from(error: FallbackError) -> Self {
        let field = match &error {
            FallbackError::InvalidLocale(_) => Some("locale".to_string()),
            FallbackError::InvalidOption(_) => Some("fallback".to_string()),
            FallbackError::Source(_) => None,
        };
        Self::Validation {
            message: error.to_string(),
            field,
        }
    }
}
