//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for every way construction can fail.
//! - Define the access wrapper's `AttributeNotFound` error.
//!
//! Does NOT handle:
//! - Soft misses of individual loading strategies (see `source.rs`); those
//!   never cross into this type.
//!
//! Invariants:
//! - File access failures keep the offending path and the underlying I/O error.
//! - Validator errors are distinguishable by variant and message.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.
//! - No variant carries the value of a sensitive key.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to open config file at {path}: {source}")]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Missing configuration or unknown format")]
    MissingConfiguration,

    #[error("Missing key '{0}' in config")]
    MissingKey(String),

    #[error("Could not load attribute mapping from 'INTERNAL_ATTRIBUTES'")]
    InternalAttributes,

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error(transparent)]
    AttributeNotFound(#[from] AttributeNotFound),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl ConfigError {
    /// Whether this error was raised by the validator, i.e. the configuration
    /// itself is structurally invalid (as opposed to unreadable).
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ConfigError::MissingConfiguration
                | ConfigError::MissingKey(_)
                | ConfigError::InternalAttributes
        )
    }
}

/// Returned when reading a key that is not present in the configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration has no attribute '{name}'")]
pub struct AttributeNotFound {
    pub name: String,
}

impl AttributeNotFound {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_errors_are_configuration_errors() {
        assert!(ConfigError::MissingConfiguration.is_configuration_error());
        assert!(ConfigError::MissingKey("BASE".to_string()).is_configuration_error());
        assert!(ConfigError::InternalAttributes.is_configuration_error());

        let io = ConfigError::FileAccess {
            path: PathBuf::from("/nope"),
            source: std::io::Error::from(ErrorKind::NotFound),
        };
        assert!(!io.is_configuration_error());
    }

    #[test]
    fn test_messages_are_distinguishable() {
        let missing = ConfigError::MissingKey("BASE".to_string()).to_string();
        let nested = ConfigError::InternalAttributes.to_string();
        let empty = ConfigError::MissingConfiguration.to_string();

        assert!(missing.contains("'BASE'"));
        assert!(nested.contains("INTERNAL_ATTRIBUTES"));
        assert_ne!(missing, nested);
        assert_ne!(empty, nested);
    }

    #[test]
    fn test_attribute_not_found_converts() {
        let err: ConfigError = AttributeNotFound::new("FOO").into();
        assert!(matches!(err, ConfigError::AttributeNotFound(ref e) if e.name == "FOO"));
        assert_eq!(err.to_string(), "Configuration has no attribute 'FOO'");
    }
}
