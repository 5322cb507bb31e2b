//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide the builder-pattern `ConfigLoader` that runs source loading,
//!   environment overlay and validation in order.
//! - Optionally load a `.env` file before the overlay reads the environment.
//!
//! Does NOT handle:
//! - Individual loading strategies (delegated to source.rs).
//! - Environment lookups (delegated to env.rs).
//! - Key checks and nested resolution (delegated to validate.rs).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over source values.
//! - `build()` either returns a fully resolved config or an error; there is
//!   no partial state.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use super::env::{Environment, ProcessEnv, apply_env};
use super::error::ConfigError;
use super::source::{ConfigSource, resolve_source};
use super::validate::{resolve_internal_attributes, verify};
use crate::config::SatosaConfig;
use crate::constants::DOTENV_DISABLED_VAR;

/// Resolves a `SatosaConfig` from a source and an environment.
pub struct ConfigLoader<E = ProcessEnv> {
    source: ConfigSource,
    env: E,
}

impl ConfigLoader<ProcessEnv> {
    /// Create a loader reading overrides from the process environment.
    pub fn new(source: impl Into<ConfigSource>) -> Self {
        Self {
            source: source.into(),
            env: ProcessEnv,
        }
    }
}

impl<E: Environment> ConfigLoader<E> {
    /// Read overrides from `env` instead of the process environment.
    pub fn with_environment<F: Environment>(self, env: F) -> ConfigLoader<F> {
        ConfigLoader {
            source: self.source,
            env,
        }
    }

    /// The source this loader will resolve.
    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(DOTENV_DISABLED_VAR).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Load, overlay and validate the configuration.
    ///
    /// # Errors
    ///
    /// - `ConfigError::FileAccess` if a referenced document cannot be read.
    /// - `ConfigError::MissingConfiguration` if nothing could be loaded.
    /// - `ConfigError::MissingKey` if a mandatory key is absent after the overlay.
    /// - `ConfigError::InternalAttributes` if `INTERNAL_ATTRIBUTES` does not
    ///   resolve to a non-empty mapping.
    pub fn build(self) -> Result<SatosaConfig, ConfigError> {
        // Environment values alone never make up a configuration.
        let mut config = resolve_source(&self.source)?.ok_or(ConfigError::MissingConfiguration)?;

        apply_env(&mut config, &self.env);

        verify(&config)?;
        resolve_internal_attributes(&mut config)?;

        tracing::debug!(keys = config.len(), "Configuration resolved");
        Ok(SatosaConfig::from_resolved(config))
    }
}
