//! Structural validation of a loaded configuration.
//!
//! Responsibilities:
//! - Check that the configuration is non-empty and holds every mandatory key.
//! - Resolve `INTERNAL_ATTRIBUTES` through the source strategies and store the
//!   resolved mapping in place of the original reference.
//!
//! Does NOT handle:
//! - Value types or ranges. Only presence is checked.
//!
//! Invariants:
//! - Mandatory keys are checked in `MANDATORY_KEYS` order; the first missing
//!   key is reported.
//! - Nested resolution only runs after the top-level checks pass.

use serde_yaml::{Mapping, Value};

use super::error::ConfigError;
use super::source::{ConfigSource, resolve_source};
use crate::constants::{INTERNAL_ATTRIBUTES, MANDATORY_KEYS};

/// Check that `config` is non-empty and contains every mandatory key.
pub(crate) fn verify(config: &Mapping) -> Result<(), ConfigError> {
    if config.is_empty() {
        return Err(ConfigError::MissingConfiguration);
    }

    match MANDATORY_KEYS.iter().find(|key| !config.contains_key(**key)) {
        Some(key) => Err(ConfigError::MissingKey(key.to_string())),
        None => Ok(()),
    }
}

/// Replace the `INTERNAL_ATTRIBUTES` reference with the mapping it resolves to.
pub(crate) fn resolve_internal_attributes(config: &mut Mapping) -> Result<(), ConfigError> {
    let reference = config
        .get(INTERNAL_ATTRIBUTES)
        .cloned()
        .ok_or_else(|| ConfigError::MissingKey(INTERNAL_ATTRIBUTES.to_string()))?;

    let resolved =
        resolve_source(&ConfigSource::from(reference))?.ok_or(ConfigError::InternalAttributes)?;

    tracing::debug!(
        attributes = resolved.len(),
        "Resolved internal attribute mapping"
    );
    config.insert(Value::from(INTERNAL_ATTRIBUTES), Value::Mapping(resolved));
    Ok(())
}
