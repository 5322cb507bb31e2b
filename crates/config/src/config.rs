//! The resolved SATOSA configuration.
//!
//! Responsibilities:
//! - Own the resolved mapping and expose read, write and key iteration.
//! - Provide typed accessors for the keys the proxy always needs.
//!
//! Does NOT handle:
//! - Loading or validation (see `loader`). A `SatosaConfig` is only produced
//!   by `ConfigLoader::build`, so it is valid at construction time.
//!
//! Invariants:
//! - All reads and writes go through the single internal mapping.
//! - Key iteration follows the mapping's insertion order.
//! - `Debug` output never contains the values of sensitive keys.

use std::fmt;

use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use crate::constants::{INTERNAL_ATTRIBUTES, REDACTED, SENSITIVE_KEYS, is_sensitive};
use crate::loader::{AttributeNotFound, ConfigError, ConfigLoader, ConfigSource};

/// A fully resolved proxy configuration.
#[derive(Clone, PartialEq)]
pub struct SatosaConfig {
    config: Mapping,
}

impl SatosaConfig {
    /// Resolve a configuration, reading overrides from the process environment.
    ///
    /// Shorthand for `ConfigLoader::new(source).build()`.
    pub fn new(source: impl Into<ConfigSource>) -> Result<Self, ConfigError> {
        ConfigLoader::new(source).build()
    }

    pub(crate) fn from_resolved(config: Mapping) -> Self {
        Self { config }
    }

    /// Returns the value bound to `key`.
    pub fn get(&self, key: &str) -> Result<&Value, AttributeNotFound> {
        self.config
            .get(key)
            .ok_or_else(|| AttributeNotFound::new(key))
    }

    /// Returns the value bound to `key`, if any.
    pub fn try_get(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    /// Deserialize the value bound to `key` into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        let value = self.get(key)?;
        serde_yaml::from_value(value.clone()).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Insert or overwrite `key`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.config
            .insert(Value::String(key.into()), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.config.contains_key(key)
    }

    /// Iterate over the configuration keys in insertion order.
    ///
    /// Non-string keys (possible in YAML, e.g. `1: x`) are skipped.
    pub fn keys(&self) -> Keys<'_> {
        Keys {
            inner: self.config.keys(),
        }
    }

    pub fn len(&self) -> usize {
        self.config.len()
    }

    pub fn is_empty(&self) -> bool {
        self.config.is_empty()
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.config
    }

    pub fn into_mapping(self) -> Mapping {
        self.config
    }

    // ------------------------------------------------------------------------
    // Typed accessors
    // ------------------------------------------------------------------------

    /// Base URL of the proxy.
    pub fn base(&self) -> Option<&str> {
        self.try_get("BASE").and_then(Value::as_str)
    }

    /// Name of the cookie carrying proxy state.
    pub fn cookie_state_name(&self) -> Option<&str> {
        self.try_get("COOKIE_STATE_NAME").and_then(Value::as_str)
    }

    pub fn backend_modules(&self) -> Option<&Value> {
        self.try_get("BACKEND_MODULES")
    }

    pub fn frontend_modules(&self) -> Option<&Value> {
        self.try_get("FRONTEND_MODULES")
    }

    /// The resolved attribute mapping.
    pub fn internal_attributes(&self) -> Option<&Mapping> {
        self.try_get(INTERNAL_ATTRIBUTES).and_then(Value::as_mapping)
    }

    pub fn state_encryption_key(&self) -> Option<SecretString> {
        self.secret(SENSITIVE_KEYS[0])
    }

    pub fn user_id_hash_salt(&self) -> Option<SecretString> {
        self.secret(SENSITIVE_KEYS[1])
    }

    fn secret(&self, key: &str) -> Option<SecretString> {
        let value = match self.try_get(key)? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        Some(SecretString::new(value.into()))
    }
}

impl fmt::Debug for SatosaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.config {
            match key.as_str() {
                Some(name) if is_sensitive(name) => map.entry(key, &REDACTED),
                _ => map.entry(key, value),
            };
        }
        map.finish()
    }
}

/// Iterator over the keys of a `SatosaConfig`.
pub struct Keys<'a> {
    inner: serde_yaml::mapping::Keys<'a>,
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find_map(Value::as_str)
    }
}

impl<'a> IntoIterator for &'a SatosaConfig {
    type Item = &'a str;
    type IntoIter = Keys<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys()
    }
}
