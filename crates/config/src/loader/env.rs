//! Environment variable overlay for sensitive configuration keys.
//!
//! Responsibilities:
//! - Abstract environment lookups behind the `Environment` trait.
//! - Overwrite sensitive keys with `SATOSA_<KEY>` values when they are set.
//!
//! Does NOT handle:
//! - Loading `.env` files (handled by `ConfigLoader::load_dotenv`).
//! - Checking that sensitive keys end up present (see validate.rs).
//!
//! Invariants:
//! - Environment variables take precedence over values loaded from the source.
//! - Empty environment variables are treated as unset.
//! - Values are stored exactly as read; whitespace is key material too.
//! - Secret values are never logged.

use std::collections::HashMap;

use serde_yaml::{Mapping, Value};

use crate::constants::{SENSITIVE_KEYS, env_var_name};

/// Source of environment variables.
pub trait Environment {
    /// Returns the value of `key`, or `None` if unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// Apply environment overrides for every sensitive key.
///
/// Environment variables take precedence over values from the source.
pub(crate) fn apply_env(config: &mut Mapping, env: &impl Environment) {
    for key in SENSITIVE_KEYS {
        let var = env_var_name(key);
        if let Some(value) = env.var(&var).filter(|value| !value.is_empty()) {
            tracing::debug!(key, var = %var, "Overriding config value from environment");
            config.insert(Value::from(key), Value::String(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn overlay(env: HashMap<String, String>) -> Mapping {
        let mut config = Mapping::new();
        config.insert(Value::from("STATE_ENCRYPTION_KEY"), Value::from("from-source"));
        apply_env(&mut config, &env);
        config
    }

    #[test]
    fn test_apply_env_keeps_surrounding_whitespace() {
        let config = overlay(HashMap::from([
            ("SATOSA_STATE_ENCRYPTION_KEY".to_string(), " k3y ".to_string()),
            ("SATOSA_USER_ID_HASH_SALT".to_string(), "  ".to_string()),
        ]));

        assert_eq!(
            config.get("STATE_ENCRYPTION_KEY"),
            Some(&Value::from(" k3y "))
        );
        assert_eq!(config.get("USER_ID_HASH_SALT"), Some(&Value::from("  ")));
    }

    #[test]
    fn test_apply_env_skips_empty_values() {
        let config = overlay(HashMap::from([(
            "SATOSA_STATE_ENCRYPTION_KEY".to_string(),
            String::new(),
        )]));

        assert_eq!(
            config.get("STATE_ENCRYPTION_KEY"),
            Some(&Value::from("from-source"))
        );
        assert!(!config.contains_key("USER_ID_HASH_SALT"));
    }

    #[test]
    #[serial]
    fn test_process_env_reads_variables() {
        temp_env::with_vars(
            [
                ("_SATOSA_TEST_SET_VAR", Some("value")),
                ("_SATOSA_TEST_UNSET_VAR", None),
            ],
            || {
                assert_eq!(
                    ProcessEnv.var("_SATOSA_TEST_SET_VAR"),
                    Some("value".to_string())
                );
                assert_eq!(ProcessEnv.var("_SATOSA_TEST_UNSET_VAR"), None);
            },
        );
    }

    #[test]
    fn test_hash_map_environment() {
        let env = HashMap::from([("A".to_string(), "1".to_string())]);
        assert_eq!(env.var("A"), Some("1".to_string()));
        assert_eq!(env.var("B"), None);
        assert_eq!((&env).var("A"), Some("1".to_string()));
    }
}
