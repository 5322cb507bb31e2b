//! Centralized constants for the SATOSA configuration resolver.
//!
//! Key names and the environment prefix live here so the loader, the
//! validator and the access wrapper agree on one spelling.

// =============================================================================
// Configuration Keys
// =============================================================================

/// Key holding the attribute mapping (inline mapping or path to a document).
pub const INTERNAL_ATTRIBUTES: &str = "INTERNAL_ATTRIBUTES";

/// Keys that may be supplied through `SATOSA_<KEY>` environment variables.
pub const SENSITIVE_KEYS: [&str; 2] = ["STATE_ENCRYPTION_KEY", "USER_ID_HASH_SALT"];

/// Keys that must be present in every resolved configuration, in check order.
pub const MANDATORY_KEYS: [&str; 7] = [
    "BASE",
    "BACKEND_MODULES",
    "FRONTEND_MODULES",
    INTERNAL_ATTRIBUTES,
    "COOKIE_STATE_NAME",
    SENSITIVE_KEYS[0],
    SENSITIVE_KEYS[1],
];

// =============================================================================
// Environment
// =============================================================================

/// Prefix of the environment variables consulted by the overlay.
pub const ENV_PREFIX: &str = "SATOSA";

/// Variable that, when set to `1` or `true`, disables `.env` loading.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";

/// Placeholder printed instead of sensitive values.
pub const REDACTED: &str = "[REDACTED]";

/// Returns the environment variable name that overrides `key`.
pub fn env_var_name(key: &str) -> String {
    format!("{ENV_PREFIX}_{key}")
}

/// Whether `key` belongs to the sensitive key set.
pub fn is_sensitive(key: &str) -> bool {
    SENSITIVE_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_name_uses_prefix() {
        assert_eq!(
            env_var_name("STATE_ENCRYPTION_KEY"),
            "SATOSA_STATE_ENCRYPTION_KEY"
        );
    }

    #[test]
    fn test_mandatory_keys_include_sensitive_keys() {
        for key in SENSITIVE_KEYS {
            assert!(MANDATORY_KEYS.contains(&key), "{key} must be mandatory");
        }
        assert_eq!(MANDATORY_KEYS[3], INTERNAL_ATTRIBUTES);
    }
}
