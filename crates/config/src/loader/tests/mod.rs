//! Tests for the configuration loader.
//!
//! Responsibilities:
//! - Test the source strategies and their soft-miss reasons.
//! - Test building from mappings, files and inline YAML.
//! - Test environment overlay precedence and blank handling.
//! - Test mandatory key validation and nested attribute resolution.
//! - Test dotenv gating.
//!
//! Invariants:
//! - Tests that touch the process environment use `serial_test` and `env_lock()`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_yaml::{Mapping, Value};


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// An attribute mapping document used across tests.
pub const ATTRIBUTES_YAML: &str = r#"
attributes:
  mail:
    saml: [email, emailAdress]
    openid: [email]
hash: [edupersontargetedid]
"#;

/// A complete configuration as YAML with an inline attribute mapping.
pub const FULL_CONFIG_YAML: &str = r#"
BASE: https://proxy.example.com
COOKIE_STATE_NAME: SATOSA_STATE
STATE_ENCRYPTION_KEY: file-state-key
USER_ID_HASH_SALT: file-salt
BACKEND_MODULES:
  - plugins/saml2_backend.yaml
FRONTEND_MODULES:
  - plugins/saml2_frontend.yaml
INTERNAL_ATTRIBUTES:
  attributes:
    mail:
      saml: [email]
"#;

/// Mapping with every mandatory key, using an inline attribute mapping.
pub fn full_mapping() -> Mapping {
    serde_yaml::from_str(FULL_CONFIG_YAML).unwrap()
}

/// `full_mapping()` without `key`.
pub fn mapping_without(key: &str) -> Mapping {
    let mut mapping = full_mapping();
    mapping.remove(key);
    mapping
}

/// `full_mapping()` with `key` set to `value`.
pub fn mapping_with(key: &str, value: impl Into<Value>) -> Mapping {
    let mut mapping = full_mapping();
    mapping.insert(Value::from(key), value.into());
    mapping
}

/// Writes `content` to `dir/name` and returns the path.
pub fn write_document(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// A fake environment built from key/value pairs.
pub fn fake_env<const N: usize>(vars: [(&str, &str); N]) -> HashMap<String, String> {
    vars.into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// An environment with nothing set.
pub fn empty_env() -> HashMap<String, String> {
    HashMap::new()
}
