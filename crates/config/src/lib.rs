//! Configuration resolution for the SATOSA proxy.
//!
//! This crate loads the proxy configuration from a mapping or a YAML
//! document, overlays secrets from the environment, checks mandatory keys
//! and resolves the nested attribute mapping.

mod config;
pub mod constants;
mod loader;

pub use config::{Keys, SatosaConfig};
pub use loader::{
    AttributeNotFound, ConfigError, ConfigLoader, ConfigSource, Environment, LoadOutcome,
    NotApplicable, ProcessEnv,
};

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, OnceLock};

    pub fn global_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }
}
