//! Configuration loader for SATOSA proxy configuration.
//!
//! Responsibilities:
//! - Load configuration from a structured mapping, a YAML file, or inline YAML.
//! - Overlay sensitive keys from `SATOSA_*` environment variables.
//! - Validate mandatory keys and resolve the nested `INTERNAL_ATTRIBUTES` mapping.
//!
//! Does NOT handle:
//! - Access to the resolved values (see `config.rs`).
//! - Semantic validation of values (types, ranges).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over source values.
//! - Construction is fail-fast: the first error aborts and nothing is returned.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;
mod source;
mod tags;
mod validate;

#[cfg(test)]
mod tests;

pub use builder::ConfigLoader;
pub use env::{Environment, ProcessEnv};
pub use error::{AttributeNotFound, ConfigError};
pub use source::{ConfigSource, LoadOutcome, NotApplicable};
