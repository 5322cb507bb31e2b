//! Source loading strategies.
//!
//! Responsibilities:
//! - Describe construction input (`ConfigSource`).
//! - Turn a source into a mapping through an ordered list of strategies.
//! - Report soft misses explicitly (`LoadOutcome::NotApplicable`) so the next
//!   strategy can be tried.
//!
//! Does NOT handle:
//! - Environment overrides (see env.rs).
//! - Mandatory key checks (see validate.rs).
//!
//! Invariants:
//! - Strategies run in a fixed order: structured source, then serialized text.
//!   A mapping is never re-parsed as text.
//! - A file that cannot be read is a hard `ConfigError::FileAccess`; only
//!   parse problems are soft misses.
//! - Only plain scalars, sequences and mappings are accepted from YAML. A
//!   local `!` tag, or a `!!` tag outside the safe core set (see tags.rs),
//!   rejects the whole document.
//! - An empty mapping never wins; the next strategy is tried.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use super::error::ConfigError;
use super::tags::find_unsafe_tag;

/// Input accepted by the loader.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// An already-structured mapping.
    Mapping(Mapping),
    /// Path to a YAML document on disk.
    Path(PathBuf),
    /// Literal YAML text.
    Inline(String),
    /// Any other value; no strategy applies to it.
    Unsupported(Value),
}

impl ConfigSource {
    /// Literal YAML text, parsed without touching the filesystem.
    pub fn inline(text: impl Into<String>) -> Self {
        ConfigSource::Inline(text.into())
    }
}

impl From<Mapping> for ConfigSource {
    fn from(mapping: Mapping) -> Self {
        ConfigSource::Mapping(mapping)
    }
}

/// Strings are references to documents on disk.
impl From<&str> for ConfigSource {
    fn from(path: &str) -> Self {
        ConfigSource::Path(PathBuf::from(path))
    }
}

impl From<String> for ConfigSource {
    fn from(path: String) -> Self {
        ConfigSource::Path(PathBuf::from(path))
    }
}

impl From<PathBuf> for ConfigSource {
    fn from(path: PathBuf) -> Self {
        ConfigSource::Path(path)
    }
}

impl From<&Path> for ConfigSource {
    fn from(path: &Path) -> Self {
        ConfigSource::Path(path.to_path_buf())
    }
}

impl From<Value> for ConfigSource {
    fn from(value: Value) -> Self {
        match value {
            Value::Mapping(mapping) => ConfigSource::Mapping(mapping),
            Value::String(path) => ConfigSource::Path(PathBuf::from(path)),
            other => ConfigSource::Unsupported(other),
        }
    }
}

/// Why a strategy declined a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotApplicable {
    /// The source is not an already-structured mapping.
    NotStructured,
    /// The source is neither a path nor inline text.
    NotText,
    /// The document is empty or null.
    EmptyDocument,
    /// The document parsed, but its root is not a mapping.
    NotAMapping,
    /// The document is not valid YAML.
    ParseFailed,
    /// The document uses YAML tags, which the safe loader refuses.
    TaggedValue,
}

impl NotApplicable {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotApplicable::NotStructured => "not_structured",
            NotApplicable::NotText => "not_text",
            NotApplicable::EmptyDocument => "empty_document",
            NotApplicable::NotAMapping => "not_a_mapping",
            NotApplicable::ParseFailed => "parse_failed",
            NotApplicable::TaggedValue => "tagged_value",
        }
    }
}

impl fmt::Display for NotApplicable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single strategy that did not fail hard.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(Mapping),
    NotApplicable(NotApplicable),
}

/// A way of turning a `ConfigSource` into a mapping.
pub(crate) trait SourceStrategy {
    fn name(&self) -> &'static str;

    fn load(&self, source: &ConfigSource) -> Result<LoadOutcome, ConfigError>;
}

/// Accepts mappings as they are.
pub(crate) struct StructuredSource;

impl SourceStrategy for StructuredSource {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn load(&self, source: &ConfigSource) -> Result<LoadOutcome, ConfigError> {
        Ok(match source {
            ConfigSource::Mapping(mapping) => LoadOutcome::Loaded(mapping.clone()),
            _ => LoadOutcome::NotApplicable(NotApplicable::NotStructured),
        })
    }
}

/// Reads YAML from a file or from inline text.
pub(crate) struct SerializedText;

impl SourceStrategy for SerializedText {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn load(&self, source: &ConfigSource) -> Result<LoadOutcome, ConfigError> {
        match source {
            ConfigSource::Path(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|e| ConfigError::FileAccess {
                        path: path.clone(),
                        source: e,
                    })?;
                Ok(parse_document(&content))
            }
            ConfigSource::Inline(text) => Ok(parse_document(text)),
            _ => Ok(LoadOutcome::NotApplicable(NotApplicable::NotText)),
        }
    }
}

const STRATEGIES: [&dyn SourceStrategy; 2] = [&StructuredSource, &SerializedText];

/// Run the strategies in order and return the first non-empty mapping.
///
/// `Ok(None)` means every strategy missed. Hard errors stop the chain.
pub(crate) fn resolve_source(source: &ConfigSource) -> Result<Option<Mapping>, ConfigError> {
    for strategy in STRATEGIES {
        match strategy.load(source)? {
            LoadOutcome::Loaded(mapping) if !mapping.is_empty() => {
                tracing::trace!(strategy = strategy.name(), "Config source loaded");
                return Ok(Some(mapping));
            }
            LoadOutcome::Loaded(_) => {
                tracing::debug!(
                    strategy = strategy.name(),
                    "Config source produced an empty mapping"
                );
            }
            LoadOutcome::NotApplicable(reason) => {
                tracing::trace!(
                    strategy = strategy.name(),
                    reason = reason.as_str(),
                    "Config source not applicable"
                );
            }
        }
    }
    Ok(None)
}

/// Parse a YAML document, accepting only untagged mappings.
pub(crate) fn parse_document(text: &str) -> LoadOutcome {
    if text.trim().is_empty() {
        return LoadOutcome::NotApplicable(NotApplicable::EmptyDocument);
    }
    if let Some(tag) = find_unsafe_tag(text) {
        tracing::debug!(tag = %tag, "Rejected YAML config document with unsafe tag");
        return LoadOutcome::NotApplicable(NotApplicable::TaggedValue);
    }

    let reason = match serde_yaml::from_str::<Value>(text) {
        Ok(Value::Mapping(mapping)) => {
            if mapping.iter().any(|(k, v)| contains_tag(k) || contains_tag(v)) {
                NotApplicable::TaggedValue
            } else {
                return LoadOutcome::Loaded(mapping);
            }
        }
        Ok(Value::Null) => NotApplicable::EmptyDocument,
        Ok(Value::Tagged(_)) => NotApplicable::TaggedValue,
        Ok(_) => NotApplicable::NotAMapping,
        Err(error) => {
            tracing::debug!(error = %error, "Could not parse config as YAML");
            NotApplicable::ParseFailed
        }
    };

    if reason != NotApplicable::ParseFailed {
        tracing::debug!(reason = reason.as_str(), "Rejected YAML config document");
    }
    LoadOutcome::NotApplicable(reason)
}

fn contains_tag(value: &Value) -> bool {
    match value {
        Value::Tagged(_) => true,
        Value::Sequence(items) => items.iter().any(contains_tag),
        Value::Mapping(mapping) => mapping.iter().any(|(k, v)| contains_tag(k) || contains_tag(v)),
        _ => false,
    }
}
