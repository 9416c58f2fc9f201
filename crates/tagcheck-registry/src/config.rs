//! # Configuration Loading
//!
//! Registry flags and shared field rules can live in YAML or JSON files.
//! The format is chosen by file extension: `.yaml`/`.yml` parse as YAML,
//! everything else as JSON.
//!
//! ```yaml
//! # registry.yaml
//! strict-sequence: true
//! strict-map: false
//! map-rules: container
//! ```
//!
//! ```yaml
//! # rules.yaml
//! age:
//!   int: { max: 150, min: 0 }
//! name:
//!   string: { max: 64, min: 0, checker: "no-control" }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tagcheck_core::{FieldMeta, FieldRules};
use thiserror::Error;

/// Error while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document could not be parsed.
    #[error("config parse error for '{origin}': {reason}")]
    Parse {
        /// File path, or `<string>` for in-memory documents.
        origin: String,
        /// Parser message.
        reason: String,
    },

    /// IO error reading the file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which declaration supplies the rules when a record field holds a map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapRuleSource {
    /// Rules of the record that contains the map field.
    #[default]
    Container,
    /// Rules declared on the map field itself.
    Field,
}

/// Serializable registry flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub strict_sequence: bool,
    pub strict_map: bool,
    pub map_rules: MapRuleSource,
}

impl RegistryConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        parse_yaml(content, "<string>")
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        parse_json(content, "<string>")
    }

    /// Load from a YAML or JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_file(path.as_ref())
    }
}

/// Field rules keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: BTreeMap<String, FieldRules>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        parse_yaml(content, "<string>")
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        parse_json(content, "<string>")
    }

    /// Load from a YAML or JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_file(path.as_ref())
    }

    /// Add or replace the rules stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, rules: FieldRules) {
        self.rules.insert(name.into(), rules);
    }

    pub fn rules(&self, name: &str) -> Option<&FieldRules> {
        self.rules.get(name)
    }

    /// Declaration for a field named `name`, using the stored rules or
    /// empty rules when none are stored.
    pub fn meta(&self, name: &str) -> FieldMeta {
        FieldMeta::new(name, self.rules.get(name).cloned().unwrap_or_default())
    }

    /// Stored names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_yaml<T: DeserializeOwned>(content: &str, origin: &str) -> Result<T, ConfigError> {
    serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
        origin: origin.to_string(),
        reason: format!("invalid YAML: {e}"),
    })
}

fn parse_json<T: DeserializeOwned>(content: &str, origin: &str) -> Result<T, ConfigError> {
    serde_json::from_str(content).map_err(|e| ConfigError::Parse {
        origin: origin.to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}

fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let origin = path.display().to_string();
    tracing::debug!(path = %origin, "loading tagcheck config");

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "yaml" | "yml" => parse_yaml(&content, &origin),
        _ => parse_json(&content, &origin),
    }
}
