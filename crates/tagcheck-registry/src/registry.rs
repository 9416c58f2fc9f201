//! # Checker Registry
//!
//! Four independent name → predicate mappings plus the strictness flags.
//!
//! A predicate registered for a category is only ever handed values of
//! that category: the closure signatures are typed, so an integer checker
//! receives an `i64` and a map checker receives the map's entries.
//!
//! ## Thread Safety
//!
//! Predicates are `Arc<dyn Fn .. + Send + Sync>`, so a `Registry` is
//! `Send + Sync` and can back concurrent checks through shared
//! references. All mutation goes through `&mut self`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tagcheck_core::{FieldMeta, MapEntries, Rejection, Value};

use crate::config::{MapRuleSource, RegistryConfig};

/// Named integer checker.
pub type IntChecker = Arc<dyn Fn(&FieldMeta, i64) -> Result<(), Rejection> + Send + Sync>;

/// Named string checker.
pub type StringChecker = Arc<dyn Fn(&FieldMeta, &str) -> Result<(), Rejection> + Send + Sync>;

/// Named sequence checker. Receives the whole sequence.
pub type SequenceChecker =
    Arc<dyn Fn(&FieldMeta, &[Value]) -> Result<(), Rejection> + Send + Sync>;

/// Named map checker. Receives all entries of the map.
pub type MapChecker =
    Arc<dyn Fn(&FieldMeta, &MapEntries) -> Result<(), Rejection> + Send + Sync>;

/// Store of named checkers and strictness flags.
#[derive(Clone, Default)]
pub struct Registry {
    int_checkers: HashMap<String, IntChecker>,
    string_checkers: HashMap<String, StringChecker>,
    sequence_checkers: HashMap<String, SequenceChecker>,
    map_checkers: HashMap<String, MapChecker>,
    strict_sequence: bool,
    strict_map: bool,
    map_rules: MapRuleSource,
}

impl Registry {
    /// Empty registry with both strictness flags off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty registry with flags taken from `config`.
    pub fn from_config(config: &RegistryConfig) -> Self {
        let mut registry = Self::new();
        registry.apply_config(config);
        registry
    }

    /// Overwrite the flags with those in `config`. Checkers are untouched.
    pub fn apply_config(&mut self, config: &RegistryConfig) {
        tracing::debug!(
            strict_sequence = config.strict_sequence,
            strict_map = config.strict_map,
            map_rules = ?config.map_rules,
            "applying registry config"
        );
        self.strict_sequence = config.strict_sequence;
        self.strict_map = config.strict_map;
        self.map_rules = config.map_rules;
    }

    /// Current flags in serializable form.
    pub fn config(&self) -> RegistryConfig {
        RegistryConfig {
            strict_sequence: self.strict_sequence,
            strict_map: self.strict_map,
            map_rules: self.map_rules,
        }
    }

    // -- integer -------------------------------------------------------------

    /// Register an integer checker, replacing any checker of the same name.
    pub fn add_int_checker<F>(&mut self, name: impl Into<String>, checker: F)
    where
        F: Fn(&FieldMeta, i64) -> Result<(), Rejection> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(checker = %name, category = "int", "registering named checker");
        self.int_checkers.insert(name, Arc::new(checker));
    }

    /// Remove an integer checker. Missing names are ignored.
    pub fn remove_int_checker(&mut self, name: &str) {
        if self.int_checkers.remove(name).is_some() {
            tracing::debug!(checker = name, category = "int", "removed named checker");
        }
    }

    pub fn get_int_checker(&self, name: &str) -> Option<&IntChecker> {
        self.int_checkers.get(name)
    }

    // -- string --------------------------------------------------------------

    /// Register a string checker, replacing any checker of the same name.
    pub fn add_string_checker<F>(&mut self, name: impl Into<String>, checker: F)
    where
        F: Fn(&FieldMeta, &str) -> Result<(), Rejection> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(checker = %name, category = "string", "registering named checker");
        self.string_checkers.insert(name, Arc::new(checker));
    }

    /// Remove a string checker. Missing names are ignored.
    pub fn remove_string_checker(&mut self, name: &str) {
        if self.string_checkers.remove(name).is_some() {
            tracing::debug!(checker = name, category = "string", "removed named checker");
        }
    }

    pub fn get_string_checker(&self, name: &str) -> Option<&StringChecker> {
        self.string_checkers.get(name)
    }

    // -- sequence ------------------------------------------------------------

    /// Register a sequence checker, replacing any checker of the same name.
    pub fn add_sequence_checker<F>(&mut self, name: impl Into<String>, checker: F)
    where
        F: Fn(&FieldMeta, &[Value]) -> Result<(), Rejection> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(checker = %name, category = "sequence", "registering named checker");
        self.sequence_checkers.insert(name, Arc::new(checker));
    }

    /// Remove a sequence checker. Missing names are ignored.
    pub fn remove_sequence_checker(&mut self, name: &str) {
        if self.sequence_checkers.remove(name).is_some() {
            tracing::debug!(checker = name, category = "sequence", "removed named checker");
        }
    }

    pub fn get_sequence_checker(&self, name: &str) -> Option<&SequenceChecker> {
        self.sequence_checkers.get(name)
    }

    // -- map -----------------------------------------------------------------

    /// Register a map checker, replacing any checker of the same name.
    pub fn add_map_checker<F>(&mut self, name: impl Into<String>, checker: F)
    where
        F: Fn(&FieldMeta, &MapEntries) -> Result<(), Rejection> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(checker = %name, category = "map", "registering named checker");
        self.map_checkers.insert(name, Arc::new(checker));
    }

    /// Remove a map checker. Missing names are ignored.
    pub fn remove_map_checker(&mut self, name: &str) {
        if self.map_checkers.remove(name).is_some() {
            tracing::debug!(checker = name, category = "map", "removed named checker");
        }
    }

    pub fn get_map_checker(&self, name: &str) -> Option<&MapChecker> {
        self.map_checkers.get(name)
    }

    // -- flags ---------------------------------------------------------------

    /// When set, a sequence nested directly in a sequence is a usage error
    /// instead of being skipped.
    pub fn set_strict_sequence(&mut self, value: bool) {
        self.strict_sequence = value;
    }

    pub fn strict_sequence(&self) -> bool {
        self.strict_sequence
    }

    /// When set, a map value that is not a record (or optional record) is a
    /// usage error instead of being skipped.
    pub fn set_strict_map(&mut self, value: bool) {
        self.strict_map = value;
    }

    pub fn strict_map(&self) -> bool {
        self.strict_map
    }

    /// Which declaration supplies the rules for a map field of a record.
    pub fn set_map_rules(&mut self, source: MapRuleSource) {
        self.map_rules = source;
    }

    pub fn map_rules(&self) -> MapRuleSource {
        self.map_rules
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn sorted<V>(map: &HashMap<String, V>) -> Vec<&str> {
            let mut names: Vec<&str> = map.keys().map(String::as_str).collect();
            names.sort_unstable();
            names
        }

        f.debug_struct("Registry")
            .field("int_checkers", &sorted(&self.int_checkers))
            .field("string_checkers", &sorted(&self.string_checkers))
            .field("sequence_checkers", &sorted(&self.sequence_checkers))
            .field("map_checkers", &sorted(&self.map_checkers))
            .field("strict_sequence", &self.strict_sequence)
            .field("strict_map", &self.strict_map)
            .field("map_rules", &self.map_rules)
            .finish()
    }
}
