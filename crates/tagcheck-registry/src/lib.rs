//! # tagcheck-registry — Named Checkers and Strictness Flags
//!
//! The [`Registry`] is a pure name → predicate store with one mapping per
//! value category (integer, string, sequence, map) and the two flags that
//! turn soft nesting skips into usage errors. It performs no validation
//! of its own; the traversal engine consults it.
//!
//! ## Configuration (`config`)
//!
//! [`RegistryConfig`] carries the flags in serializable form and loads
//! from YAML or JSON. [`RuleSet`] loads named [`FieldRules`] so record
//! declarations can share rules kept in configuration files.
//!
//! ## Crate Policy
//!
//! - Depends only on `tagcheck-core` internally.
//! - Registration needs `&mut Registry`; checks only borrow it. Finish
//!   registration before sharing the registry across threads.
//!
//! [`FieldRules`]: tagcheck_core::FieldRules

pub mod config;
pub mod registry;

pub use config::{ConfigError, MapRuleSource, RegistryConfig, RuleSet};
pub use registry::{IntChecker, MapChecker, Registry, SequenceChecker, StringChecker};
