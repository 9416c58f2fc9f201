//! # Checker
//!
//! Entry point of the traversal engine. A `Checker` borrows a
//! [`Registry`] and is cheap to create; the dispatchers live in sibling
//! modules as further `impl Checker` blocks.
//!
//! Regex rules are compiled once per `Checker` and shared by its clones,
//! so reusing one checker across many values avoids recompiling them.

use std::sync::Arc;

use tagcheck_core::{CheckResult, Checkable, FieldMeta, UsageError, Value};
use tagcheck_registry::Registry;

use crate::pattern::PatternCache;

/// Validates values against their declared rules.
#[derive(Debug, Clone)]
pub struct Checker<'r> {
    pub(crate) registry: &'r Registry,
    pub(crate) patterns: Arc<PatternCache>,
}

impl<'r> Checker<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            patterns: Arc::default(),
        }
    }

    /// Check a value. The value is lowered into a [`Value`] tree first.
    pub fn check<T: Checkable + ?Sized>(&self, value: &T) -> CheckResult {
        self.check_value(&value.to_value())
    }

    /// Check an already-built value tree.
    ///
    /// The root has no declaration site, so it enters the optional
    /// dispatcher without field metadata.
    pub fn check_value(&self, value: &Value) -> CheckResult {
        tracing::trace!(kind = value.kind(), "check started");
        let result = self.check_optional(value, None);
        if let Err(e) = &result {
            tracing::debug!(field = e.field(), usage = e.is_usage(), error = %e, "check failed");
        }
        result
    }

    /// Dispatch a value that is not an absent optional by its kind.
    pub(crate) fn dispatch(&self, value: &Value, meta: Option<&FieldMeta>) -> CheckResult {
        match value {
            Value::Record(_) => self.check_record(value, meta),
            Value::Sequence(_) => self.check_sequence(value, meta),
            Value::Map(_) => self.check_map(value, meta),
            Value::Optional(_) => self.check_optional(value, meta),
            Value::Bool(b) => self.check_bool(*b, meta),
            Value::Int(i) => self.check_int(*i, meta),
            Value::Str(s) => self.check_string(s, meta),
            Value::Float(_) | Value::Unsupported(_) => {
                Err(UsageError::UnknownType { kind: value.kind() }.into())
            }
        }
    }
}

/// True when the declaration asks for the value to be skipped.
pub(crate) fn is_ignored(meta: Option<&FieldMeta>) -> bool {
    meta.is_some_and(|m| m.rules().ignore)
}
