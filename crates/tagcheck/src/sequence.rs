//! # Sequence Dispatch
//!
//! The sequence is checked as a whole first (count rules, then named
//! sequence checkers), so a count violation is reported before any
//! element is looked at. Elements have no declaration site of their own
//! and are checked with the sequence's declaration.
//!
//! A sequence directly inside a sequence is skipped unless the registry
//! is in strict-sequence mode, where it is a usage error.

use tagcheck_core::{CheckResult, FieldMeta, UsageError, Value};

use crate::bounds::{check_count, gate, Gate};
use crate::checker::{is_ignored, Checker};
use crate::named::run_named;

impl Checker<'_> {
    pub(crate) fn check_sequence(&self, value: &Value, meta: Option<&FieldMeta>) -> CheckResult {
        if is_ignored(meta) {
            return Ok(());
        }
        let Value::Sequence(items) = value else {
            return Err(UsageError::NotASequence.into());
        };

        if let Some(meta) = meta {
            let rules = &meta.rules().sequence;
            match gate(rules.zero_policy, items.is_empty(), rules.ignore_range_check) {
                Gate::Skip => return Ok(()),
                Gate::NamedOnly => {}
                Gate::Full => check_count(meta, items.len(), rules.length, rules.max, rules.min)?,
            }

            run_named(meta, &rules.checker, "sequence", |name| {
                self.registry
                    .get_sequence_checker(name)
                    .map(|checker| checker(meta, items))
            })?;
        }

        for item in items {
            self.check_sequence_item(item, meta)?;
        }
        Ok(())
    }

    fn check_sequence_item(&self, item: &Value, meta: Option<&FieldMeta>) -> CheckResult {
        match item {
            Value::Sequence(_) => {
                if self.registry.strict_sequence() {
                    return Err(UsageError::SequenceInSequence.into());
                }
                tracing::debug!(
                    field = meta.map(FieldMeta::name),
                    "skipping sequence nested in sequence"
                );
                Ok(())
            }
            Value::Record(_)
            | Value::Map(_)
            | Value::Optional(_)
            | Value::Bool(_)
            | Value::Int(_)
            | Value::Str(_)
            | Value::Float(_)
            | Value::Unsupported(_) => self.dispatch(item, meta),
        }
    }
}
