//! # Map Dispatch
//!
//! Maps are the shallowest-checked container. The map as a whole gets
//! count rules and named map checkers; of its values only records are
//! descended into. An optional value re-enters map dispatch once unwrapped.
//!
//! Nested maps, scalars, and sequences are skipped unless the registry is
//! in strict-map mode, where they are usage errors. Keys must be strings.

use tagcheck_core::{CheckResult, FieldFailure, FieldMeta, UsageError, Value};

use crate::bounds::{check_count, gate, Gate};
use crate::checker::{is_ignored, Checker};
use crate::named::run_named;

impl Checker<'_> {
    pub(crate) fn check_map(&self, value: &Value, meta: Option<&FieldMeta>) -> CheckResult {
        if is_ignored(meta) {
            return Ok(());
        }
        let Value::Map(entries) = value else {
            return Err(UsageError::NotAMap.into());
        };

        if let Some(meta) = meta {
            let rules = &meta.rules().map;
            match gate(rules.zero_policy, entries.is_empty(), rules.ignore_range_check) {
                Gate::Skip => return Ok(()),
                Gate::NamedOnly => {}
                Gate::Full => {
                    check_count(meta, entries.len(), rules.length, rules.max, rules.min)?;
                }
            }

            run_named(meta, &rules.checker, "map", |name| {
                self.registry
                    .get_map_checker(name)
                    .map(|checker| checker(meta, entries))
            })?;
        }

        for (key, item) in entries {
            if key.as_str().is_none() {
                return Err(FieldFailure::new(meta, "key must be string").into());
            }
            self.check_map_item(item, meta)?;
        }
        Ok(())
    }

    fn check_map_item(&self, item: &Value, meta: Option<&FieldMeta>) -> CheckResult {
        let strict = self.registry.strict_map();
        match item {
            Value::Record(_) => self.check_record(item, meta),
            Value::Optional(_) => self.check_map_reference(item, meta),
            Value::Map(_) if strict => Err(UsageError::MapInMap.into()),
            Value::Bool(_) | Value::Int(_) | Value::Str(_) | Value::Sequence(_) if strict => {
                Err(UsageError::NonRecordInMap { kind: item.kind() }.into())
            }
            Value::Map(_) | Value::Bool(_) | Value::Int(_) | Value::Str(_) | Value::Sequence(_) => {
                tracing::debug!(
                    field = meta.map(FieldMeta::name),
                    kind = item.kind(),
                    "skipping non-record map value"
                );
                Ok(())
            }
            Value::Float(_) | Value::Unsupported(_) => {
                Err(UsageError::UnknownType { kind: item.kind() }.into())
            }
        }
    }

    /// Unwrap an optional map value and check what it points at as a map.
    fn check_map_reference(&self, value: &Value, meta: Option<&FieldMeta>) -> CheckResult {
        match value {
            Value::Optional(None) => Ok(()),
            Value::Optional(Some(inner)) => self.check_map_reference(inner, meta),
            other => self.check_map(other, meta),
        }
    }
}
