//! # Scalar Dispatch
//!
//! Booleans, integers, and strings. A scalar without a declaration site
//! (the root value, or an element of an undeclared container) always
//! passes: there is nothing to check it against.
//!
//! Integer and string rules share one skeleton:
//!
//! 1. `ignore` → pass.
//! 2. zero-value policy → pass, or skip the built-in checks.
//! 3. `ignore-range-check` → skip the built-in checks.
//! 4. `must` → equality only; otherwise the range or length bounds.
//! 5. named checkers in declaration order.
//!
//! Integer `min` is exclusive and `max` inclusive. String lengths count
//! characters.

use tagcheck_core::{CheckResult, FieldFailure, FieldMeta, IntRules, StringRules};

use crate::bounds::{check_count, gate, Gate};
use crate::checker::{is_ignored, Checker};
use crate::named::run_named;
use crate::pattern::PatternCache;

impl Checker<'_> {
    pub(crate) fn check_bool(&self, value: bool, meta: Option<&FieldMeta>) -> CheckResult {
        let Some(meta) = meta else {
            return Ok(());
        };
        if is_ignored(Some(meta)) {
            return Ok(());
        }

        match meta.rules().boolean.must {
            Some(must) if must != value => {
                Err(FieldFailure::new(Some(meta), format!("must be {must}")).into())
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn check_int(&self, value: i64, meta: Option<&FieldMeta>) -> CheckResult {
        let Some(meta) = meta else {
            return Ok(());
        };
        if is_ignored(Some(meta)) {
            return Ok(());
        }

        let rules = &meta.rules().int;
        match gate(rules.zero_policy, value == 0, rules.ignore_range_check) {
            Gate::Skip => return Ok(()),
            Gate::NamedOnly => {}
            Gate::Full => check_int_bounds(meta, rules, value)?,
        }

        run_named(meta, &rules.checker, "int", |name| {
            self.registry.get_int_checker(name).map(|checker| checker(meta, value))
        })
    }

    pub(crate) fn check_string(&self, value: &str, meta: Option<&FieldMeta>) -> CheckResult {
        let Some(meta) = meta else {
            return Ok(());
        };
        if is_ignored(Some(meta)) {
            return Ok(());
        }

        let rules = &meta.rules().string;
        if rules.numeric_in_string {
            let number = value.parse::<i64>().map_err(|e| {
                FieldFailure::new(Some(meta), format!("invalid number {value:?}: {e}"))
            })?;
            tracing::trace!(field = meta.name(), number, "checking numeric string as int");
            return self.check_int(number, Some(meta));
        }

        match gate(rules.zero_policy, value.is_empty(), rules.ignore_range_check) {
            Gate::Skip => return Ok(()),
            Gate::NamedOnly => {}
            Gate::Full => check_string_bounds(&self.patterns, meta, rules, value)?,
        }

        run_named(meta, &rules.checker, "string", |name| {
            self.registry.get_string_checker(name).map(|checker| checker(meta, value))
        })
    }
}

fn check_int_bounds(meta: &FieldMeta, rules: &IntRules, value: i64) -> CheckResult {
    if let Some(must) = rules.must {
        if value != must {
            return Err(FieldFailure::new(Some(meta), format!("must be {must}")).into());
        }
        return Ok(());
    }

    if rules.max.is_some_and(|max| value > max) {
        return Err(FieldFailure::new(Some(meta), "too big").into());
    }
    if rules.min.is_some_and(|min| value <= min) {
        return Err(FieldFailure::new(Some(meta), "too small").into());
    }
    Ok(())
}

fn check_string_bounds(
    patterns: &PatternCache,
    meta: &FieldMeta,
    rules: &StringRules,
    value: &str,
) -> CheckResult {
    if let Some(must) = &rules.must {
        if value != must {
            return Err(FieldFailure::new(Some(meta), format!("must be {must}")).into());
        }
        return Ok(());
    }

    check_count(meta, value.chars().count(), rules.length, rules.max, rules.min)?;

    if let Some(pattern) = &rules.regex {
        let matched = patterns
            .is_match(pattern, value)
            .map_err(|e| FieldFailure::new(Some(meta), format!("invalid regex: {e}")))?;
        if !matched {
            return Err(FieldFailure::new(Some(meta), "regex not match").into());
        }
    }
    Ok(())
}
