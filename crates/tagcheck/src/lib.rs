//! # tagcheck — Declarative Value Validation
//!
//! Walks a [`Value`] tree depth-first in field order and stops at the
//! first failure. Each shape has its own dispatcher:
//!
//! | Shape      | Dispatcher module | Applies                                   |
//! |------------|-------------------|-------------------------------------------|
//! | record     | `record`          | per-field rules, recursion per field      |
//! | sequence   | `sequence`        | count rules, sequence checkers, elements  |
//! | map        | `map`             | count rules, map checkers, record values  |
//! | optional   | `optional`        | unwraps, absent values always pass        |
//! | scalars    | `scalar`          | bool / int / string rules, named checkers |
//!
//! Within one field the order is fixed: `ignore`, then the zero-value
//! policy, then built-in checks, then named checkers in declaration
//! order, then recursion into contained values.
//!
//! ## Entry Points
//!
//! - [`Checker::check`]: check any [`Checkable`] value against a borrowed
//!   [`Registry`].
//! - [`check`]: shorthand for a one-off check.
//!
//! ## Crate Policy
//!
//! - Never panics on malformed rules; they surface as field failures.
//! - Does not install a tracing subscriber.

mod bounds;
pub mod checker;
mod map;
mod named;
mod optional;
mod pattern;
mod record;
mod scalar;
mod sequence;

pub use checker::Checker;
pub use tagcheck_core::{
    Checkable, CheckError, CheckResult, FieldFailure, FieldMeta, FieldRules, IntRules,
    LengthRules, MapEntries, MapKey, Record, Rejection, StringRules, UsageError, Value,
    ZeroPolicy,
};
pub use tagcheck_registry::{MapRuleSource, Registry, RegistryConfig, RuleSet};

/// Check `value` against the rules it declares and the checkers in `registry`.
pub fn check<T: Checkable + ?Sized>(registry: &Registry, value: &T) -> CheckResult {
    Checker::new(registry).check(value)
}
