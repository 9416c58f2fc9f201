//! Zero-value gating and count bounds shared by strings, sequences, and maps.

use tagcheck_core::{CheckResult, FieldFailure, FieldMeta, ZeroPolicy};

/// Which stages run for a field after the zero-value policy is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Gate {
    /// Nothing else runs; the field passes.
    Skip,
    /// Built-in checks are skipped; named checkers run.
    NamedOnly,
    /// Built-in checks and named checkers run.
    Full,
}

pub(crate) fn gate(policy: Option<ZeroPolicy>, is_zero: bool, ignore_range_check: bool) -> Gate {
    match policy {
        Some(ZeroPolicy::NotCheck) if is_zero => Gate::Skip,
        Some(ZeroPolicy::Ignore) if is_zero => Gate::NamedOnly,
        _ if ignore_range_check => Gate::NamedOnly,
        _ => Gate::Full,
    }
}

/// Exact, inclusive-maximum, and exclusive-minimum checks on a count.
pub(crate) fn check_count(
    meta: &FieldMeta,
    count: usize,
    length: Option<usize>,
    max: Option<usize>,
    min: Option<usize>,
) -> CheckResult {
    if length.is_some_and(|length| count != length) {
        return Err(FieldFailure::new(Some(meta), "bad length").into());
    }
    if max.is_some_and(|max| count > max) {
        return Err(FieldFailure::new(Some(meta), "too long").into());
    }
    if min.is_some_and(|min| count <= min) {
        return Err(FieldFailure::new(Some(meta), "too short").into());
    }
    Ok(())
}
