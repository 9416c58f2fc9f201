//! # Optional and Reference Unwrapping
//!
//! Absent values pass: absence is never a validation failure here. A
//! present value is unwrapped level by level and dispatched by the kind
//! it finally points at. Non-optional values are dispatched directly,
//! which is how the root value enters the engine.

use tagcheck_core::{CheckResult, FieldMeta, Value};

use crate::checker::{is_ignored, Checker};

impl Checker<'_> {
    pub(crate) fn check_optional(&self, value: &Value, meta: Option<&FieldMeta>) -> CheckResult {
        if is_ignored(meta) {
            return Ok(());
        }
        match value {
            Value::Optional(None) => Ok(()),
            Value::Optional(Some(inner)) => self.check_optional(inner, meta),
            other => self.dispatch(other, meta),
        }
    }
}
