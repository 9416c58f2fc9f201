//! # Error Types — Validation Failures and Usage Errors
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - A [`FieldFailure`] is expected and data-dependent. It names the field
//!   that failed whenever one exists; top-level and container-level
//!   failures without a declaration site carry no field name.
//! - A [`UsageError`] is a programmer error: the value handed to a
//!   dispatcher has the wrong shape, a strictness flag forbids a nesting,
//!   or the value contains a kind the engine does not validate.
//! - Both surface through [`CheckError`] so callers see a single result
//!   channel, while the variant keeps the two classes distinguishable.

use thiserror::Error;

use crate::rules::FieldMeta;

/// Result of a single `check` call.
pub type CheckResult = Result<(), CheckError>;

/// Top-level error returned by the traversal engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// A declared rule or a named checker rejected the value.
    #[error(transparent)]
    Field(#[from] FieldFailure),

    /// The value tree cannot be checked as given.
    #[error("usage error: {0}")]
    Usage(#[from] UsageError),
}

impl CheckError {
    /// Name of the failing field, if the failure is attributable to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Field(failure) => failure.field.as_deref(),
            Self::Usage(_) => None,
        }
    }

    /// Returns true for programmer errors rather than validation failures.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

/// A validation failure attributed to a field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}check fail: {message}", field_prefix(.field))]
pub struct FieldFailure {
    /// Field that failed. `None` for top-level values.
    pub field: Option<String>,
    /// Human-readable reason.
    pub message: String,
}

impl FieldFailure {
    /// Build a failure for the field described by `meta`.
    pub fn new(meta: Option<&FieldMeta>, message: impl Into<String>) -> Self {
        Self {
            field: meta.map(|m| m.name().to_string()),
            message: message.into(),
        }
    }
}

fn field_prefix(field: &Option<String>) -> String {
    field
        .as_ref()
        .map(|name| format!("field {name} "))
        .unwrap_or_default()
}

/// Programmer error raised while walking the value tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// Sequence dispatch received something other than a sequence.
    #[error("not a sequence")]
    NotASequence,

    /// Map dispatch received something other than a map.
    #[error("not a map")]
    NotAMap,

    /// Record dispatch received something other than a record.
    #[error("not a record")]
    NotARecord,

    /// A sequence directly contains a sequence while strict-sequence is set.
    #[error("sequence in sequence not allowed")]
    SequenceInSequence,

    /// A map directly contains a map while strict-map is set.
    #[error("map in map not allowed")]
    MapInMap,

    /// A map contains a scalar or sequence while strict-map is set.
    #[error("only records are allowed in a map, found {kind}")]
    NonRecordInMap {
        /// Kind of the offending value.
        kind: &'static str,
    },

    /// The value is of a kind no dispatcher handles.
    #[error("unknown type: {kind}")]
    UnknownType {
        /// Kind of the offending value.
        kind: &'static str,
    },
}

/// Reason a named checker rejected a value.
///
/// Named checkers return this; the engine wraps it into a
/// [`FieldFailure`] that also names the checker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct Rejection(pub String);

impl Rejection {
    /// Create a rejection with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

impl From<&str> for Rejection {
    fn from(reason: &str) -> Self {
        Self(reason.to_string())
    }
}

impl From<String> for Rejection {
    fn from(reason: String) -> Self {
        Self(reason)
    }
}
