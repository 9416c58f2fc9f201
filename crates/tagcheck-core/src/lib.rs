//! # tagcheck-core — Foundational Types for tagcheck
//!
//! This crate defines the vocabulary shared by the registry and the
//! traversal engine. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **A closed value tree.** Every checkable value is lowered into
//!    [`Value`], a sum type over records, sequences, maps, optional
//!    references, and scalars. Dispatchers match on it exhaustively; a kind
//!    the engine does not validate is still representable so it can be
//!    rejected as a usage error instead of silently passing.
//!
//! 2. **Typed field rules.** Declarations carry [`FieldRules`], grouped by
//!    the category they constrain (`bool`, `int`, `string`, `sequence`,
//!    `map`). Rules are built with a builder at the declaration site or
//!    deserialized from configuration with kebab-case keys.
//!
//! 3. **Two error classes, one channel.** [`CheckError::Field`] is a
//!    data-dependent validation failure; [`CheckError::Usage`] is a
//!    programmer error. Both travel through the same `Result`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tagcheck-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod rules;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::{CheckError, CheckResult, FieldFailure, Rejection, UsageError};
pub use rules::{
    BoolRules, CheckerList, FieldMeta, FieldRules, IntRules, LengthRules, StringRules, ZeroPolicy,
};
pub use value::{Checkable, Field, MapEntries, MapKey, Record, ToMapKey, Value};
