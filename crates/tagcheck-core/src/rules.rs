//! # Field Rules — Typed Per-Field Configuration
//!
//! Every field declaration carries a [`FieldMeta`]: the field's name and
//! its [`FieldRules`]. Rules are grouped by the category of value they
//! constrain, so a sequence of integers can bound its element count with
//! `sequence.max` and each element with `int.max` independently.
//!
//! ## Configuration Keys
//!
//! Rules deserialize from YAML/JSON with kebab-case keys:
//!
//! ```yaml
//! ignore: false
//! bool:     { must: true }
//! int:      { max: 10, min: 0, zero-policy: notcheck, must: 3,
//!             ignore-range-check: false, checker: "even, positive" }
//! string:   { length: 3, max: 8, min: 1, regex: "^[a-z]+$",
//!             numeric-in-string: false, must: "abc", checker: [slug] }
//! sequence: { length: 2, max: 4, min: 0, zero-policy: notcheck, checker: "" }
//! map:      { length: 2, max: 4, min: 0, zero-policy: notcheck, checker: "" }
//! ```
//!
//! An absent option is `None` (or `false`), which is distinguishable from
//! every declared value including the empty string.

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Zero-value policy
// ---------------------------------------------------------------------------

/// How a zero value (0, empty string, empty container) is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroPolicy {
    /// A zero value passes and no further check runs for the field.
    NotCheck,
    /// A zero value skips the built-in checks; named checkers still run.
    Ignore,
}

// ---------------------------------------------------------------------------
// Named checker list
// ---------------------------------------------------------------------------

/// Ordered list of named checkers declared on a field.
///
/// Accepts a comma-separated string (`"even, positive"`) or a list.
/// Names are whitespace-trimmed and empty entries dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CheckerList(Vec<String>);

impl CheckerList {
    /// Parse a comma-separated checker list.
    pub fn parse(list: &str) -> Self {
        let mut out = Self::default();
        out.extend_from(list);
        out
    }

    fn extend_from(&mut self, list: &str) {
        self.0.extend(
            list.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        );
    }

    /// Checker names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of declared checkers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no checker is declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for CheckerList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Joined(String),
            Names(Vec<String>),
        }

        let mut out = Self::default();
        match Raw::deserialize(deserializer)? {
            Raw::Joined(list) => out.extend_from(&list),
            Raw::Names(names) => {
                for name in &names {
                    out.extend_from(name);
                }
            }
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Category rules
// ---------------------------------------------------------------------------

/// Rules for boolean fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct BoolRules {
    /// Required literal value.
    pub must: Option<bool>,
}

/// Rules for integer fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct IntRules {
    /// Skip the built-in checks; named checkers still run.
    pub ignore_range_check: bool,
    /// Treatment of the value `0`.
    pub zero_policy: Option<ZeroPolicy>,
    /// Exact required value. When set, `max` and `min` are not applied.
    pub must: Option<i64>,
    /// Inclusive maximum.
    pub max: Option<i64>,
    /// Exclusive minimum: the value must be strictly greater.
    pub min: Option<i64>,
    /// Named integer checkers.
    pub checker: CheckerList,
}

impl IntRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn must(mut self, value: i64) -> Self {
        self.must = Some(value);
        self
    }

    pub fn max(mut self, value: i64) -> Self {
        self.max = Some(value);
        self
    }

    pub fn min(mut self, value: i64) -> Self {
        self.min = Some(value);
        self
    }

    pub fn zero_policy(mut self, policy: ZeroPolicy) -> Self {
        self.zero_policy = Some(policy);
        self
    }

    pub fn ignore_range_check(mut self) -> Self {
        self.ignore_range_check = true;
        self
    }

    /// Append checkers from a comma-separated list.
    pub fn checker(mut self, list: &str) -> Self {
        self.checker.extend_from(list);
        self
    }
}

/// Rules for string fields. Lengths count characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct StringRules {
    /// Parse the string as an integer and apply the field's [`IntRules`]
    /// instead of any string rule.
    pub numeric_in_string: bool,
    /// Skip the built-in checks; named checkers still run.
    pub ignore_range_check: bool,
    /// Treatment of the empty string.
    pub zero_policy: Option<ZeroPolicy>,
    /// Exact required value. When set, no length or regex rule is applied.
    pub must: Option<String>,
    /// Exact length.
    pub length: Option<usize>,
    /// Inclusive maximum length.
    pub max: Option<usize>,
    /// Exclusive minimum length.
    pub min: Option<usize>,
    /// Pattern the value must match. Compiled at check time.
    pub regex: Option<String>,
    /// Named string checkers.
    pub checker: CheckerList,
}

impl StringRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn numeric_in_string(mut self) -> Self {
        self.numeric_in_string = true;
        self
    }

    pub fn must(mut self, value: impl Into<String>) -> Self {
        self.must = Some(value.into());
        self
    }

    pub fn length(mut self, value: usize) -> Self {
        self.length = Some(value);
        self
    }

    pub fn max(mut self, value: usize) -> Self {
        self.max = Some(value);
        self
    }

    pub fn min(mut self, value: usize) -> Self {
        self.min = Some(value);
        self
    }

    pub fn regex(mut self, pattern: impl Into<String>) -> Self {
        self.regex = Some(pattern.into());
        self
    }

    pub fn zero_policy(mut self, policy: ZeroPolicy) -> Self {
        self.zero_policy = Some(policy);
        self
    }

    pub fn ignore_range_check(mut self) -> Self {
        self.ignore_range_check = true;
        self
    }

    /// Append checkers from a comma-separated list.
    pub fn checker(mut self, list: &str) -> Self {
        self.checker.extend_from(list);
        self
    }
}

/// Rules for sequences and maps, applied to element or entry count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct LengthRules {
    /// Skip the built-in checks; named checkers still run.
    pub ignore_range_check: bool,
    /// Treatment of an empty container.
    pub zero_policy: Option<ZeroPolicy>,
    /// Exact count.
    pub length: Option<usize>,
    /// Inclusive maximum count.
    pub max: Option<usize>,
    /// Exclusive minimum count.
    pub min: Option<usize>,
    /// Named sequence or map checkers.
    pub checker: CheckerList,
}

impl LengthRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn length(mut self, value: usize) -> Self {
        self.length = Some(value);
        self
    }

    pub fn max(mut self, value: usize) -> Self {
        self.max = Some(value);
        self
    }

    pub fn min(mut self, value: usize) -> Self {
        self.min = Some(value);
        self
    }

    pub fn zero_policy(mut self, policy: ZeroPolicy) -> Self {
        self.zero_policy = Some(policy);
        self
    }

    pub fn ignore_range_check(mut self) -> Self {
        self.ignore_range_check = true;
        self
    }

    /// Append checkers from a comma-separated list.
    pub fn checker(mut self, list: &str) -> Self {
        self.checker.extend_from(list);
        self
    }
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

/// All rules declared on one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct FieldRules {
    /// Skip the field entirely.
    pub ignore: bool,
    #[serde(rename = "bool")]
    pub boolean: BoolRules,
    pub int: IntRules,
    pub string: StringRules,
    pub sequence: LengthRules,
    pub map: LengthRules,
}

impl FieldRules {
    /// Rules with nothing declared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the field as ignored.
    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }

    /// Require a boolean field to hold `value`.
    pub fn with_bool_must(mut self, value: bool) -> Self {
        self.boolean.must = Some(value);
        self
    }

    pub fn with_int(mut self, rules: IntRules) -> Self {
        self.int = rules;
        self
    }

    pub fn with_string(mut self, rules: StringRules) -> Self {
        self.string = rules;
        self
    }

    pub fn with_sequence(mut self, rules: LengthRules) -> Self {
        self.sequence = rules;
        self
    }

    pub fn with_map(mut self, rules: LengthRules) -> Self {
        self.map = rules;
        self
    }
}

/// A field's declaration: its name and the rules attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMeta {
    name: String,
    #[serde(default)]
    rules: FieldRules,
}

impl FieldMeta {
    pub fn new(name: impl Into<String>, rules: FieldRules) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// Declared field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared rules.
    pub fn rules(&self) -> &FieldRules {
        &self.rules
    }
}
