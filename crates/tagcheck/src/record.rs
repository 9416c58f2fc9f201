//! # Record Dispatch
//!
//! Visits visible fields in declaration order and dispatches each one with
//! its own declaration. The first failing field aborts the record.
//!
//! Map fields are the exception: by default they are checked with the
//! declaration of the record that contains them, not their own. The
//! registry's [`MapRuleSource`] selects which one applies.
//! This covers `ignore` too: under [`MapRuleSource::Container`] an ignored
//! map field is still walked, and its record values are checked.

use tagcheck_core::{CheckResult, FieldMeta, UsageError, Value};
use tagcheck_registry::MapRuleSource;

use crate::checker::{is_ignored, Checker};

impl Checker<'_> {
    /// `meta` describes the record as a whole, not any of its fields.
    pub(crate) fn check_record(&self, value: &Value, meta: Option<&FieldMeta>) -> CheckResult {
        if is_ignored(meta) {
            return Ok(());
        }
        let Value::Record(record) = value else {
            return Err(UsageError::NotARecord.into());
        };
        tracing::trace!(record = record.type_name(), "checking record");

        for field in record.visible_fields() {
            let item = field.value();
            let own = Some(field.meta());
            match item {
                Value::Map(_) => {
                    let rules_from = match self.registry.map_rules() {
                        MapRuleSource::Container => meta,
                        MapRuleSource::Field => own,
                    };
                    self.check_map(item, rules_from)?;
                }
                Value::Record(_)
                | Value::Sequence(_)
                | Value::Optional(_)
                | Value::Bool(_)
                | Value::Int(_)
                | Value::Str(_)
                | Value::Float(_)
                | Value::Unsupported(_) => self.dispatch(item, own)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagcheck_core::{
        CheckError, FieldRules, IntRules, LengthRules, MapEntries, MapKey, Record, StringRules,
    };
    use tagcheck_registry::Registry;

    fn max_int(max: i64) -> FieldRules {
        FieldRules::new().with_int(IntRules::new().max(max))
    }

    #[test]
    fn non_record_is_usage_error() {
        let registry = Registry::new();
        let err = Checker::new(&registry).check_record(&Value::Bool(true), None).unwrap_err();
        assert_eq!(err, CheckError::Usage(UsageError::NotARecord));
    }

    #[test]
    fn first_failing_field_wins() {
        let registry = Registry::new();
        let record = Record::new("Pair")
            .field("a", &5i64, max_int(1))
            .field("b", &5i64, max_int(1));
        let err = Checker::new(&registry)
            .check_record(&Value::Record(record), None)
            .unwrap_err();
        assert_eq!(err.field(), Some("a"));
    }

    #[test]
    fn hidden_fields_are_skipped() {
        let registry = Registry::new();
        let record = Record::new("Secretive")
            .hidden("internal", &1.5f64)
            .field("a", &1i64, max_int(1));
        assert!(Checker::new(&registry).check_record(&Value::Record(record), None).is_ok());
    }

    #[test]
    fn ignored_record_is_not_visited() {
        let registry = Registry::new();
        let record = Value::Record(Record::new("Bad").field("a", &9i64, max_int(1)));
        let ignore = FieldMeta::new("inner", FieldRules::new().ignored());
        assert!(Checker::new(&registry).check_record(&record, Some(&ignore)).is_ok());
    }

    #[test]
    fn nested_record_uses_field_declaration() {
        let registry = Registry::new();
        let inner = Record::new("Inner").field("n", &7i64, max_int(5));
        let outer = Record::new("Outer").field("inner", &inner, FieldRules::new());
        let err = Checker::new(&registry)
            .check_record(&Value::Record(outer), None)
            .unwrap_err();
        assert_eq!(err.to_string(), "field n check fail: too big");

        let skipped = Record::new("Outer").field(
            "inner",
            &Record::new("Inner").field("n", &7i64, max_int(5)),
            FieldRules::new().ignored(),
        );
        assert!(Checker::new(&registry).check_record(&Value::Record(skipped), None).is_ok());
    }

    #[test]
    fn float_field_is_unknown_type() {
        let registry = Registry::new();
        let record = Record::new("Measure").field("ratio", &0.5f64, FieldRules::new());
        let err = Checker::new(&registry)
            .check_record(&Value::Record(record), None)
            .unwrap_err();
        assert_eq!(err, CheckError::Usage(UsageError::UnknownType { kind: "float" }));
    }

    fn record_with_map() -> (Value, FieldMeta) {
        let mut entries = MapEntries::new();
        entries.insert(MapKey::from("a"), Value::Int(1));
        entries.insert(MapKey::from("b"), Value::Int(2));
        let field_rules = FieldRules::new().with_map(LengthRules::new().max(1));
        let record = Record::new("Holder").field_with_meta(
            FieldMeta::new("entries", field_rules),
            Value::Map(entries),
        );
        let container = FieldMeta::new(
            "holder",
            FieldRules::new().with_map(LengthRules::new().length(2)),
        );
        (Value::Record(record), container)
    }

    #[test]
    fn map_field_uses_container_declaration_by_default() {
        let registry = Registry::new();
        let (record, container) = record_with_map();
        let checker = Checker::new(&registry);
        assert!(checker.check_record(&record, Some(&container)).is_ok());

        let strict_len = FieldMeta::new(
            "holder",
            FieldRules::new().with_map(LengthRules::new().length(3)),
        );
        let err = checker.check_record(&record, Some(&strict_len)).unwrap_err();
        assert_eq!(err.to_string(), "field holder check fail: bad length");
    }

    #[test]
    fn map_field_can_use_its_own_declaration() {
        let mut registry = Registry::new();
        registry.set_map_rules(MapRuleSource::Field);
        let (record, container) = record_with_map();
        let err = Checker::new(&registry)
            .check_record(&record, Some(&container))
            .unwrap_err();
        assert_eq!(err.to_string(), "field entries check fail: too long");
    }

    #[test]
    fn optional_field_uses_field_declaration() {
        let registry = Registry::new();
        let rules = FieldRules::new().with_string(StringRules::new().length(2));
        let record = Record::new("Maybe")
            .field("none", &None::<String>, rules.clone())
            .field("some", &Some("abc".to_string()), rules);
        let err = Checker::new(&registry)
            .check_record(&Value::Record(record), None)
            .unwrap_err();
        assert_eq!(err.to_string(), "field some check fail: bad length");
    }

    #[test]
    fn ignore_on_map_field_follows_rule_source() {
        let mut entries = MapEntries::new();
        entries.insert(
            MapKey::from("k"),
            Value::Record(Record::new("Item").field(
                "qty",
                &0i64,
                FieldRules::new().with_int(IntRules::new().min(0)),
            )),
        );
        let ignored = FieldMeta::new("m", FieldRules::new().ignored());
        let record =
            Value::Record(Record::new("Holder").field_with_meta(ignored, Value::Map(entries)));

        let mut registry = Registry::new();
        let err = Checker::new(&registry).check_record(&record, None).unwrap_err();
        assert_eq!(err.to_string(), "field qty check fail: too small");

        registry.set_map_rules(MapRuleSource::Field);
        assert!(Checker::new(&registry).check_record(&record, None).is_ok());
    }
}
