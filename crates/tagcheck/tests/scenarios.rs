//! # End-to-End Check Scenarios
//!
//! Exercises `tagcheck::check` through user types that implement
//! `Checkable`, the way callers use the crate.

use std::collections::HashMap;

use tagcheck::{
    check, CheckError, Checkable, Checker, FieldRules, IntRules, LengthRules, Record, Registry,
    Rejection, StringRules, UsageError, Value, ZeroPolicy,
};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

struct Bounded {
    int: i64,
}

impl Checkable for Bounded {
    fn to_value(&self) -> Value {
        Value::Record(Record::new("Bounded").field(
            "Int",
            &self.int,
            FieldRules::new().with_int(IntRules::new().max(10).min(0)),
        ))
    }
}

struct MinOnly {
    int: i64,
}

impl Checkable for MinOnly {
    fn to_value(&self) -> Value {
        Value::Record(Record::new("MinOnly").field(
            "Int",
            &self.int,
            FieldRules::new().with_int(IntRules::new().min(0)),
        ))
    }
}

struct Named {
    name: String,
}

impl Checkable for Named {
    fn to_value(&self) -> Value {
        Value::Record(Record::new("Named").field(
            "Name",
            &self.name,
            FieldRules::new().with_string(StringRules::new().length(3)),
        ))
    }
}

#[derive(Clone)]
struct Item {
    qty: i64,
}

impl Checkable for Item {
    fn to_value(&self) -> Value {
        Value::Record(Record::new("Item").field(
            "Qty",
            &self.qty,
            FieldRules::new().with_int(IntRules::new().min(0)),
        ))
    }
}

struct Order {
    items: Vec<Item>,
    by_sku: HashMap<String, Item>,
    note: Option<String>,
    parent: Option<Box<Order>>,
}

impl Checkable for Order {
    fn to_value(&self) -> Value {
        Value::Record(
            Record::new("Order")
                .field(
                    "Items",
                    &self.items,
                    FieldRules::new().with_sequence(LengthRules::new().max(2)),
                )
                .field("BySku", &self.by_sku, FieldRules::new())
                .field(
                    "Note",
                    &self.note,
                    FieldRules::new().with_string(StringRules::new().max(8)),
                )
                .field("Parent", &self.parent, FieldRules::new()),
        )
    }
}

fn order(items: Vec<Item>) -> Order {
    Order {
        items,
        by_sku: HashMap::new(),
        note: None,
        parent: None,
    }
}

fn even_registry() -> Registry {
    let mut registry = Registry::new();
    registry.add_int_checker("even", |_, v| {
        if v % 2 == 0 {
            Ok(())
        } else {
            Err(Rejection::new(format!("{v} is odd")))
        }
    });
    registry
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn bounded_int_within_range_passes() {
    let registry = Registry::new();
    check(&registry, &Bounded { int: 5 }).unwrap();
}

#[test]
fn zero_with_exclusive_minimum_fails() {
    let registry = Registry::new();
    let err = check(&registry, &MinOnly { int: 0 }).unwrap_err();
    assert_eq!(err.field(), Some("Int"));
    assert_eq!(err.to_string(), "field Int check fail: too small");
}

#[test]
fn wrong_string_length_fails() {
    let registry = Registry::new();
    let err = check(&registry, &Named { name: "ab".into() }).unwrap_err();
    assert_eq!(err.to_string(), "field Name check fail: bad length");
    check(&registry, &Named { name: "abc".into() }).unwrap();
}

#[test]
fn sequence_count_fails_before_elements_are_inspected() {
    let registry = Registry::new();
    // Every element is also invalid; the count violation must win.
    let bad = Item { qty: -1 };
    let err = check(&registry, &order(vec![bad.clone(), bad.clone(), bad])).unwrap_err();
    assert_eq!(err.to_string(), "field Items check fail: too long");
}

#[test]
fn sequence_elements_are_checked_as_records() {
    let registry = Registry::new();
    let err = check(&registry, &order(vec![Item { qty: 1 }, Item { qty: 0 }])).unwrap_err();
    assert_eq!(err.field(), Some("Qty"));
}

#[test]
fn named_checker_failure_identifies_checker() {
    let registry = even_registry();
    let record = Record::new("Counter").field(
        "Count",
        &7i64,
        FieldRules::new().with_int(IntRules::new().checker("even")),
    );
    let err = check(&registry, &record).unwrap_err();
    assert_eq!(err.to_string(), "field Count check fail: checker even: 7 is odd");

    let ok = Record::new("Counter").field(
        "Count",
        &8i64,
        FieldRules::new().with_int(IntRules::new().checker("even")),
    );
    check(&registry, &ok).unwrap();
}

#[test]
fn removed_checker_is_reported_as_missing() {
    let mut registry = even_registry();
    registry.remove_int_checker("even");
    let record = Record::new("Counter").field(
        "Count",
        &8i64,
        FieldRules::new().with_int(IntRules::new().checker("even")),
    );
    let err = check(&registry, &record).unwrap_err();
    assert_eq!(err.to_string(), "field Count check fail: checker even not found");
}

#[test]
fn first_failure_in_declaration_order() {
    let registry = Registry::new();
    let record = Record::new("Two")
        .field("A", &"x", FieldRules::new().with_string(StringRules::new().length(2)))
        .field("B", &99i64, FieldRules::new().with_int(IntRules::new().max(1)));
    let err = check(&registry, &record).unwrap_err();
    assert_eq!(err.field(), Some("A"));
}

#[test]
fn notcheck_zero_passes_regardless_of_other_rules() {
    let registry = Registry::new();
    let record = Record::new("Z").field(
        "N",
        &0i64,
        FieldRules::new().with_int(
            IntRules::new()
                .must(5)
                .min(10)
                .checker("not-registered")
                .zero_policy(ZeroPolicy::NotCheck),
        ),
    );
    check(&registry, &record).unwrap();
}

#[test]
fn strict_sequence_toggle_restores_soft_skip() {
    let mut registry = Registry::new();
    let nested = Record::new("Grid").field(
        "Rows",
        &vec![vec![1i64, 2], vec![3]],
        FieldRules::new(),
    );

    check(&registry, &nested).unwrap();

    registry.set_strict_sequence(true);
    assert_eq!(
        check(&registry, &nested).unwrap_err(),
        CheckError::Usage(UsageError::SequenceInSequence)
    );

    registry.set_strict_sequence(false);
    check(&registry, &nested).unwrap();
}

#[test]
fn map_of_records_and_nested_orders() {
    let registry = Registry::new();
    let mut parent = order(vec![]);
    parent.by_sku.insert("sku-1".into(), Item { qty: 0 });

    let mut child = order(vec![Item { qty: 3 }]);
    child.note = Some("gift".into());
    child.parent = Some(Box::new(parent));

    let err = check(&registry, &child).unwrap_err();
    assert_eq!(err.to_string(), "field Qty check fail: too small");
}

#[test]
fn optional_string_rules_apply_when_present() {
    let registry = Registry::new();
    let mut o = order(vec![]);
    o.note = Some("far too long".into());
    let err = check(&registry, &o).unwrap_err();
    assert_eq!(err.field(), Some("Note"));
}

#[test]
fn top_level_containers_and_absent_values() {
    let registry = Registry::new();
    check(&registry, &None::<Bounded>).unwrap();
    check(&registry, &vec![1i64, 2, 3]).unwrap();
    check(&registry, &Some(Box::new(Bounded { int: 5 }))).unwrap();
    assert!(check(&registry, &vec![Bounded { int: 50 }]).is_err());
}

#[test]
fn top_level_float_is_usage_error() {
    let registry = Registry::new();
    let err = check(&registry, &1.25f64).unwrap_err();
    assert!(err.is_usage());
}

#[test]
fn integer_beyond_i64_names_its_type() {
    let registry = Registry::new();
    let record = Record::new("Counter").field(
        "Total",
        &u64::MAX,
        FieldRules::new().with_int(IntRules::new().max(10)),
    );
    let err = check(&registry, &record).unwrap_err();
    assert_eq!(err, CheckError::Usage(UsageError::UnknownType { kind: "u64" }));
    assert_eq!(err.to_string(), "usage error: unknown type: u64");
}

#[test]
fn json_documents_are_checked_as_maps() {
    let mut registry = Registry::new();
    let doc = Value::from(serde_json::json!({"a": 1, "b": [1, 2]}));
    check(&registry, &doc).unwrap();

    registry.set_strict_map(true);
    let err = check(&registry, &doc).unwrap_err();
    assert_eq!(err, CheckError::Usage(UsageError::NonRecordInMap { kind: "int" }));
}

#[test]
fn registry_is_shared_across_threads() {
    let registry = even_registry();
    let checker = Checker::new(&registry);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4i64)
            .map(|i| {
                let checker = checker.clone();
                s.spawn(move || {
                    let record = Record::new("Counter").field(
                        "Count",
                        &i,
                        FieldRules::new().with_int(IntRules::new().checker("even")),
                    );
                    checker.check(&record).is_ok()
                })
            })
            .collect();
        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![true, false, true, false]);
    });
}
