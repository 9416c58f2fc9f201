//! # Value Tree
//!
//! The engine never inspects caller types directly. Everything to be
//! checked is first lowered into a [`Value`] through the [`Checkable`]
//! trait, and records carry the [`FieldMeta`] of each of their fields.
//!
//! ## Shapes
//!
//! | Variant       | Rust sources                                   |
//! |---------------|------------------------------------------------|
//! | `Record`      | user types implementing [`Checkable`]          |
//! | `Sequence`    | `Vec<T>`, `[T]`, `[T; N]`                      |
//! | `Map`         | `HashMap<K, V>`, `BTreeMap<K, V>`              |
//! | `Optional`    | `Option<T>`, `Box<T>`, `Rc<T>`, `Arc<T>`       |
//! | `Bool`        | `bool`                                         |
//! | `Int`         | `i8`..`i64`, `u8`..`u32`, wider ints that fit  |
//! | `Str`         | `String`, `str`                                |
//! | `Float`       | `f32`, `f64`                                   |
//! | `Unsupported` | wider ints that do not fit in `i64`            |
//!
//! `Float` and `Unsupported` are kinds the engine has no rules for;
//! reaching one during a check is a usage error naming the kind.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use crate::rules::{FieldMeta, FieldRules};

/// Key of a map entry. Only string keys pass map dispatch.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl MapKey {
    /// The key as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Int(_) | Self::Bool(_) => None,
        }
    }
}

impl From<&str> for MapKey {
    fn from(key: &str) -> Self {
        Self::Str(key.to_string())
    }
}

impl From<String> for MapKey {
    fn from(key: String) -> Self {
        Self::Str(key)
    }
}

impl From<i64> for MapKey {
    fn from(key: i64) -> Self {
        Self::Int(key)
    }
}

impl From<bool> for MapKey {
    fn from(key: bool) -> Self {
        Self::Bool(key)
    }
}

/// Entries of a map value.
pub type MapEntries = BTreeMap<MapKey, Value>;

/// A checkable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Record(Record),
    Sequence(Vec<Value>),
    Map(MapEntries),
    /// An optional or indirect reference. `None` is absent.
    Optional(Option<Box<Value>>),
    Bool(bool),
    Int(i64),
    Str(String),
    Float(f64),
    /// A value no dispatcher handles, named by its source type.
    Unsupported(&'static str),
}

impl Value {
    /// An absent optional.
    pub fn absent() -> Self {
        Self::Optional(None)
    }

    /// A present optional wrapping `inner`.
    pub fn present(inner: Value) -> Self {
        Self::Optional(Some(Box::new(inner)))
    }

    /// Short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Record(_) => "record",
            Self::Sequence(_) => "sequence",
            Self::Map(_) => "map",
            Self::Optional(_) => "optional",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Str(_) => "string",
            Self::Float(_) => "float",
            Self::Unsupported(type_name) => type_name,
        }
    }
}

/// JSON numbers that are integral and fit in `i64` become `Int`; integral
/// numbers beyond that are `Unsupported("u64")` and the rest are `Float`.
/// `null` is an absent optional.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::absent(),
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Self::Int(i),
                (None, Some(_)) => Self::Unsupported("u64"),
                (None, None) => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(obj) => Self::Map(
                obj.into_iter()
                    .map(|(k, v)| (MapKey::Str(k), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    meta: FieldMeta,
    value: Value,
    visible: bool,
}

impl Field {
    pub fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Hidden fields are skipped by record dispatch.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// A composite value with a fixed, ordered set of named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: String,
    fields: Vec<Field>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a visible field.
    pub fn field<T: Checkable + ?Sized>(
        self,
        name: impl Into<String>,
        value: &T,
        rules: FieldRules,
    ) -> Self {
        self.field_with_meta(FieldMeta::new(name, rules), value.to_value())
    }

    /// Append a visible field from an existing declaration.
    pub fn field_with_meta(mut self, meta: FieldMeta, value: Value) -> Self {
        self.fields.push(Field {
            meta,
            value,
            visible: true,
        });
        self
    }

    /// Append a field that record dispatch never inspects.
    pub fn hidden<T: Checkable + ?Sized>(mut self, name: impl Into<String>, value: &T) -> Self {
        self.fields.push(Field {
            meta: FieldMeta::new(name, FieldRules::default()),
            value: value.to_value(),
            visible: false,
        });
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// All fields in declaration order, hidden ones included.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Visible fields in declaration order.
    pub fn visible_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_visible())
    }
}

// ---------------------------------------------------------------------------
// Conversion into the value tree
// ---------------------------------------------------------------------------

/// Lowers a Rust value into a [`Value`].
///
/// User record types implement this by building a [`Record`]:
///
/// ```
/// use tagcheck_core::{Checkable, FieldRules, IntRules, Record, Value};
///
/// struct Limits {
///     count: i64,
/// }
///
/// impl Checkable for Limits {
///     fn to_value(&self) -> Value {
///         Value::Record(Record::new("Limits").field(
///             "count",
///             &self.count,
///             FieldRules::new().with_int(IntRules::new().max(10).min(0)),
///         ))
///     }
/// }
/// ```
pub trait Checkable {
    fn to_value(&self) -> Value;
}

impl Checkable for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Checkable for Record {
    fn to_value(&self) -> Value {
        Value::Record(self.clone())
    }
}

impl Checkable for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Checkable for str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl Checkable for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

macro_rules! lossless_int {
    ($($t:ty),*) => {
        $(
            impl Checkable for $t {
                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }
            }
        )*
    };
}

lossless_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! wide_int {
    ($($t:ty),*) => {
        $(
            impl Checkable for $t {
                fn to_value(&self) -> Value {
                    match i64::try_from(*self) {
                        Ok(v) => Value::Int(v),
                        Err(_) => Value::Unsupported(stringify!($t)),
                    }
                }
            }
        )*
    };
}

wide_int!(u64, usize, isize, i128, u128);

impl Checkable for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl Checkable for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl<T: Checkable> Checkable for [T] {
    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(Checkable::to_value).collect())
    }
}

impl<T: Checkable> Checkable for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: Checkable, const N: usize> Checkable for [T; N] {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: Checkable> Checkable for Option<T> {
    fn to_value(&self) -> Value {
        Value::Optional(self.as_ref().map(|v| Box::new(v.to_value())))
    }
}

impl<T: Checkable + ?Sized> Checkable for Box<T> {
    fn to_value(&self) -> Value {
        Value::present((**self).to_value())
    }
}

impl<T: Checkable + ?Sized> Checkable for Rc<T> {
    fn to_value(&self) -> Value {
        Value::present((**self).to_value())
    }
}

impl<T: Checkable + ?Sized> Checkable for Arc<T> {
    fn to_value(&self) -> Value {
        Value::present((**self).to_value())
    }
}

impl<T: Checkable + ?Sized> Checkable for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

/// Types usable as map keys.
pub trait ToMapKey {
    fn to_map_key(&self) -> MapKey;
}

impl ToMapKey for String {
    fn to_map_key(&self) -> MapKey {
        MapKey::Str(self.clone())
    }
}

impl ToMapKey for str {
    fn to_map_key(&self) -> MapKey {
        MapKey::Str(self.to_string())
    }
}

impl ToMapKey for bool {
    fn to_map_key(&self) -> MapKey {
        MapKey::Bool(*self)
    }
}

impl ToMapKey for i64 {
    fn to_map_key(&self) -> MapKey {
        MapKey::Int(*self)
    }
}

impl ToMapKey for i32 {
    fn to_map_key(&self) -> MapKey {
        MapKey::Int(i64::from(*self))
    }
}

impl ToMapKey for u32 {
    fn to_map_key(&self) -> MapKey {
        MapKey::Int(i64::from(*self))
    }
}

impl<K: ToMapKey + ?Sized> ToMapKey for &K {
    fn to_map_key(&self) -> MapKey {
        (**self).to_map_key()
    }
}

impl<K: ToMapKey, V: Checkable, S: BuildHasher> Checkable for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_map_key(), v.to_value()))
                .collect(),
        )
    }
}

impl<K: ToMapKey, V: Checkable> Checkable for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_map_key(), v.to_value()))
                .collect(),
        )
    }
}
