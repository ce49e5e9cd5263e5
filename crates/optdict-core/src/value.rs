//! Dynamic option values and the type tags used to constrain them.
//!
//! Options hold heterogeneous data: iteration limits, tolerances, mode
//! strings, nested settings and even whole components (a linear solver stored
//! inside a Newton solver's options). [`OptionValue`] is the tagged union over
//! those kinds and [`ValueType`] names the kinds a slot may accept.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An opaque, shared handle to a component stored as an option value.
///
/// Two handles are equal only when they point at the same instance.
#[derive(Clone)]
pub struct ObjectValue {
    type_name: String,
    inner: Arc<dyn Any + Send + Sync>,
}

impl ObjectValue {
    /// Wrap `value`, recording `type_name` for type checks and display.
    pub fn new<T: Any + Send + Sync>(type_name: impl Into<String>, value: T) -> Self {
        Self {
            type_name: type_name.into(),
            inner: Arc::new(value),
        }
    }

    /// The declared type name of the wrapped component.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Borrow the wrapped component as a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} object>", self.type_name)
    }
}

/// A value stored in an option slot.
///
/// `OptionValue::None` is the explicit null value. A slot that has never been
/// given a value holds no `OptionValue` at all.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// Explicit null.
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<OptionValue>),
    Map(BTreeMap<String, OptionValue>),
    /// A shared component instance.
    Object(ObjectValue),
}

impl OptionValue {
    /// Returns true for the explicit null value.
    pub fn is_none(&self) -> bool {
        matches!(self, OptionValue::None)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view used by bound checks: integers and floats, nothing else.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Int(n) => Some(*n as f64),
            OptionValue::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[OptionValue]> {
        match self {
            OptionValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            OptionValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Name of this value's runtime type, as used in error messages.
    pub fn type_name(&self) -> &str {
        match self {
            OptionValue::None => "none",
            OptionValue::Bool(_) => "bool",
            OptionValue::Int(_) => "int",
            OptionValue::Float(_) => "float",
            OptionValue::Str(_) => "str",
            OptionValue::List(_) => "list",
            OptionValue::Map(_) => "map",
            OptionValue::Object(obj) => obj.type_name(),
        }
    }

    /// Quoted rendering for diagnostics: strings appear in single quotes.
    pub fn repr(&self) -> String {
        match self {
            OptionValue::Str(s) => format!("'{s}'"),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::None => write!(f, "None"),
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Int(n) => write!(f, "{n}"),
            // Debug keeps the trailing `.0` so floats read as floats.
            OptionValue::Float(x) => write!(f, "{x:?}"),
            OptionValue::Str(s) => write!(f, "{s}"),
            OptionValue::List(items) => write!(f, "{}", repr_list(items)),
            OptionValue::Map(map) => {
                let pairs: Vec<_> = map.iter().map(|(k, v)| format!("'{k}': {}", v.repr())).collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            OptionValue::Object(obj) => write!(f, "{obj:?}"),
        }
    }
}

/// Render a sequence of values as `[a, 'b', 3]`.
pub fn repr_list(items: &[OptionValue]) -> String {
    let parts: Vec<_> = items.iter().map(OptionValue::repr).collect();
    format!("[{}]", parts.join(", "))
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        OptionValue::Int(n)
    }
}

impl From<i32> for OptionValue {
    fn from(n: i32) -> Self {
        OptionValue::Int(n.into())
    }
}

impl From<u32> for OptionValue {
    fn from(n: u32) -> Self {
        OptionValue::Int(n.into())
    }
}

impl From<f64> for OptionValue {
    fn from(x: f64) -> Self {
        OptionValue::Float(x)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Str(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Str(s)
    }
}

impl From<ObjectValue> for OptionValue {
    fn from(obj: ObjectValue) -> Self {
        OptionValue::Object(obj)
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(items: Vec<T>) -> Self {
        OptionValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(OptionValue::None, Into::into)
    }
}

impl From<serde_json::Value> for OptionValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => OptionValue::None,
            Value::Bool(b) => OptionValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => OptionValue::Int(i),
                None => OptionValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => OptionValue::Str(s),
            Value::Array(items) => OptionValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                OptionValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<toml::Value> for OptionValue {
    fn from(value: toml::Value) -> Self {
        use toml::Value;
        match value {
            Value::String(s) => OptionValue::Str(s),
            Value::Integer(i) => OptionValue::Int(i),
            Value::Float(x) => OptionValue::Float(x),
            Value::Boolean(b) => OptionValue::Bool(b),
            Value::Datetime(dt) => OptionValue::Str(dt.to_string()),
            Value::Array(items) => OptionValue::List(items.into_iter().map(Into::into).collect()),
            Value::Table(table) => {
                OptionValue::Map(table.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionValue::None => serializer.serialize_none(),
            OptionValue::Bool(b) => serializer.serialize_bool(*b),
            OptionValue::Int(n) => serializer.serialize_i64(*n),
            OptionValue::Float(x) => serializer.serialize_f64(*x),
            OptionValue::Str(s) => serializer.serialize_str(s),
            OptionValue::List(items) => items.serialize(serializer),
            OptionValue::Map(map) => map.serialize(serializer),
            // Components are recorded by type only.
            OptionValue::Object(obj) => serializer.serialize_str(&format!("{obj:?}")),
        }
    }
}

impl<'de> Deserialize<'de> for OptionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(OptionValue::from)
    }
}

/// A type an option slot may accept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Accepts every value, including null.
    Any,
    Bool,
    Int,
    Float,
    /// Either `Int` or `Float`.
    Number,
    Str,
    List,
    Map,
    /// A component type, matched against [`ObjectValue::type_name`].
    Object(String),
}

impl ValueType {
    /// Parse a type name. Names outside the built-in set denote component types.
    pub fn parse(name: &str) -> Self {
        match name {
            "any" => ValueType::Any,
            "bool" => ValueType::Bool,
            "int" => ValueType::Int,
            "float" => ValueType::Float,
            "number" => ValueType::Number,
            "str" => ValueType::Str,
            "list" => ValueType::List,
            "map" => ValueType::Map,
            other => ValueType::Object(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ValueType::Any => "any",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Number => "number",
            ValueType::Str => "str",
            ValueType::List => "list",
            ValueType::Map => "map",
            ValueType::Object(name) => name,
        }
    }

    /// Instance check of `value` against this type.
    pub fn matches(&self, value: &OptionValue) -> bool {
        match (self, value) {
            (ValueType::Any, _) => true,
            (ValueType::Bool, OptionValue::Bool(_)) => true,
            (ValueType::Int, OptionValue::Int(_)) => true,
            (ValueType::Float, OptionValue::Float(_)) => true,
            (ValueType::Number, OptionValue::Int(_) | OptionValue::Float(_)) => true,
            (ValueType::Str, OptionValue::Str(_)) => true,
            (ValueType::List, OptionValue::List(_)) => true,
            (ValueType::Map, OptionValue::Map(_)) => true,
            (ValueType::Object(name), OptionValue::Object(obj)) => obj.type_name() == name,
            _ => false,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<&str> for ValueType {
    fn from(name: &str) -> Self {
        ValueType::parse(name)
    }
}

impl Serialize for ValueType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ValueType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ValueType::parse(&name))
    }
}

/// Conversion from a stored option value into a concrete Rust type.
pub trait FromOptionValue: Sized {
    /// The type reported when the stored value does not convert.
    const EXPECTED: ValueType;

    fn from_option_value(value: &OptionValue) -> Option<Self>;
}

impl FromOptionValue for bool {
    const EXPECTED: ValueType = ValueType::Bool;

    fn from_option_value(value: &OptionValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromOptionValue for i64 {
    const EXPECTED: ValueType = ValueType::Int;

    fn from_option_value(value: &OptionValue) -> Option<Self> {
        value.as_int()
    }
}

impl FromOptionValue for f64 {
    const EXPECTED: ValueType = ValueType::Number;

    fn from_option_value(value: &OptionValue) -> Option<Self> {
        value.as_f64()
    }
}

impl FromOptionValue for String {
    const EXPECTED: ValueType = ValueType::Str;

    fn from_option_value(value: &OptionValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}
