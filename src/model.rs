//! Field model: the ordered job parameters a script is generated from.
//!
//! Every value is tagged once, when the model is built, as a callable, a
//! composite (nested JSON) or a primitive scalar. Nothing downstream probes
//! runtime types again.
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// Field the UI uses to name each job step (`shell0`, `shell1`, ...).
pub const UNIQUE_NAME_FIELD: &str = "uniqueName";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// handlers and other functions attached to the job object
    Callable,
    /// arrays and objects; carried along but never emitted
    Composite(Value),
    Primitive(Primitive),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldModel {
    fields: IndexMap<String, FieldValue>,
}

// ————————————————————————————————————————————————————————————————————————————
// CONVERSIONS
// ————————————————————————————————————————————————————————————————————————————

impl Number {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(i) => i as f64,
            Number::UInt(u) => u as f64,
            Number::Float(f) => f,
        }
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::Int(i)
        } else if let Some(u) = n.as_u64() {
            Number::UInt(u)
        } else {
            // without `arbitrary_precision` every remaining number is an f64
            Number::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl From<&str> for Primitive {
    fn from(s: &str) -> Self { Primitive::String(s.to_string()) }
}
impl From<String> for Primitive {
    fn from(s: String) -> Self { Primitive::String(s) }
}
impl From<i64> for Primitive {
    fn from(i: i64) -> Self { Primitive::Number(Number::Int(i)) }
}
impl From<i32> for Primitive {
    fn from(i: i32) -> Self { Primitive::Number(Number::Int(i.into())) }
}
impl From<u64> for Primitive {
    fn from(u: u64) -> Self { Primitive::Number(Number::UInt(u)) }
}
impl From<f64> for Primitive {
    fn from(f: f64) -> Self { Primitive::Number(Number::Float(f)) }
}
impl From<bool> for Primitive {
    fn from(b: bool) -> Self { Primitive::Bool(b) }
}

impl From<Primitive> for FieldValue {
    fn from(p: Primitive) -> Self { FieldValue::Primitive(p) }
}

macro_rules! primitive_field_value {
    ($($t:ty),*) => {$(
        impl From<$t> for FieldValue {
            fn from(value: $t) -> Self { FieldValue::Primitive(value.into()) }
        }
    )*};
}
primitive_field_value!(&str, String, i64, i32, u64, f64, bool);

impl From<&Value> for FieldValue {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => FieldValue::Primitive(Primitive::Null),
            Value::Bool(b) => FieldValue::Primitive(Primitive::Bool(*b)),
            Value::Number(n) => FieldValue::Primitive(Primitive::Number(n.into())),
            Value::String(s) => FieldValue::Primitive(Primitive::String(s.clone())),
            Value::Array(_) | Value::Object(_) => FieldValue::Composite(v.clone()),
        }
    }
}

impl FieldValue {
    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            FieldValue::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// Short human name of the tag, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Callable => "a callable",
            FieldValue::Composite(Value::Array(_)) => "an array",
            FieldValue::Composite(_) => "an object",
            FieldValue::Primitive(_) => "a primitive",
        }
    }
}

pub(crate) fn json_kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ————————————————————————————————————————————————————————————————————————————
// MODEL
// ————————————————————————————————————————————————————————————————————————————

impl FieldModel {
    pub fn new() -> Self { Self::default() }

    /// Build a model from one JSON job document. Key order follows the document.
    pub fn from_json(doc: &Value) -> Result<Self> {
        let Value::Object(map) = doc else {
            return Err(Error::NotAnObject { found: json_kind_name(doc) });
        };
        Ok(map.iter().map(|(k, v)| (k.clone(), FieldValue::from(v))).collect())
    }

    /// Insert or replace a field. A replaced field keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn callable(self, name: impl Into<String>) -> Self {
        self.with(name, FieldValue::Callable)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> { self.fields.get(name) }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize { self.fields.len() }
    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    /// Numeric view of a field, if it holds a number.
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name)?.as_primitive()? {
            Primitive::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.get(name)?.as_primitive()? {
            Primitive::String(s) => Some(s),
            _ => None,
        }
    }

    /// Name the job step `shell{index}` unless it already carries a name.
    pub fn ensure_unique_name(&mut self, index: usize) {
        if !self.fields.contains_key(UNIQUE_NAME_FIELD) {
            self.insert(UNIQUE_NAME_FIELD, format!("shell{index}"));
        }
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for FieldModel {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }
}

impl<'de> Deserialize<'de> for FieldModel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let doc = Value::deserialize(deserializer)?;
        FieldModel::from_json(&doc).map_err(serde::de::Error::custom)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_document_order_is_preserved() {
        let doc = json!({"zeta": 1, "alpha": "a", "mid": null});
        let model = FieldModel::from_json(&doc).unwrap();
        let keys: Vec<&str> = model.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn json_values_are_tagged_once() {
        let doc = json!({"n": 3, "f": 2.5, "b": true, "s": "x", "z": null, "a": [1], "o": {"k": 1}});
        let model = FieldModel::from_json(&doc).unwrap();
        assert_eq!(model.get("n"), Some(&FieldValue::Primitive(Primitive::Number(Number::Int(3)))));
        assert_eq!(model.get("f"), Some(&FieldValue::Primitive(Primitive::Number(Number::Float(2.5)))));
        assert_eq!(model.get("b"), Some(&FieldValue::Primitive(Primitive::Bool(true))));
        assert_eq!(model.get("z"), Some(&FieldValue::Primitive(Primitive::Null)));
        assert!(matches!(model.get("a"), Some(FieldValue::Composite(Value::Array(_)))));
        assert!(matches!(model.get("o"), Some(FieldValue::Composite(Value::Object(_)))));
    }

    #[test]
    fn large_unsigned_numbers_stay_integral() {
        let doc = json!({"big": u64::MAX});
        let model = FieldModel::from_json(&doc).unwrap();
        assert_eq!(model.get("big"), Some(&FieldValue::Primitive(Primitive::Number(Number::UInt(u64::MAX)))));
    }

    #[test]
    fn non_object_documents_are_rejected() {
        let err = FieldModel::from_json(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::NotAnObject { found: "an array" }));
    }

    #[test]
    fn deserialize_goes_through_the_same_tagging() {
        let model: FieldModel = serde_json::from_str(r#"{"b": 1, "a": {"x": 1}}"#).unwrap();
        assert_eq!(model.len(), 2);
        assert_eq!(model.number("b"), Some(1.0));
        assert!(serde_json::from_str::<FieldModel>("42").is_err());
    }

    #[test]
    fn replacing_a_field_keeps_its_position() {
        let mut model = FieldModel::new().with("a", 1).with("b", 2);
        model.insert("a", "again");
        let keys: Vec<&str> = model.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(model.string("a"), Some("again"));
    }

    #[test]
    fn unique_name_is_only_filled_in_when_missing() {
        let mut fresh = FieldModel::new().with("mgaZone", "EPSG:28355");
        fresh.ensure_unique_name(3);
        assert_eq!(fresh.string(UNIQUE_NAME_FIELD), Some("shell3"));

        let mut named = FieldModel::new().with(UNIQUE_NAME_FIELD, "custom");
        named.ensure_unique_name(0);
        assert_eq!(named.string(UNIQUE_NAME_FIELD), Some("custom"));
    }
}
