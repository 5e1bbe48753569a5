//! JSON documents as validatable records.
//!
//! A JSON object becomes an open [`Record`]: every configured property is
//! readable, and a member missing from the object reads as null so that
//! `Required` rules fire on it.
//!
//! Type names drive configuration lookup. A JSON object names its own type
//! through a `"$type"` member; without one, a nested object is named after
//! the property that holds it (collection elements after the collection
//! property).

use crate::value::{Record, TypeDescriptor, Value};
use serde_json::{Map, Value as JsonValue};
use std::borrow::Cow;

/// Member used by JSON objects to name their own type.
pub const TYPE_MEMBER: &str = "$type";

/// A JSON object viewed as a record of a named type.
#[derive(Debug)]
pub struct JsonRecord<'a> {
    descriptor: TypeDescriptor,
    fields: &'a Map<String, JsonValue>,
}

impl<'a> JsonRecord<'a> {
    pub fn new(type_name: impl Into<Cow<'static, str>>, fields: &'a Map<String, JsonValue>) -> Self {
        Self {
            descriptor: TypeDescriptor::open(type_name),
            fields,
        }
    }

    /// Build a record from an object using its `"$type"` member as the type name.
    ///
    /// Returns `None` when the object does not name its type.
    pub fn self_typed(fields: &'a Map<String, JsonValue>) -> Option<Self> {
        declared_type(fields).map(|name| Self::new(name.to_string(), fields))
    }

    fn lookup(&self, name: &str) -> Option<&'a JsonValue> {
        if let Some(v) = self.fields.get(name) {
            return Some(v);
        }
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}

impl Record for JsonRecord<'_> {
    fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    fn property(&self, name: &str) -> Option<Value<'_>> {
        Some(match self.lookup(name) {
            Some(v) => to_value(name, v),
            None => Value::Null,
        })
    }
}

fn declared_type(fields: &Map<String, JsonValue>) -> Option<&str> {
    fields
        .get(TYPE_MEMBER)
        .and_then(JsonValue::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Convert a JSON value held by `property` into an engine value.
pub fn to_value<'a>(property: &str, value: &'a JsonValue) -> Value<'a> {
    match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => n.as_f64().map_or(Value::Null, Value::Float),
        },
        JsonValue::String(s) => Value::Text(Cow::Borrowed(s.as_str())),
        JsonValue::Array(items) => {
            Value::List(items.iter().map(|item| to_value(property, item)).collect())
        }
        JsonValue::Object(fields) => {
            let type_name = declared_type(fields).unwrap_or(property).to_string();
            Value::record(JsonRecord::new(type_name, fields))
        }
    }
}
