//! Property values and record descriptors.
//!
//! Validated types describe themselves explicitly: a [`TypeDescriptor`] names
//! the type and lists its properties in order, and the [`Record`] trait reads
//! one property by name. The engine never needs runtime type introspection.

use std::borrow::Cow;
use std::fmt;

/// Identity and shape of a validated type.
///
/// The name selects the configuration section (`RuleWeaver.<Name>`), and the
/// descriptor as a whole is the key of the plan cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    name: Cow<'static, str>,
    properties: Option<&'static [&'static str]>,
}

impl TypeDescriptor {
    /// Describe a type with a fixed, ordered set of properties.
    ///
    /// ```
    /// use ruleweaver::TypeDescriptor;
    ///
    /// static ADDRESS: TypeDescriptor = TypeDescriptor::new("Address", &["Street", "ZipCode"]);
    /// assert_eq!(ADDRESS.name(), "Address");
    /// ```
    pub const fn new(name: &'static str, properties: &'static [&'static str]) -> Self {
        Self {
            name: Cow::Borrowed(name),
            properties: Some(properties),
        }
    }

    /// Describe a type whose property set is not known up front (e.g. a JSON object).
    ///
    /// Every configured property is considered part of an open type.
    pub fn open(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            properties: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared properties in declaration order, or `None` for open types.
    pub fn properties(&self) -> Option<&'static [&'static str]> {
        self.properties
    }

    pub fn is_open(&self) -> bool {
        self.properties.is_none()
    }

    /// Map a configured property name onto this type.
    ///
    /// Matching ignores case; the declared spelling is returned. Open types
    /// accept any name unchanged.
    pub fn resolve_property(&self, configured: &str) -> Option<String> {
        match self.properties {
            None => Some(configured.to_string()),
            Some(declared) => declared
                .iter()
                .find(|p| p.eq_ignore_ascii_case(configured))
                .map(|p| p.to_string()),
        }
    }
}

/// A validatable record: a described type with readable properties.
pub trait Record {
    /// Descriptor of the record's runtime type.
    fn descriptor(&self) -> &TypeDescriptor;

    /// Current value of the property, or `None` if the record has no such property.
    fn property(&self, name: &str) -> Option<Value<'_>>;
}

impl<T: Record + ?Sized> Record for &T {
    fn descriptor(&self) -> &TypeDescriptor {
        (**self).descriptor()
    }

    fn property(&self, name: &str) -> Option<Value<'_>> {
        (**self).property(name)
    }
}

/// The value of one property, as seen by rules and by the engine.
pub enum Value<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(Cow<'a, str>),
    /// An ordered collection. Text is never a collection.
    List(Vec<Value<'a>>),
    /// A nested record, reachable through `Nested` steps.
    Record(Box<dyn Record + 'a>),
}

impl<'a> Value<'a> {
    /// Wrap a record (usually a reference to a field) as a value.
    pub fn record<R: Record + 'a>(record: R) -> Self {
        Value::Record(Box::new(record))
    }

    /// Wrap an optional record; `None` becomes [`Value::Null`].
    pub fn optional_record<R: Record>(record: Option<&'a R>) -> Self {
        match record {
            Some(r) => Value::record(r),
            None => Value::Null,
        }
    }

    /// Wrap a slice of records as a list of record values.
    pub fn records<R: Record>(items: &'a [R]) -> Self {
        Value::List(items.iter().map(Value::record).collect())
    }

    /// Collect any iterator of convertible items into a list.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value<'a>>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn text(s: impl Into<Cow<'a, str>>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Text form of a scalar value; `None` for null, lists, and records.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Text(s) => Some(Cow::Borrowed(s.as_ref())),
            Value::Int(n) => Some(Cow::Owned(n.to_string())),
            Value::Float(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            Value::Null | Value::List(_) | Value::Record(_) => None,
        }
    }

    /// Numeric reading of the value: numbers, or text that parses as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Short name of the value's kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Value::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Value::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Record(r) => f
                .debug_tuple("Record")
                .field(&r.descriptor().name())
                .finish(),
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Text(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Value::Text(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::Text(Cow::Owned(s))
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value<'_> {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value<'_> {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value<'_> {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<u64> for Value<'_> {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Int)
    }
}

impl From<f32> for Value<'_> {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value<'_> {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<'a> From<&'a [String]> for Value<'a> {
    fn from(items: &'a [String]) -> Self {
        Value::list(items)
    }
}

impl<'a> From<&'a Vec<String>> for Value<'a> {
    fn from(items: &'a Vec<String>) -> Self {
        Value::list(items)
    }
}
