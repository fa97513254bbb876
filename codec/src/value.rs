//! Dynamic record values.

use std::collections::BTreeMap;

/// A field value in decoded form, one variant per field type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Byte(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Double(f64),
    String(String),
    Binary(Vec<u8>),
    Struct(Record),
    List(Vec<Value>),
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Short name of the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Byte(_) => "byte",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Binary(_) => "binary",
            Self::Struct(_) => "struct",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
        }
    }

    #[must_use]
    pub const fn as_i32(&self) -> Option<i32> {
        match self {
            Self::I32(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Struct(record) => Some(record),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::I32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Struct(record)
    }
}

/// A record instance: the populated subset of a schema's fields, by name.
///
/// A field that is not set is absent, which is distinct from a field set to
/// a zero value. Equality compares every field by name, recursively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a field, returning the previous value if there was one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Unsets a field.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of populated fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates populated fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<N: Into<String>> FromIterator<(N, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (N, Value)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_is_not_zero() {
        let unset = Record::new().with("board", "X..");
        let zero = Record::new().with("board", "X..").with("remoteness", 0);
        assert_ne!(unset, zero);
        assert!(unset.get("remoteness").is_none());
        assert_eq!(zero.get("remoteness"), Some(&Value::I32(0)));
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a = Record::new().with("value", "win").with("score", 2);
        let b = Record::new().with("score", 2).with("value", "win");
        assert_eq!(a, b);
    }

    #[test]
    fn equality_is_recursive() {
        let inner = |remoteness: i32| Record::new().with("remoteness", remoteness);
        let a = Record::new().with("response", inner(1));
        let b = Record::new().with("response", inner(1));
        let c = Record::new().with("response", inner(2));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn set_and_remove() {
        let mut record = Record::new();
        assert!(record.is_empty());
        assert_eq!(record.set("move", "a1"), None);
        assert_eq!(record.set("move", "b2"), Some(Value::from("a1")));
        assert!(record.contains("move"));
        assert_eq!(record.remove("move"), Some(Value::from("b2")));
        assert_eq!(record.len(), 0);
    }

    #[test]
    fn collect_from_pairs() {
        let record: Record = vec![("status", Value::from("ok")), ("message", Value::from(""))]
            .into_iter()
            .collect();
        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["message", "status"]);
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::I32(3).as_i32(), Some(3));
        assert_eq!(Value::I64(3).as_i32(), None);
        assert_eq!(Value::from("win").as_str(), Some("win"));
        assert!(Value::List(Vec::new()).as_list().unwrap().is_empty());
        assert!(Value::from(Record::new()).as_record().is_some());
        assert_eq!(Value::Set(Vec::new()).type_name(), "set");
    }
}
