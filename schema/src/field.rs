//! Field types and field specifications.

use std::fmt;
use std::sync::Arc;

use wire::TypeTag;

use crate::schema::RecordSchema;
use crate::FieldId;

/// The declared type of a field.
///
/// `String` and `Binary` share the `String` wire tag; `String` payloads must
/// be UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldType {
    Bool,
    Byte,
    I16,
    I32,
    I64,
    Double,
    String,
    Binary,
    Struct(Arc<RecordSchema>),
    List(Box<FieldType>),
    Set(Box<FieldType>),
    Map(Box<FieldType>, Box<FieldType>),
}

impl FieldType {
    /// Creates a nested struct type.
    #[must_use]
    pub fn structure(schema: Arc<RecordSchema>) -> Self {
        Self::Struct(schema)
    }

    /// Creates a list type.
    #[must_use]
    pub fn list(elem: Self) -> Self {
        Self::List(Box::new(elem))
    }

    /// Creates a set type.
    #[must_use]
    pub fn set(elem: Self) -> Self {
        Self::Set(Box::new(elem))
    }

    /// Creates a map type.
    #[must_use]
    pub fn map(key: Self, value: Self) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// The wire tag values of this type are written with.
    #[must_use]
    pub const fn tag(&self) -> TypeTag {
        match self {
            Self::Bool => TypeTag::Bool,
            Self::Byte => TypeTag::Byte,
            Self::I16 => TypeTag::I16,
            Self::I32 => TypeTag::I32,
            Self::I64 => TypeTag::I64,
            Self::Double => TypeTag::Double,
            Self::String | Self::Binary => TypeTag::String,
            Self::Struct(_) => TypeTag::Struct,
            Self::List(_) => TypeTag::List,
            Self::Set(_) => TypeTag::Set,
            Self::Map(_, _) => TypeTag::Map,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary => f.write_str("binary"),
            Self::Struct(schema) => f.write_str(&schema.name),
            Self::List(elem) => write!(f, "list<{elem}>"),
            Self::Set(elem) => write!(f, "set<{elem}>"),
            Self::Map(key, value) => write!(f, "map<{key}, {value}>"),
            other => f.write_str(other.tag().name()),
        }
    }
}

/// One field of a record schema.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldSpec {
    pub id: FieldId,
    pub name: String,
    pub ty: FieldType,
}

impl FieldSpec {
    /// Creates a field specification.
    #[must_use]
    pub fn new(id: FieldId, name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            id,
            name: name.into(),
            ty,
        }
    }
}
