//! Schema validation errors.

use std::fmt;

use crate::FieldId;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when building or validating a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Field id 0 is reserved.
    ReservedFieldId { record: String },

    /// Duplicate field id within a record.
    DuplicateFieldId { record: String, field: FieldId },

    /// Duplicate field name within a record.
    DuplicateFieldName { record: String, name: String },

    /// Record or field name is empty.
    EmptyName { record: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReservedFieldId { record } => {
                write!(f, "record {record:?} uses reserved field id 0")
            }
            Self::DuplicateFieldId { record, field } => {
                write!(f, "record {record:?} declares field id {field} twice")
            }
            Self::DuplicateFieldName { record, name } => {
                write!(f, "record {record:?} declares field {name:?} twice")
            }
            Self::EmptyName { record } => write!(f, "record {record:?} has an empty name"),
        }
    }
}

impl std::error::Error for SchemaError {}
