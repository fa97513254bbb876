//! Record schema definitions and validation.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{SchemaError, SchemaResult};
use crate::{FieldId, FieldSpec, FieldType};

/// A named, ordered list of fields.
///
/// Field order is the order fields are written in.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordSchema {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

impl RecordSchema {
    /// Creates a schema from fields after validation.
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> SchemaResult<Self> {
        let schema = Self {
            name: name.into(),
            fields,
        };
        schema.validate()?;
        Ok(schema)
    }

    /// Creates a schema builder.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> RecordSchemaBuilder {
        RecordSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
            reserved_id_used: false,
        }
    }

    /// Validates schema invariants, including nested struct schemas.
    pub fn validate(&self) -> SchemaResult<()> {
        if self.name.is_empty() {
            return Err(SchemaError::EmptyName {
                record: self.name.clone(),
            });
        }

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyName {
                    record: self.name.clone(),
                });
            }
            if !ids.insert(field.id) {
                return Err(SchemaError::DuplicateFieldId {
                    record: self.name.clone(),
                    field: field.id,
                });
            }
            if !names.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateFieldName {
                    record: self.name.clone(),
                    name: field.name.clone(),
                });
            }
            validate_nested(&field.ty)?;
        }
        Ok(())
    }

    /// Looks up a field by its wire id.
    #[must_use]
    pub fn field_by_id(&self, id: u16) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.id.get() == id)
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field_by_name(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builder for `RecordSchema`.
#[derive(Debug)]
pub struct RecordSchemaBuilder {
    name: String,
    fields: Vec<FieldSpec>,
    reserved_id_used: bool,
}

impl RecordSchemaBuilder {
    /// Adds a field; id 0 is rejected when the schema is built.
    #[must_use]
    pub fn field(mut self, id: u16, name: impl Into<String>, ty: FieldType) -> Self {
        match FieldId::new(id) {
            Some(id) => self.fields.push(FieldSpec::new(id, name, ty)),
            None => self.reserved_id_used = true,
        }
        self
    }

    /// Builds the schema after validation.
    pub fn build(self) -> SchemaResult<RecordSchema> {
        if self.reserved_id_used {
            return Err(SchemaError::ReservedFieldId { record: self.name });
        }
        RecordSchema::new(self.name, self.fields)
    }

    /// Builds the schema and wraps it for sharing as a nested struct type.
    pub fn build_shared(self) -> SchemaResult<Arc<RecordSchema>> {
        self.build().map(Arc::new)
    }
}

fn validate_nested(ty: &FieldType) -> SchemaResult<()> {
    match ty {
        FieldType::Struct(schema) => schema.validate(),
        FieldType::List(elem) | FieldType::Set(elem) => validate_nested(elem),
        FieldType::Map(key, value) => {
            validate_nested(key)?;
            validate_nested(value)
        }
        FieldType::Bool
        | FieldType::Byte
        | FieldType::I16
        | FieldType::I32
        | FieldType::I64
        | FieldType::Double
        | FieldType::String
        | FieldType::Binary => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fid(value: u16) -> FieldId {
        FieldId::new(value).unwrap()
    }

    #[test]
    fn schema_builder_roundtrip() {
        let schema = RecordSchema::builder("GamestateResponse")
            .field(1, "board", FieldType::String)
            .field(2, "remoteness", FieldType::I32)
            .build()
            .unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.field_by_id(2).unwrap().name, "remoteness");
        assert_eq!(schema.field_by_name("board").unwrap().id, fid(1));
        assert!(schema.field_by_id(9).is_none());
    }

    #[test]
    fn schema_keeps_declaration_order() {
        let schema = RecordSchema::builder("Ordered")
            .field(5, "e", FieldType::Bool)
            .field(1, "a", FieldType::Bool)
            .build()
            .unwrap();
        let ids: Vec<u16> = schema.fields.iter().map(|f| f.id.get()).collect();
        assert_eq!(ids, vec![5, 1]);
    }

    #[test]
    fn schema_rejects_duplicate_field_ids() {
        let err = RecordSchema::new(
            "Dup",
            vec![
                FieldSpec::new(fid(1), "a", FieldType::Bool),
                FieldSpec::new(fid(1), "b", FieldType::I32),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateFieldId { .. }));
    }

    #[test]
    fn schema_rejects_duplicate_field_names() {
        let err = RecordSchema::builder("Dup")
            .field(1, "a", FieldType::Bool)
            .field(2, "a", FieldType::I32)
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateFieldName { .. }));
    }

    #[test]
    fn schema_rejects_reserved_id() {
        let err = RecordSchema::builder("Zero")
            .field(0, "a", FieldType::Bool)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::ReservedFieldId {
                record: "Zero".to_string()
            }
        );
    }

    #[test]
    fn schema_rejects_empty_names() {
        assert!(matches!(
            RecordSchema::new("", Vec::new()),
            Err(SchemaError::EmptyName { .. })
        ));
        assert!(matches!(
            RecordSchema::builder("R").field(1, "", FieldType::I16).build(),
            Err(SchemaError::EmptyName { .. })
        ));
    }

    #[test]
    fn schema_validates_nested_schemas() {
        // Bypass the constructor to get an invalid nested schema.
        let inner = Arc::new(RecordSchema {
            name: "Inner".to_string(),
            fields: vec![
                FieldSpec::new(fid(1), "x", FieldType::Bool),
                FieldSpec::new(fid(1), "y", FieldType::Bool),
            ],
        });
        let err = RecordSchema::builder("Outer")
            .field(1, "items", FieldType::list(FieldType::structure(inner)))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateFieldId { .. }));
    }

    #[test]
    fn empty_schema_is_valid() {
        let schema = RecordSchema::new("Empty", Vec::new()).unwrap();
        assert!(schema.is_empty());
    }
}
