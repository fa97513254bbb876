//! Record schemas and field types for the gamesman record codec.
//!
//! This crate defines how records are described for encoding:
//! - Field ids and field types (scalars, strings, nested structs, containers)
//! - Record schemas with validation
//! - Deterministic schema fingerprinting
//!
//! # Design Principles
//!
//! - **Declarative** - A schema is data; one generic codec walks any schema.
//! - **Explicit schemas** - No reflection on arbitrary Rust types.
//! - **Deterministic fingerprints** - Stable given the same definition.

use std::fmt;
use std::num::NonZeroU16;

mod error;
mod field;
mod hash;
mod schema;

pub use error::{SchemaError, SchemaResult};
pub use field::{FieldSpec, FieldType};
pub use hash::schema_fingerprint;
pub use schema::{RecordSchema, RecordSchemaBuilder};

/// A field id within a record schema.
///
/// Id 0 is reserved and cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FieldId(NonZeroU16);

impl FieldId {
    /// Creates a field id, returning `None` for the reserved id 0.
    #[must_use]
    pub const fn new(id: u16) -> Option<Self> {
        match NonZeroU16::new(id) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Returns the raw id as written on the wire.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl From<FieldId> for u16 {
    fn from(id: FieldId) -> Self {
        id.get()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
