//! Deterministic schema fingerprinting.

use blake3::Hasher;

use crate::{FieldType, RecordSchema};

/// Computes a deterministic fingerprint of a schema.
///
/// Covers record names, field ids, field names and field types, recursing
/// into nested struct schemas. Two peers with equal fingerprints agree on
/// the wire layout of every field.
#[must_use]
pub fn schema_fingerprint(schema: &RecordSchema) -> u64 {
    let mut hasher = Hasher::new();
    write_schema(&mut hasher, schema);

    let hash = hasher.finalize();
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(prefix)
}

fn write_schema(hasher: &mut Hasher, schema: &RecordSchema) {
    write_str(hasher, &schema.name);
    write_u32(hasher, schema.fields.len() as u32);

    for field in &schema.fields {
        write_u16(hasher, field.id.get());
        write_str(hasher, &field.name);
        write_type(hasher, &field.ty);
    }
}

fn write_type(hasher: &mut Hasher, ty: &FieldType) {
    match ty {
        FieldType::Struct(schema) => {
            write_u8(hasher, ty.tag().raw());
            write_schema(hasher, schema);
        }
        FieldType::List(elem) | FieldType::Set(elem) => {
            write_u8(hasher, ty.tag().raw());
            write_type(hasher, elem);
        }
        FieldType::Map(key, value) => {
            write_u8(hasher, ty.tag().raw());
            write_type(hasher, key);
            write_type(hasher, value);
        }
        // Binary shares the string tag; keep the two apart.
        FieldType::Binary => write_u8(hasher, 0x80 | ty.tag().raw()),
        _ => write_u8(hasher, ty.tag().raw()),
    }
}

fn write_str(hasher: &mut Hasher, value: &str) {
    write_u32(hasher, value.len() as u32);
    hasher.update(value.as_bytes());
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_u16(hasher: &mut Hasher, value: u16) {
    hasher.update(&value.to_le_bytes());
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}
