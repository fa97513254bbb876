//! Schema-driven record encoding and decoding.
//!
//! Encoding walks the schema in declaration order and writes every populated
//! field. Decoding is driven by the wire: fields arrive in any order, fields
//! the schema does not know (or knows under a different type) are skipped,
//! and a repeated field id keeps its last value.

use std::io;

use bytestream::{ByteReader, ByteSource, ByteWriter, StreamReader};
use schema::{FieldSpec, FieldType, RecordSchema};
use tracing::{debug, trace};
use wire::{FieldHeader, Limits, ListHeader, MapHeader, ProtocolReader, ProtocolWriter};

use crate::error::{CodecError, CodecResult};
use crate::value::{Record, Value};

/// Upper bound on up-front element allocation; counts come from the wire.
const PREALLOC_CAP: usize = 1024;

/// Encodes `record` as a struct of `schema`, appending to `out`.
///
/// On error nothing is appended: `out` is rolled back to its prior length.
pub fn encode_record(
    schema: &RecordSchema,
    record: &Record,
    out: &mut ByteWriter,
) -> CodecResult<()> {
    let start = out.len();
    let result = write_struct(&mut ProtocolWriter::new(out), schema, record);
    if result.is_err() {
        out.truncate(start);
    }
    result
}

/// Encodes `record` into a freshly allocated buffer.
pub fn encode_record_to_vec(schema: &RecordSchema, record: &Record) -> CodecResult<Vec<u8>> {
    let mut out = ByteWriter::new();
    encode_record(schema, record, &mut out)?;
    Ok(out.finish())
}

/// Encodes `record` and writes it to `sink`.
///
/// Codec failures surface as [`io::ErrorKind::InvalidInput`]; sink failures
/// are returned unchanged. Nothing is written if encoding fails.
pub fn write_record_to<W: io::Write>(
    schema: &RecordSchema,
    record: &Record,
    mut sink: W,
) -> io::Result<()> {
    let bytes = encode_record_to_vec(schema, record)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    sink.write_all(&bytes)
}

/// Decodes one struct of `schema` from `source`.
///
/// Consumes exactly the bytes of that struct, up to and including its
/// field-stop marker.
pub fn decode_record<S: ByteSource>(
    schema: &RecordSchema,
    source: &mut S,
    limits: &Limits,
) -> CodecResult<Record> {
    let mut reader = ProtocolReader::new(source, limits);
    read_struct(&mut reader, schema)
}

/// Decodes one struct from the front of `bytes`.
///
/// Returns the record and the number of bytes it occupied; trailing bytes
/// are left for the caller.
pub fn decode_record_from_slice(
    schema: &RecordSchema,
    bytes: &[u8],
    limits: &Limits,
) -> CodecResult<(Record, usize)> {
    let mut source = ByteReader::new(bytes);
    let record = decode_record(schema, &mut source, limits)?;
    Ok((record, source.position()))
}

/// Decodes one struct from a blocking reader.
pub fn read_record_from<R: io::Read>(
    schema: &RecordSchema,
    reader: R,
    limits: &Limits,
) -> CodecResult<Record> {
    let mut source = StreamReader::new(reader);
    decode_record(schema, &mut source, limits)
}

fn write_struct(
    w: &mut ProtocolWriter<'_>,
    schema: &RecordSchema,
    record: &Record,
) -> CodecResult<()> {
    if let Some((name, _)) = record
        .iter()
        .find(|(name, _)| schema.field_by_name(name).is_none())
    {
        return Err(CodecError::UnknownField {
            record: schema.name.clone(),
            field: name.to_string(),
        });
    }

    w.write_struct_begin(&schema.name);
    for field in &schema.fields {
        let Some(value) = record.get(&field.name) else {
            continue;
        };
        w.write_field_begin(FieldHeader::new(field.ty.tag(), field.id.get()));
        write_value(w, schema, field, &field.ty, value)?;
        w.write_field_end();
    }
    w.write_field_stop();
    w.write_struct_end();
    Ok(())
}

fn write_value(
    w: &mut ProtocolWriter<'_>,
    schema: &RecordSchema,
    field: &FieldSpec,
    ty: &FieldType,
    value: &Value,
) -> CodecResult<()> {
    match (ty, value) {
        (FieldType::Bool, Value::Bool(v)) => w.write_bool(*v),
        (FieldType::Byte, Value::Byte(v)) => w.write_byte(*v),
        (FieldType::I16, Value::I16(v)) => w.write_i16(*v),
        (FieldType::I32, Value::I32(v)) => w.write_i32(*v),
        (FieldType::I64, Value::I64(v)) => w.write_i64(*v),
        (FieldType::Double, Value::Double(v)) => w.write_double(*v),
        (FieldType::String, Value::String(v)) => w.write_string(v)?,
        (FieldType::Binary, Value::Binary(v)) => w.write_binary(v)?,
        (FieldType::Struct(nested), Value::Struct(record)) => write_struct(w, nested, record)?,
        (FieldType::List(elem), Value::List(items)) => {
            w.write_list_begin(ListHeader {
                elem: elem.tag(),
                len: items.len(),
            })?;
            for item in items {
                write_value(w, schema, field, elem, item)?;
            }
            w.write_list_end();
        }
        (FieldType::Set(elem), Value::Set(items)) => {
            w.write_set_begin(ListHeader {
                elem: elem.tag(),
                len: items.len(),
            })?;
            for item in items {
                write_value(w, schema, field, elem, item)?;
            }
            w.write_set_end();
        }
        (FieldType::Map(key_ty, value_ty), Value::Map(entries)) => {
            w.write_map_begin(MapHeader {
                key: key_ty.tag(),
                value: value_ty.tag(),
                len: entries.len(),
            })?;
            for (key, value) in entries {
                write_value(w, schema, field, key_ty, key)?;
                write_value(w, schema, field, value_ty, value)?;
            }
            w.write_map_end();
        }
        (expected, found) => {
            return Err(CodecError::TypeMismatch {
                record: schema.name.clone(),
                field: field.name.clone(),
                expected: expected.to_string(),
                found: found.type_name(),
            });
        }
    }
    Ok(())
}

fn read_struct<S: ByteSource>(
    r: &mut ProtocolReader<'_, S>,
    schema: &RecordSchema,
) -> CodecResult<Record> {
    r.enter()?;
    r.read_struct_begin();
    let mut record = Record::new();
    while let Some(header) = r.read_field_begin()? {
        match schema.field_by_id(header.id) {
            Some(field) if field.ty.tag() == header.tag => {
                if let Some(value) = read_value(r, &field.ty)? {
                    record.set(field.name.clone(), value);
                } else {
                    debug!(
                        record = %schema.name,
                        field = %field.name,
                        "dropping field with mismatched element types"
                    );
                }
            }
            Some(field) => {
                debug!(
                    record = %schema.name,
                    field = %field.name,
                    expected = %field.ty.tag(),
                    found = %header.tag,
                    "skipping field with mismatched type"
                );
                r.skip(header.tag)?;
            }
            None => {
                debug!(
                    record = %schema.name,
                    id = header.id,
                    tag = %header.tag,
                    "skipping unknown field"
                );
                r.skip(header.tag)?;
            }
        }
        r.read_field_end();
    }
    r.read_struct_end();
    r.leave();
    trace!(record = %schema.name, fields = record.len(), "decoded record");
    Ok(record)
}

/// Reads one value whose wire tag already matches `ty`.
///
/// Returns `None` when a container's element types disagree with the
/// schema; the container is consumed either way.
fn read_value<S: ByteSource>(
    r: &mut ProtocolReader<'_, S>,
    ty: &FieldType,
) -> CodecResult<Option<Value>> {
    let value = match ty {
        FieldType::Bool => Value::Bool(r.read_bool()?),
        FieldType::Byte => Value::Byte(r.read_byte()?),
        FieldType::I16 => Value::I16(r.read_i16()?),
        FieldType::I32 => Value::I32(r.read_i32()?),
        FieldType::I64 => Value::I64(r.read_i64()?),
        FieldType::Double => Value::Double(r.read_double()?),
        FieldType::String => Value::String(r.read_string()?),
        FieldType::Binary => Value::Binary(r.read_binary()?),
        FieldType::Struct(nested) => Value::Struct(read_struct(r, nested)?),
        FieldType::List(elem) => {
            let header = r.read_list_begin()?;
            let items = read_elements(r, elem, header)?;
            r.read_list_end();
            return Ok(items.map(Value::List));
        }
        FieldType::Set(elem) => {
            let header = r.read_set_begin()?;
            let items = read_elements(r, elem, header)?;
            r.read_set_end();
            return Ok(items.map(Value::Set));
        }
        FieldType::Map(key_ty, value_ty) => {
            let header = r.read_map_begin()?;
            let entries = read_entries(r, key_ty, value_ty, header)?;
            r.read_map_end();
            return Ok(entries.map(Value::Map));
        }
    };
    Ok(Some(value))
}

fn read_elements<S: ByteSource>(
    r: &mut ProtocolReader<'_, S>,
    elem: &FieldType,
    header: ListHeader,
) -> CodecResult<Option<Vec<Value>>> {
    r.enter()?;
    if header.elem != elem.tag() {
        for _ in 0..header.len {
            r.skip(header.elem)?;
        }
        r.leave();
        return Ok(None);
    }

    let mut items = Vec::with_capacity(header.len.min(PREALLOC_CAP));
    let mut complete = true;
    for _ in 0..header.len {
        match read_value(r, elem)? {
            Some(item) => items.push(item),
            None => complete = false,
        }
    }
    r.leave();
    Ok(complete.then_some(items))
}

fn read_entries<S: ByteSource>(
    r: &mut ProtocolReader<'_, S>,
    key_ty: &FieldType,
    value_ty: &FieldType,
    header: MapHeader,
) -> CodecResult<Option<Vec<(Value, Value)>>> {
    r.enter()?;
    if header.key != key_ty.tag() || header.value != value_ty.tag() {
        for _ in 0..header.len {
            r.skip(header.key)?;
            r.skip(header.value)?;
        }
        r.leave();
        return Ok(None);
    }

    let mut entries = Vec::with_capacity(header.len.min(PREALLOC_CAP));
    let mut complete = true;
    for _ in 0..header.len {
        let key = read_value(r, key_ty)?;
        let value = read_value(r, value_ty)?;
        match (key, value) {
            (Some(key), Some(value)) => entries.push((key, value)),
            _ => complete = false,
        }
    }
    r.leave();
    Ok(complete.then_some(entries))
}
