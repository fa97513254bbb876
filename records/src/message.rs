//! Conversion between typed records and the dynamic [`Record`] form.

use std::io;

use bytestream::ByteWriter;
use codec::{CodecError, CodecResult, Limits, Record, Value};
use schema::RecordSchema;

/// A typed record with a fixed schema.
pub trait Message: Sized {
    /// The schema this record is encoded with.
    fn schema() -> &'static RecordSchema;

    /// Converts to the dynamic form; `None` fields are left absent.
    fn to_record(&self) -> Record;

    /// Converts from the dynamic form.
    ///
    /// Fails if a field holds a value of the wrong type or the record holds
    /// a name the schema does not declare.
    fn from_record(record: &Record) -> CodecResult<Self>;

    /// Encodes into a fresh buffer.
    fn encode(&self) -> CodecResult<Vec<u8>> {
        codec::encode_record_to_vec(Self::schema(), &self.to_record())
    }

    /// Encodes, appending to `out`.
    fn encode_into(&self, out: &mut ByteWriter) -> CodecResult<()> {
        codec::encode_record(Self::schema(), &self.to_record(), out)
    }

    /// Decodes from the front of `bytes`, returning the bytes consumed.
    fn decode(bytes: &[u8], limits: &Limits) -> CodecResult<(Self, usize)> {
        let (record, consumed) = codec::decode_record_from_slice(Self::schema(), bytes, limits)?;
        Ok((Self::from_record(&record)?, consumed))
    }

    fn write_to<W: io::Write>(&self, sink: W) -> io::Result<()> {
        codec::write_record_to(Self::schema(), &self.to_record(), sink)
    }

    fn read_from<R: io::Read>(reader: R, limits: &Limits) -> CodecResult<Self> {
        let record = codec::read_record_from(Self::schema(), reader, limits)?;
        Self::from_record(&record)
    }
}

/// Field extraction against a schema, for `from_record` implementations.
pub(crate) struct Fields<'a> {
    schema: &'a RecordSchema,
    record: &'a Record,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(schema: &'a RecordSchema, record: &'a Record) -> CodecResult<Self> {
        if let Some((name, _)) = record
            .iter()
            .find(|(name, _)| schema.field_by_name(name).is_none())
        {
            return Err(CodecError::UnknownField {
                record: schema.name.clone(),
                field: name.to_string(),
            });
        }
        Ok(Self { schema, record })
    }

    pub(crate) fn string(&self, name: &str) -> CodecResult<Option<String>> {
        match self.record.get(name) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(other) => Err(self.mismatch(name, other)),
        }
    }

    pub(crate) fn i32(&self, name: &str) -> CodecResult<Option<i32>> {
        match self.record.get(name) {
            None => Ok(None),
            Some(Value::I32(value)) => Ok(Some(*value)),
            Some(other) => Err(self.mismatch(name, other)),
        }
    }

    pub(crate) fn message<M: Message>(&self, name: &str) -> CodecResult<Option<M>> {
        match self.record.get(name) {
            None => Ok(None),
            Some(Value::Struct(record)) => M::from_record(record).map(Some),
            Some(other) => Err(self.mismatch(name, other)),
        }
    }

    pub(crate) fn message_list<M: Message>(&self, name: &str) -> CodecResult<Option<Vec<M>>> {
        let items = match self.record.get(name) {
            None => return Ok(None),
            Some(Value::List(items)) => items,
            Some(other) => return Err(self.mismatch(name, other)),
        };
        items
            .iter()
            .map(|item| match item {
                Value::Struct(record) => M::from_record(record),
                other => Err(self.mismatch(name, other)),
            })
            .collect::<CodecResult<Vec<M>>>()
            .map(Some)
    }

    fn mismatch(&self, name: &str, found: &Value) -> CodecError {
        let expected = self
            .schema
            .field_by_name(name)
            .map_or_else(String::new, |field| field.ty.to_string());
        CodecError::TypeMismatch {
            record: self.schema.name.clone(),
            field: name.to_string(),
            expected,
            found: found.type_name(),
        }
    }
}

/// Sets `name` when `value` is present.
pub(crate) fn set_opt(record: &mut Record, name: &str, value: Option<impl Into<Value>>) {
    if let Some(value) = value {
        record.set(name, value);
    }
}
