//! Binary protocol reader and writer.
//!
//! The struct/field begin and end calls carry no bytes in this format. They
//! are kept so record walkers mark the same boundaries on both sides.

use bytestream::{ByteSource, ByteWriter};

use crate::error::{
    DecodeError, EncodeError, EncodeResult, LimitKind, StructureReason, WireResult,
};
use crate::limits::Limits;
use crate::tag::{FieldHeader, ListHeader, MapHeader, TypeTag};

/// Writes protocol elements into a [`ByteWriter`].
#[derive(Debug)]
pub struct ProtocolWriter<'a> {
    out: &'a mut ByteWriter,
}

impl<'a> ProtocolWriter<'a> {
    pub fn new(out: &'a mut ByteWriter) -> Self {
        Self { out }
    }

    pub fn write_struct_begin(&mut self, _name: &str) {}

    pub fn write_struct_end(&mut self) {}

    pub fn write_field_begin(&mut self, header: FieldHeader) {
        self.out.write_u8(header.tag.raw());
        self.out.write_u16(header.id);
    }

    pub fn write_field_end(&mut self) {}

    pub fn write_field_stop(&mut self) {
        self.out.write_u8(TypeTag::Stop.raw());
    }

    pub fn write_list_begin(&mut self, header: ListHeader) -> EncodeResult<()> {
        self.out.write_u8(header.elem.raw());
        self.write_len(header.len)
    }

    pub fn write_list_end(&mut self) {}

    pub fn write_set_begin(&mut self, header: ListHeader) -> EncodeResult<()> {
        self.write_list_begin(header)
    }

    pub fn write_set_end(&mut self) {}

    pub fn write_map_begin(&mut self, header: MapHeader) -> EncodeResult<()> {
        self.out.write_u8(header.key.raw());
        self.out.write_u8(header.value.raw());
        self.write_len(header.len)
    }

    pub fn write_map_end(&mut self) {}

    pub fn write_bool(&mut self, value: bool) {
        self.out.write_u8(u8::from(value));
    }

    pub fn write_byte(&mut self, value: i8) {
        self.out.write_i8(value);
    }

    pub fn write_i16(&mut self, value: i16) {
        self.out.write_i16(value);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.out.write_i32(value);
    }

    pub fn write_i64(&mut self, value: i64) {
        self.out.write_i64(value);
    }

    pub fn write_double(&mut self, value: f64) {
        self.out.write_f64(value);
    }

    pub fn write_string(&mut self, value: &str) -> EncodeResult<()> {
        self.write_binary(value.as_bytes())
    }

    pub fn write_binary(&mut self, value: &[u8]) -> EncodeResult<()> {
        self.write_len(value.len())?;
        self.out.write_bytes(value);
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> EncodeResult<()> {
        let len = i32::try_from(len).map_err(|_| EncodeError::LengthOverflow { length: len })?;
        self.out.write_i32(len);
        Ok(())
    }
}

/// Reads protocol elements from a [`ByteSource`], enforcing [`Limits`].
///
/// Nesting depth is tracked through [`enter`](Self::enter) and
/// [`leave`](Self::leave); the skip routine uses the same counter.
#[derive(Debug)]
pub struct ProtocolReader<'a, S> {
    source: &'a mut S,
    limits: &'a Limits,
    depth: usize,
}

impl<'a, S: ByteSource> ProtocolReader<'a, S> {
    pub fn new(source: &'a mut S, limits: &'a Limits) -> Self {
        Self {
            source,
            limits,
            depth: 0,
        }
    }

    #[must_use]
    pub const fn limits(&self) -> &Limits {
        self.limits
    }

    /// Bytes consumed from the underlying source so far.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Current nesting depth.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Enters one level of struct or container nesting.
    pub fn enter(&mut self) -> WireResult<()> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::Depth,
                limit: self.limits.max_depth,
                actual: self.depth,
            });
        }
        Ok(())
    }

    /// Leaves one level of nesting.
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn read_struct_begin(&mut self) {}

    pub fn read_struct_end(&mut self) {}

    /// Reads a field header, returning `None` at the field-stop marker.
    pub fn read_field_begin(&mut self) -> WireResult<Option<FieldHeader>> {
        let raw = match self.source.read_u8() {
            Ok(raw) => raw,
            Err(bytestream::ByteError::UnexpectedEof { available: 0, .. }) => {
                return Err(DecodeError::StructureMismatch {
                    reason: StructureReason::MissingStop,
                });
            }
            Err(err) => return Err(err.into()),
        };
        let tag = TypeTag::parse(raw)?;
        if tag == TypeTag::Stop {
            return Ok(None);
        }
        let id = self.source.read_u16()?;
        Ok(Some(FieldHeader { tag, id }))
    }

    pub fn read_field_end(&mut self) {}

    pub fn read_list_begin(&mut self) -> WireResult<ListHeader> {
        let elem = self.read_element_tag()?;
        let len = self.read_count(elem.min_width())?;
        Ok(ListHeader { elem, len })
    }

    pub fn read_list_end(&mut self) {}

    pub fn read_set_begin(&mut self) -> WireResult<ListHeader> {
        self.read_list_begin()
    }

    pub fn read_set_end(&mut self) {}

    pub fn read_map_begin(&mut self) -> WireResult<MapHeader> {
        let key = self.read_element_tag()?;
        let value = self.read_element_tag()?;
        let len = self.read_count(key.min_width() + value.min_width())?;
        Ok(MapHeader { key, value, len })
    }

    pub fn read_map_end(&mut self) {}

    pub fn read_bool(&mut self) -> WireResult<bool> {
        Ok(self.source.read_u8()? != 0)
    }

    pub fn read_byte(&mut self) -> WireResult<i8> {
        Ok(self.source.read_i8()?)
    }

    pub fn read_i16(&mut self) -> WireResult<i16> {
        Ok(self.source.read_i16()?)
    }

    pub fn read_i32(&mut self) -> WireResult<i32> {
        Ok(self.source.read_i32()?)
    }

    pub fn read_i64(&mut self) -> WireResult<i64> {
        Ok(self.source.read_i64()?)
    }

    pub fn read_double(&mut self) -> WireResult<f64> {
        Ok(self.source.read_f64()?)
    }

    pub fn read_string(&mut self) -> WireResult<String> {
        let bytes = self.read_binary()?;
        String::from_utf8(bytes).map_err(|err| DecodeError::InvalidUtf8 {
            valid_up_to: err.utf8_error().valid_up_to(),
        })
    }

    pub fn read_binary(&mut self) -> WireResult<Vec<u8>> {
        let len = self.read_string_len()?;
        Ok(self.source.read_vec(len)?)
    }

    /// Discards one value of type `tag` without interpreting it.
    pub fn skip(&mut self, tag: TypeTag) -> WireResult<()> {
        if let Some(width) = tag.fixed_width() {
            self.source.skip(width)?;
            return Ok(());
        }
        match tag {
            TypeTag::String => {
                let len = self.read_string_len()?;
                self.source.skip(len)?;
            }
            TypeTag::Struct => {
                self.enter()?;
                self.read_struct_begin();
                while let Some(header) = self.read_field_begin()? {
                    self.skip(header.tag)?;
                    self.read_field_end();
                }
                self.read_struct_end();
                self.leave();
            }
            TypeTag::List | TypeTag::Set => {
                let header = self.read_list_begin()?;
                self.enter()?;
                for _ in 0..header.len {
                    self.skip(header.elem)?;
                }
                self.leave();
                self.read_list_end();
            }
            TypeTag::Map => {
                let header = self.read_map_begin()?;
                self.enter()?;
                for _ in 0..header.len {
                    self.skip(header.key)?;
                    self.skip(header.value)?;
                }
                self.leave();
                self.read_map_end();
            }
            _ => {
                return Err(DecodeError::StructureMismatch {
                    reason: StructureReason::UnexpectedStop,
                });
            }
        }
        Ok(())
    }

    fn read_element_tag(&mut self) -> WireResult<TypeTag> {
        let tag = TypeTag::parse(self.source.read_u8()?)?;
        if tag == TypeTag::Stop {
            return Err(DecodeError::StructureMismatch {
                reason: StructureReason::StopElementType,
            });
        }
        Ok(tag)
    }

    fn read_string_len(&mut self) -> WireResult<usize> {
        let len = self.read_len()?;
        if len > self.limits.max_string_bytes {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::StringBytes,
                limit: self.limits.max_string_bytes,
                actual: len,
            });
        }
        self.ensure_remaining(len, len)?;
        Ok(len)
    }

    /// Reads an element count; every element occupies at least
    /// `min_bytes_each` bytes on the wire.
    fn read_count(&mut self, min_bytes_each: usize) -> WireResult<usize> {
        let len = self.read_len()?;
        if len > self.limits.max_container_len {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::ContainerLength,
                limit: self.limits.max_container_len,
                actual: len,
            });
        }
        self.ensure_remaining(len, len.saturating_mul(min_bytes_each))?;
        Ok(len)
    }

    fn read_len(&mut self) -> WireResult<usize> {
        let raw = self.source.read_i32()?;
        usize::try_from(raw).map_err(|_| DecodeError::NegativeLength { length: raw })
    }

    fn ensure_remaining(&self, length: usize, needed: usize) -> WireResult<()> {
        if let Some(remaining) = self.source.remaining() {
            if needed > remaining {
                return Err(DecodeError::LengthExceedsRemaining { length, remaining });
            }
        }
        Ok(())
    }
}
