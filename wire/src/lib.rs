//! Binary protocol framing for the gamesman record codec.
//!
//! This crate handles the binary wire format: type tags, field headers,
//! container headers, length-prefixed payloads and the skip routine used
//! for forward compatibility. It does not know about schemas or records,
//! only the structure of the byte stream.
//!
//! # Wire format
//!
//! ```text
//! struct   := STRUCT_BEGIN field* FIELD_STOP STRUCT_END
//! field    := TYPE_TAG(1 byte) FIELD_ID(2 bytes, big-endian) payload
//! ```
//!
//! Integers are big-endian two's complement, strings and binaries carry an
//! `i32` length prefix, lists and sets carry `{elem tag, i32 count}`, maps
//! carry `{key tag, value tag, i32 count}`. Struct begin/end and field end
//! occupy no bytes.
//!
//! # Design Principles
//!
//! - **Stable wire format** - Byte-compatible with the Thrift binary protocol.
//! - **Bounded decoding** - All length fields are validated against limits before iteration.
//! - **No domain knowledge** - This crate handles framing, not record semantics.

mod error;
mod limits;
mod protocol;
mod tag;

pub use error::{
    DecodeError, EncodeError, EncodeResult, LimitKind, StructureReason, WireResult,
};
pub use limits::Limits;
pub use protocol::{ProtocolReader, ProtocolWriter};
pub use tag::{FieldHeader, ListHeader, MapHeader, TypeTag};

#[cfg(test)]
mod tests {
    use super::*;
    use bytestream::{ByteReader, ByteWriter};

    #[test]
    fn public_api_exports() {
        // Verify all expected items are exported
        let _ = Limits::default();
        let _ = TypeTag::Stop;
        let _ = FieldHeader::new(TypeTag::Bool, 1);
        let _ = StructureReason::MissingStop;

        // Error types
        let _: WireResult<()> = Ok(());
        let _: EncodeResult<()> = Ok(());
    }

    #[test]
    fn empty_struct_is_one_stop_byte() {
        let mut out = ByteWriter::new();
        let mut writer = ProtocolWriter::new(&mut out);
        writer.write_struct_begin("Empty");
        writer.write_field_stop();
        writer.write_struct_end();
        assert_eq!(out.finish(), vec![0]);
    }

    #[test]
    fn writer_and_reader_agree() {
        let mut out = ByteWriter::new();
        let mut writer = ProtocolWriter::new(&mut out);
        writer.write_field_begin(FieldHeader::new(TypeTag::List, 2));
        writer
            .write_list_begin(ListHeader {
                elem: TypeTag::Double,
                len: 2,
            })
            .unwrap();
        writer.write_double(0.5);
        writer.write_double(-1.0);
        writer.write_list_end();
        writer.write_field_end();
        writer.write_field_begin(FieldHeader::new(TypeTag::I64, 3));
        writer.write_i64(-7);
        writer.write_field_stop();
        let bytes = out.finish();

        let limits = Limits::for_testing();
        let mut source = ByteReader::new(&bytes);
        let mut reader = ProtocolReader::new(&mut source, &limits);
        assert_eq!(
            reader.read_field_begin().unwrap(),
            Some(FieldHeader::new(TypeTag::List, 2))
        );
        let list = reader.read_list_begin().unwrap();
        assert_eq!(
            list,
            ListHeader {
                elem: TypeTag::Double,
                len: 2
            }
        );
        assert_eq!(reader.read_double().unwrap().to_bits(), 0.5f64.to_bits());
        assert_eq!(reader.read_double().unwrap().to_bits(), (-1.0f64).to_bits());
        assert_eq!(
            reader.read_field_begin().unwrap(),
            Some(FieldHeader::new(TypeTag::I64, 3))
        );
        assert_eq!(reader.read_i64().unwrap(), -7);
        assert_eq!(reader.read_field_begin().unwrap(), None);
        assert_eq!(reader.position(), bytes.len());
    }
}
