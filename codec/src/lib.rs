//! Schema-driven record encoding/decoding for the gamesman codec.
//!
//! This crate ties together bytestream, wire, and schema: a [`Record`] is
//! encoded as a struct of its [`RecordSchema`](schema::RecordSchema) and
//! decoded back from any [`ByteSource`](bytestream::ByteSource).
//!
//! # Features
//!
//! - Slice decoding that reports how many bytes a record occupied
//! - Stream decoding from any `io::Read`
//! - Forward-compatible decoding: unknown fields are skipped
//! - Bounded decoding through [`Limits`]
//!
//! # Design Principles
//!
//! - **No panics on malformed input** - every failure is a [`CodecError`].
//! - **Absent is not zero** - unset fields are never written.
//! - **Deterministic** - fields are written in schema declaration order.

mod error;
mod record;
mod value;

pub use error::{CodecError, CodecResult};
pub use record::{
    decode_record, decode_record_from_slice, encode_record, encode_record_to_vec,
    read_record_from, write_record_to,
};
pub use value::{Record, Value};
pub use wire::Limits;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = Record::new();
        let _ = Value::Bool(true);
        let _ = Limits::default();
        let _: CodecResult<()> = Ok(());
    }
}
