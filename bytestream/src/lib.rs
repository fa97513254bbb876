//! Bounded big-endian byte primitives for the gamesman record codec.
//!
//! This crate provides [`ByteWriter`] for encoding and the [`ByteSource`]
//! trait for decoding, with two sources: [`ByteReader`] over an in-memory
//! slice and [`StreamReader`] over any `io::Read`.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked.
//! - **No domain knowledge** - This crate knows nothing about type tags, fields, or records.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bytestream::{ByteReader, ByteSource, ByteWriter};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_u8(11);
//! writer.write_i32(-3);
//!
//! let bytes = writer.finish();
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_u8().unwrap(), 11);
//! assert_eq!(reader.read_i32().unwrap(), -3);
//! ```

mod error;
mod reader;
mod stream;
mod writer;

pub use error::{ByteError, ByteResult};
pub use reader::{ByteReader, ByteSource};
pub use stream::StreamReader;
pub use writer::ByteWriter;
