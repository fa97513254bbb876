//! Byte sources with bounded operations.

use crate::error::{ByteError, ByteResult};

/// A source of big-endian encoded bytes.
///
/// Implemented by [`ByteReader`] for in-memory slices and by
/// [`StreamReader`](crate::StreamReader) for any `io::Read`. Decoders are
/// generic over this trait so both paths run the same code.
pub trait ByteSource {
    /// Reads exactly `N` bytes.
    fn read_array<const N: usize>(&mut self) -> ByteResult<[u8; N]>;

    /// Reads exactly `len` bytes into a new buffer.
    fn read_vec(&mut self, len: usize) -> ByteResult<Vec<u8>>;

    /// Discards exactly `len` bytes.
    fn skip(&mut self, len: usize) -> ByteResult<()>;

    /// Bytes left in the source, if the source knows its length.
    fn remaining(&self) -> Option<usize>;

    /// Number of bytes consumed so far.
    fn position(&self) -> usize;

    fn read_u8(&mut self) -> ByteResult<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    fn read_i8(&mut self) -> ByteResult<i8> {
        Ok(i8::from_be_bytes(self.read_array()?))
    }

    fn read_u16(&mut self) -> ByteResult<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    fn read_i16(&mut self) -> ByteResult<i16> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    fn read_i32(&mut self) -> ByteResult<i32> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    fn read_i64(&mut self) -> ByteResult<i64> {
        Ok(i64::from_be_bytes(self.read_array()?))
    }

    fn read_f64(&mut self) -> ByteResult<f64> {
        Ok(f64::from_bits(u64::from_be_bytes(self.read_array()?)))
    }
}

/// A byte reader over an in-memory slice.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn bytes_remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes_remaining() == 0
    }

    /// Borrows the next `len` bytes without copying.
    pub fn read_slice(&mut self, len: usize) -> ByteResult<&'a [u8]> {
        self.ensure_bytes(len)?;
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Returns the unread tail of the input.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    fn ensure_bytes(&self, len: usize) -> ByteResult<()> {
        let available = self.bytes_remaining();
        if len > available {
            return Err(ByteError::UnexpectedEof {
                requested: len,
                available,
            });
        }
        Ok(())
    }
}

impl ByteSource for ByteReader<'_> {
    fn read_array<const N: usize>(&mut self) -> ByteResult<[u8; N]> {
        let slice = self.read_slice(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    fn read_vec(&mut self, len: usize) -> ByteResult<Vec<u8>> {
        Ok(self.read_slice(len)?.to_vec())
    }

    fn skip(&mut self, len: usize) -> ByteResult<()> {
        self.ensure_bytes(len)?;
        self.pos += len;
        Ok(())
    }

    fn remaining(&self) -> Option<usize> {
        Some(self.bytes_remaining())
    }

    fn position(&self) -> usize {
        self.pos
    }
}
