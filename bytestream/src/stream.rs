//! Byte source over any `io::Read`.

use std::io::{self, Read};

use crate::error::{ByteError, ByteResult};
use crate::reader::ByteSource;

/// A [`ByteSource`] that pulls bytes from an `io::Read`.
///
/// The reader is borrowed or owned by the caller; `StreamReader` never
/// closes it. Reads are exact: running out of input mid-value is reported
/// as [`ByteError::UnexpectedEof`] with the number of bytes that did arrive.
#[derive(Debug)]
pub struct StreamReader<R> {
    inner: R,
    pos: usize,
}

impl<R: Read> StreamReader<R> {
    /// Wraps a reader.
    pub const fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    /// Returns a reference to the wrapped reader.
    pub const fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwraps the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fill(&mut self, buf: &mut [u8]) -> ByteResult<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.pos += filled;
                    return Err(ByteError::UnexpectedEof {
                        requested: buf.len(),
                        available: filled,
                    });
                }
                Ok(n) => filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err.into()),
            }
        }
        self.pos += filled;
        Ok(())
    }
}

impl<R: Read> ByteSource for StreamReader<R> {
    fn read_array<const N: usize>(&mut self) -> ByteResult<[u8; N]> {
        let mut out = [0u8; N];
        self.fill(&mut out)?;
        Ok(out)
    }

    fn read_vec(&mut self, len: usize) -> ByteResult<Vec<u8>> {
        // Grow with the data actually received rather than trusting `len`.
        let mut out = Vec::new();
        let read = (&mut self.inner).take(len as u64).read_to_end(&mut out)?;
        self.pos += read;
        if read < len {
            return Err(ByteError::UnexpectedEof {
                requested: len,
                available: read,
            });
        }
        Ok(out)
    }

    fn skip(&mut self, len: usize) -> ByteResult<()> {
        let skipped = io::copy(&mut (&mut self.inner).take(len as u64), &mut io::sink())?;
        let skipped = usize::try_from(skipped).unwrap_or(usize::MAX);
        self.pos += skipped;
        if skipped < len {
            return Err(ByteError::UnexpectedEof {
                requested: len,
                available: skipped,
            });
        }
        Ok(())
    }

    fn remaining(&self) -> Option<usize> {
        None
    }

    fn position(&self) -> usize {
        self.pos
    }
}
