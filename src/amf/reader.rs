//! Bounded big-endian reader over a borrowed buffer
//!
//! All AMF0 integers and floats are network byte order. Reads go through
//! `bytes::Buf` on `&[u8]`, which is big-endian regardless of the host.

use bytes::Buf;

use crate::error::AmfError;

/// Read position inside `buf[..limit]`
///
/// The position never moves past `limit`; every read checks the remaining
/// length first and fails with [`AmfError::Truncated`] otherwise.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
    limit: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor over `buf[offset..limit]`
    pub fn new(buf: &'a [u8], offset: usize, limit: usize) -> Result<Self, AmfError> {
        if limit > buf.len() || offset > limit {
            return Err(AmfError::Truncated {
                offset,
                needed: limit.saturating_sub(offset),
                available: buf.len().saturating_sub(offset),
            });
        }
        Ok(Self {
            buf,
            pos: offset,
            limit,
        })
    }

    /// Absolute position in the underlying buffer
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Bytes left before the declared limit
    pub fn remaining(&self) -> usize {
        self.limit - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.limit
    }

    /// Fail unless at least `needed` bytes remain
    pub fn ensure(&self, needed: usize) -> Result<(), AmfError> {
        if self.remaining() < needed {
            return Err(AmfError::Truncated {
                offset: self.pos,
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Take the next `len` bytes, advancing past them
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], AmfError> {
        self.ensure(len)?;
        let start = self.pos;
        self.pos += len;
        Ok(&self.buf[start..self.pos])
    }

    /// Look at the next byte without consuming it
    pub fn peek_u8(&self) -> Result<u8, AmfError> {
        self.ensure(1)?;
        Ok(self.buf[self.pos])
    }

    /// Move to the declared limit, returning how many bytes were skipped
    pub fn skip_to_limit(&mut self) -> usize {
        let skipped = self.remaining();
        self.pos = self.limit;
        skipped
    }

    pub fn read_u8(&mut self) -> Result<u8, AmfError> {
        Ok(self.take(1)?.get_u8())
    }

    pub fn read_u16(&mut self) -> Result<u16, AmfError> {
        Ok(self.take(2)?.get_u16())
    }

    pub fn read_i16(&mut self) -> Result<i16, AmfError> {
        Ok(self.take(2)?.get_i16())
    }

    pub fn read_u32(&mut self) -> Result<u32, AmfError> {
        Ok(self.take(4)?.get_u32())
    }

    pub fn read_f64(&mut self) -> Result<f64, AmfError> {
        Ok(self.take(8)?.get_f64())
    }

    /// Read `len` bytes as UTF-8, rejecting invalid sequences
    pub fn read_utf8(&mut self, len: usize) -> Result<String, AmfError> {
        let offset = self.pos;
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| AmfError::InvalidUtf8 { offset })
    }
}
