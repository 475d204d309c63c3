//! Sequential (read-and-advance) form of the byte reader.

use bytes::Bytes;

use crate::error::IoError;

use super::byte_reader::{ByteReader, Charset};
use super::reader::ByteOrder;

/// Cursor-based reader over the same view machinery as [`ByteReader`].
///
/// Every read advances the cursor by the number of bytes consumed. Used by
/// the fixed-layout vendor decoders, which are sequences of adjacent reads.
#[derive(Debug, Clone)]
pub struct SequentialByteReader {
    inner: ByteReader,
    pos: u64,
}

impl SequentialByteReader {
    pub fn new(inner: ByteReader, start: u64) -> Self {
        Self { inner, pos: start }
    }

    /// Current cursor position, relative to the view's base.
    #[inline]
    pub fn position(&self) -> u64 {
        self.pos
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.inner.byte_order()
    }

    /// Same cursor over a view with the opposite byte order.
    pub fn flipped(&self) -> Self {
        Self {
            inner: self.inner.flipped(),
            pos: self.pos,
        }
    }

    /// Whether fewer than `n` bytes remain before the end of the source.
    pub fn is_closer_to_end(&self, n: u64) -> bool {
        self.pos.saturating_add(n) > self.inner.remaining()
    }

    /// Advance the cursor by `n` bytes, failing if that crosses the end.
    pub fn skip(&mut self, n: u64) -> Result<(), IoError> {
        if self.is_closer_to_end(n) {
            return Err(IoError::Truncated {
                offset: self.inner.absolute(self.pos),
                requested: n,
                size: self.inner.source_size(),
            });
        }
        self.pos += n;
        Ok(())
    }

    /// Advance the cursor by `n` bytes; returns whether that succeeded.
    ///
    /// On failure the cursor is clamped to the end.
    pub fn try_skip(&mut self, n: u64) -> bool {
        if self.is_closer_to_end(n) {
            self.pos = self.inner.remaining();
            false
        } else {
            self.pos += n;
            true
        }
    }

    fn take<T>(&mut self, len: u64, value: Result<T, IoError>) -> Result<T, IoError> {
        if value.is_ok() {
            self.pos += len;
        }
        value
    }

    pub fn read_u8(&mut self) -> Result<u8, IoError> {
        let v = self.inner.read_u8(self.pos);
        self.take(1, v)
    }

    pub fn read_i8(&mut self) -> Result<i8, IoError> {
        let v = self.inner.read_i8(self.pos);
        self.take(1, v)
    }

    pub fn read_u16(&mut self) -> Result<u16, IoError> {
        let v = self.inner.read_u16(self.pos);
        self.take(2, v)
    }

    pub fn read_i16(&mut self) -> Result<i16, IoError> {
        let v = self.inner.read_i16(self.pos);
        self.take(2, v)
    }

    pub fn read_u32(&mut self) -> Result<u32, IoError> {
        let v = self.inner.read_u32(self.pos);
        self.take(4, v)
    }

    pub fn read_i32(&mut self) -> Result<i32, IoError> {
        let v = self.inner.read_i32(self.pos);
        self.take(4, v)
    }

    pub fn read_u64(&mut self) -> Result<u64, IoError> {
        let v = self.inner.read_u64(self.pos);
        self.take(8, v)
    }

    pub fn read_i64(&mut self) -> Result<i64, IoError> {
        let v = self.inner.read_i64(self.pos);
        self.take(8, v)
    }

    pub fn read_f32(&mut self) -> Result<f32, IoError> {
        let v = self.inner.read_f32(self.pos);
        self.take(4, v)
    }

    pub fn read_f64(&mut self) -> Result<f64, IoError> {
        let v = self.inner.read_f64(self.pos);
        self.take(8, v)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes, IoError> {
        let v = self.inner.read_bytes(self.pos, len);
        self.take(len as u64, v)
    }

    pub fn read_string(&mut self, len: usize, charset: Charset) -> Result<String, IoError> {
        let v = self.inner.read_string(self.pos, len, charset);
        self.take(len as u64, v)
    }

    /// Read bytes up to a zero byte or `max`, advancing past what was
    /// consumed (terminator included when one was found).
    pub fn read_null_terminated(&mut self, max: usize) -> Result<Bytes, IoError> {
        let bytes = self.inner.read_null_terminated_bytes(self.pos, max)?;
        let consumed = if (bytes.len() as u64) < max as u64 {
            bytes.len() as u64 + 1
        } else {
            bytes.len() as u64
        };
        self.pos += consumed.min(self.inner.remaining().saturating_sub(self.pos));
        Ok(bytes)
    }
}
