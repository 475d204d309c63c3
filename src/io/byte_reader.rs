//! Positioned typed reads over a random-access source.
//!
//! [`ByteReader`] pairs a shared [`RandomReader`] with a current byte order
//! and a base offset. Byte-order flips and base shifts produce derived
//! readers without copying the underlying buffer; this is how makernote
//! dialects whose internal pointers are relative to a sub-region are
//! walked with the same machinery as the outer TIFF.

use std::sync::Arc;

use bytes::Bytes;

use crate::error::IoError;

use super::reader::{ByteOrder, RandomReader};

/// Character encoding for fixed-length string reads.
///
/// Most EXIF strings are ASCII/UTF-8; a few vendor fields (Reconyx user
/// labels and serial numbers) are UTF-16.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Utf16Le,
    Utf16Be,
}

/// A random-access reader view with a byte order and base offset.
///
/// All offsets passed to read methods are relative to the view's base.
/// Derivations ([`with_byte_order`](ByteReader::with_byte_order),
/// [`with_shifted_base`](ByteReader::with_shifted_base)) return new views
/// over the same source; the original is never mutated.
#[derive(Clone)]
pub struct ByteReader {
    source: Arc<dyn RandomReader>,
    byte_order: ByteOrder,
    base: u64,
}

impl std::fmt::Debug for ByteReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteReader")
            .field("byte_order", &self.byte_order)
            .field("base", &self.base)
            .field("size", &self.source.size())
            .finish()
    }
}

impl ByteReader {
    pub fn new(source: Arc<dyn RandomReader>, byte_order: ByteOrder) -> Self {
        Self {
            source,
            byte_order,
            base: 0,
        }
    }

    /// Convenience constructor over an in-memory buffer.
    pub fn from_bytes(data: impl Into<Bytes>, byte_order: ByteOrder) -> Self {
        Self::new(
            Arc::new(super::reader::BytesReader::new(data.into())),
            byte_order,
        )
    }

    /// The view's current byte order.
    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// The view's base offset within the source.
    #[inline]
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Total size of the underlying source in bytes.
    #[inline]
    pub fn source_size(&self) -> u64 {
        self.source.size()
    }

    /// Bytes addressable from this view (source size minus base).
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.source.size().saturating_sub(self.base)
    }

    /// The absolute source offset a view-relative offset resolves to.
    #[inline]
    pub fn absolute(&self, offset: u64) -> u64 {
        self.base.saturating_add(offset)
    }

    /// Derived view with the given byte order.
    pub fn with_byte_order(&self, byte_order: ByteOrder) -> Self {
        Self {
            source: Arc::clone(&self.source),
            byte_order,
            base: self.base,
        }
    }

    /// Derived view with the opposite byte order.
    pub fn flipped(&self) -> Self {
        self.with_byte_order(self.byte_order.flipped())
    }

    /// Derived view whose offsets are relative to `base + delta`.
    pub fn with_shifted_base(&self, delta: u64) -> Self {
        Self {
            source: Arc::clone(&self.source),
            byte_order: self.byte_order,
            base: self.base.saturating_add(delta),
        }
    }

    /// Whether `len` bytes at `offset` are addressable.
    pub fn is_valid_range(&self, offset: u64, len: u64) -> bool {
        self.absolute(offset)
            .checked_add(len)
            .is_some_and(|end| end <= self.source.size())
    }

    fn fetch(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        let abs = self
            .base
            .checked_add(offset)
            .ok_or(IoError::InvalidOffset(offset))?;
        self.source.read_exact_at(abs, len)
    }

    // -------------------------------------------------------------------------
    // Typed reads
    // -------------------------------------------------------------------------

    pub fn read_u8(&self, offset: u64) -> Result<u8, IoError> {
        Ok(self.fetch(offset, 1)?[0])
    }

    pub fn read_i8(&self, offset: u64) -> Result<i8, IoError> {
        Ok(self.read_u8(offset)? as i8)
    }

    pub fn read_u16(&self, offset: u64) -> Result<u16, IoError> {
        let bytes = self.fetch(offset, 2)?;
        Ok(self.byte_order.read_u16(&bytes))
    }

    pub fn read_i16(&self, offset: u64) -> Result<i16, IoError> {
        Ok(self.read_u16(offset)? as i16)
    }

    pub fn read_u32(&self, offset: u64) -> Result<u32, IoError> {
        let bytes = self.fetch(offset, 4)?;
        Ok(self.byte_order.read_u32(&bytes))
    }

    pub fn read_i32(&self, offset: u64) -> Result<i32, IoError> {
        Ok(self.read_u32(offset)? as i32)
    }

    pub fn read_u64(&self, offset: u64) -> Result<u64, IoError> {
        let bytes = self.fetch(offset, 8)?;
        Ok(self.byte_order.read_u64(&bytes))
    }

    pub fn read_i64(&self, offset: u64) -> Result<i64, IoError> {
        Ok(self.read_u64(offset)? as i64)
    }

    pub fn read_f32(&self, offset: u64) -> Result<f32, IoError> {
        Ok(f32::from_bits(self.read_u32(offset)?))
    }

    pub fn read_f64(&self, offset: u64) -> Result<f64, IoError> {
        Ok(f64::from_bits(self.read_u64(offset)?))
    }

    /// Read an S15.16 fixed-point value: a signed 16-bit integer part plus
    /// an unsigned 16-bit fractional numerator over 65536. The word order
    /// follows the view's byte order.
    pub fn read_s15_16(&self, offset: u64) -> Result<f64, IoError> {
        let (high, low) = match self.byte_order {
            ByteOrder::BigEndian => (self.read_i16(offset)?, self.read_u16(offset + 2)?),
            ByteOrder::LittleEndian => (self.read_i16(offset + 2)?, self.read_u16(offset)?),
        };
        Ok(f64::from(high) + f64::from(low) / 65536.0)
    }

    /// Read `len` raw bytes at `offset`.
    pub fn read_bytes(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        self.fetch(offset, len)
    }

    /// Read a fixed-length string, trimming trailing NULs.
    pub fn read_string(
        &self,
        offset: u64,
        len: usize,
        charset: Charset,
    ) -> Result<String, IoError> {
        let bytes = self.fetch(offset, len)?;
        Ok(decode_string(&bytes, charset))
    }

    /// Read bytes until a zero byte or `max` bytes, whichever comes first.
    ///
    /// The returned buffer excludes the terminator. If the source ends
    /// before `max` bytes, the available tail is scanned instead of failing.
    pub fn read_null_terminated_bytes(&self, offset: u64, max: usize) -> Result<Bytes, IoError> {
        let available = self
            .remaining()
            .saturating_sub(offset)
            .min(max as u64) as usize;
        let bytes = self.fetch(offset, available)?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Ok(bytes.slice(..end))
    }
}

/// Decode bytes to a string, trimming trailing NULs first.
pub(crate) fn decode_string(bytes: &[u8], charset: Charset) -> String {
    match charset {
        Charset::Utf8 => {
            let end = bytes
                .iter()
                .rposition(|&b| b != 0)
                .map_or(0, |pos| pos + 1);
            String::from_utf8_lossy(&bytes[..end]).into_owned()
        }
        Charset::Utf16Le | Charset::Utf16Be => {
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| match charset {
                    Charset::Utf16Le => u16::from_le_bytes([pair[0], pair[1]]),
                    _ => u16::from_be_bytes([pair[0], pair[1]]),
                })
                .collect();
            let end = units
                .iter()
                .rposition(|&u| u != 0)
                .map_or(0, |pos| pos + 1);
            char::decode_utf16(units[..end].iter().copied())
                .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect()
        }
    }
}
