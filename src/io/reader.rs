use bytes::Bytes;

use crate::error::IoError;

/// Trait for reading byte ranges from a metadata source.
///
/// This abstraction allows the TIFF walker to work against any random-access
/// byte container. Reads are synchronous; the source is presumed local or
/// pre-buffered.
pub trait RandomReader: Send + Sync {
    /// Read exactly `len` bytes starting at `offset`.
    ///
    /// Returns an error if the range is out of bounds.
    fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError>;

    /// Get the total size of the source in bytes.
    fn size(&self) -> u64;
}

/// In-memory [`RandomReader`] over a [`Bytes`] buffer.
///
/// Cloning is cheap; the underlying buffer is shared.
#[derive(Debug, Clone)]
pub struct BytesReader {
    data: Bytes,
}

impl BytesReader {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }
}

impl RandomReader for BytesReader {
    fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        let start = usize::try_from(offset).map_err(|_| IoError::InvalidOffset(offset))?;
        let end = start
            .checked_add(len)
            .ok_or(IoError::InvalidOffset(offset))?;
        if end > self.data.len() {
            return Err(IoError::Truncated {
                offset,
                requested: len as u64,
                size: self.data.len() as u64,
            });
        }
        Ok(self.data.slice(start..end))
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

// =============================================================================
// Byte order
// =============================================================================

/// Byte order (endianness) of multi-byte values.
///
/// TIFF declares its byte order in the first two bytes of the header
/// ("II" = Intel/little, "MM" = Motorola/big), but makernote dialects may
/// override it mid-parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// The opposite byte order.
    #[inline]
    pub const fn flipped(self) -> Self {
        match self {
            ByteOrder::LittleEndian => ByteOrder::BigEndian,
            ByteOrder::BigEndian => ByteOrder::LittleEndian,
        }
    }

    /// Decode a u16 from the first two bytes of the slice.
    ///
    /// Panics when the slice is shorter than that.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        let word = [bytes[0], bytes[1]];
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(word),
            ByteOrder::BigEndian => u16::from_be_bytes(word),
        }
    }

    /// Decode a u32 from the first four bytes of the slice.
    ///
    /// Panics when the slice is shorter than that.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        let word = [bytes[0], bytes[1], bytes[2], bytes[3]];
        match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(word),
            ByteOrder::BigEndian => u32::from_be_bytes(word),
        }
    }

    /// Decode a u64 from the first eight bytes of the slice.
    ///
    /// Panics when the slice is shorter than that.
    #[inline]
    pub fn read_u64(self, bytes: &[u8]) -> u64 {
        let word = [
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ];
        match self {
            ByteOrder::LittleEndian => u64::from_le_bytes(word),
            ByteOrder::BigEndian => u64::from_be_bytes(word),
        }
    }
}
