//! The recursive IFD walker.
//!
//! One walk owns one handler and one context. The walker reads the header,
//! hands marker dispatch to the handler, then walks IFDs depth-first,
//! calling back into the handler for sub-IFD entry, custom processing, and
//! finish-up hooks. Errors detected while decoding an entry are recorded on
//! the current directory and the walk continues; only a bad byte-order mark
//! or marker fails the walk itself.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{DirectoryError, IoError, TiffError};
use crate::io::{ByteOrder, ByteReader};
use crate::meta::{Rational, SRational, Value};

use super::handler::{TiffHandler, TiffStandard};

/// Sanity cap on IFD entry counts; corrupt files routinely declare
/// counts in the tens of thousands.
pub const MAX_ENTRY_COUNT: u64 = 4096;

// =============================================================================
// Entry formats
// =============================================================================

/// Standard TIFF entry formats and their component sizes.
///
/// Format 13 (a 32-bit undefined-custom used by some makernote pointer
/// tags) is deliberately absent: its byte count comes from the handler's
/// custom-format hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum TagFormat {
    /// Unsigned 8-bit integer
    Byte = 1,
    /// 8-bit character, NUL-terminated
    Ascii = 2,
    /// Unsigned 16-bit integer
    Short = 3,
    /// Unsigned 32-bit integer
    Long = 4,
    /// Unsigned numerator/denominator pair
    Rational = 5,
    /// Signed 8-bit integer
    SByte = 6,
    /// Opaque byte data
    Undefined = 7,
    /// Signed 16-bit integer
    SShort = 8,
    /// Signed 32-bit integer
    SLong = 9,
    /// Signed numerator/denominator pair
    SRational = 10,
    /// 32-bit IEEE-754
    Float = 11,
    /// 64-bit IEEE-754
    Double = 12,
    /// Unsigned 64-bit integer (BigTIFF)
    Long8 = 16,
    /// Signed 64-bit integer (BigTIFF)
    SLong8 = 17,
}

impl TagFormat {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(TagFormat::Byte),
            2 => Some(TagFormat::Ascii),
            3 => Some(TagFormat::Short),
            4 => Some(TagFormat::Long),
            5 => Some(TagFormat::Rational),
            6 => Some(TagFormat::SByte),
            7 => Some(TagFormat::Undefined),
            8 => Some(TagFormat::SShort),
            9 => Some(TagFormat::SLong),
            10 => Some(TagFormat::SRational),
            11 => Some(TagFormat::Float),
            12 => Some(TagFormat::Double),
            16 => Some(TagFormat::Long8),
            17 => Some(TagFormat::SLong8),
            _ => None,
        }
    }

    /// Size of a single component in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> u64 {
        match self {
            TagFormat::Byte | TagFormat::Ascii | TagFormat::SByte | TagFormat::Undefined => 1,
            TagFormat::Short | TagFormat::SShort => 2,
            TagFormat::Long | TagFormat::SLong | TagFormat::Float => 4,
            TagFormat::Rational
            | TagFormat::SRational
            | TagFormat::Double
            | TagFormat::Long8
            | TagFormat::SLong8 => 8,
        }
    }
}

// =============================================================================
// Walk context
// =============================================================================

/// State threaded through one IFD walk.
///
/// The reader view is an immutable value; derivations (byte-order flips,
/// base shifts) build a new context sharing the same visited set, which
/// lives for the duration of the top-level walk and breaks pointer cycles.
pub struct TiffContext<'a> {
    pub reader: ByteReader,
    standard: TiffStandard,
    visited: &'a mut HashSet<u64>,
}

impl<'a> TiffContext<'a> {
    pub fn new(
        reader: ByteReader,
        standard: TiffStandard,
        visited: &'a mut HashSet<u64>,
    ) -> Self {
        Self {
            reader,
            standard,
            visited,
        }
    }

    #[inline]
    pub fn standard(&self) -> TiffStandard {
        self.standard
    }

    /// Derived context over a different reader view, sharing the visited
    /// set with this one.
    pub fn derived(&mut self, reader: ByteReader) -> TiffContext<'_> {
        TiffContext {
            reader,
            standard: self.standard,
            visited: &mut *self.visited,
        }
    }

    /// Insert an absolute IFD offset into the visited set.
    ///
    /// Returns `false` if the offset was already walked.
    fn mark_visited(&mut self, absolute: u64) -> bool {
        self.visited.insert(absolute)
    }
}

// =============================================================================
// Entry points
// =============================================================================

/// Walk a complete TIFF document.
///
/// `reader` must be positioned so the byte-order mark sits at offset 0.
/// Returns an error only for a catastrophic header failure (bad byte-order
/// mark, unknown marker); everything else is recorded on directories.
pub fn process_tiff<H: TiffHandler + ?Sized>(
    reader: &ByteReader,
    handler: &mut H,
) -> Result<(), TiffError> {
    let bom = reader.read_bytes(0, 2)?;
    let byte_order = match &bom[..] {
        b"II" => ByteOrder::LittleEndian,
        b"MM" => ByteOrder::BigEndian,
        _ => return Err(TiffError::BadByteOrder(u16::from_be_bytes([bom[0], bom[1]]))),
    };
    let reader = reader.with_byte_order(byte_order);

    let marker = reader.read_u16(2)?;
    let standard = handler.process_tiff_marker(marker)?;

    let mut visited = HashSet::new();
    let first_ifd_offset = match standard {
        TiffStandard::Tiff => u64::from(reader.read_u32(4)?),
        TiffStandard::BigTiff => {
            // Bytes 4-5 hold the offset size (always 8), 6-7 are reserved
            let offset_size = reader.read_u16(4)?;
            if offset_size != 8 {
                handler.error(DirectoryError::from(TiffError::BadMarker(marker)));
                return Ok(());
            }
            reader.read_u64(8)?
        }
    };

    let mut ctx = TiffContext::new(reader, standard, &mut visited);
    process_ifd(handler, &mut ctx, first_ifd_offset);
    Ok(())
}

/// Walk one IFD (and its follower chain) at a view-relative offset.
///
/// Never fails: errors are recorded on the current directory through the
/// handler and the walk returns normally.
pub fn process_ifd<H: TiffHandler + ?Sized>(
    handler: &mut H,
    ctx: &mut TiffContext<'_>,
    offset: u64,
) {
    let next = walk_entries(handler, ctx, offset);
    handler.ending_ifd(ctx);

    if let Some(next_offset) = next {
        if next_offset != 0 && handler.has_follower_ifd() {
            process_ifd(handler, ctx, next_offset);
        }
    }
}

fn record<H: TiffHandler + ?Sized>(handler: &mut H, error: impl Into<DirectoryError>) {
    let error = error.into();
    warn!("recorded directory error: {error}");
    handler.error(error);
}

/// Process the entries of one IFD; returns the next-IFD offset when the
/// trailing pointer was readable.
fn walk_entries<H: TiffHandler + ?Sized>(
    handler: &mut H,
    ctx: &mut TiffContext<'_>,
    offset: u64,
) -> Option<u64> {
    let absolute = ctx.reader.absolute(offset);
    if !ctx.mark_visited(absolute) {
        record(handler, TiffError::Cycle(absolute));
        return None;
    }

    let (count_len, entry_len) = match ctx.standard() {
        TiffStandard::Tiff => (2u64, 12u64),
        TiffStandard::BigTiff => (8u64, 20u64),
    };

    let entry_count = match ctx.standard() {
        TiffStandard::Tiff => ctx.reader.read_u16(offset).map(u64::from),
        TiffStandard::BigTiff => ctx.reader.read_u64(offset),
    };
    let entry_count = match entry_count {
        Ok(count) => count,
        Err(err) => {
            record(handler, err);
            return None;
        }
    };
    if entry_count > MAX_ENTRY_COUNT {
        record(handler, TiffError::TooManyEntries(entry_count));
        return None;
    }

    debug!(offset = absolute, entries = entry_count, "walking IFD");

    for i in 0..entry_count {
        let entry_offset = offset + count_len + i * entry_len;
        if let Err(err) = process_entry(handler, ctx, entry_offset) {
            // The entry header itself was unreadable; the remaining
            // entries share the same fate.
            record(handler, err);
            return None;
        }
    }

    let next_pos = offset + count_len + entry_count * entry_len;
    let next = match ctx.standard() {
        TiffStandard::Tiff => ctx.reader.read_u32(next_pos).map(u64::from),
        TiffStandard::BigTiff => ctx.reader.read_u64(next_pos),
    };
    match next {
        Ok(next_offset) => Some(next_offset),
        Err(err) => {
            // Some writers omit the trailing pointer; treat as end of chain
            debug!("next-IFD pointer unreadable, ending chain: {err}");
            None
        }
    }
}

/// Process a single 12- or 20-byte entry.
///
/// `Err` means the entry header could not be read; value-level problems
/// are recorded and reported as `Ok`.
fn process_entry<H: TiffHandler + ?Sized>(
    handler: &mut H,
    ctx: &mut TiffContext<'_>,
    entry_offset: u64,
) -> Result<(), TiffError> {
    let reader = ctx.reader.clone();
    let tag = reader.read_u16(entry_offset)?;
    let format = reader.read_u16(entry_offset + 2)?;
    let (count, value_field_offset, inline_len) = match ctx.standard() {
        TiffStandard::Tiff => (
            u64::from(reader.read_u32(entry_offset + 4)?),
            entry_offset + 8,
            4u64,
        ),
        TiffStandard::BigTiff => (reader.read_u64(entry_offset + 4)?, entry_offset + 12, 8u64),
    };

    let byte_count = match handler.custom_format_byte_count(tag, format, count) {
        Some(byte_count) => byte_count,
        None => match TagFormat::from_u16(format) {
            Some(fmt) => match fmt.size_in_bytes().checked_mul(count) {
                Some(byte_count) => byte_count,
                None => {
                    record(
                        handler,
                        IoError::InvalidOffset(ctx.reader.absolute(value_field_offset)),
                    );
                    return Ok(());
                }
            },
            None => {
                record(handler, TiffError::UnknownFormat { tag, format });
                return Ok(());
            }
        },
    };

    // Small values sit inline in the entry; larger ones behind a pointer
    let value_offset = if byte_count <= inline_len {
        value_field_offset
    } else {
        match ctx.standard() {
            TiffStandard::Tiff => u64::from(reader.read_u32(value_field_offset)?),
            TiffStandard::BigTiff => reader.read_u64(value_field_offset)?,
        }
    };

    if !ctx.reader.is_valid_range(value_offset, byte_count) {
        record(
            handler,
            IoError::Truncated {
                offset: ctx.reader.absolute(value_offset),
                requested: byte_count,
                size: ctx.reader.source_size(),
            },
        );
        return Ok(());
    }

    // Sub-IFD entry: only pointer-sized values qualify; the value is the
    // offset of the IFD to recurse into.
    let pointer_sized =
        byte_count == 4 || (ctx.standard() == TiffStandard::BigTiff && byte_count == 8);
    if pointer_sized && handler.try_enter_sub_ifd(tag) {
        let sub_offset = if byte_count == 8 {
            reader.read_u64(value_offset)?
        } else {
            u64::from(reader.read_u32(value_offset)?)
        };
        process_ifd(handler, ctx, sub_offset);
        return Ok(());
    }

    match handler.custom_process_tag(ctx, tag, value_offset, byte_count as usize) {
        Ok(true) => return Ok(()),
        Ok(false) => {}
        Err(err) => {
            record(handler, err);
            return Ok(());
        }
    }

    if byte_count == 0 {
        return Ok(());
    }
    match decode_value(&ctx.reader, format, count, value_offset) {
        Ok(Some(value)) => handler.set_tag(tag, value),
        Ok(None) => {}
        Err(err) => record(handler, err),
    }
    Ok(())
}

// =============================================================================
// Value decoding
// =============================================================================

macro_rules! decode_array {
    ($reader:expr, $offset:expr, $count:expr, $stride:expr, $read:ident, $scalar:path, $array:path) => {{
        if $count == 1 {
            $scalar($reader.$read($offset)?)
        } else {
            let mut values = Vec::with_capacity($count as usize);
            for i in 0..$count {
                values.push($reader.$read($offset + i * $stride)?);
            }
            $array(values)
        }
    }};
}

/// Decode an entry's payload per its format code.
///
/// Single-element arrays collapse to scalars; ASCII trims trailing NULs;
/// UNDEFINED stays raw. `None` for zero-component entries.
pub(crate) fn decode_value(
    reader: &ByteReader,
    format: u16,
    count: u64,
    value_offset: u64,
) -> Result<Option<Value>, IoError> {
    if count == 0 {
        return Ok(None);
    }
    let value = match TagFormat::from_u16(format) {
        Some(TagFormat::Byte) => {
            decode_array!(reader, value_offset, count, 1, read_u8, Value::U8, Value::U8Array)
        }
        Some(TagFormat::SByte) => {
            decode_array!(reader, value_offset, count, 1, read_i8, Value::I8, Value::I8Array)
        }
        Some(TagFormat::Short) => {
            decode_array!(reader, value_offset, count, 2, read_u16, Value::U16, Value::U16Array)
        }
        Some(TagFormat::SShort) => {
            decode_array!(reader, value_offset, count, 2, read_i16, Value::I16, Value::I16Array)
        }
        Some(TagFormat::Long) => {
            decode_array!(reader, value_offset, count, 4, read_u32, Value::U32, Value::U32Array)
        }
        Some(TagFormat::SLong) => {
            decode_array!(reader, value_offset, count, 4, read_i32, Value::I32, Value::I32Array)
        }
        Some(TagFormat::Long8) => {
            decode_array!(reader, value_offset, count, 8, read_u64, Value::U64, Value::U64Array)
        }
        Some(TagFormat::SLong8) => {
            decode_array!(reader, value_offset, count, 8, read_i64, Value::I64, Value::I64Array)
        }
        Some(TagFormat::Float) => {
            decode_array!(reader, value_offset, count, 4, read_f32, Value::F32, Value::F32Array)
        }
        Some(TagFormat::Double) => {
            decode_array!(reader, value_offset, count, 8, read_f64, Value::F64, Value::F64Array)
        }
        Some(TagFormat::Rational) => {
            if count == 1 {
                Value::Rational(read_rational(reader, value_offset)?)
            } else {
                let mut values = Vec::with_capacity(count as usize);
                for i in 0..count {
                    values.push(read_rational(reader, value_offset + i * 8)?);
                }
                Value::RationalArray(values)
            }
        }
        Some(TagFormat::SRational) => {
            if count == 1 {
                Value::SRational(read_srational(reader, value_offset)?)
            } else {
                let mut values = Vec::with_capacity(count as usize);
                for i in 0..count {
                    values.push(read_srational(reader, value_offset + i * 8)?);
                }
                Value::SRationalArray(values)
            }
        }
        Some(TagFormat::Ascii) => {
            let bytes = reader.read_bytes(value_offset, count as usize)?;
            Value::Text(crate::io::decode_string(&bytes, crate::io::Charset::Utf8))
        }
        Some(TagFormat::Undefined) => Value::Bytes(reader.read_bytes(value_offset, count as usize)?),
        // Format 13: 32-bit per component when the handler sized it but
        // nothing consumed the entry
        None if format == 13 => {
            decode_array!(reader, value_offset, count, 4, read_u32, Value::U32, Value::U32Array)
        }
        None => return Ok(None),
    };
    Ok(Some(value))
}

fn read_rational(reader: &ByteReader, offset: u64) -> Result<Rational, IoError> {
    Ok(Rational::new(
        reader.read_u32(offset)?,
        reader.read_u32(offset + 4)?,
    ))
}

fn read_srational(reader: &ByteReader, offset: u64) -> Result<SRational, IoError> {
    Ok(SRational::new(
        reader.read_i32(offset)?,
        reader.read_i32(offset + 4)?,
    ))
}
