//! PrintIM (Epson Print Image Matching) block decoder.
//!
//! Layout: "PrintIM" signature, a 4-character version at +8, an entry
//! count at +14, then 6-byte entries (u16 tag, u32 value). Some writers
//! store the entry count in the opposite byte order to the enclosing
//! TIFF; an implausible count triggers one byte-swapped retry.

use crate::error::{DirectoryError, VendorError};
use crate::io::{ByteReader, Charset};
use crate::meta::{DirectoryKind, Value};
use crate::tiff::{TiffContext, TiffHandler};

use super::super::handler::ExifTiffHandler;

/// Tag under which the version string is stored.
pub const TAG_PRINT_IM_VERSION: u16 = 0x0000;

pub(crate) fn process_print_im(
    handler: &mut ExifTiffHandler<'_>,
    ctx: &mut TiffContext<'_>,
    offset: u64,
    byte_count: usize,
) {
    handler.push_directory(DirectoryKind::PrintIm);
    if let Err(err) = decode(handler, &ctx.reader.clone(), offset, byte_count) {
        handler.error(err);
    }
    handler.stack.pop();
}

fn decode(
    handler: &mut ExifTiffHandler<'_>,
    reader: &ByteReader,
    offset: u64,
    byte_count: usize,
) -> Result<(), DirectoryError> {
    if byte_count == 0 {
        return Err(VendorError::BadSize("empty PrintIM block".into()).into());
    }
    if byte_count < 16 {
        return Err(VendorError::BadSize(format!(
            "PrintIM block of {byte_count} bytes, header needs 16"
        ))
        .into());
    }
    let signature = reader.read_bytes(offset, 12)?;
    if !signature.starts_with(b"PrintIM") {
        return Err(VendorError::BadHeader("missing PrintIM signature".into()).into());
    }

    let mut reader = reader.clone();
    let mut entries = reader.read_u16(offset + 14)?;
    if 16 + usize::from(entries) * 6 > byte_count {
        // Entry count in the wrong byte order; retry swapped
        reader = reader.flipped();
        entries = reader.read_u16(offset + 14)?;
        if 16 + usize::from(entries) * 6 > byte_count {
            return Err(VendorError::BadSize(format!(
                "PrintIM entry count {entries} exceeds block of {byte_count} bytes"
            ))
            .into());
        }
    }

    let version = reader.read_string(offset + 8, 4, Charset::Utf8)?;
    handler.set_tag(TAG_PRINT_IM_VERSION, Value::Text(version));

    for i in 0..u64::from(entries) {
        let entry_offset = offset + 16 + i * 6;
        let tag = reader.read_u16(entry_offset)?;
        let value = reader.read_u32(entry_offset + 2)?;
        handler.set_tag(tag, Value::U32(value));
    }
    Ok(())
}
