//! Kodak makernote decoder.
//!
//! A fixed-layout block; the dispatcher has already skipped the 8-byte
//! signature and determined the byte order ("KDK INFO" blocks are
//! big-endian, the rest little-endian). Tag IDs are the field offsets.

use crate::error::DirectoryError;
use crate::io::{ByteOrder, Charset, SequentialByteReader};
use crate::meta::{DirectoryKind, Value};
use crate::tiff::{TiffContext, TiffHandler};

use super::super::handler::ExifTiffHandler;

pub const TAG_KODAK_MODEL: u16 = 0;
pub const TAG_QUALITY: u16 = 9;
pub const TAG_BURST_MODE: u16 = 10;
pub const TAG_IMAGE_WIDTH: u16 = 12;
pub const TAG_IMAGE_HEIGHT: u16 = 14;
pub const TAG_YEAR_CREATED: u16 = 16;
pub const TAG_MONTH_DAY_CREATED: u16 = 18;
pub const TAG_TIME_CREATED: u16 = 20;
pub const TAG_BURST_MODE_2: u16 = 24;
pub const TAG_SHUTTER_MODE: u16 = 27;
pub const TAG_METERING_MODE: u16 = 28;
pub const TAG_SEQUENCE_NUMBER: u16 = 29;
pub const TAG_F_NUMBER: u16 = 30;
pub const TAG_EXPOSURE_TIME: u16 = 32;
pub const TAG_EXPOSURE_COMPENSATION: u16 = 36;
pub const TAG_FOCUS_MODE: u16 = 56;
pub const TAG_WHITE_BALANCE: u16 = 64;
pub const TAG_FLASH_MODE: u16 = 92;
pub const TAG_FLASH_FIRED: u16 = 93;
pub const TAG_ISO_SETTING: u16 = 94;
pub const TAG_ISO: u16 = 96;
pub const TAG_TOTAL_ZOOM: u16 = 98;
pub const TAG_DATE_TIME_STAMP: u16 = 100;
pub const TAG_COLOR_MODE: u16 = 102;
pub const TAG_DIGITAL_ZOOM: u16 = 104;
pub const TAG_SHARPNESS: u16 = 107;

pub(crate) fn process_kodak(
    handler: &mut ExifTiffHandler<'_>,
    ctx: &mut TiffContext<'_>,
    offset: u64,
    big_endian: bool,
) {
    handler.push_directory(DirectoryKind::Kodak);
    let order = if big_endian {
        ByteOrder::BigEndian
    } else {
        ByteOrder::LittleEndian
    };
    let reader = SequentialByteReader::new(ctx.reader.with_byte_order(order), offset);
    if let Err(err) = decode(handler, reader) {
        handler.error(err);
    }
    handler.stack.pop();
}

fn decode(
    handler: &mut ExifTiffHandler<'_>,
    mut r: SequentialByteReader,
) -> Result<(), DirectoryError> {
    let model = r.read_string(8, Charset::Utf8)?;
    handler.set_tag(TAG_KODAK_MODEL, Value::Text(model));
    r.skip(1)?;
    handler.set_tag(TAG_QUALITY, Value::U8(r.read_u8()?));
    handler.set_tag(TAG_BURST_MODE, Value::U8(r.read_u8()?));
    r.skip(1)?;
    handler.set_tag(TAG_IMAGE_WIDTH, Value::U16(r.read_u16()?));
    handler.set_tag(TAG_IMAGE_HEIGHT, Value::U16(r.read_u16()?));
    handler.set_tag(TAG_YEAR_CREATED, Value::U16(r.read_u16()?));
    handler.set_tag(TAG_MONTH_DAY_CREATED, Value::Bytes(r.read_bytes(2)?));
    handler.set_tag(TAG_TIME_CREATED, Value::Bytes(r.read_bytes(4)?));
    handler.set_tag(TAG_BURST_MODE_2, Value::U16(r.read_u16()?));
    r.skip(1)?;
    handler.set_tag(TAG_SHUTTER_MODE, Value::U8(r.read_u8()?));
    handler.set_tag(TAG_METERING_MODE, Value::U8(r.read_u8()?));
    handler.set_tag(TAG_SEQUENCE_NUMBER, Value::U8(r.read_u8()?));
    handler.set_tag(TAG_F_NUMBER, Value::U16(r.read_u16()?));
    handler.set_tag(TAG_EXPOSURE_TIME, Value::U32(r.read_u32()?));
    handler.set_tag(TAG_EXPOSURE_COMPENSATION, Value::I16(r.read_i16()?));
    r.skip(18)?;
    handler.set_tag(TAG_FOCUS_MODE, Value::U8(r.read_u8()?));
    r.skip(7)?;
    handler.set_tag(TAG_WHITE_BALANCE, Value::U8(r.read_u8()?));
    r.skip(27)?;
    handler.set_tag(TAG_FLASH_MODE, Value::U8(r.read_u8()?));
    handler.set_tag(TAG_FLASH_FIRED, Value::U8(r.read_u8()?));
    handler.set_tag(TAG_ISO_SETTING, Value::U16(r.read_u16()?));
    handler.set_tag(TAG_ISO, Value::U16(r.read_u16()?));
    handler.set_tag(TAG_TOTAL_ZOOM, Value::U16(r.read_u16()?));
    handler.set_tag(TAG_DATE_TIME_STAMP, Value::U16(r.read_u16()?));
    handler.set_tag(TAG_COLOR_MODE, Value::U16(r.read_u16()?));
    handler.set_tag(TAG_DIGITAL_ZOOM, Value::U16(r.read_u16()?));
    r.skip(1)?;
    handler.set_tag(TAG_SHARPNESS, Value::I8(r.read_i8()?));
    Ok(())
}
