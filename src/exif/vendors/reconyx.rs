//! Reconyx trail-camera makernote decoders.
//!
//! Three fixed layouts, all keyed by field offset:
//!
//! - **HyperFire** opens with the u16 makernote version 0xF101 and uses
//!   the enclosing TIFF's byte order.
//! - **HyperFire 2** opens with the ASCII label `RECONYXH2`.
//! - **UltraFire** opens with the ASCII label `RECONYXUF` followed by the
//!   makernote ID and public ID constants; its integers are big-endian on
//!   the wire regardless of the enclosing byte order.
//!
//! Firmware versions carry four components; the build number is the
//! hex-printed year and date words parsed as one decimal number. Serial
//! numbers and user labels are UTF-16.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{DirectoryError, VendorError};
use crate::io::{ByteOrder, ByteReader, Charset};
use crate::meta::{DirectoryKind, Value, Version};
use crate::tiff::{TiffContext, TiffHandler};

use super::super::handler::ExifTiffHandler;

/// UltraFire makernote ID constant.
pub const ULTRAFIRE_MAKERNOTE_ID: u32 = 0x0001_0000;

/// UltraFire makernote public ID constant.
pub const ULTRAFIRE_MAKERNOTE_PUBLIC_ID: u32 = 0x07F1_0001;

// -----------------------------------------------------------------------------
// HyperFire
// -----------------------------------------------------------------------------

pub const TAG_HF_MAKERNOTE_VERSION: u16 = 0;
pub const TAG_HF_FIRMWARE_VERSION: u16 = 2;
pub const TAG_HF_TRIGGER_MODE: u16 = 12;
pub const TAG_HF_SEQUENCE: u16 = 14;
pub const TAG_HF_EVENT_NUMBER: u16 = 18;
pub const TAG_HF_DATE_TIME_ORIGINAL: u16 = 22;
pub const TAG_HF_MOON_PHASE: u16 = 36;
pub const TAG_HF_AMBIENT_TEMPERATURE_F: u16 = 38;
pub const TAG_HF_AMBIENT_TEMPERATURE: u16 = 40;
pub const TAG_HF_SERIAL_NUMBER: u16 = 42;
pub const TAG_HF_CONTRAST: u16 = 72;
pub const TAG_HF_BRIGHTNESS: u16 = 74;
pub const TAG_HF_SHARPNESS: u16 = 76;
pub const TAG_HF_SATURATION: u16 = 78;
pub const TAG_HF_INFRARED_ILLUMINATOR: u16 = 80;
pub const TAG_HF_MOTION_SENSITIVITY: u16 = 82;
pub const TAG_HF_BATTERY_VOLTAGE: u16 = 84;
pub const TAG_HF_USER_LABEL: u16 = 86;

pub(crate) fn process_hyperfire(
    handler: &mut ExifTiffHandler<'_>,
    ctx: &mut TiffContext<'_>,
    offset: u64,
) {
    handler.push_directory(DirectoryKind::ReconyxHyperFire);
    if let Err(err) = decode_hyperfire(handler, &ctx.reader.clone(), offset) {
        handler.error(err);
    }
    handler.stack.pop();
}

fn decode_hyperfire(
    handler: &mut ExifTiffHandler<'_>,
    reader: &ByteReader,
    offset: u64,
) -> Result<(), DirectoryError> {
    handler.set_tag(
        TAG_HF_MAKERNOTE_VERSION,
        Value::U16(reader.read_u16(offset)?),
    );

    let firmware = read_firmware_version(handler, reader, offset + 2)?;
    handler.set_tag(TAG_HF_FIRMWARE_VERSION, Value::Version(firmware));

    handler.set_tag(
        TAG_HF_TRIGGER_MODE,
        Value::Text(reader.read_string(offset + 12, 2, Charset::Utf8)?),
    );
    handler.set_tag(
        TAG_HF_SEQUENCE,
        Value::U16Array(vec![
            reader.read_u16(offset + 14)?,
            reader.read_u16(offset + 16)?,
        ]),
    );

    // Event number is split into two words, high first
    let high = u32::from(reader.read_u16(offset + 18)?);
    let low = u32::from(reader.read_u16(offset + 20)?);
    handler.set_tag(TAG_HF_EVENT_NUMBER, Value::U32(high << 16 | low));

    // Seconds, minutes, hour, month, day, year; one word each
    let seconds = reader.read_u16(offset + 22)?;
    let minutes = reader.read_u16(offset + 24)?;
    let hour = reader.read_u16(offset + 26)?;
    let month = reader.read_u16(offset + 28)?;
    let day = reader.read_u16(offset + 30)?;
    let year = reader.read_u16(offset + 32)?;
    match build_datetime(
        u32::from(seconds),
        u32::from(minutes),
        u32::from(hour),
        u32::from(month),
        u32::from(day),
        i32::from(year),
    ) {
        Some(datetime) => handler.set_tag(TAG_HF_DATE_TIME_ORIGINAL, Value::DateTime(datetime)),
        None => handler.error(VendorError::BadDateTime.into()),
    }

    handler.set_tag(TAG_HF_MOON_PHASE, Value::U16(reader.read_u16(offset + 36)?));
    handler.set_tag(
        TAG_HF_AMBIENT_TEMPERATURE_F,
        Value::I16(reader.read_i16(offset + 38)?),
    );
    handler.set_tag(
        TAG_HF_AMBIENT_TEMPERATURE,
        Value::I16(reader.read_i16(offset + 40)?),
    );
    handler.set_tag(
        TAG_HF_SERIAL_NUMBER,
        Value::Text(reader.read_string(offset + 42, 28, Charset::Utf16Le)?),
    );
    handler.set_tag(TAG_HF_CONTRAST, Value::U16(reader.read_u16(offset + 72)?));
    handler.set_tag(TAG_HF_BRIGHTNESS, Value::U16(reader.read_u16(offset + 74)?));
    handler.set_tag(TAG_HF_SHARPNESS, Value::U16(reader.read_u16(offset + 76)?));
    handler.set_tag(TAG_HF_SATURATION, Value::U16(reader.read_u16(offset + 78)?));
    handler.set_tag(
        TAG_HF_INFRARED_ILLUMINATOR,
        Value::U16(reader.read_u16(offset + 80)?),
    );
    handler.set_tag(
        TAG_HF_MOTION_SENSITIVITY,
        Value::U16(reader.read_u16(offset + 82)?),
    );
    handler.set_tag(
        TAG_HF_BATTERY_VOLTAGE,
        Value::U16(reader.read_u16(offset + 84)?),
    );
    handler.set_tag(
        TAG_HF_USER_LABEL,
        Value::Text(reader.read_string(offset + 86, 22, Charset::Utf16Le)?),
    );
    Ok(())
}

// -----------------------------------------------------------------------------
// HyperFire 2
// -----------------------------------------------------------------------------

pub const TAG_HF2_LABEL: u16 = 0;
pub const TAG_HF2_FIRMWARE_VERSION: u16 = 10;
pub const TAG_HF2_TRIGGER_MODE: u16 = 20;
pub const TAG_HF2_SEQUENCE: u16 = 22;
pub const TAG_HF2_EVENT_NUMBER: u16 = 26;
pub const TAG_HF2_DATE_TIME_ORIGINAL: u16 = 30;
pub const TAG_HF2_MOON_PHASE: u16 = 42;
pub const TAG_HF2_AMBIENT_TEMPERATURE_F: u16 = 44;
pub const TAG_HF2_AMBIENT_TEMPERATURE: u16 = 46;
pub const TAG_HF2_CONTRAST: u16 = 48;
pub const TAG_HF2_BRIGHTNESS: u16 = 50;
pub const TAG_HF2_SHARPNESS: u16 = 52;
pub const TAG_HF2_SATURATION: u16 = 54;
pub const TAG_HF2_FLASH: u16 = 56;
pub const TAG_HF2_MOTION_SENSITIVITY: u16 = 58;
pub const TAG_HF2_BATTERY_VOLTAGE: u16 = 60;
pub const TAG_HF2_USER_LABEL: u16 = 62;

pub(crate) fn process_hyperfire2(
    handler: &mut ExifTiffHandler<'_>,
    ctx: &mut TiffContext<'_>,
    offset: u64,
) {
    handler.push_directory(DirectoryKind::ReconyxHyperFire2);
    if let Err(err) = decode_hyperfire2(handler, &ctx.reader.clone(), offset) {
        handler.error(err);
    }
    handler.stack.pop();
}

fn decode_hyperfire2(
    handler: &mut ExifTiffHandler<'_>,
    reader: &ByteReader,
    offset: u64,
) -> Result<(), DirectoryError> {
    handler.set_tag(
        TAG_HF2_LABEL,
        Value::Text(reader.read_string(offset, 9, Charset::Utf8)?),
    );

    let firmware = read_firmware_version(handler, reader, offset + 10)?;
    handler.set_tag(TAG_HF2_FIRMWARE_VERSION, Value::Version(firmware));

    handler.set_tag(
        TAG_HF2_TRIGGER_MODE,
        Value::Text(reader.read_string(offset + 20, 2, Charset::Utf8)?),
    );
    handler.set_tag(
        TAG_HF2_SEQUENCE,
        Value::U16Array(vec![
            reader.read_u16(offset + 22)?,
            reader.read_u16(offset + 24)?,
        ]),
    );
    handler.set_tag(
        TAG_HF2_EVENT_NUMBER,
        Value::U32(reader.read_u32(offset + 26)?),
    );

    let seconds = reader.read_u16(offset + 30)?;
    let minutes = reader.read_u16(offset + 32)?;
    let hour = reader.read_u16(offset + 34)?;
    let month = reader.read_u16(offset + 36)?;
    let day = reader.read_u16(offset + 38)?;
    let year = reader.read_u16(offset + 40)?;
    match build_datetime(
        u32::from(seconds),
        u32::from(minutes),
        u32::from(hour),
        u32::from(month),
        u32::from(day),
        i32::from(year),
    ) {
        Some(datetime) => handler.set_tag(TAG_HF2_DATE_TIME_ORIGINAL, Value::DateTime(datetime)),
        None => handler.error(VendorError::BadDateTime.into()),
    }

    handler.set_tag(TAG_HF2_MOON_PHASE, Value::U16(reader.read_u16(offset + 42)?));
    handler.set_tag(
        TAG_HF2_AMBIENT_TEMPERATURE_F,
        Value::I16(reader.read_i16(offset + 44)?),
    );
    handler.set_tag(
        TAG_HF2_AMBIENT_TEMPERATURE,
        Value::I16(reader.read_i16(offset + 46)?),
    );
    handler.set_tag(TAG_HF2_CONTRAST, Value::U16(reader.read_u16(offset + 48)?));
    handler.set_tag(TAG_HF2_BRIGHTNESS, Value::U16(reader.read_u16(offset + 50)?));
    handler.set_tag(TAG_HF2_SHARPNESS, Value::U16(reader.read_u16(offset + 52)?));
    handler.set_tag(TAG_HF2_SATURATION, Value::U16(reader.read_u16(offset + 54)?));
    handler.set_tag(TAG_HF2_FLASH, Value::U16(reader.read_u16(offset + 56)?));
    handler.set_tag(
        TAG_HF2_MOTION_SENSITIVITY,
        Value::U16(reader.read_u16(offset + 58)?),
    );
    handler.set_tag(
        TAG_HF2_BATTERY_VOLTAGE,
        Value::U16(reader.read_u16(offset + 60)?),
    );
    handler.set_tag(
        TAG_HF2_USER_LABEL,
        Value::Text(reader.read_string(offset + 62, 20, Charset::Utf16Le)?),
    );
    Ok(())
}

// -----------------------------------------------------------------------------
// UltraFire
// -----------------------------------------------------------------------------

pub const TAG_UF_LABEL: u16 = 0;
pub const TAG_UF_EVENT_TYPE: u16 = 17;
pub const TAG_UF_SEQUENCE: u16 = 18;
pub const TAG_UF_EVENT_NUMBER: u16 = 22;
pub const TAG_UF_DATE_TIME_ORIGINAL: u16 = 26;
pub const TAG_UF_DAY_OF_WEEK: u16 = 33;
pub const TAG_UF_MOON_PHASE: u16 = 34;
pub const TAG_UF_AMBIENT_TEMPERATURE_F: u16 = 35;
pub const TAG_UF_AMBIENT_TEMPERATURE: u16 = 37;
pub const TAG_UF_FLASH: u16 = 39;
pub const TAG_UF_BATTERY_VOLTAGE: u16 = 40;
pub const TAG_UF_SERIAL_NUMBER: u16 = 42;
pub const TAG_UF_USER_LABEL: u16 = 72;

pub(crate) fn process_ultrafire(
    handler: &mut ExifTiffHandler<'_>,
    ctx: &mut TiffContext<'_>,
    offset: u64,
) {
    handler.push_directory(DirectoryKind::ReconyxUltraFire);
    // UltraFire integers are big-endian on the wire regardless of the
    // enclosing TIFF
    let reader = ctx.reader.with_byte_order(ByteOrder::BigEndian);
    if let Err(err) = decode_ultrafire(handler, &reader, offset) {
        handler.error(err);
    }
    handler.stack.pop();
}

fn decode_ultrafire(
    handler: &mut ExifTiffHandler<'_>,
    reader: &ByteReader,
    offset: u64,
) -> Result<(), DirectoryError> {
    handler.set_tag(
        TAG_UF_LABEL,
        Value::Text(reader.read_string(offset, 9, Charset::Utf8)?),
    );

    let makernote_id = reader.read_u32(offset + 9)?;
    if makernote_id != ULTRAFIRE_MAKERNOTE_ID {
        return Err(VendorError::BadHeader(format!(
            "unknown UltraFire makernote ID 0x{makernote_id:08X}"
        ))
        .into());
    }
    let public_id = reader.read_u32(offset + 13)?;
    if public_id != ULTRAFIRE_MAKERNOTE_PUBLIC_ID {
        return Err(VendorError::BadHeader(format!(
            "unknown UltraFire makernote public ID 0x{public_id:08X}"
        ))
        .into());
    }

    handler.set_tag(
        TAG_UF_EVENT_TYPE,
        Value::Text(reader.read_string(offset + 17, 1, Charset::Utf8)?),
    );
    handler.set_tag(
        TAG_UF_SEQUENCE,
        Value::U16Array(vec![
            reader.read_u16(offset + 18)?,
            reader.read_u16(offset + 20)?,
        ]),
    );
    handler.set_tag(
        TAG_UF_EVENT_NUMBER,
        Value::U32(reader.read_u32(offset + 22)?),
    );

    // Single-byte date components with a two-byte year
    let seconds = reader.read_u8(offset + 26)?;
    let minutes = reader.read_u8(offset + 27)?;
    let hour = reader.read_u8(offset + 28)?;
    let day = reader.read_u8(offset + 29)?;
    let month = reader.read_u8(offset + 30)?;
    let year = reader.read_u16(offset + 31)?;
    match build_datetime(
        u32::from(seconds),
        u32::from(minutes),
        u32::from(hour),
        u32::from(month),
        u32::from(day),
        i32::from(year),
    ) {
        Some(datetime) => handler.set_tag(TAG_UF_DATE_TIME_ORIGINAL, Value::DateTime(datetime)),
        None => handler.error(VendorError::BadDateTime.into()),
    }

    handler.set_tag(TAG_UF_DAY_OF_WEEK, Value::U8(reader.read_u8(offset + 33)?));
    handler.set_tag(TAG_UF_MOON_PHASE, Value::U8(reader.read_u8(offset + 34)?));
    handler.set_tag(
        TAG_UF_AMBIENT_TEMPERATURE_F,
        Value::I16(reader.read_i16(offset + 35)?),
    );
    handler.set_tag(
        TAG_UF_AMBIENT_TEMPERATURE,
        Value::I16(reader.read_i16(offset + 37)?),
    );
    handler.set_tag(TAG_UF_FLASH, Value::U8(reader.read_u8(offset + 39)?));
    handler.set_tag(
        TAG_UF_BATTERY_VOLTAGE,
        Value::U16(reader.read_u16(offset + 40)?),
    );
    handler.set_tag(
        TAG_UF_SERIAL_NUMBER,
        Value::Text(reader.read_string(offset + 42, 30, Charset::Utf16Le)?),
    );
    handler.set_tag(
        TAG_UF_USER_LABEL,
        Value::Text(reader.read_string(offset + 72, 20, Charset::Utf16Le)?),
    );
    Ok(())
}

// -----------------------------------------------------------------------------
// Shared pieces
// -----------------------------------------------------------------------------

/// Read a firmware version of five words: major, minor, revision, then the
/// hex-printed year and date words that form the build number.
///
/// A build that does not parse as decimal yields a three-component version
/// and a recorded error.
fn read_firmware_version(
    handler: &mut ExifTiffHandler<'_>,
    reader: &ByteReader,
    offset: u64,
) -> Result<Version, DirectoryError> {
    let major = u32::from(reader.read_u16(offset)?);
    let minor = u32::from(reader.read_u16(offset + 2)?);
    let revision = u32::from(reader.read_u16(offset + 4)?);
    let year = reader.read_u16(offset + 6)?;
    let date = reader.read_u16(offset + 8)?;

    let build_text = format!("{year:x}{date:04x}");
    match build_text.parse::<u32>() {
        Ok(build) => Ok(Version(vec![major, minor, revision, build])),
        Err(_) => {
            handler.error(
                VendorError::BadHeader(format!(
                    "firmware build \"{build_text}\" is not a decimal number"
                ))
                .into(),
            );
            Ok(Version(vec![major, minor, revision]))
        }
    }
}

/// Validate date components and build the timestamp.
///
/// Bounds: seconds < 60, minutes < 60, hour < 24, month 1-12, day 1-31;
/// the year must be representable.
fn build_datetime(
    seconds: u32,
    minutes: u32,
    hour: u32,
    month: u32,
    day: u32,
    year: i32,
) -> Option<NaiveDateTime> {
    if seconds >= 60 || minutes >= 60 || hour >= 24 || !(1..=12).contains(&month) || !(1..=31).contains(&day)
    {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minutes, seconds)
}
