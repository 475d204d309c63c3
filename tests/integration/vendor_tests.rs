//! Fixed-layout vendor decoder tests: Reconyx, Kodak, PrintIM, and the
//! Panasonic raw binary blocks.

use imagemeta::exif::vendors::reconyx::*;
use imagemeta::{read_metadata, DirectoryKind, ErrorKind, Value, Version};

use super::test_utils::*;

// =============================================================================
// Reconyx HyperFire
// =============================================================================

/// Build a HyperFire makernote blob (little-endian fields).
fn hyperfire_blob() -> Vec<u8> {
    let mut b = Vec::new();
    b.extend_from_slice(&0xF101u16.to_le_bytes()); // 0: makernote version
    for word in [2u16, 0, 1, 0x2011, 0x0131] {
        b.extend_from_slice(&word.to_le_bytes()); // 2..12: firmware
    }
    b.extend_from_slice(b"M "); // 12: trigger mode
    b.extend_from_slice(&1u16.to_le_bytes()); // 14: sequence frame
    b.extend_from_slice(&5u16.to_le_bytes()); // 16: sequence total
    b.extend_from_slice(&0u16.to_le_bytes()); // 18: event number high
    b.extend_from_slice(&7u16.to_le_bytes()); // 20: event number low
    for word in [30u16, 15, 10, 1, 31, 2011] {
        b.extend_from_slice(&word.to_le_bytes()); // 22..34: date/time
    }
    b.extend_from_slice(&[0, 0]); // 34: unused
    b.extend_from_slice(&3u16.to_le_bytes()); // 36: moon phase
    b.extend_from_slice(&70i16.to_le_bytes()); // 38: temperature F
    b.extend_from_slice(&21i16.to_le_bytes()); // 40: temperature C
    b.extend_from_slice(&utf16le_padded("H500HF01", 28)); // 42: serial
    b.extend_from_slice(&[0, 0]); // 70: unused
    for word in [128u16, 120, 96, 100, 1, 80, 8200] {
        b.extend_from_slice(&word.to_le_bytes()); // 72..86
    }
    b.extend_from_slice(&utf16le_padded("CAM1", 22)); // 86: user label
    b
}

#[test]
fn test_hyperfire_decoded() {
    let data = build_exif_with_makernote(true, "RECONYX", &hyperfire_blob());

    let metadata = read_metadata(data);
    let dir = metadata
        .first_of_kind(DirectoryKind::ReconyxHyperFire)
        .unwrap();
    assert!(dir.errors().is_empty());
    assert_eq!(dir.u16(TAG_HF_MAKERNOTE_VERSION), Some(0xF101));
    assert_eq!(
        dir.get(TAG_HF_FIRMWARE_VERSION),
        Some(&Value::Version(Version(vec![2, 0, 1, 20110131])))
    );
    assert_eq!(dir.string(TAG_HF_TRIGGER_MODE), Some("M "));
    assert_eq!(dir.u16_array(TAG_HF_SEQUENCE), Some(vec![1, 5]));
    assert_eq!(dir.u32(TAG_HF_EVENT_NUMBER), Some(7));
    match dir.get(TAG_HF_DATE_TIME_ORIGINAL) {
        Some(Value::DateTime(dt)) => {
            assert_eq!(
                dt.format("%Y-%m-%d %H:%M:%S").to_string(),
                "2011-01-31 10:15:30"
            );
        }
        other => panic!("expected date/time, got {other:?}"),
    }
    assert_eq!(dir.get(TAG_HF_AMBIENT_TEMPERATURE), Some(&Value::I16(21)));
    assert_eq!(dir.string(TAG_HF_SERIAL_NUMBER), Some("H500HF01"));
    assert_eq!(dir.u16(TAG_HF_BATTERY_VOLTAGE), Some(8200));
    assert_eq!(dir.string(TAG_HF_USER_LABEL), Some("CAM1"));
}

#[test]
fn test_hyperfire_round_trip_of_fixed_values() {
    // Every literal written by the builder reads back identically
    let data = build_exif_with_makernote(true, "RECONYX", &hyperfire_blob());
    let metadata = read_metadata(data);
    let dir = metadata
        .first_of_kind(DirectoryKind::ReconyxHyperFire)
        .unwrap();
    for (tag, expected) in [
        (TAG_HF_CONTRAST, 128u16),
        (TAG_HF_BRIGHTNESS, 120),
        (TAG_HF_SHARPNESS, 96),
        (TAG_HF_SATURATION, 100),
        (TAG_HF_INFRARED_ILLUMINATOR, 1),
        (TAG_HF_MOTION_SENSITIVITY, 80),
    ] {
        assert_eq!(dir.u16(tag), Some(expected), "tag {tag}");
    }
}

#[test]
fn test_hyperfire_bad_firmware_build_keeps_three_components() {
    let mut blob = hyperfire_blob();
    // Year word 0x20AB hex-prints with letters and cannot parse as decimal
    blob[8..10].copy_from_slice(&0x20ABu16.to_le_bytes());
    let data = build_exif_with_makernote(true, "RECONYX", &blob);

    let metadata = read_metadata(data);
    let dir = metadata
        .first_of_kind(DirectoryKind::ReconyxHyperFire)
        .unwrap();
    assert_eq!(
        dir.get(TAG_HF_FIRMWARE_VERSION),
        Some(&Value::Version(Version(vec![2, 0, 1])))
    );
    assert_eq!(dir.errors().len(), 1);
    assert_eq!(dir.errors()[0].kind, ErrorKind::VendorBadHeader);
}

#[test]
fn test_hyperfire_invalid_date_omitted_with_error() {
    let mut blob = hyperfire_blob();
    // Month word at +28 out of range
    blob[28..30].copy_from_slice(&13u16.to_le_bytes());
    let data = build_exif_with_makernote(true, "RECONYX", &blob);

    let metadata = read_metadata(data);
    let dir = metadata
        .first_of_kind(DirectoryKind::ReconyxHyperFire)
        .unwrap();
    assert!(dir.get(TAG_HF_DATE_TIME_ORIGINAL).is_none());
    assert!(dir
        .errors()
        .iter()
        .any(|e| e.kind == ErrorKind::VendorBadDateTime));
    // Fields after the date still decode
    assert_eq!(dir.u16(TAG_HF_BATTERY_VOLTAGE), Some(8200));
}

// =============================================================================
// Reconyx UltraFire
// =============================================================================

/// Build an UltraFire makernote blob (big-endian integers on the wire).
fn ultrafire_blob(makernote_id: u32) -> Vec<u8> {
    let mut b = Vec::new();
    b.extend_from_slice(b"RECONYXUF"); // 0: label
    b.extend_from_slice(&makernote_id.to_be_bytes()); // 9
    b.extend_from_slice(&0x07F1_0001u32.to_be_bytes()); // 13: public ID
    b.push(b'M'); // 17: event type
    b.extend_from_slice(&1u16.to_be_bytes()); // 18: sequence frame
    b.extend_from_slice(&3u16.to_be_bytes()); // 20: sequence total
    b.extend_from_slice(&42u32.to_be_bytes()); // 22: event number
    b.extend_from_slice(&[30, 15, 10, 31, 1]); // 26: sec min hour day month
    b.extend_from_slice(&2015u16.to_be_bytes()); // 31: year
    b.push(6); // 33: day of week
    b.push(2); // 34: moon phase
    b.extend_from_slice(&68i16.to_be_bytes()); // 35: temperature F
    b.extend_from_slice(&20i16.to_be_bytes()); // 37: temperature C
    b.push(1); // 39: flash
    b.extend_from_slice(&7900u16.to_be_bytes()); // 40: battery voltage
    b.extend_from_slice(&utf16le_padded("UF-0042", 30)); // 42: serial
    b.extend_from_slice(&utf16le_padded("GATE", 20)); // 72: user label
    b
}

#[test]
fn test_ultrafire_decoded_with_big_endian_integers() {
    let data = build_exif_with_makernote(true, "RECONYX", &ultrafire_blob(0x0001_0000));

    let metadata = read_metadata(data);
    let dir = metadata
        .first_of_kind(DirectoryKind::ReconyxUltraFire)
        .unwrap();
    assert!(dir.errors().is_empty());
    assert_eq!(dir.string(TAG_UF_LABEL), Some("RECONYXUF"));
    assert_eq!(dir.string(TAG_UF_EVENT_TYPE), Some("M"));
    assert_eq!(dir.u16_array(TAG_UF_SEQUENCE), Some(vec![1, 3]));
    assert_eq!(dir.u32(TAG_UF_EVENT_NUMBER), Some(42));
    match dir.get(TAG_UF_DATE_TIME_ORIGINAL) {
        Some(Value::DateTime(dt)) => {
            assert_eq!(
                dt.format("%Y-%m-%d %H:%M:%S").to_string(),
                "2015-01-31 10:15:30"
            );
        }
        other => panic!("expected date/time, got {other:?}"),
    }
    assert_eq!(dir.get(TAG_UF_AMBIENT_TEMPERATURE), Some(&Value::I16(20)));
    assert_eq!(dir.u16(TAG_UF_BATTERY_VOLTAGE), Some(7900));
    assert_eq!(dir.string(TAG_UF_SERIAL_NUMBER), Some("UF-0042"));
    assert_eq!(dir.string(TAG_UF_USER_LABEL), Some("GATE"));
}

#[test]
fn test_ultrafire_wrong_makernote_id() {
    // The directory exists, keeps the label, and carries exactly one
    // bad-header error; nothing past the ID is decoded
    let data = build_exif_with_makernote(true, "RECONYX", &ultrafire_blob(0xDEAD_BEEF));

    let metadata = read_metadata(data);
    let dir = metadata
        .first_of_kind(DirectoryKind::ReconyxUltraFire)
        .unwrap();
    assert_eq!(dir.string(TAG_UF_LABEL), Some("RECONYXUF"));
    assert_eq!(dir.errors().len(), 1);
    assert_eq!(dir.errors()[0].kind, ErrorKind::VendorBadHeader);
    assert!(dir.get(TAG_UF_EVENT_NUMBER).is_none());
}

// =============================================================================
// Reconyx HyperFire 2
// =============================================================================

#[test]
fn test_hyperfire2_decoded() {
    let mut b = Vec::new();
    b.extend_from_slice(b"RECONYXH2"); // 0: label
    b.push(0); // 9: pad
    for word in [1u16, 4, 0, 0x2019, 0x0704] {
        b.extend_from_slice(&word.to_le_bytes()); // 10..20: firmware
    }
    b.extend_from_slice(b"P "); // 20: trigger mode
    b.extend_from_slice(&2u16.to_le_bytes()); // 22
    b.extend_from_slice(&9u16.to_le_bytes()); // 24
    b.extend_from_slice(&1234u32.to_le_bytes()); // 26: event number
    for word in [5u16, 20, 18, 7, 4, 2019] {
        b.extend_from_slice(&word.to_le_bytes()); // 30..42: date/time
    }
    for word in [4u16, 75, 24, 110, 115, 102, 98, 0, 60, 7400] {
        b.extend_from_slice(&word.to_le_bytes()); // 42..62
    }
    b.extend_from_slice(&utf16le_padded("RIDGE", 20)); // 62: user label

    let data = build_exif_with_makernote(true, "RECONYX", &b);
    let metadata = read_metadata(data);
    let dir = metadata
        .first_of_kind(DirectoryKind::ReconyxHyperFire2)
        .unwrap();
    assert!(dir.errors().is_empty());
    assert_eq!(dir.string(TAG_HF2_LABEL), Some("RECONYXH2"));
    assert_eq!(
        dir.get(TAG_HF2_FIRMWARE_VERSION),
        Some(&Value::Version(Version(vec![1, 4, 0, 20190704])))
    );
    assert_eq!(dir.u32(TAG_HF2_EVENT_NUMBER), Some(1234));
    assert_eq!(dir.u16(TAG_HF2_BATTERY_VOLTAGE), Some(7400));
    assert_eq!(dir.string(TAG_HF2_USER_LABEL), Some("RIDGE"));
}

// =============================================================================
// Kodak
// =============================================================================

/// Kodak field block; offsets are relative to the end of the 8-byte
/// signature.
fn kodak_fields(be: bool) -> Vec<u8> {
    let w16 = |v: u16| if be { v.to_be_bytes() } else { v.to_le_bytes() };
    let w32 = |v: u32| if be { v.to_be_bytes() } else { v.to_le_bytes() };
    let mut b = Vec::new();
    b.extend_from_slice(b"DC265\0\0\0"); // 0: model
    b.push(0); // 8
    b.push(5); // 9: quality
    b.push(1); // 10: burst mode
    b.push(0); // 11
    b.extend_from_slice(&w16(1600)); // 12: width
    b.extend_from_slice(&w16(1200)); // 14: height
    b.extend_from_slice(&w16(2001)); // 16: year
    b.extend_from_slice(&[6, 15]); // 18: month/day
    b.extend_from_slice(&[0, 0, 0, 0]); // 20: time
    b.extend_from_slice(&w16(0)); // 24: burst mode 2
    b.push(0); // 26
    b.push(2); // 27: shutter mode
    b.push(1); // 28: metering
    b.push(3); // 29: sequence number
    b.extend_from_slice(&w16(400)); // 30: f-number
    b.extend_from_slice(&w32(10000)); // 32: exposure time
    b.extend_from_slice(&if be { (-3i16).to_be_bytes() } else { (-3i16).to_le_bytes() }); // 36
    b.extend_from_slice(&[0; 18]); // 38..56
    b.push(2); // 56: focus mode
    b.extend_from_slice(&[0; 7]); // 57..64
    b.push(1); // 64: white balance
    b.extend_from_slice(&[0; 27]); // 65..92
    b.push(1); // 92: flash mode
    b.push(0); // 93: flash fired
    b.extend_from_slice(&w16(200)); // 94: iso setting
    b.extend_from_slice(&w16(160)); // 96: iso
    b.extend_from_slice(&w16(120)); // 98: total zoom
    b.extend_from_slice(&w16(1)); // 100: date/time stamp
    b.extend_from_slice(&w16(2)); // 102: color mode
    b.extend_from_slice(&w16(100)); // 104: digital zoom
    b.push(0); // 106
    b.push((-1i8) as u8); // 107: sharpness
    b
}

#[test]
fn test_kodak_big_endian_info_block() {
    use imagemeta::exif::vendors::kodak::*;

    let mut makernote = b"KDK INFO".to_vec();
    makernote.extend_from_slice(&kodak_fields(true));
    let data = build_exif_with_makernote(true, "EASTMAN KODAK COMPANY", &makernote);

    let metadata = read_metadata(data);
    let dir = metadata.first_of_kind(DirectoryKind::Kodak).unwrap();
    assert!(dir.errors().is_empty());
    assert_eq!(dir.string(TAG_KODAK_MODEL), Some("DC265"));
    assert_eq!(dir.u16(TAG_IMAGE_WIDTH), Some(1600));
    assert_eq!(dir.u16(TAG_IMAGE_HEIGHT), Some(1200));
    assert_eq!(dir.u32(TAG_EXPOSURE_TIME), Some(10000));
    assert_eq!(dir.get(TAG_EXPOSURE_COMPENSATION), Some(&Value::I16(-3)));
    assert_eq!(dir.get(TAG_SHARPNESS), Some(&Value::I8(-1)));
}

#[test]
fn test_kodak_little_endian_block() {
    use imagemeta::exif::vendors::kodak::*;

    let mut makernote = b"KDK0001\0".to_vec();
    makernote.extend_from_slice(&kodak_fields(false));
    let data = build_exif_with_makernote(true, "EASTMAN KODAK COMPANY", &makernote);

    let metadata = read_metadata(data);
    let dir = metadata.first_of_kind(DirectoryKind::Kodak).unwrap();
    assert_eq!(dir.u16(TAG_IMAGE_WIDTH), Some(1600));
    assert_eq!(dir.u16(TAG_ISO), Some(160));
}

#[test]
fn test_kodak_truncated_block_records_error() {
    let mut makernote = b"KDK INFO".to_vec();
    makernote.extend_from_slice(&kodak_fields(true)[..40]);
    let data = build_exif_with_makernote(true, "EASTMAN KODAK COMPANY", &makernote);

    let metadata = read_metadata(data);
    let dir = metadata.first_of_kind(DirectoryKind::Kodak).unwrap();
    assert!(dir.has_errors());
    // Fields before the truncation point decoded fine
    assert_eq!(dir.u16(imagemeta::exif::vendors::kodak::TAG_IMAGE_WIDTH), Some(1600));
}

// =============================================================================
// PrintIM
// =============================================================================

#[test]
fn test_print_im_block() {
    let mut block = b"PrintIM\0".to_vec();
    block.extend_from_slice(b"0300");
    block.extend_from_slice(&[0, 0]); // 12: pad
    block.extend_from_slice(&2u16.to_le_bytes()); // 14: entry count
    block.extend_from_slice(&0x0001u16.to_le_bytes());
    block.extend_from_slice(&0x0010_0000u32.to_le_bytes());
    block.extend_from_slice(&0x0002u16.to_le_bytes());
    block.extend_from_slice(&0x0000_0001u32.to_le_bytes());

    let mut file = TiffFile::new(true);
    let ifd0_offset = file.reserve(ifd_size(1));
    let block_offset = file.append(&block);
    let ifd0 = encode_ifd(
        true,
        &[entry(
            0xC4A5,
            FORMAT_UNDEFINED,
            block.len() as u32,
            val_u32(true, block_offset),
        )],
        0,
    );
    file.write_at(ifd0_offset, &ifd0);
    file.set_ifd0_offset(ifd0_offset);

    let metadata = read_metadata(file.data);
    let dir = metadata.first_of_kind(DirectoryKind::PrintIm).unwrap();
    assert!(dir.errors().is_empty());
    assert_eq!(dir.string(0x0000), Some("0300"));
    assert_eq!(dir.u32(0x0001), Some(0x0010_0000));
    assert_eq!(dir.u32(0x0002), Some(1));
    assert_eq!(dir.parent(), Some(0));
}

#[test]
fn test_print_im_entry_count_byte_swap_retry() {
    // Entry count and entries stored opposite to the enclosing byte
    // order; the decoder flips once and re-reads
    let mut block = b"PrintIM\0".to_vec();
    block.extend_from_slice(b"0100");
    block.extend_from_slice(&[0, 0]);
    block.extend_from_slice(&2u16.to_be_bytes()); // swapped count
    block.extend_from_slice(&0x0001u16.to_be_bytes());
    block.extend_from_slice(&9u32.to_be_bytes());
    block.extend_from_slice(&0x0009u16.to_be_bytes());
    block.extend_from_slice(&0x0001_0000u32.to_be_bytes());

    let mut file = TiffFile::new(true);
    let ifd0_offset = file.reserve(ifd_size(1));
    let block_offset = file.append(&block);
    let ifd0 = encode_ifd(
        true,
        &[entry(
            0xC4A5,
            FORMAT_UNDEFINED,
            block.len() as u32,
            val_u32(true, block_offset),
        )],
        0,
    );
    file.write_at(ifd0_offset, &ifd0);
    file.set_ifd0_offset(ifd0_offset);

    let metadata = read_metadata(file.data);
    let dir = metadata.first_of_kind(DirectoryKind::PrintIm).unwrap();
    assert!(dir.errors().is_empty());
    assert_eq!(dir.string(0x0000), Some("0100"));
    assert_eq!(dir.u32(0x0001), Some(9));
    assert_eq!(dir.u32(0x0009), Some(0x0001_0000));
}

#[test]
fn test_print_im_hopeless_count_records_error() {
    let mut block = b"PrintIM\0".to_vec();
    block.extend_from_slice(b"0100");
    block.extend_from_slice(&[0, 0]);
    // 0x4141 entries in either byte order cannot fit a 20-byte block
    block.extend_from_slice(&[0x41, 0x41]);
    block.extend_from_slice(&[0; 4]);

    let mut file = TiffFile::new(true);
    let ifd0_offset = file.reserve(ifd_size(1));
    let block_offset = file.append(&block);
    let ifd0 = encode_ifd(
        true,
        &[entry(
            0xC4A5,
            FORMAT_UNDEFINED,
            block.len() as u32,
            val_u32(true, block_offset),
        )],
        0,
    );
    file.write_at(ifd0_offset, &ifd0);
    file.set_ifd0_offset(ifd0_offset);

    let metadata = read_metadata(file.data);
    let dir = metadata.first_of_kind(DirectoryKind::PrintIm).unwrap();
    assert_eq!(dir.errors().len(), 1);
    assert_eq!(dir.errors()[0].kind, ErrorKind::VendorBadSize);
}

// =============================================================================
// Panasonic raw binary blocks
// =============================================================================

#[test]
fn test_panasonic_raw_wb_info_block() {
    // WbInfo: count, then (type, levels[2]) groups at a 2-byte stride,
    // zero-padded across the remaining named slots
    let mut words: Vec<u16> = vec![2, 1, 510, 511, 2, 520, 521];
    words.resize(21, 0);
    let mut payload = Vec::new();
    for w in &words {
        payload.extend_from_slice(&w.to_le_bytes());
    }

    let mut file = TiffFile::with_marker(true, 0x0055);
    let ifd0_offset = file.reserve(ifd_size(1));
    let payload_offset = file.append(&payload);
    let ifd0 = encode_ifd(
        true,
        &[entry(
            0x0011,
            FORMAT_UNDEFINED,
            payload.len() as u32,
            val_u32(true, payload_offset),
        )],
        0,
    );
    file.write_at(ifd0_offset, &ifd0);
    file.set_ifd0_offset(ifd0_offset);

    let metadata = read_metadata(file.data);
    let dir = metadata
        .first_of_kind(DirectoryKind::PanasonicRawWbInfo)
        .unwrap();
    assert_eq!(dir.u16(0), Some(2)); // num entries
    assert_eq!(dir.u16(1), Some(1)); // type 1
    assert_eq!(dir.u16_array(2), Some(vec![510, 511])); // levels 1
    assert_eq!(dir.u16(4), Some(2)); // type 2
    assert_eq!(dir.u16_array(5), Some(vec![520, 521])); // levels 2
    assert_eq!(dir.parent(), Some(0));
}

#[test]
fn test_panasonic_raw_distortion_block_signed() {
    let words: Vec<i16> = vec![0, 0, -120, 0, 35, 17, 0, 1, -4, 9, 0, 22, 3];
    let mut payload = Vec::new();
    for w in &words {
        payload.extend_from_slice(&w.to_le_bytes());
    }

    let mut file = TiffFile::with_marker(true, 0x0055);
    let ifd0_offset = file.reserve(ifd_size(1));
    let payload_offset = file.append(&payload);
    let ifd0 = encode_ifd(
        true,
        &[entry(
            0x0119,
            FORMAT_UNDEFINED,
            payload.len() as u32,
            val_u32(true, payload_offset),
        )],
        0,
    );
    file.write_at(ifd0_offset, &ifd0);
    file.set_ifd0_offset(ifd0_offset);

    let metadata = read_metadata(file.data);
    let dir = metadata
        .first_of_kind(DirectoryKind::PanasonicRawDistortion)
        .unwrap();
    assert_eq!(dir.get(2), Some(&Value::I16(-120))); // param 2
    assert_eq!(dir.get(4), Some(&Value::I16(35))); // param 4
    assert_eq!(dir.get(5), Some(&Value::I16(17))); // scale
    assert_eq!(dir.get(8), Some(&Value::I16(-4))); // param 8
    assert_eq!(dir.get(12), Some(&Value::I16(3))); // N
}
