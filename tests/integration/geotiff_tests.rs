//! GeoTIFF GeoKeyDirectory unpacking tests.

use imagemeta::{read_metadata, DirectoryKind, ErrorKind, Value};

use super::test_utils::*;

const TAG_GEO_KEYS: u16 = 0x87AF; // 34735
const TAG_GEO_ASCII: u16 = 0x87B1; // 34737

/// Build an IFD0 carrying a GeoKeyDirectory and an ascii-params tag.
fn build_geotiff(keys: &[u16], ascii: &str) -> Vec<u8> {
    let mut file = TiffFile::new(true);
    let ifd0_offset = file.reserve(ifd_size(2));

    let mut keys_payload = Vec::new();
    for key in keys {
        keys_payload.extend_from_slice(&key.to_le_bytes());
    }
    let keys_offset = file.append(&keys_payload);
    let ascii_offset = file.append(ascii.as_bytes());

    let ifd0 = encode_ifd(
        true,
        &[
            entry(
                TAG_GEO_KEYS,
                FORMAT_SHORT,
                keys.len() as u32,
                val_u32(true, keys_offset),
            ),
            entry(
                TAG_GEO_ASCII,
                FORMAT_ASCII,
                ascii.len() as u32,
                val_u32(true, ascii_offset),
            ),
        ],
        0,
    );
    file.write_at(ifd0_offset, &ifd0);
    file.set_ifd0_offset(ifd0_offset);
    file.data
}

#[test]
fn test_geo_keys_unpacked_and_sources_removed() {
    // Header (1,1,0,2), one inline key, one string-slice key
    let keys = [1u16, 1, 0, 2, 1024, 0, 1, 2, 3072, 34737, 5, 4];
    let metadata = read_metadata(build_geotiff(&keys, "abc|de|fgh|"));

    let geo = metadata.first_of_kind(DirectoryKind::GeoTiff).unwrap();
    assert!(geo.errors().is_empty());
    assert_eq!(geo.get(1024), Some(&Value::U16(2)));
    assert_eq!(geo.string(3072), Some("de|fg"));

    // Both the key directory and the consumed ascii tag are gone
    let ifd0 = metadata.first_of_kind(DirectoryKind::ExifIfd0).unwrap();
    assert!(ifd0.get(TAG_GEO_KEYS).is_none());
    assert!(ifd0.get(TAG_GEO_ASCII).is_none());
    assert_eq!(geo.parent(), Some(0));
}

#[test]
fn test_geo_string_trailing_separator_trimmed() {
    // Slice [7, 11) of "abc|de|fgh|" is "fgh|"; the trailing separator
    // gets trimmed
    let keys = [1u16, 1, 0, 1, 2049, 34737, 4, 7];
    let metadata = read_metadata(build_geotiff(&keys, "abc|de|fgh|"));

    let geo = metadata.first_of_kind(DirectoryKind::GeoTiff).unwrap();
    assert_eq!(geo.string(2049), Some("fgh"));
}

#[test]
fn test_geo_slice_out_of_range_records_error() {
    // Slice [8, 8+10) exceeds the 11-character string
    let keys = [1u16, 1, 0, 1, 2049, 34737, 10, 8];
    let metadata = read_metadata(build_geotiff(&keys, "abc|de|fgh|"));

    let geo = metadata.first_of_kind(DirectoryKind::GeoTiff).unwrap();
    assert_eq!(geo.errors().len(), 1);
    assert_eq!(geo.errors()[0].kind, ErrorKind::VendorBadSize);
    assert!(geo.get(2049).is_none());

    // The unconsumed source string survives in IFD0
    let ifd0 = metadata.first_of_kind(DirectoryKind::ExifIfd0).unwrap();
    assert!(ifd0.get(TAG_GEO_ASCII).is_some());
    assert!(ifd0.get(TAG_GEO_KEYS).is_none());
}

#[test]
fn test_geo_missing_source_tag_records_error() {
    // References doubles tag 34736, which this file does not carry
    let keys = [1u16, 1, 0, 1, 2054, 34736, 1, 0];
    let metadata = read_metadata(build_geotiff(&keys, "x"));

    let geo = metadata.first_of_kind(DirectoryKind::GeoTiff).unwrap();
    assert_eq!(geo.errors().len(), 1);
}

#[test]
fn test_geo_key_count_overruns_directory() {
    // Declares three keys but only one entry follows the header
    let keys = [1u16, 1, 0, 3, 1024, 0, 1, 2];
    let metadata = read_metadata(build_geotiff(&keys, "x"));

    let geo = metadata.first_of_kind(DirectoryKind::GeoTiff).unwrap();
    assert_eq!(geo.get(1024), Some(&Value::U16(2)));
    assert!(geo.has_errors());
}

#[test]
fn test_non_geotiff_ifd0_is_untouched() {
    let mut file = TiffFile::new(true);
    let ifd = encode_ifd(
        true,
        &[entry(0x0112, FORMAT_SHORT, 1, val_u16(true, 1))],
        0,
    );
    let offset = file.append(&ifd);
    file.set_ifd0_offset(offset);

    let metadata = read_metadata(file.data);
    assert!(metadata.first_of_kind(DirectoryKind::GeoTiff).is_none());
}
