//! Makernote dispatch tests: recogniser ordering, offset conventions,
//! byte-order overrides, and base shifts.

use imagemeta::{read_metadata, DirectoryKind};

use super::test_utils::*;

fn kinds(metadata: &imagemeta::MetadataList) -> Vec<DirectoryKind> {
    metadata.iter().map(|d| d.kind()).collect()
}

// =============================================================================
// Olympus family
// =============================================================================

#[test]
fn test_olympus_olymp_header() {
    // Six-byte signature, two pad bytes, then an IFD at +8 walked in the
    // parent's byte order with absolute offsets
    let mut makernote = b"OLYMP\0\0\0".to_vec();
    makernote.extend_from_slice(&encode_ifd(
        true,
        &[
            entry(0x0200, FORMAT_SHORT, 1, val_u16(true, 7)),
            entry(0x0202, FORMAT_SHORT, 1, val_u16(true, 2)),
        ],
        0,
    ));
    let data = build_exif_with_makernote(true, "OLYMPUS OPTICAL CO.,LTD", &makernote);

    let metadata = read_metadata(data);
    assert_eq!(
        kinds(&metadata),
        vec![
            DirectoryKind::ExifIfd0,
            DirectoryKind::ExifSubIfd,
            DirectoryKind::Olympus
        ]
    );
    let olympus = &metadata[2];
    assert_eq!(olympus.u16(0x0200), Some(7));
    assert_eq!(olympus.u16(0x0202), Some(2));
    assert_eq!(olympus.parent(), Some(1));
    assert!(olympus.errors().is_empty());
}

#[test]
fn test_olympus_new_header_uses_relative_base() {
    // "OLYMPUS\0II" header: the IFD sits at +12 and its pointers are
    // relative to the makernote start
    let mut makernote = b"OLYMPUS\0II\x03\0".to_vec();
    makernote.extend_from_slice(&encode_ifd(
        true,
        &[entry(0x0204, FORMAT_SHORT, 1, val_u16(true, 4))],
        0,
    ));
    let data = build_exif_with_makernote(true, "OLYMPUS CORPORATION", &makernote);

    let metadata = read_metadata(data);
    let olympus = metadata.first_of_kind(DirectoryKind::Olympus).unwrap();
    assert_eq!(olympus.u16(0x0204), Some(4));
    assert!(olympus.errors().is_empty());
}

#[test]
fn test_minolta_headerless() {
    let makernote = encode_ifd(true, &[entry(0x0200, FORMAT_SHORT, 1, val_u16(true, 9))], 0);
    let data = build_exif_with_makernote(true, "MINOLTA CO.,LTD", &makernote);

    let metadata = read_metadata(data);
    let olympus = metadata.first_of_kind(DirectoryKind::Olympus).unwrap();
    assert_eq!(olympus.u16(0x0200), Some(9));
}

// =============================================================================
// Nikon
// =============================================================================

#[test]
fn test_nikon_type1() {
    let mut makernote = b"Nikon\0\x01\0".to_vec();
    makernote.extend_from_slice(&encode_ifd(
        true,
        &[entry(0x0002, FORMAT_SHORT, 1, val_u16(true, 400))],
        0,
    ));
    let data = build_exif_with_makernote(true, "NIKON", &makernote);

    let metadata = read_metadata(data);
    let nikon = metadata.first_of_kind(DirectoryKind::NikonType1).unwrap();
    assert_eq!(nikon.u16(0x0002), Some(400));
}

#[test]
fn test_nikon_type2_embedded_tiff_base() {
    // "Nikon\0\x02..." wraps a complete TIFF header at +10; the IFD at +8
    // of that region is walked with pointers relative to it
    let mut makernote = b"Nikon\0\x02\x10\0\0".to_vec();
    makernote.extend_from_slice(b"II\x2A\0");
    makernote.extend_from_slice(&u32v(true, 8));
    makernote.extend_from_slice(&encode_ifd(
        true,
        &[entry(0x0002, FORMAT_SHORT, 1, val_u16(true, 800))],
        0,
    ));
    let data = build_exif_with_makernote(true, "NIKON CORPORATION", &makernote);

    let metadata = read_metadata(data);
    let nikon = metadata.first_of_kind(DirectoryKind::NikonType2).unwrap();
    assert_eq!(nikon.u16(0x0002), Some(800));
    assert!(nikon.errors().is_empty());
}

#[test]
fn test_nikon_without_probe_is_headerless_type2() {
    let makernote = encode_ifd(true, &[entry(0x0004, FORMAT_SHORT, 1, val_u16(true, 1))], 0);
    let data = build_exif_with_makernote(true, "NIKON", &makernote);

    let metadata = read_metadata(data);
    let nikon = metadata.first_of_kind(DirectoryKind::NikonType2).unwrap();
    assert_eq!(nikon.u16(0x0004), Some(1));
}

// =============================================================================
// Sony
// =============================================================================

#[test]
fn test_sony_dsc_header() {
    let mut makernote = b"SONY DSC \0\0\0".to_vec();
    makernote.extend_from_slice(&encode_ifd(
        true,
        &[entry(0x0102, FORMAT_SHORT, 1, val_u16(true, 2))],
        0,
    ));
    let data = build_exif_with_makernote(true, "SONY", &makernote);

    let metadata = read_metadata(data);
    let sony = metadata.first_of_kind(DirectoryKind::SonyType1).unwrap();
    assert_eq!(sony.u16(0x0102), Some(2));
}

#[test]
fn test_sony_headerless_branch_follows_probe_branches() {
    // No "SONY CAM"/"SONY DSC" probe: the make-based fallback walks the
    // IFD directly at the makernote position. Two entries, so the first
    // two bytes avoid the {0x01, 0x00} guard.
    let makernote = encode_ifd(
        true,
        &[
            entry(0x0102, FORMAT_SHORT, 1, val_u16(true, 3)),
            entry(0xB000, FORMAT_SHORT, 1, val_u16(true, 2)),
        ],
        0,
    );
    let data = build_exif_with_makernote(true, "SONY", &makernote);

    let metadata = read_metadata(data);
    let sony = metadata.first_of_kind(DirectoryKind::SonyType1).unwrap();
    assert_eq!(sony.u16(0x0102), Some(3));
}

#[test]
fn test_sony_one_entry_guard_skips_headerless_note() {
    // A {0x01, 0x00} prefix is deliberately not treated as a Sony IFD
    let makernote = encode_ifd(true, &[entry(0x0102, FORMAT_SHORT, 1, val_u16(true, 3))], 0);
    let data = build_exif_with_makernote(true, "SONY", &makernote);

    let metadata = read_metadata(data);
    assert!(metadata.first_of_kind(DirectoryKind::SonyType1).is_none());
}

// =============================================================================
// Fujifilm, Apple, Casio
// =============================================================================

#[test]
fn test_fujifilm_reads_offset_and_forces_little_endian() {
    // Outer document is big-endian; the Fujifilm note stores its IFD
    // offset little-endian at +8 and all pointers relative to itself
    let mut makernote = b"FUJIFILM".to_vec();
    makernote.extend_from_slice(&12i32.to_le_bytes());
    makernote.extend_from_slice(&encode_ifd(
        true, // note entries little-endian despite the big-endian outer file
        &[entry(0x1000, FORMAT_SHORT, 1, val_u16(true, 5))],
        0,
    ));
    let data = build_exif_with_makernote(false, "FUJIFILM", &makernote);

    let metadata = read_metadata(data);
    let fuji = metadata.first_of_kind(DirectoryKind::Fujifilm).unwrap();
    assert_eq!(fuji.u16(0x1000), Some(5));
    assert!(fuji.errors().is_empty());
}

#[test]
fn test_apple_big_endian_relative() {
    let mut makernote = b"Apple iOS\0\0\0\0\0".to_vec();
    makernote.extend_from_slice(&encode_ifd(
        false, // Apple notes are big-endian
        &[entry(0x0001, FORMAT_SHORT, 1, val_u16(false, 11))],
        0,
    ));
    let data = build_exif_with_makernote(true, "Apple", &makernote);

    let metadata = read_metadata(data);
    let apple = metadata.first_of_kind(DirectoryKind::Apple).unwrap();
    assert_eq!(apple.u16(0x0001), Some(11));
}

#[test]
fn test_casio_qvc_and_aoc_variants() {
    let mut qvc = b"QVC\0\0\0".to_vec();
    qvc.extend_from_slice(&encode_ifd(
        true,
        &[entry(0x0002, FORMAT_SHORT, 1, val_u16(true, 1))],
        0,
    ));
    let metadata = read_metadata(build_exif_with_makernote(true, "CASIO COMPUTER CO.,LTD.", &qvc));
    assert!(metadata.first_of_kind(DirectoryKind::CasioType2).is_some());

    // AOC notes use offsets relative to the makernote
    let mut aoc = b"AOC\0\0\0".to_vec();
    aoc.extend_from_slice(&encode_ifd(
        true,
        &[entry(0x0002, FORMAT_SHORT, 1, val_u16(true, 1))],
        0,
    ));
    let metadata = read_metadata(build_exif_with_makernote(true, "PENTAX Corporation", &aoc));
    assert!(metadata.first_of_kind(DirectoryKind::CasioType2).is_some());
}

// =============================================================================
// Leica ordering
// =============================================================================

#[test]
fn test_leica_type5_probe_precedes_make_fallback() {
    let mut makernote = b"LEICA\0\x05\0".to_vec();
    makernote.extend_from_slice(&encode_ifd(
        true,
        &[entry(0x0001, FORMAT_SHORT, 1, val_u16(true, 1))],
        0,
    ));
    let data = build_exif_with_makernote(true, "LEICA", &makernote);

    let metadata = read_metadata(data);
    assert!(metadata.first_of_kind(DirectoryKind::LeicaType5).is_some());
    assert!(metadata.first_of_kind(DirectoryKind::Panasonic).is_none());
}

#[test]
fn test_leica_make_fallback_is_panasonic_layout() {
    let mut makernote = b"LEICAXXX".to_vec();
    makernote.extend_from_slice(&encode_ifd(
        true,
        &[entry(0x0003, FORMAT_SHORT, 1, val_u16(true, 2))],
        0,
    ));
    let data = build_exif_with_makernote(true, "LEICA", &makernote);

    let metadata = read_metadata(data);
    let panasonic = metadata.first_of_kind(DirectoryKind::Panasonic).unwrap();
    assert_eq!(panasonic.u16(0x0003), Some(2));
}

// =============================================================================
// Unknown signatures
// =============================================================================

#[test]
fn test_unknown_makernote_stored_as_raw_bytes() {
    let makernote = b"ACME CAMERA CO\0\x01\x02\x03".to_vec();
    let data = build_exif_with_makernote(true, "ACME", &makernote);

    let metadata = read_metadata(data);
    let sub_ifd = metadata.first_of_kind(DirectoryKind::ExifSubIfd).unwrap();
    let raw = sub_ifd.bytes(0x927C).expect("raw makernote bytes");
    assert_eq!(&raw[..], &makernote[..]);
    // Not an error, just unrecognised
    assert!(sub_ifd.errors().is_empty());
}

#[test]
fn test_ricoh_textual_note_is_consumed_silently() {
    let makernote = b"Rv1024;Rg1,2;".to_vec();
    let data = build_exif_with_makernote(true, "RICOH", &makernote);

    let metadata = read_metadata(data);
    let sub_ifd = metadata.first_of_kind(DirectoryKind::ExifSubIfd).unwrap();
    assert!(sub_ifd.get(0x927C).is_none());
    assert!(sub_ifd.errors().is_empty());
}

#[test]
fn test_samsung_dji_flir_by_make() {
    for (make, kind) in [
        ("SAMSUNG", DirectoryKind::SamsungType2),
        ("DJI", DirectoryKind::Dji),
        ("FLIR Systems", DirectoryKind::Flir),
    ] {
        let makernote =
            encode_ifd(true, &[entry(0x0001, FORMAT_SHORT, 1, val_u16(true, 1))], 0);
        let metadata = read_metadata(build_exif_with_makernote(true, make, &makernote));
        assert!(
            metadata.first_of_kind(kind).is_some(),
            "make {make} should dispatch to {kind:?}"
        );
    }
}
