//! Makernote recognition and dispatch.
//!
//! Vendors store an IFD or a fixed-layout blob inside the makernote tag,
//! each with its own offset convention and sometimes its own byte order.
//! Recognition combines a probe of the first bytes with the camera make
//! from IFD0 and produces a strategy value; a single executor interprets
//! it. Match order matters: Sony's headerless branch must follow the
//! `SONY CAM`/`SONY DSC` branches, and Leica's type-5 probes must precede
//! the `LEICA` make fallback.

use tracing::debug;

use crate::error::{TiffError, VendorError};
use crate::io::ByteOrder;
use crate::meta::DirectoryKind;
use crate::tiff::{self, TiffContext, TiffHandler};

use super::handler::ExifTiffHandler;
use super::vendors;

/// The u16 every Reconyx HyperFire makernote begins with.
pub const RECONYX_HYPERFIRE_VERSION: u16 = 0xF101;

/// How to locate the makernote's IFD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IfdLocation {
    /// Fixed offset, relative to the derived base
    At(u64),
    /// Offset stored as a signed 32-bit at this position of the derived view
    ReadI32At(u64),
}

/// The strategy a recogniser produces.
#[derive(Debug)]
enum MakernoteAction {
    /// Walk an IFD with the given context derivation
    Ifd {
        kind: DirectoryKind,
        location: IfdLocation,
        byte_order: Option<ByteOrder>,
        /// Base shift relative to the current base
        base_shift: Option<u64>,
    },
    /// Decode a fixed-layout binary blob
    Kodak { big_endian: bool },
    ReconyxHyperFire,
    ReconyxHyperFire2,
    ReconyxUltraFire,
    /// Recognised but carrying no structured data (Ricoh textual notes)
    Ignore,
    /// Recognised vendor, layout this crate cannot decode
    Unsupported,
}

fn starts_with(probe: &[u8], prefix: &[u8]) -> bool {
    probe.len() >= prefix.len() && &probe[..prefix.len()] == prefix
}

/// Dispatch the makernote tag of the Exif SubIFD.
///
/// Returns `Ok(false)` for unrecognised signatures; the walker then stores
/// the payload as raw undefined bytes.
pub(crate) fn process_makernote(
    handler: &mut ExifTiffHandler<'_>,
    ctx: &mut TiffContext<'_>,
    makernote_offset: u64,
    byte_count: usize,
) -> Result<bool, TiffError> {
    let reader = ctx.reader.clone();
    let probe_len = byte_count.min(12);
    let probe = reader.read_bytes(makernote_offset, probe_len)?;
    let make = handler.camera_make().unwrap_or_default().to_string();
    let make_upper = make.to_ascii_uppercase();

    let action = recognize(&probe[..], &make, &make_upper, ctx, makernote_offset)?;
    let action = match action {
        Some(action) => action,
        None => {
            debug!(make = %make, "unrecognised makernote signature");
            return Ok(false);
        }
    };
    debug!(make = %make, ?action, "dispatching makernote");

    match action {
        MakernoteAction::Ifd {
            kind,
            location,
            byte_order,
            base_shift,
        } => {
            let mut reader = ctx.reader.clone();
            if let Some(shift) = base_shift {
                reader = reader.with_shifted_base(shift);
            }
            if let Some(order) = byte_order {
                reader = reader.with_byte_order(order);
            }
            let ifd_offset = match location {
                IfdLocation::At(offset) => offset,
                IfdLocation::ReadI32At(position) => {
                    let offset = reader.read_i32(position)?;
                    match u64::try_from(offset) {
                        Ok(offset) => offset,
                        Err(_) => {
                            handler.error(
                                VendorError::BadHeader(format!(
                                    "negative makernote IFD offset {offset}"
                                ))
                                .into(),
                            );
                            return Ok(true);
                        }
                    }
                }
            };
            handler.push_directory(kind);
            let mut sub_ctx = ctx.derived(reader);
            tiff::process_ifd(handler, &mut sub_ctx, ifd_offset);
            Ok(true)
        }
        MakernoteAction::Kodak { big_endian } => {
            vendors::kodak::process_kodak(handler, ctx, makernote_offset + 8, big_endian);
            Ok(true)
        }
        MakernoteAction::ReconyxHyperFire => {
            vendors::reconyx::process_hyperfire(handler, ctx, makernote_offset);
            Ok(true)
        }
        MakernoteAction::ReconyxHyperFire2 => {
            vendors::reconyx::process_hyperfire2(handler, ctx, makernote_offset);
            Ok(true)
        }
        MakernoteAction::ReconyxUltraFire => {
            vendors::reconyx::process_ultrafire(handler, ctx, makernote_offset);
            Ok(true)
        }
        MakernoteAction::Ignore => Ok(true),
        MakernoteAction::Unsupported => {
            handler.error(VendorError::Unsupported.into());
            Ok(true)
        }
    }
}

/// The ordered recogniser ladder.
#[allow(clippy::too_many_lines)]
fn recognize(
    probe: &[u8],
    make: &str,
    make_upper: &str,
    ctx: &TiffContext<'_>,
    makernote_offset: u64,
) -> Result<Option<MakernoteAction>, TiffError> {
    let ifd = |kind, location, byte_order, base_shift| {
        Some(MakernoteAction::Ifd {
            kind,
            location,
            byte_order,
            base_shift,
        })
    };

    // Olympus family, including rebadged Epson and Agfa models
    if starts_with(probe, b"OLYMP\0") || starts_with(probe, b"EPSON") || starts_with(probe, b"AGFA")
    {
        return Ok(ifd(
            DirectoryKind::Olympus,
            IfdLocation::At(makernote_offset + 8),
            None,
            None,
        ));
    }
    if starts_with(probe, b"OLYMPUS\0II") {
        return Ok(ifd(
            DirectoryKind::Olympus,
            IfdLocation::At(12),
            None,
            Some(makernote_offset),
        ));
    }
    if make_upper.starts_with("MINOLTA") {
        // Headerless IFD directly at the makernote position
        return Ok(ifd(
            DirectoryKind::Olympus,
            IfdLocation::At(makernote_offset),
            None,
            None,
        ));
    }

    if make_upper.starts_with("NIKON") {
        if starts_with(probe, b"Nikon") {
            match probe.get(6) {
                Some(1) => {
                    return Ok(ifd(
                        DirectoryKind::NikonType1,
                        IfdLocation::At(makernote_offset + 8),
                        None,
                        None,
                    ));
                }
                Some(2) => {
                    // An embedded TIFF header sits at +10; its pointers are
                    // relative to itself
                    return Ok(ifd(
                        DirectoryKind::NikonType2,
                        IfdLocation::At(8),
                        None,
                        Some(makernote_offset + 10),
                    ));
                }
                _ => return Ok(Some(MakernoteAction::Unsupported)),
            }
        }
        return Ok(ifd(
            DirectoryKind::NikonType2,
            IfdLocation::At(makernote_offset),
            None,
            None,
        ));
    }

    if starts_with(probe, b"SONY CAM") || starts_with(probe, b"SONY DSC") {
        return Ok(ifd(
            DirectoryKind::SonyType1,
            IfdLocation::At(makernote_offset + 12),
            None,
            None,
        ));
    }
    // Headerless Sony makernote; the two-byte guard skips Sony-made media
    // with foreign payloads
    if make_upper.starts_with("SONY") && probe.get(..2) != Some(&[0x01, 0x00][..]) {
        return Ok(ifd(
            DirectoryKind::SonyType1,
            IfdLocation::At(makernote_offset),
            None,
            None,
        ));
    }
    if starts_with(probe, b"SEMC MS\0\0\0\0\0") {
        return Ok(ifd(
            DirectoryKind::SonyType6,
            IfdLocation::At(makernote_offset + 20),
            Some(ByteOrder::BigEndian),
            None,
        ));
    }

    if starts_with(probe, b"SIGMA\0\0\0") || starts_with(probe, b"FOVEON\0\0") {
        return Ok(ifd(
            DirectoryKind::Sigma,
            IfdLocation::At(makernote_offset + 10),
            None,
            None,
        ));
    }

    if starts_with(probe, b"KDK") {
        return Ok(Some(MakernoteAction::Kodak {
            big_endian: starts_with(probe, b"KDK INFO"),
        }));
    }

    if make_upper == "CANON" {
        return Ok(ifd(
            DirectoryKind::Canon,
            IfdLocation::At(makernote_offset),
            None,
            None,
        ));
    }

    if make_upper.starts_with("CASIO") {
        if starts_with(probe, b"QVC\0\0\0") {
            return Ok(ifd(
                DirectoryKind::CasioType2,
                IfdLocation::At(makernote_offset + 6),
                None,
                None,
            ));
        }
        return Ok(ifd(
            DirectoryKind::CasioType1,
            IfdLocation::At(makernote_offset),
            None,
            None,
        ));
    }

    if starts_with(probe, b"FUJIFILM") || make_upper == "FUJIFILM" {
        // The IFD offset is stored little-endian at +8 regardless of the
        // outer byte order, and pointers are relative to the makernote
        return Ok(ifd(
            DirectoryKind::Fujifilm,
            IfdLocation::ReadI32At(8),
            Some(ByteOrder::LittleEndian),
            Some(makernote_offset),
        ));
    }

    if starts_with(probe, b"KYOCERA") {
        return Ok(ifd(
            DirectoryKind::Kyocera,
            IfdLocation::At(makernote_offset + 22),
            None,
            None,
        ));
    }

    if starts_with(probe, b"LEICA\0\x01\0")
        || starts_with(probe, b"LEICA\0\x04\0")
        || starts_with(probe, b"LEICA\0\x05\0")
        || starts_with(probe, b"LEICA\0\x06\0")
        || starts_with(probe, b"LEICA\0\x07\0")
    {
        return Ok(ifd(
            DirectoryKind::LeicaType5,
            IfdLocation::At(8),
            None,
            Some(makernote_offset),
        ));
    }
    if make == "Leica Camera AG" {
        return Ok(ifd(
            DirectoryKind::Leica,
            IfdLocation::At(makernote_offset + 8),
            Some(ByteOrder::LittleEndian),
            None,
        ));
    }
    if make_upper == "LEICA" {
        // Panasonic-built bodies share the Panasonic makernote layout
        return Ok(ifd(
            DirectoryKind::Panasonic,
            IfdLocation::At(makernote_offset + 8),
            Some(ByteOrder::LittleEndian),
            None,
        ));
    }

    if starts_with(probe, b"Panasonic\0\0\0") {
        return Ok(ifd(
            DirectoryKind::Panasonic,
            IfdLocation::At(makernote_offset + 12),
            None,
            None,
        ));
    }

    if starts_with(probe, b"AOC\0") {
        return Ok(ifd(
            DirectoryKind::CasioType2,
            IfdLocation::At(6),
            None,
            Some(makernote_offset),
        ));
    }

    if make_upper.starts_with("PENTAX") || make_upper.starts_with("ASAHI") {
        return Ok(ifd(
            DirectoryKind::Pentax,
            IfdLocation::At(0),
            None,
            Some(makernote_offset),
        ));
    }

    if starts_with(probe, b"SANYO\0\x01\0") {
        return Ok(ifd(
            DirectoryKind::Sanyo,
            IfdLocation::At(8),
            None,
            Some(makernote_offset),
        ));
    }

    if make_upper.starts_with("RICOH") {
        if starts_with(probe, b"Rv") || starts_with(probe, b"Rev") {
            // Textual firmware note, nothing structured to decode
            debug!("ignoring textual Ricoh makernote");
            return Ok(Some(MakernoteAction::Ignore));
        }
        if starts_with(probe, b"RICOH") {
            return Ok(ifd(
                DirectoryKind::Ricoh,
                IfdLocation::At(8),
                Some(ByteOrder::BigEndian),
                Some(makernote_offset),
            ));
        }
        if starts_with(probe, b"PENTAX \0II") {
            return Ok(ifd(
                DirectoryKind::PentaxType2,
                IfdLocation::At(10),
                Some(ByteOrder::LittleEndian),
                Some(makernote_offset),
            ));
        }
    }

    if starts_with(probe, b"Apple iOS\0") {
        return Ok(ifd(
            DirectoryKind::Apple,
            IfdLocation::At(14),
            Some(ByteOrder::BigEndian),
            Some(makernote_offset),
        ));
    }

    if ctx.reader.is_valid_range(makernote_offset, 2)
        && ctx.reader.read_u16(makernote_offset)? == RECONYX_HYPERFIRE_VERSION
    {
        return Ok(Some(MakernoteAction::ReconyxHyperFire));
    }
    if starts_with(probe, b"RECONYXUF") {
        return Ok(Some(MakernoteAction::ReconyxUltraFire));
    }
    if starts_with(probe, b"RECONYXH2") {
        return Ok(Some(MakernoteAction::ReconyxHyperFire2));
    }

    if make_upper == "SAMSUNG" {
        return Ok(ifd(
            DirectoryKind::SamsungType2,
            IfdLocation::At(makernote_offset),
            None,
            None,
        ));
    }

    if make == "DJI" {
        return Ok(ifd(
            DirectoryKind::Dji,
            IfdLocation::At(makernote_offset),
            None,
            None,
        ));
    }

    if make == "FLIR Systems" {
        return Ok(ifd(
            DirectoryKind::Flir,
            IfdLocation::At(makernote_offset),
            None,
            None,
        ));
    }

    Ok(None)
}
