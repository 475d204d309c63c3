//! The EXIF-specific TIFF handler.
//!
//! Owns marker dispatch, sub-IFD promotion, the thumbnail/multi-page
//! follower rule, embedded-format dispatch, and the hand-off to the
//! makernote and vendor decoders. All state lives on the handler; the
//! walker only threads the context through.

use tracing::debug;

use crate::embedded::EmbeddedReaders;
use crate::error::{DirectoryError, TiffError};
use crate::meta::{DirectoryKind, MetadataList, Value};
use crate::tiff::{DirectoryStack, TiffContext, TiffHandler, TiffStandard};

use super::geotiff;
use super::makernote;
use super::tags::*;
use super::vendors;

/// TIFF markers recognised by the EXIF handler.
const MARKER_TIFF: u16 = 0x002A;
const MARKER_BIG_TIFF: u16 = 0x002B;
const MARKER_ORF_OR: u16 = 0x4F52;
const MARKER_ORF_SR: u16 = 0x5352;
const MARKER_PANASONIC_RAW: u16 = 0x0055;

/// Directories in which vendor tag 0x0E00 is a PrintIM block.
const PRINT_IM_VENDOR_KINDS: &[DirectoryKind] = &[
    DirectoryKind::CasioType2,
    DirectoryKind::NikonType2,
    DirectoryKind::Olympus,
    DirectoryKind::Panasonic,
    DirectoryKind::Pentax,
    DirectoryKind::Ricoh,
    DirectoryKind::SamsungType2,
    DirectoryKind::Sanyo,
];

pub struct ExifTiffHandler<'e> {
    pub(crate) stack: DirectoryStack,
    embedded: &'e dyn EmbeddedReaders,
    /// Top-level IFDs completed so far; drives the follower rule
    completed_chain_ifds: usize,
}

impl<'e> ExifTiffHandler<'e> {
    pub fn new(embedded: &'e dyn EmbeddedReaders) -> Self {
        Self {
            stack: DirectoryStack::new(),
            embedded,
            completed_chain_ifds: 0,
        }
    }

    pub fn into_directories(self) -> MetadataList {
        self.stack.into_list()
    }

    /// Camera make from the first IFD0, used by the makernote dispatcher.
    pub(crate) fn camera_make(&self) -> Option<&str> {
        self.stack
            .first_of_kind(DirectoryKind::ExifIfd0)?
            .string(TAG_MAKE)
    }

    pub(crate) fn current_kind(&self) -> Option<DirectoryKind> {
        self.stack.current_kind()
    }

    /// Attach directories produced by an embedded-format reader.
    ///
    /// Returns whether anything was attached; an empty result leaves the
    /// raw bytes in the current directory instead.
    fn attach_embedded(&mut self, directories: Vec<crate::meta::Directory>) -> bool {
        if directories.is_empty() {
            return false;
        }
        self.stack.attach_all(directories);
        true
    }

    fn olympus_subdirectory(tag: u16) -> Option<DirectoryKind> {
        Some(match tag {
            TAG_OLYMPUS_EQUIPMENT => DirectoryKind::OlympusEquipment,
            TAG_OLYMPUS_CAMERA_SETTINGS => DirectoryKind::OlympusCameraSettings,
            TAG_OLYMPUS_RAW_DEVELOPMENT => DirectoryKind::OlympusRawDevelopment,
            TAG_OLYMPUS_RAW_DEVELOPMENT_2 => DirectoryKind::OlympusRawDevelopment2,
            TAG_OLYMPUS_IMAGE_PROCESSING => DirectoryKind::OlympusImageProcessing,
            TAG_OLYMPUS_FOCUS_INFO => DirectoryKind::OlympusFocusInfo,
            TAG_OLYMPUS_RAW_INFO => DirectoryKind::OlympusRawInfo,
            TAG_OLYMPUS_MAIN_INFO => DirectoryKind::OlympusMainInfo,
            _ => return None,
        })
    }
}

impl TiffHandler for ExifTiffHandler<'_> {
    fn process_tiff_marker(&mut self, marker: u16) -> Result<TiffStandard, TiffError> {
        match marker {
            MARKER_TIFF | MARKER_ORF_OR | MARKER_ORF_SR => {
                self.push_directory(DirectoryKind::ExifIfd0);
                Ok(TiffStandard::Tiff)
            }
            MARKER_BIG_TIFF => {
                self.push_directory(DirectoryKind::ExifIfd0);
                Ok(TiffStandard::BigTiff)
            }
            MARKER_PANASONIC_RAW => {
                self.push_directory(DirectoryKind::PanasonicRawIfd0);
                Ok(TiffStandard::Tiff)
            }
            other => Err(TiffError::BadMarker(other)),
        }
    }

    fn try_enter_sub_ifd(&mut self, tag: u16) -> bool {
        let kind = self.current_kind();

        if tag == TAG_SUB_IFD_OFFSET {
            self.push_directory(DirectoryKind::ExifSubIfd);
            return true;
        }

        if matches!(
            kind,
            Some(DirectoryKind::ExifIfd0) | Some(DirectoryKind::PanasonicRawIfd0)
        ) {
            if tag == TAG_EXIF_SUB_IFD_OFFSET {
                self.push_directory(DirectoryKind::ExifSubIfd);
                return true;
            }
            if tag == TAG_GPS_INFO_OFFSET {
                self.push_directory(DirectoryKind::Gps);
                return true;
            }
        }

        if kind == Some(DirectoryKind::ExifSubIfd) && tag == TAG_INTEROP_OFFSET {
            self.push_directory(DirectoryKind::Interop);
            return true;
        }

        if kind == Some(DirectoryKind::Olympus) {
            if let Some(sub_kind) = Self::olympus_subdirectory(tag) {
                self.push_directory(sub_kind);
                return true;
            }
        }

        false
    }

    fn has_follower_ifd(&mut self) -> bool {
        // Followers exist only on the top-level chain; after a sub-IFD
        // pops, a parent directory is still current and the chain stops.
        if self.stack.current().is_some() {
            return false;
        }
        self.completed_chain_ifds += 1;
        let kind = if self.completed_chain_ifds == 1 {
            DirectoryKind::ExifThumbnail
        } else {
            DirectoryKind::ExifImage
        };
        self.push_directory(kind);
        true
    }

    fn custom_process_tag(
        &mut self,
        ctx: &mut TiffContext<'_>,
        tag: u16,
        value_offset: u64,
        byte_count: usize,
    ) -> Result<bool, TiffError> {
        let kind = match self.current_kind() {
            Some(kind) => kind,
            None => return Ok(false),
        };

        // Makernote: dispatch on probe bytes and camera make
        if tag == TAG_MAKERNOTE && kind == DirectoryKind::ExifSubIfd {
            return makernote::process_makernote(self, ctx, value_offset, byte_count);
        }

        // IPTC block, recognised by its 0x1C record marker
        if tag == TAG_IPTC_NAA && kind == DirectoryKind::ExifIfd0 {
            if byte_count > 0 && ctx.reader.read_u8(value_offset)? == 0x1C {
                let data = ctx.reader.read_bytes(value_offset, byte_count)?;
                let directories = self.embedded.read_iptc(&data);
                return Ok(self.attach_embedded(directories));
            }
            return Ok(false);
        }

        if tag == TAG_INTER_COLOR_PROFILE {
            let data = ctx.reader.read_bytes(value_offset, byte_count)?;
            let directories = self.embedded.read_icc(&data);
            return Ok(self.attach_embedded(directories));
        }

        if tag == TAG_PHOTOSHOP_SETTINGS && kind == DirectoryKind::ExifIfd0 {
            let data = ctx.reader.read_bytes(value_offset, byte_count)?;
            let directories = self.embedded.read_photoshop(&data);
            return Ok(self.attach_embedded(directories));
        }

        if tag == TAG_APPLICATION_NOTES
            && matches!(
                kind,
                DirectoryKind::ExifIfd0 | DirectoryKind::ExifSubIfd
            )
        {
            let data = ctx
                .reader
                .read_null_terminated_bytes(value_offset, byte_count)?;
            let directories = self.embedded.read_xmp(&data);
            return Ok(self.attach_embedded(directories));
        }

        // PrintIM: dedicated tag, or 0x0E00 inside a known vendor directory
        if tag == TAG_PRINT_IMAGE_MATCHING_INFO
            || (tag == TAG_VENDOR_PRINT_IM && PRINT_IM_VENDOR_KINDS.contains(&kind))
        {
            vendors::printim::process_print_im(self, ctx, value_offset, byte_count);
            return Ok(true);
        }

        // Olympus sub-directories stored inline (not as IFD pointers):
        // push and walk the IFD sitting at the value position
        if kind == DirectoryKind::Olympus {
            if let Some(sub_kind) = Self::olympus_subdirectory(tag) {
                self.push_directory(sub_kind);
                let reader = ctx.reader.clone();
                let mut sub_ctx = ctx.derived(reader);
                crate::tiff::process_ifd(self, &mut sub_ctx, value_offset);
                return Ok(true);
            }
        }

        if kind == DirectoryKind::PanasonicRawIfd0 {
            match tag {
                TAG_PANASONIC_WB_INFO => {
                    vendors::panasonic_raw::process_block(
                        self,
                        ctx,
                        DirectoryKind::PanasonicRawWbInfo,
                        false,
                        2,
                        value_offset,
                        byte_count,
                    );
                    return Ok(true);
                }
                TAG_PANASONIC_WB_INFO_2 => {
                    vendors::panasonic_raw::process_block(
                        self,
                        ctx,
                        DirectoryKind::PanasonicRawWbInfo2,
                        false,
                        3,
                        value_offset,
                        byte_count,
                    );
                    return Ok(true);
                }
                TAG_PANASONIC_DISTORTION_INFO => {
                    vendors::panasonic_raw::process_block(
                        self,
                        ctx,
                        DirectoryKind::PanasonicRawDistortion,
                        true,
                        1,
                        value_offset,
                        byte_count,
                    );
                    return Ok(true);
                }
                TAG_PANASONIC_JPG_FROM_RAW => {
                    let data = ctx.reader.read_bytes(value_offset, byte_count)?;
                    let directories = self.embedded.read_jpeg(&data);
                    return Ok(self.attach_embedded(directories));
                }
                _ => {}
            }
        }

        Ok(false)
    }

    fn custom_format_byte_count(&mut self, _tag: u16, format: u16, count: u64) -> Option<u64> {
        match format {
            // 32-bit undefined-custom used by some makernote pointer tags
            13 => count.checked_mul(4),
            // Preserved for later custom handling
            0 => Some(0),
            _ => None,
        }
    }

    fn ending_ifd(&mut self, _ctx: &mut TiffContext<'_>) {
        let is_geo_candidate = self.current_kind() == Some(DirectoryKind::ExifIfd0)
            && matches!(
                self.stack.current().and_then(|d| d.get(TAG_GEO_TIFF_GEO_KEYS)),
                Some(Value::U16Array(_))
            );
        if is_geo_candidate {
            debug!("unpacking GeoTIFF key directory");
            geotiff::unpack_geo_keys(self);
        }
        self.stack.pop();
    }

    fn set_tag(&mut self, tag: u16, value: Value) {
        if let Some(directory) = self.stack.current_mut() {
            directory.set(tag, value);
        }
    }

    fn push_directory(&mut self, kind: DirectoryKind) {
        self.stack.push(kind);
    }

    fn error(&mut self, error: DirectoryError) {
        if self.stack.is_empty() {
            // Catastrophic failure before any directory existed: the walk
            // still yields a single error-bearing directory
            self.stack.push(DirectoryKind::ExifIfd0);
        }
        self.stack.record_error(error);
    }
}
