//! The EXIF handler and its vendor decoders.
//!
//! [`read_metadata`] is the top-level entry point: hand it bytes
//! positioned at the TIFF header ("II"/"MM" at offset 0) and get back the
//! full directory list. For embedded EXIF inside a JPEG APP1 segment, the
//! caller slices past the `Exif\0\0` signature first.

mod geotiff;
mod gps;
mod handler;
mod makernote;
pub mod tags;
pub mod vendors;

use bytes::Bytes;

use crate::embedded::{EmbeddedReaders, NoEmbeddedReaders};
use crate::io::{ByteOrder, ByteReader};
use crate::meta::MetadataList;
use crate::tiff::{self, TiffHandler};

pub use gps::{geo_location, GeoLocation};
pub use handler::ExifTiffHandler;
pub use makernote::RECONYX_HYPERFIRE_VERSION;

/// Extract all metadata directories from TIFF bytes.
///
/// Never fails: a catastrophic header problem yields a single
/// error-bearing directory instead.
pub fn read_metadata(data: impl Into<Bytes>) -> MetadataList {
    read_metadata_with(data, &NoEmbeddedReaders)
}

/// Extract metadata, routing embedded IPTC/ICC/XMP/Photoshop/JPEG blocks
/// through the supplied readers.
pub fn read_metadata_with(data: impl Into<Bytes>, embedded: &dyn EmbeddedReaders) -> MetadataList {
    // The byte order here is a placeholder; the walk re-derives it from
    // the byte-order mark
    let reader = ByteReader::from_bytes(data.into(), ByteOrder::LittleEndian);
    read_metadata_from_reader(&reader, embedded)
}

/// Extract metadata from an already-positioned reader view.
pub fn read_metadata_from_reader(
    reader: &ByteReader,
    embedded: &dyn EmbeddedReaders,
) -> MetadataList {
    let mut handler = ExifTiffHandler::new(embedded);
    if let Err(err) = tiff::process_tiff(reader, &mut handler) {
        handler.error(err.into());
    }
    handler.into_directories()
}
