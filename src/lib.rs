//! imagemeta - typed EXIF/TIFF metadata extraction.
//!
//! This library walks the TIFF/IFD tag tree embedded in image files and
//! presents it as a list of typed, inspectable directories, including the
//! dozens of vendor makernote dialects with their own offset conventions
//! and byte orders.

pub mod config;
pub mod embedded;
pub mod error;
pub mod exif;
pub mod io;
pub mod meta;
pub mod tiff;

// Re-export commonly used types
pub use embedded::{EmbeddedReaders, NoEmbeddedReaders};
pub use error::{DirectoryError, ErrorKind, IoError, TiffError, VendorError};
pub use exif::{
    geo_location, read_metadata, read_metadata_from_reader, read_metadata_with, ExifTiffHandler,
    GeoLocation,
};
pub use io::{ByteOrder, ByteReader, BytesReader, Charset, RandomReader, SequentialByteReader};
pub use meta::{Directory, DirectoryKind, MetadataList, Rational, SRational, Value, Version};
pub use tiff::{
    process_ifd, process_tiff, DirectoryStack, TagFormat, TiffContext, TiffHandler, TiffStandard,
};
