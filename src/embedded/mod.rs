//! Seam for the non-TIFF metadata readers.
//!
//! IPTC, ICC, XMP, Photoshop IRB, and embedded-JPEG extraction live
//! outside this crate; the EXIF handler invokes them through this trait
//! and attaches whatever directories they return under the current
//! directory. The default implementation consumes nothing, leaving the
//! raw bytes in place as ordinary tags.

use crate::meta::Directory;

/// Readers for metadata blocks embedded inside TIFF tags.
///
/// Each method receives the raw payload and returns zero or more
/// directories. Implementations must not panic on malformed input; return
/// an empty list instead.
pub trait EmbeddedReaders {
    /// Parse an IPTC block (tag 0x83BB, payload starting with 0x1C).
    fn read_iptc(&self, data: &[u8]) -> Vec<Directory> {
        let _ = data;
        Vec::new()
    }

    /// Parse an ICC colour profile (tag 0x8773).
    fn read_icc(&self, data: &[u8]) -> Vec<Directory> {
        let _ = data;
        Vec::new()
    }

    /// Parse an XMP packet (tag 0x02BC).
    fn read_xmp(&self, data: &[u8]) -> Vec<Directory> {
        let _ = data;
        Vec::new()
    }

    /// Parse a Photoshop IRB block (tag 0x8649).
    fn read_photoshop(&self, data: &[u8]) -> Vec<Directory> {
        let _ = data;
        Vec::new()
    }

    /// Extract metadata from an embedded JPEG (Panasonic raw JpgFromRaw).
    fn read_jpeg(&self, data: &[u8]) -> Vec<Directory> {
        let _ = data;
        Vec::new()
    }
}

/// The no-op reader set: every block stays in its directory as raw bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEmbeddedReaders;

impl EmbeddedReaders for NoEmbeddedReaders {}
