use thiserror::Error;

/// I/O errors raised by the byte readers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IoError {
    /// Read extends past the end of the underlying data
    #[error("read past end: requested {requested} bytes at offset {offset}, size is {size}")]
    Truncated {
        offset: u64,
        requested: u64,
        size: u64,
    },

    /// Offset is not addressable at all (e.g. a base shift pushed it out of range)
    #[error("invalid offset: {0}")]
    InvalidOffset(u64),
}

/// Errors raised while walking TIFF structures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TiffError {
    /// The 16-bit marker after the byte-order mark is not a known TIFF marker
    #[error("unrecognised TIFF marker 0x{0:04X}")]
    BadMarker(u16),

    /// The first two bytes are neither "II" nor "MM"
    #[error("unrecognised byte order mark 0x{0:04X}")]
    BadByteOrder(u16),

    /// An IFD pointer chain revisits an offset already walked
    #[error("IFD chain revisits offset {0}")]
    Cycle(u64),

    /// IFD entry carries a format code outside the standard table
    #[error("unknown entry format {format} for tag 0x{tag:04X}")]
    UnknownFormat { tag: u16, format: u16 },

    /// Entry count exceeds the sanity cap
    #[error("IFD entry count {0} exceeds limit")]
    TooManyEntries(u64),

    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors raised by vendor makernote decoders.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VendorError {
    /// Vendor block signature or ID constants do not match
    #[error("bad vendor header: {0}")]
    BadHeader(String),

    /// Declared block size is inconsistent with its content
    #[error("vendor block size is inconsistent: {0}")]
    BadSize(String),

    /// Date/time fields are out of range
    #[error("vendor date/time fields are out of range")]
    BadDateTime,

    /// Recognised vendor, unsupported layout
    #[error("unsupported vendor layout")]
    Unsupported,
}

// =============================================================================
// Recorded directory errors
// =============================================================================

/// Classification of an error recorded on a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    IoTruncated,
    IoInvalidOffset,
    TiffBadMarker,
    TiffBadByteOrder,
    TiffCycle,
    TiffUnknownFormat,
    VendorBadHeader,
    VendorBadSize,
    VendorBadDateTime,
    VendorUnsupported,
}

impl ErrorKind {
    /// Stable name used in logs and the CLI dump.
    pub const fn name(self) -> &'static str {
        match self {
            ErrorKind::IoTruncated => "io-truncated",
            ErrorKind::IoInvalidOffset => "io-invalid-offset",
            ErrorKind::TiffBadMarker => "tiff-bad-marker",
            ErrorKind::TiffBadByteOrder => "tiff-bad-byte-order",
            ErrorKind::TiffCycle => "tiff-cycle",
            ErrorKind::TiffUnknownFormat => "tiff-unknown-format",
            ErrorKind::VendorBadHeader => "vendor-bad-header",
            ErrorKind::VendorBadSize => "vendor-bad-size",
            ErrorKind::VendorBadDateTime => "vendor-bad-datetime",
            ErrorKind::VendorUnsupported => "vendor-unsupported",
        }
    }
}

/// An error recorded on a directory.
///
/// Errors never abort the walk; they accumulate on the directory in which
/// they were detected and survive into the output list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryError {
    pub kind: ErrorKind,
    pub message: String,
}

impl DirectoryError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.name(), self.message)
    }
}

impl From<IoError> for DirectoryError {
    fn from(err: IoError) -> Self {
        let kind = match err {
            IoError::Truncated { .. } => ErrorKind::IoTruncated,
            IoError::InvalidOffset(_) => ErrorKind::IoInvalidOffset,
        };
        DirectoryError::new(kind, err.to_string())
    }
}

impl From<TiffError> for DirectoryError {
    fn from(err: TiffError) -> Self {
        let kind = match &err {
            TiffError::BadMarker(_) => ErrorKind::TiffBadMarker,
            TiffError::BadByteOrder(_) => ErrorKind::TiffBadByteOrder,
            TiffError::Cycle(_) => ErrorKind::TiffCycle,
            TiffError::UnknownFormat { .. } => ErrorKind::TiffUnknownFormat,
            TiffError::TooManyEntries(_) => ErrorKind::TiffUnknownFormat,
            TiffError::Io(inner) => return DirectoryError::from(inner.clone()),
        };
        DirectoryError::new(kind, err.to_string())
    }
}

impl From<VendorError> for DirectoryError {
    fn from(err: VendorError) -> Self {
        let kind = match err {
            VendorError::BadHeader(_) => ErrorKind::VendorBadHeader,
            VendorError::BadSize(_) => ErrorKind::VendorBadSize,
            VendorError::BadDateTime => ErrorKind::VendorBadDateTime,
            VendorError::Unsupported => ErrorKind::VendorUnsupported,
        };
        DirectoryError::new(kind, err.to_string())
    }
}
