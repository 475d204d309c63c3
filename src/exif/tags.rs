//! Tag ID constants used by the EXIF handler.
//!
//! Only the tags the handler dispatches on live here; display vocabularies
//! are in [`crate::meta::DirectoryKind`].

// =============================================================================
// TIFF/EXIF pointer and payload tags
// =============================================================================

/// SubIFDs pointer, valid in any directory
pub const TAG_SUB_IFD_OFFSET: u16 = 0x014A;

/// Exif SubIFD pointer in IFD0
pub const TAG_EXIF_SUB_IFD_OFFSET: u16 = 0x8769;

/// GPS IFD pointer in IFD0
pub const TAG_GPS_INFO_OFFSET: u16 = 0x8825;

/// Interoperability IFD pointer in the Exif SubIFD
pub const TAG_INTEROP_OFFSET: u16 = 0xA005;

/// Camera make in IFD0
pub const TAG_MAKE: u16 = 0x010F;

/// Makernote payload in the Exif SubIFD
pub const TAG_MAKERNOTE: u16 = 0x927C;

/// IPTC/NAA block in IFD0
pub const TAG_IPTC_NAA: u16 = 0x83BB;

/// ICC colour profile
pub const TAG_INTER_COLOR_PROFILE: u16 = 0x8773;

/// Photoshop IRB block in IFD0
pub const TAG_PHOTOSHOP_SETTINGS: u16 = 0x8649;

/// XMP packet in IFD0 or the Exif SubIFD
pub const TAG_APPLICATION_NOTES: u16 = 0x02BC;

/// PrintIM block
pub const TAG_PRINT_IMAGE_MATCHING_INFO: u16 = 0xC4A5;

/// Vendor-directory alias for the PrintIM block
pub const TAG_VENDOR_PRINT_IM: u16 = 0x0E00;

// =============================================================================
// GeoTIFF
// =============================================================================

/// GeoKeyDirectory in IFD0 (34735)
pub const TAG_GEO_TIFF_GEO_KEYS: u16 = 0x87AF;

/// GeoDoubleParams (34736)
pub const TAG_GEO_TIFF_GEO_DOUBLE_PARAMS: u16 = 0x87B0;

/// GeoAsciiParams (34737)
pub const TAG_GEO_TIFF_GEO_ASCII_PARAMS: u16 = 0x87B1;

// =============================================================================
// GPS
// =============================================================================

pub const TAG_GPS_LATITUDE_REF: u16 = 0x0001;
pub const TAG_GPS_LATITUDE: u16 = 0x0002;
pub const TAG_GPS_LONGITUDE_REF: u16 = 0x0003;
pub const TAG_GPS_LONGITUDE: u16 = 0x0004;

// =============================================================================
// Olympus makernote sub-directories
// =============================================================================

pub const TAG_OLYMPUS_EQUIPMENT: u16 = 0x2010;
pub const TAG_OLYMPUS_CAMERA_SETTINGS: u16 = 0x2020;
pub const TAG_OLYMPUS_RAW_DEVELOPMENT: u16 = 0x2030;
pub const TAG_OLYMPUS_RAW_DEVELOPMENT_2: u16 = 0x2031;
pub const TAG_OLYMPUS_IMAGE_PROCESSING: u16 = 0x2040;
pub const TAG_OLYMPUS_FOCUS_INFO: u16 = 0x2050;
pub const TAG_OLYMPUS_RAW_INFO: u16 = 0x3000;
pub const TAG_OLYMPUS_MAIN_INFO: u16 = 0x4000;

// =============================================================================
// Panasonic raw IFD0
// =============================================================================

pub const TAG_PANASONIC_WB_INFO: u16 = 0x0011;
pub const TAG_PANASONIC_WB_INFO_2: u16 = 0x0027;
pub const TAG_PANASONIC_DISTORTION_INFO: u16 = 0x0119;
pub const TAG_PANASONIC_JPG_FROM_RAW: u16 = 0x002E;
