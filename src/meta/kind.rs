//! Directory kinds and their tag-name vocabularies.
//!
//! Each kind identifies one IFD flavour or vendor block. The tag-name
//! tables cover the vocabulary this crate itself reads or writes plus the
//! common EXIF/GPS/Interop tags; unknown tags are displayed numerically by
//! the callers.

/// The flavour of a metadata directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryKind {
    // -------------------------------------------------------------------------
    // Standard TIFF/EXIF directories
    // -------------------------------------------------------------------------
    ExifIfd0,
    ExifSubIfd,
    ExifThumbnail,
    ExifImage,
    Gps,
    Interop,
    PanasonicRawIfd0,
    GeoTiff,
    PrintIm,

    // -------------------------------------------------------------------------
    // Vendor makernote directories (IFD-style)
    // -------------------------------------------------------------------------
    Olympus,
    OlympusEquipment,
    OlympusCameraSettings,
    OlympusRawDevelopment,
    OlympusRawDevelopment2,
    OlympusImageProcessing,
    OlympusFocusInfo,
    OlympusRawInfo,
    OlympusMainInfo,
    NikonType1,
    NikonType2,
    Canon,
    SonyType1,
    SonyType6,
    Sigma,
    CasioType1,
    CasioType2,
    Fujifilm,
    Kyocera,
    Leica,
    LeicaType5,
    Panasonic,
    Pentax,
    PentaxType2,
    Sanyo,
    Ricoh,
    SamsungType2,
    Dji,
    Flir,
    Apple,

    // -------------------------------------------------------------------------
    // Vendor makernote directories (fixed-layout binary)
    // -------------------------------------------------------------------------
    Kodak,
    ReconyxHyperFire,
    ReconyxHyperFire2,
    ReconyxUltraFire,

    // -------------------------------------------------------------------------
    // Panasonic raw binary blocks
    // -------------------------------------------------------------------------
    PanasonicRawWbInfo,
    PanasonicRawWbInfo2,
    PanasonicRawDistortion,

    // -------------------------------------------------------------------------
    // Directories produced by the embedded-format readers
    // -------------------------------------------------------------------------
    Iptc,
    IccProfile,
    Xmp,
    Photoshop,
}

impl DirectoryKind {
    /// Human-readable directory name.
    pub const fn name(self) -> &'static str {
        match self {
            DirectoryKind::ExifIfd0 => "Exif IFD0",
            DirectoryKind::ExifSubIfd => "Exif SubIFD",
            DirectoryKind::ExifThumbnail => "Exif Thumbnail",
            DirectoryKind::ExifImage => "Exif Image",
            DirectoryKind::Gps => "GPS",
            DirectoryKind::Interop => "Interoperability",
            DirectoryKind::PanasonicRawIfd0 => "Panasonic Raw IFD0",
            DirectoryKind::GeoTiff => "GeoTIFF",
            DirectoryKind::PrintIm => "PrintIM",
            DirectoryKind::Olympus => "Olympus Makernote",
            DirectoryKind::OlympusEquipment => "Olympus Equipment",
            DirectoryKind::OlympusCameraSettings => "Olympus Camera Settings",
            DirectoryKind::OlympusRawDevelopment => "Olympus Raw Development",
            DirectoryKind::OlympusRawDevelopment2 => "Olympus Raw Development 2",
            DirectoryKind::OlympusImageProcessing => "Olympus Image Processing",
            DirectoryKind::OlympusFocusInfo => "Olympus Focus Info",
            DirectoryKind::OlympusRawInfo => "Olympus Raw Info",
            DirectoryKind::OlympusMainInfo => "Olympus Main Info",
            DirectoryKind::NikonType1 => "Nikon Makernote",
            DirectoryKind::NikonType2 => "Nikon Makernote",
            DirectoryKind::Canon => "Canon Makernote",
            DirectoryKind::SonyType1 => "Sony Makernote",
            DirectoryKind::SonyType6 => "Sony Makernote",
            DirectoryKind::Sigma => "Sigma Makernote",
            DirectoryKind::CasioType1 => "Casio Makernote",
            DirectoryKind::CasioType2 => "Casio Makernote",
            DirectoryKind::Fujifilm => "Fujifilm Makernote",
            DirectoryKind::Kyocera => "Kyocera/Contax Makernote",
            DirectoryKind::Leica => "Leica Makernote",
            DirectoryKind::LeicaType5 => "Leica Makernote",
            DirectoryKind::Panasonic => "Panasonic Makernote",
            DirectoryKind::Pentax => "Pentax Makernote",
            DirectoryKind::PentaxType2 => "Pentax Makernote",
            DirectoryKind::Sanyo => "Sanyo Makernote",
            DirectoryKind::Ricoh => "Ricoh Makernote",
            DirectoryKind::SamsungType2 => "Samsung Makernote",
            DirectoryKind::Dji => "DJI Makernote",
            DirectoryKind::Flir => "FLIR Makernote",
            DirectoryKind::Apple => "Apple Makernote",
            DirectoryKind::Kodak => "Kodak Makernote",
            DirectoryKind::ReconyxHyperFire => "Reconyx HyperFire Makernote",
            DirectoryKind::ReconyxHyperFire2 => "Reconyx HyperFire 2 Makernote",
            DirectoryKind::ReconyxUltraFire => "Reconyx UltraFire Makernote",
            DirectoryKind::PanasonicRawWbInfo => "Panasonic Raw WB Info",
            DirectoryKind::PanasonicRawWbInfo2 => "Panasonic Raw WB Info 2",
            DirectoryKind::PanasonicRawDistortion => "Panasonic Raw Distortion Info",
            DirectoryKind::Iptc => "IPTC",
            DirectoryKind::IccProfile => "ICC Profile",
            DirectoryKind::Xmp => "XMP",
            DirectoryKind::Photoshop => "Photoshop",
        }
    }

    /// Name for a tag ID within this directory's vocabulary.
    pub fn tag_name(self, tag: u16) -> Option<&'static str> {
        match self {
            DirectoryKind::ExifIfd0
            | DirectoryKind::ExifSubIfd
            | DirectoryKind::ExifThumbnail
            | DirectoryKind::ExifImage => exif_tag_name(tag),
            DirectoryKind::Gps => gps_tag_name(tag),
            DirectoryKind::Interop => interop_tag_name(tag),
            DirectoryKind::PanasonicRawIfd0 => panasonic_raw_ifd0_tag_name(tag),
            DirectoryKind::GeoTiff => geotiff_key_name(tag),
            DirectoryKind::PrintIm => match tag {
                0x0000 => Some("PrintIM Version"),
                _ => None,
            },
            DirectoryKind::Olympus => olympus_tag_name(tag),
            DirectoryKind::NikonType2 => nikon2_tag_name(tag),
            DirectoryKind::Canon => canon_tag_name(tag),
            DirectoryKind::Fujifilm => fujifilm_tag_name(tag),
            DirectoryKind::Panasonic => panasonic_tag_name(tag),
            DirectoryKind::Kodak => kodak_tag_name(tag),
            DirectoryKind::ReconyxHyperFire => reconyx_hyperfire_tag_name(tag),
            DirectoryKind::ReconyxHyperFire2 => reconyx_hyperfire2_tag_name(tag),
            DirectoryKind::ReconyxUltraFire => reconyx_ultrafire_tag_name(tag),
            DirectoryKind::PanasonicRawWbInfo => wb_info_tag_name(tag),
            DirectoryKind::PanasonicRawWbInfo2 => wb_info2_tag_name(tag),
            DirectoryKind::PanasonicRawDistortion => distortion_tag_name(tag),
            _ => None,
        }
    }
}

impl std::fmt::Display for DirectoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Tag-name tables
// =============================================================================

fn exif_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0x0100 => "Image Width",
        0x0101 => "Image Height",
        0x0102 => "Bits Per Sample",
        0x0103 => "Compression",
        0x010E => "Image Description",
        0x010F => "Make",
        0x0110 => "Model",
        0x0111 => "Strip Offsets",
        0x0112 => "Orientation",
        0x011A => "X Resolution",
        0x011B => "Y Resolution",
        0x0128 => "Resolution Unit",
        0x0131 => "Software",
        0x0132 => "Date/Time",
        0x013B => "Artist",
        0x014A => "Sub IFDs",
        0x0201 => "Thumbnail Offset",
        0x0202 => "Thumbnail Length",
        0x02BC => "Application Notes",
        0x8298 => "Copyright",
        0x829A => "Exposure Time",
        0x829D => "F-Number",
        0x83BB => "IPTC/NAA",
        0x8649 => "Photoshop Settings",
        0x8769 => "Exif Offset",
        0x8773 => "ICC Profile",
        0x8825 => "GPS Info Offset",
        0x8827 => "ISO Speed",
        0x87AF => "GeoTIFF Geo Keys",
        0x87B0 => "GeoTIFF Geo Double Params",
        0x87B1 => "GeoTIFF Geo Ascii Params",
        0x9000 => "Exif Version",
        0x9003 => "Date/Time Original",
        0x9004 => "Date/Time Digitized",
        0x9101 => "Components Configuration",
        0x9201 => "Shutter Speed",
        0x9202 => "Aperture",
        0x9209 => "Flash",
        0x920A => "Focal Length",
        0x927C => "Makernote",
        0x9286 => "User Comment",
        0xA000 => "FlashPix Version",
        0xA001 => "Color Space",
        0xA002 => "Exif Image Width",
        0xA003 => "Exif Image Height",
        0xA005 => "Interoperability Offset",
        0xC4A5 => "Print Image Matching Info",
        _ => return None,
    })
}

fn gps_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0x0000 => "GPS Version ID",
        0x0001 => "GPS Latitude Ref",
        0x0002 => "GPS Latitude",
        0x0003 => "GPS Longitude Ref",
        0x0004 => "GPS Longitude",
        0x0005 => "GPS Altitude Ref",
        0x0006 => "GPS Altitude",
        0x0007 => "GPS Time-Stamp",
        0x0008 => "GPS Satellites",
        0x0009 => "GPS Status",
        0x000A => "GPS Measure Mode",
        0x000B => "GPS DOP",
        0x000C => "GPS Speed Ref",
        0x000D => "GPS Speed",
        0x001D => "GPS Date Stamp",
        _ => return None,
    })
}

fn interop_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0x0001 => "Interoperability Index",
        0x0002 => "Interoperability Version",
        _ => return None,
    })
}

fn panasonic_raw_ifd0_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0x0001 => "Panasonic Raw Version",
        0x0002 => "Sensor Width",
        0x0003 => "Sensor Height",
        0x0011 => "WB Info",
        0x0027 => "WB Info 2",
        0x0119 => "Distortion Info",
        0x002E => "Jpg From Raw",
        _ => return None,
    })
}

fn geotiff_key_name(key: u16) -> Option<&'static str> {
    Some(match key {
        1024 => "Model Type",
        1025 => "Raster Type",
        1026 => "Citation",
        2048 => "Geographic Type",
        2049 => "Geographic Citation",
        2050 => "Geodetic Datum",
        2054 => "Angular Units",
        3072 => "Projected Coordinate System Type",
        3073 => "Projected Coordinate System Citation",
        3076 => "Projection Linear Units",
        _ => return None,
    })
}

fn olympus_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0x0200 => "Special Mode",
        0x0201 => "Jpeg Quality",
        0x0202 => "Macro",
        0x0204 => "Digital Zoom",
        0x0207 => "Firmware Version",
        0x0E00 => "Print Image Matching Info",
        0x2010 => "Equipment",
        0x2020 => "Camera Settings",
        0x2030 => "Raw Development",
        0x2031 => "Raw Development 2",
        0x2040 => "Image Processing",
        0x2050 => "Focus Info",
        0x3000 => "Raw Info",
        0x4000 => "Main Info",
        _ => return None,
    })
}

fn nikon2_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0x0001 => "Firmware Version",
        0x0002 => "ISO",
        0x0004 => "Quality",
        0x0005 => "White Balance",
        0x0006 => "Sharpening",
        0x0E00 => "Print Image Matching Info",
        _ => return None,
    })
}

fn canon_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0x0001 => "Camera Settings",
        0x0004 => "Shot Info",
        0x0006 => "Image Type",
        0x0007 => "Firmware Version",
        0x0008 => "File Number",
        0x0009 => "Owner Name",
        0x000C => "Serial Number",
        _ => return None,
    })
}

fn fujifilm_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0x0000 => "Makernote Version",
        0x0010 => "Serial Number",
        0x1000 => "Quality",
        0x1001 => "Sharpness",
        0x1002 => "White Balance",
        _ => return None,
    })
}

fn panasonic_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0x0001 => "Image Quality",
        0x0002 => "Firmware Version",
        0x0003 => "White Balance",
        0x0051 => "Lens Type",
        0x0E00 => "Print Image Matching Info",
        _ => return None,
    })
}

fn kodak_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0 => "Kodak Model",
        9 => "Quality",
        10 => "Burst Mode",
        12 => "Image Width",
        14 => "Image Height",
        16 => "Year Created",
        18 => "Month/Day Created",
        20 => "Time Created",
        24 => "Burst Mode 2",
        27 => "Shutter Mode",
        28 => "Metering Mode",
        29 => "Sequence Number",
        30 => "F-Number",
        32 => "Exposure Time",
        36 => "Exposure Compensation",
        56 => "Focus Mode",
        64 => "White Balance",
        92 => "Flash Mode",
        93 => "Flash Fired",
        94 => "ISO Setting",
        96 => "ISO",
        98 => "Total Zoom",
        100 => "Date/Time Stamp",
        102 => "Color Mode",
        104 => "Digital Zoom",
        107 => "Sharpness",
        _ => return None,
    })
}

fn reconyx_hyperfire_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0 => "Makernote Version",
        2 => "Firmware Version",
        12 => "Trigger Mode",
        14 => "Sequence",
        18 => "Event Number",
        22 => "Date/Time Original",
        36 => "Moon Phase",
        38 => "Ambient Temperature Fahrenheit",
        40 => "Ambient Temperature",
        42 => "Serial Number",
        72 => "Contrast",
        74 => "Brightness",
        76 => "Sharpness",
        78 => "Saturation",
        80 => "Infrared Illuminator",
        82 => "Motion Sensitivity",
        84 => "Battery Voltage",
        86 => "User Label",
        _ => return None,
    })
}

fn reconyx_hyperfire2_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0 => "Makernote Label",
        10 => "Firmware Version",
        20 => "Trigger Mode",
        22 => "Sequence",
        26 => "Event Number",
        30 => "Date/Time Original",
        42 => "Moon Phase",
        44 => "Ambient Temperature Fahrenheit",
        46 => "Ambient Temperature",
        48 => "Contrast",
        50 => "Brightness",
        52 => "Sharpness",
        54 => "Saturation",
        56 => "Flash",
        58 => "Motion Sensitivity",
        60 => "Battery Voltage",
        62 => "User Label",
        _ => return None,
    })
}

fn reconyx_ultrafire_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0 => "Makernote Label",
        17 => "Event Type",
        18 => "Sequence",
        22 => "Event Number",
        26 => "Date/Time Original",
        33 => "Day of Week",
        34 => "Moon Phase",
        35 => "Ambient Temperature Fahrenheit",
        37 => "Ambient Temperature",
        39 => "Flash",
        40 => "Battery Voltage",
        42 => "Serial Number",
        72 => "User Label",
        _ => return None,
    })
}

fn wb_info_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0 => "Num WB Entries",
        1 => "WB Type 1",
        2 => "WB RB Levels 1",
        4 => "WB Type 2",
        5 => "WB RB Levels 2",
        7 => "WB Type 3",
        8 => "WB RB Levels 3",
        10 => "WB Type 4",
        11 => "WB RB Levels 4",
        13 => "WB Type 5",
        14 => "WB RB Levels 5",
        16 => "WB Type 6",
        17 => "WB RB Levels 6",
        19 => "WB Type 7",
        20 => "WB RB Levels 7",
        _ => return None,
    })
}

fn wb_info2_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0 => "Num WB Entries",
        1 => "WB Type 1",
        2 => "WB RGB Levels 1",
        5 => "WB Type 2",
        6 => "WB RGB Levels 2",
        9 => "WB Type 3",
        10 => "WB RGB Levels 3",
        13 => "WB Type 4",
        14 => "WB RGB Levels 4",
        17 => "WB Type 5",
        18 => "WB RGB Levels 5",
        21 => "WB Type 6",
        22 => "WB RGB Levels 6",
        25 => "WB Type 7",
        26 => "WB RGB Levels 7",
        _ => return None,
    })
}

fn distortion_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        2 => "Distortion Param 2",
        4 => "Distortion Param 4",
        5 => "Distortion Scale",
        7 => "Distortion Correction",
        8 => "Distortion Param 8",
        9 => "Distortion Param 9",
        11 => "Distortion Param 11",
        12 => "Distortion N",
        _ => return None,
    })
}
