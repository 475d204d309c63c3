//! Geographic position extraction from the GPS directory.

use crate::meta::{Directory, Rational};

use super::tags::{
    TAG_GPS_LATITUDE, TAG_GPS_LATITUDE_REF, TAG_GPS_LONGITUDE, TAG_GPS_LONGITUDE_REF,
};

/// A latitude/longitude pair in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    /// Whether both components are exactly zero (a common placeholder in
    /// cameras without a fix).
    pub fn is_zero(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

/// Convert the GPS directory's rational triples and hemisphere references
/// to signed decimal degrees.
///
/// Returns `None` when either coordinate is missing, malformed, or uses a
/// zero denominator.
pub fn geo_location(directory: &Directory) -> Option<GeoLocation> {
    let latitude = dms_to_degrees(
        directory.rational_array(TAG_GPS_LATITUDE)?,
        directory.string(TAG_GPS_LATITUDE_REF)?,
    )?;
    let longitude = dms_to_degrees(
        directory.rational_array(TAG_GPS_LONGITUDE)?,
        directory.string(TAG_GPS_LONGITUDE_REF)?,
    )?;
    Some(GeoLocation {
        latitude,
        longitude,
    })
}

fn dms_to_degrees(parts: Vec<Rational>, reference: &str) -> Option<f64> {
    if parts.len() != 3 {
        return None;
    }
    let degrees = parts[0].to_f64()?;
    let minutes = parts[1].to_f64()?;
    let seconds = parts[2].to_f64()?;
    let value = degrees + minutes / 60.0 + seconds / 3600.0;
    if !value.is_finite() {
        return None;
    }
    let negative = matches!(reference.trim(), "S" | "s" | "W" | "w");
    Some(if negative { -value } else { value })
}
