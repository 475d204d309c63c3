//! GeoTIFF GeoKeyDirectory unpacking.
//!
//! The GeoKeyDirectory tag in IFD0 is a dense u16 array: a 4-unit header
//! (version, revision, minor, key count) followed by 4-unit entries
//! (key id, tiff tag location, value count, value offset). Entries either
//! carry their value inline (location 0) or reference a slice of another
//! IFD0 tag. Consumed source tags are removed from IFD0 and the keys
//! surface as a GeoTIFF directory.

use crate::error::VendorError;
use crate::meta::{Directory, DirectoryKind, Value};

use super::handler::ExifTiffHandler;
use super::tags::TAG_GEO_TIFF_GEO_KEYS;

/// Unpack the GeoKeyDirectory of the current (IFD0) directory.
///
/// Caller has verified the tag is present as a u16 array.
pub(crate) fn unpack_geo_keys(handler: &mut ExifTiffHandler<'_>) {
    let keys = match handler
        .stack
        .current()
        .and_then(|d| d.get(TAG_GEO_TIFF_GEO_KEYS))
    {
        Some(Value::U16Array(keys)) => keys.clone(),
        _ => return,
    };

    let mut geo = Directory::new(DirectoryKind::GeoTiff);
    let mut consumed: Vec<u16> = Vec::new();

    if keys.len() < 4 {
        geo.add_error(VendorError::BadSize(format!(
            "GeoKeyDirectory holds {} units, header needs 4",
            keys.len()
        )));
    } else {
        // Header: directory version, revision, minor revision, key count
        let key_count = keys[3] as usize;
        for n in 0..key_count {
            let base = 4 + n * 4;
            if base + 4 > keys.len() {
                geo.add_error(VendorError::BadSize(format!(
                    "GeoKeyDirectory declares {key_count} keys but holds {}",
                    keys.len()
                )));
                break;
            }
            let key_id = keys[base];
            let location = keys[base + 1];
            let count = keys[base + 2] as usize;
            let value_offset = keys[base + 3] as usize;

            if location == 0 {
                // The offset field is the value itself
                geo.set(key_id, Value::U16(keys[base + 3]));
                continue;
            }

            let source = handler.stack.current().and_then(|d| d.get(location)).cloned();
            match source {
                Some(Value::Text(text)) => {
                    // Strings use an inclusive extent check
                    if value_offset + count <= text.len() {
                        let slice = &text[value_offset..value_offset + count];
                        let trimmed = slice.strip_suffix('|').unwrap_or(slice);
                        geo.set(key_id, Value::Text(trimmed.to_string()));
                        consumed.push(location);
                    } else {
                        geo.add_error(VendorError::BadSize(format!(
                            "geo key {key_id} slice [{value_offset}, {}) exceeds source string of {}",
                            value_offset + count,
                            text.len()
                        )));
                    }
                }
                Some(other) => match slice_array(&other, value_offset, count) {
                    Some(value) => {
                        geo.set(key_id, value);
                        consumed.push(location);
                    }
                    None => {
                        geo.add_error(VendorError::BadSize(format!(
                            "geo key {key_id} slice [{value_offset}, {}) exceeds source tag {location}",
                            value_offset + count
                        )));
                    }
                },
                None => {
                    geo.add_error(VendorError::BadSize(format!(
                        "geo key {key_id} references missing tag {location}"
                    )));
                }
            }
        }
    }

    if let Some(directory) = handler.stack.current_mut() {
        for tag in consumed {
            directory.remove(tag);
        }
        directory.remove(TAG_GEO_TIFF_GEO_KEYS);
    }
    handler.stack.attach(geo);
}

/// Slice an array-typed source tag.
///
/// Arrays use a strict extent check (`offset + count < len`), unlike
/// strings; scalars behave as one-element arrays. Single-element slices
/// collapse to scalars.
fn slice_array(value: &Value, offset: usize, count: usize) -> Option<Value> {
    fn take<T: Copy>(values: &[T], offset: usize, count: usize) -> Option<Vec<T>> {
        (count > 0 && offset + count < values.len()).then(|| values[offset..offset + count].to_vec())
    }

    Some(match value {
        Value::F64Array(values) => {
            let slice = take(values, offset, count)?;
            if slice.len() == 1 {
                Value::F64(slice[0])
            } else {
                Value::F64Array(slice)
            }
        }
        Value::F64(v) => {
            let slice = take(&[*v], offset, count)?;
            Value::F64(slice[0])
        }
        Value::U16Array(values) => {
            let slice = take(values, offset, count)?;
            if slice.len() == 1 {
                Value::U16(slice[0])
            } else {
                Value::U16Array(slice)
            }
        }
        Value::U16(v) => {
            let slice = take(&[*v], offset, count)?;
            Value::U16(slice[0])
        }
        Value::U32Array(values) => {
            let slice = take(values, offset, count)?;
            if slice.len() == 1 {
                Value::U32(slice[0])
            } else {
                Value::U32Array(slice)
            }
        }
        _ => return None,
    })
}
