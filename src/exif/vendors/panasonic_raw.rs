//! Panasonic raw binary blocks (WbInfo, WbInfo2, DistortionInfo).
//!
//! Each block is a run of 16-bit items at a 2-byte stride. The
//! directory's tag-name table doubles as the layout: a named index whose
//! successor is also named holds a single value; a named index followed
//! by an unnamed gap holds an array of the block's configured length.

use crate::error::DirectoryError;
use crate::io::ByteReader;
use crate::meta::{DirectoryKind, Value};
use crate::tiff::{TiffContext, TiffHandler};

use super::super::handler::ExifTiffHandler;

const ITEM_STRIDE: u64 = 2;

pub(crate) fn process_block(
    handler: &mut ExifTiffHandler<'_>,
    ctx: &mut TiffContext<'_>,
    kind: DirectoryKind,
    signed: bool,
    array_len: usize,
    value_offset: u64,
    byte_count: usize,
) {
    handler.push_directory(kind);
    if let Err(err) = decode(
        handler,
        &ctx.reader.clone(),
        kind,
        signed,
        array_len,
        value_offset,
        byte_count,
    ) {
        handler.error(err);
    }
    handler.stack.pop();
}

fn decode(
    handler: &mut ExifTiffHandler<'_>,
    reader: &ByteReader,
    kind: DirectoryKind,
    signed: bool,
    array_len: usize,
    value_offset: u64,
    byte_count: usize,
) -> Result<(), DirectoryError> {
    let mut i: usize = 0;
    while i < byte_count {
        let tag = i as u16;
        if kind.tag_name(tag).is_some() {
            let item_offset = value_offset + i as u64 * ITEM_STRIDE;
            if kind.tag_name(tag + 1).is_some() {
                handler.set_tag(tag, read_item(reader, item_offset, signed)?);
            } else {
                let mut values = Vec::with_capacity(array_len);
                for n in 0..array_len {
                    values.push(read_raw(reader, item_offset + n as u64 * ITEM_STRIDE)?);
                }
                handler.set_tag(tag, collect_items(values, signed));
                i += array_len.saturating_sub(1);
            }
        }
        i += 1;
    }
    Ok(())
}

fn read_raw(reader: &ByteReader, offset: u64) -> Result<u16, DirectoryError> {
    Ok(reader.read_u16(offset)?)
}

fn read_item(reader: &ByteReader, offset: u64, signed: bool) -> Result<Value, DirectoryError> {
    Ok(if signed {
        Value::I16(reader.read_i16(offset)?)
    } else {
        Value::U16(reader.read_u16(offset)?)
    })
}

fn collect_items(raw: Vec<u16>, signed: bool) -> Value {
    if signed {
        let values: Vec<i16> = raw.into_iter().map(|v| v as i16).collect();
        if values.len() == 1 {
            Value::I16(values[0])
        } else {
            Value::I16Array(values)
        }
    } else if raw.len() == 1 {
        Value::U16(raw[0])
    } else {
        Value::U16Array(raw)
    }
}
