//! Tag value types.
//!
//! Every value a directory can hold comes from this closed set. Rationals
//! keep numerator and denominator verbatim; they are never normalised.

use bytes::Bytes;
use chrono::NaiveDateTime;

/// An unsigned rational as stored on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub num: u32,
    pub den: u32,
}

impl Rational {
    pub const fn new(num: u32, den: u32) -> Self {
        Self { num, den }
    }

    /// The quotient, or `None` when the denominator is zero.
    pub fn to_f64(self) -> Option<f64> {
        (self.den != 0).then(|| f64::from(self.num) / f64::from(self.den))
    }
}

impl std::fmt::Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// A signed rational as stored on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SRational {
    pub num: i32,
    pub den: i32,
}

impl SRational {
    pub const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    pub fn to_f64(self) -> Option<f64> {
        (self.den != 0).then(|| f64::from(self.num) / f64::from(self.den))
    }
}

impl std::fmt::Display for SRational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// A firmware or format version, three or four components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version(pub Vec<u32>);

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for component in &self.0 {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{component}")?;
            first = false;
        }
        Ok(())
    }
}

/// A tag value.
///
/// Single-element arrays are collapsed to their scalar form at store time,
/// so consumers only see arrays when there genuinely is more than one
/// component.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
    Rational(Rational),
    SRational(SRational),
    /// Opaque byte payload (UNDEFINED entries, unrecognised makernotes)
    Bytes(Bytes),
    /// Decoded text, trailing NULs removed
    Text(String),
    U8Array(Vec<u8>),
    I8Array(Vec<i8>),
    U16Array(Vec<u16>),
    I16Array(Vec<i16>),
    U32Array(Vec<u32>),
    I32Array(Vec<i32>),
    U64Array(Vec<u64>),
    I64Array(Vec<i64>),
    F32Array(Vec<f32>),
    F64Array(Vec<f64>),
    RationalArray(Vec<Rational>),
    SRationalArray(Vec<SRational>),
    DateTime(NaiveDateTime),
    Version(Version),
}

impl Value {
    /// Widen any integer form to u32. Arrays and non-integers yield `None`.
    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            Value::U8(v) => Some(u32::from(v)),
            Value::U16(v) => Some(u32::from(v)),
            Value::U32(v) => Some(v),
            Value::U64(v) => u32::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<u16> {
        self.as_u32().and_then(|v| u16::try_from(v).ok())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_rational(&self) -> Option<Rational> {
        match *self {
            Value::Rational(r) => Some(r),
            _ => None,
        }
    }

    /// A u16 slice view covering both the scalar and array forms.
    pub fn as_u16_array(&self) -> Option<Vec<u16>> {
        match self {
            Value::U16(v) => Some(vec![*v]),
            Value::U16Array(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// Rational slice view covering both the scalar and array forms.
    pub fn as_rational_array(&self) -> Option<Vec<Rational>> {
        match self {
            Value::Rational(r) => Some(vec![*r]),
            Value::RationalArray(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// Number of components in the value.
    pub fn component_count(&self) -> usize {
        match self {
            Value::Bytes(b) => b.len(),
            Value::Text(s) => s.len(),
            Value::U8Array(v) => v.len(),
            Value::I8Array(v) => v.len(),
            Value::U16Array(v) => v.len(),
            Value::I16Array(v) => v.len(),
            Value::U32Array(v) => v.len(),
            Value::I32Array(v) => v.len(),
            Value::U64Array(v) => v.len(),
            Value::I64Array(v) => v.len(),
            Value::F32Array(v) => v.len(),
            Value::F64Array(v) => v.len(),
            Value::RationalArray(v) => v.len(),
            Value::SRationalArray(v) => v.len(),
            Value::Version(v) => v.0.len(),
            _ => 1,
        }
    }
}

fn write_array<T: std::fmt::Display>(
    f: &mut std::fmt::Formatter<'_>,
    values: &[T],
) -> std::fmt::Result {
    write!(f, "[")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{v}")?;
    }
    write!(f, "]")
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::U8(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Rational(r) => write!(f, "{r}"),
            Value::SRational(r) => write!(f, "{r}"),
            Value::Bytes(b) => write!(f, "{} bytes", b.len()),
            Value::Text(s) => write!(f, "{s}"),
            Value::U8Array(v) => write_array(f, v),
            Value::I8Array(v) => write_array(f, v),
            Value::U16Array(v) => write_array(f, v),
            Value::I16Array(v) => write_array(f, v),
            Value::U32Array(v) => write_array(f, v),
            Value::I32Array(v) => write_array(f, v),
            Value::U64Array(v) => write_array(f, v),
            Value::I64Array(v) => write_array(f, v),
            Value::F32Array(v) => write_array(f, v),
            Value::F64Array(v) => write_array(f, v),
            Value::RationalArray(v) => write_array(f, v),
            Value::SRationalArray(v) => write_array(f, v),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::Version(v) => write!(f, "{v}"),
        }
    }
}
