//! Primitive value kinds and their little-endian byte encoding

mod kind;
mod literal;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use kind::ValueKind;

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width primitive that can be decoded from and encoded into the buffer.
///
/// Implemented for `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64`, `i64`, `f32`
/// and `f64`. The byte order is always little-endian.
pub trait Primitive: Copy + PartialEq + fmt::Debug + sealed::Sealed {
    const KIND: ValueKind;
    const WIDTH: usize;

    /// Decode from the first `WIDTH` bytes of `bytes`.
    fn decode_le(bytes: &[u8]) -> Self;

    /// Encode into the first `WIDTH` bytes of `out`.
    fn encode_le(self, out: &mut [u8]);
}

macro_rules! primitive {
    { $($ty:ty => $variant:ident),* $(,)? } => {
        $(
            impl sealed::Sealed for $ty {}

            impl Primitive for $ty {
                const KIND: ValueKind = ValueKind::$variant;
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn decode_le(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..Self::WIDTH]);
                    <$ty>::from_le_bytes(raw)
                }

                #[inline]
                fn encode_le(self, out: &mut [u8]) {
                    out[..Self::WIDTH].copy_from_slice(&self.to_le_bytes());
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    }
}

primitive! {
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    u64 => U64,
    i64 => I64,
    f32 => F32,
    f64 => F64,
}

/// A primitive value tagged with its kind.
///
/// Equality follows the numeric semantics of the kind: integers compare
/// exactly and floats use IEEE comparison, so a NaN never equals anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
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
}

impl Value {
    /// Parse a literal as the given kind.
    ///
    /// Integers accept an optional sign and a `0x` prefix for hexadecimal.
    /// Values outside the range of the kind are rejected rather than wrapped.
    pub fn parse(kind: ValueKind, input: &str) -> Result<Self> {
        literal::parse(kind, input)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::U8(_) => ValueKind::U8,
            Value::I8(_) => ValueKind::I8,
            Value::U16(_) => ValueKind::U16,
            Value::I16(_) => ValueKind::I16,
            Value::U32(_) => ValueKind::U32,
            Value::I32(_) => ValueKind::I32,
            Value::U64(_) => ValueKind::U64,
            Value::I64(_) => ValueKind::I64,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
        }
    }

    pub fn width(&self) -> usize {
        self.kind().width()
    }

    /// Little-endian encoding of the value
    pub fn to_le_bytes(&self) -> Vec<u8> {
        match *self {
            Value::U8(v) => v.to_le_bytes().to_vec(),
            Value::I8(v) => v.to_le_bytes().to_vec(),
            Value::U16(v) => v.to_le_bytes().to_vec(),
            Value::I16(v) => v.to_le_bytes().to_vec(),
            Value::U32(v) => v.to_le_bytes().to_vec(),
            Value::I32(v) => v.to_le_bytes().to_vec(),
            Value::U64(v) => v.to_le_bytes().to_vec(),
            Value::I64(v) => v.to_le_bytes().to_vec(),
            Value::F32(v) => v.to_le_bytes().to_vec(),
            Value::F64(v) => v.to_le_bytes().to_vec(),
        }
    }

    /// Decode `kind.width()` bytes from the front of `bytes`.
    ///
    /// Callers check the length; a short slice is an internal bug.
    pub(crate) fn decode(kind: ValueKind, bytes: &[u8]) -> Self {
        match kind {
            ValueKind::U8 => u8::decode_le(bytes).into(),
            ValueKind::I8 => i8::decode_le(bytes).into(),
            ValueKind::U16 => u16::decode_le(bytes).into(),
            ValueKind::I16 => i16::decode_le(bytes).into(),
            ValueKind::U32 => u32::decode_le(bytes).into(),
            ValueKind::I32 => i32::decode_le(bytes).into(),
            ValueKind::U64 => u64::decode_le(bytes).into(),
            ValueKind::I64 => i64::decode_le(bytes).into(),
            ValueKind::F32 => f32::decode_le(bytes).into(),
            ValueKind::F64 => f64::decode_le(bytes).into(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::U8(v) => write!(f, "{}", v),
            Value::I8(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_widths() {
        assert_eq!(u8::WIDTH, 1);
        assert_eq!(i16::WIDTH, 2);
        assert_eq!(f32::WIDTH, 4);
        assert_eq!(u64::WIDTH, 8);
        assert_eq!(<f64 as Primitive>::KIND, ValueKind::F64);
    }

    #[test]
    fn test_encode_little_endian() {
        let mut out = [0u8; 4];
        0x01020304u32.encode_le(&mut out);
        assert_eq!(out, [0x04, 0x03, 0x02, 0x01]);
        assert_eq!(u32::decode_le(&out), 0x01020304);
    }

    #[test]
    fn test_value_to_le_bytes() {
        assert_eq!(Value::I16(-2).to_le_bytes(), vec![0xFE, 0xFF]);
        assert_eq!(Value::U64(u64::MAX).to_le_bytes(), vec![0xFF; 8]);
        assert_eq!(Value::F32(1.0).to_le_bytes(), vec![0x00, 0x00, 0x80, 0x3F]);
    }

    #[test]
    fn test_value_decode_matches_kind() {
        let bytes = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        assert_eq!(Value::decode(ValueKind::I64, &bytes), Value::I64(-1));
        assert_eq!(Value::decode(ValueKind::U64, &bytes), Value::U64(u64::MAX));
        assert_eq!(Value::decode(ValueKind::I8, &bytes), Value::I8(-1));
    }

    #[test]
    fn test_nan_is_not_equal() {
        assert_ne!(Value::F64(f64::NAN), Value::F64(f64::NAN));
        assert_eq!(Value::F32(0.0), Value::F32(-0.0));
    }

    #[test]
    fn test_value_serde() {
        let json = serde_json::to_string(&Value::U16(7)).unwrap();
        assert_eq!(json, r#"{"kind":"u16","value":7}"#);
    }
}
