//! Literal parsing for user supplied values

use super::{Value, ValueKind};
use crate::error::{Error, Result};

pub(super) fn parse(kind: ValueKind, input: &str) -> Result<Value> {
    let s = input.trim();
    if s.is_empty() {
        return Err(Error::conversion(kind, input, "empty literal"));
    }

    let value = match kind {
        ValueKind::F32 => Value::F32(
            s.parse::<f32>()
                .map_err(|e| Error::conversion(kind, input, e))?,
        ),
        ValueKind::F64 => Value::F64(
            s.parse::<f64>()
                .map_err(|e| Error::conversion(kind, input, e))?,
        ),
        _ => {
            let n = parse_integer(s).map_err(|e| Error::conversion(kind, input, e))?;
            narrow(kind, n).ok_or_else(|| Error::conversion(kind, input, "out of range"))?
        }
    };
    Ok(value)
}

/// Parse a decimal or `0x` hexadecimal integer with an optional sign.
///
/// `i128` covers the full range of both `u64` and `i64`.
fn parse_integer(s: &str) -> std::result::Result<i128, std::num::ParseIntError> {
    let (negative, body) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(hex) => (16, hex),
        None => (10, body),
    };
    // Reject a second sign such as "--1" that from_str_radix would accept.
    let digits = if digits.starts_with(['+', '-']) {
        "!"
    } else {
        digits
    };
    let magnitude = i128::from_str_radix(digits, radix)?;
    Ok(if negative { -magnitude } else { magnitude })
}

fn narrow(kind: ValueKind, n: i128) -> Option<Value> {
    let value = match kind {
        ValueKind::U8 => Value::U8(n.try_into().ok()?),
        ValueKind::I8 => Value::I8(n.try_into().ok()?),
        ValueKind::U16 => Value::U16(n.try_into().ok()?),
        ValueKind::I16 => Value::I16(n.try_into().ok()?),
        ValueKind::U32 => Value::U32(n.try_into().ok()?),
        ValueKind::I32 => Value::I32(n.try_into().ok()?),
        ValueKind::U64 => Value::U64(n.try_into().ok()?),
        ValueKind::I64 => Value::I64(n.try_into().ok()?),
        ValueKind::F32 | ValueKind::F64 => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse(ValueKind::U8, "42").unwrap(), Value::U8(42));
        assert_eq!(parse(ValueKind::I32, "-7").unwrap(), Value::I32(-7));
        assert_eq!(parse(ValueKind::I16, " +12 ").unwrap(), Value::I16(12));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(
            parse(ValueKind::U32, "0x01020304").unwrap(),
            Value::U32(0x01020304)
        );
        assert_eq!(parse(ValueKind::I8, "-0X80").unwrap(), Value::I8(-128));
    }

    #[test]
    fn test_parse_64bit_full_range() {
        assert_eq!(
            parse(ValueKind::U64, "18446744073709551615").unwrap(),
            Value::U64(u64::MAX)
        );
        assert_eq!(
            parse(ValueKind::I64, "-9223372036854775808").unwrap(),
            Value::I64(i64::MIN)
        );
        assert_eq!(
            parse(ValueKind::U64, "0xFFFFFFFFFFFFFFFF").unwrap(),
            Value::U64(u64::MAX)
        );
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(parse(ValueKind::U8, "256").is_err());
        assert!(parse(ValueKind::U32, "-1").is_err());
        assert!(parse(ValueKind::U64, "18446744073709551616").is_err());
    }

    #[test]
    fn test_parse_malformed() {
        for input in ["", "abc", "12abc", "--1", "0x", "1.5"] {
            let err = parse(ValueKind::I64, input).unwrap_err();
            assert!(
                matches!(err, Error::TypeConversion { kind: ValueKind::I64, .. }),
                "{input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse(ValueKind::F32, "1.5").unwrap(), Value::F32(1.5));
        assert_eq!(parse(ValueKind::F64, "-0.0").unwrap(), Value::F64(-0.0));
        match parse(ValueKind::F64, "NaN").unwrap() {
            Value::F64(v) => assert!(v.is_nan()),
            other => panic!("unexpected {other:?}"),
        }
        assert!(parse(ValueKind::F32, "one").is_err());
    }
}
