use thiserror::Error;

use crate::value::ValueKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Access out of bounds: {width} byte(s) at {address:#x} (buffer length {len:#x})")]
    OutOfBounds {
        address: usize,
        width: usize,
        len: usize,
    },

    #[error("Cannot convert {input:?} to {kind}: {reason}")]
    TypeConversion {
        kind: ValueKind,
        input: String,
        reason: String,
    },

    #[error("Invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is an out-of-bounds access
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Error::OutOfBounds { .. })
    }

    pub(crate) fn conversion(
        kind: ValueKind,
        input: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Error::TypeConversion {
            kind,
            input: input.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_out_of_bounds() {
        let err = Error::OutOfBounds {
            address: 0x10,
            width: 4,
            len: 0x12,
        };
        assert!(err.is_out_of_bounds());

        let err2 = Error::conversion(ValueKind::U64, "abc", "invalid digit");
        assert!(!err2.is_out_of_bounds());
    }

    #[test]
    fn test_error_display() {
        let err = Error::OutOfBounds {
            address: 0x10,
            width: 4,
            len: 0x12,
        };
        assert_eq!(
            err.to_string(),
            "Access out of bounds: 4 byte(s) at 0x10 (buffer length 0x12)"
        );

        let err = Error::conversion(ValueKind::I32, "x1", "invalid digit found in string");
        assert_eq!(
            err.to_string(),
            "Cannot convert \"x1\" to i32: invalid digit found in string"
        );
    }
}
