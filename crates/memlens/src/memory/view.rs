use tracing::trace;

use crate::error::{Error, Result};
use crate::value::{Primitive, Value, ValueKind};

/// Typed little-endian access to a borrowed or owned byte buffer.
///
/// The view never resizes its backing storage. Reads need `B: AsRef<[u8]>`,
/// writes additionally need `B: AsMut<[u8]>`, so `MemoryView<&[u8]>` is a
/// read-only view and `MemoryView<&mut [u8]>` or `MemoryView<Vec<u8>>` are
/// writable.
///
/// Every access is bounds checked before any byte is touched; a failed write
/// leaves the buffer unchanged.
#[derive(Debug, Clone)]
pub struct MemoryView<B> {
    buffer: B,
}

impl<B: AsRef<[u8]>> MemoryView<B> {
    pub fn new(buffer: B) -> Self {
        Self { buffer }
    }

    pub fn len(&self) -> usize {
        self.buffer.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    pub fn into_inner(self) -> B {
        self.buffer
    }

    /// Borrow `length` bytes starting at `address`.
    pub fn slice(&self, address: usize, length: usize) -> Result<&[u8]> {
        let range = self.check(address, length)?;
        Ok(&self.buffer.as_ref()[range])
    }

    pub fn read<T: Primitive>(&self, address: usize) -> Result<T> {
        Ok(T::decode_le(self.slice(address, T::WIDTH)?))
    }

    /// Read a value whose kind is only known at runtime.
    pub fn read_value(&self, kind: ValueKind, address: usize) -> Result<Value> {
        Ok(Value::decode(kind, self.slice(address, kind.width())?))
    }

    pub fn read_u8(&self, address: usize) -> Result<u8> {
        self.read(address)
    }

    pub fn read_i8(&self, address: usize) -> Result<i8> {
        self.read(address)
    }

    pub fn read_u16(&self, address: usize) -> Result<u16> {
        self.read(address)
    }

    pub fn read_i16(&self, address: usize) -> Result<i16> {
        self.read(address)
    }

    pub fn read_u32(&self, address: usize) -> Result<u32> {
        self.read(address)
    }

    pub fn read_i32(&self, address: usize) -> Result<i32> {
        self.read(address)
    }

    pub fn read_u64(&self, address: usize) -> Result<u64> {
        self.read(address)
    }

    pub fn read_i64(&self, address: usize) -> Result<i64> {
        self.read(address)
    }

    pub fn read_f32(&self, address: usize) -> Result<f32> {
        self.read(address)
    }

    pub fn read_f64(&self, address: usize) -> Result<f64> {
        self.read(address)
    }

    /// Read a NUL-terminated string, one character per byte.
    ///
    /// Each byte maps to the character with the same code point (Latin-1), so
    /// the character count always equals the byte length of the run. Running
    /// into the end of the buffer before a terminator is an out-of-bounds read.
    pub fn read_string(&self, address: usize) -> Result<String> {
        self.check(address, 1)?;
        let tail = &self.as_bytes()[address..];
        match memchr::memchr(0, tail) {
            Some(end) => Ok(latin1_to_string(&tail[..end])),
            None => Err(Error::OutOfBounds {
                address: self.len(),
                width: 1,
                len: self.len(),
            }),
        }
    }

    pub fn read_bytes(&self, address: usize, length: usize) -> Result<Vec<u8>> {
        Ok(self.slice(address, length)?.to_vec())
    }

    /// The maximal run of non-zero bytes at `address`, ending at a zero byte
    /// or at the end of the buffer.
    pub(crate) fn run_at(&self, address: usize) -> &[u8] {
        let tail = self.as_bytes().get(address..).unwrap_or_default();
        let end = memchr::memchr(0, tail).unwrap_or(tail.len());
        &tail[..end]
    }

    fn check(&self, address: usize, width: usize) -> Result<std::ops::Range<usize>> {
        let len = self.len();
        match address.checked_add(width) {
            Some(end) if end <= len => Ok(address..end),
            _ => Err(Error::OutOfBounds {
                address,
                width,
                len,
            }),
        }
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> MemoryView<B> {
    fn slice_mut(&mut self, address: usize, length: usize) -> Result<&mut [u8]> {
        let range = self.check(address, length)?;
        Ok(&mut self.buffer.as_mut()[range])
    }

    pub fn write<T: Primitive>(&mut self, address: usize, value: T) -> Result<()> {
        value.encode_le(self.slice_mut(address, T::WIDTH)?);
        Ok(())
    }

    pub fn write_value(&mut self, address: usize, value: &Value) -> Result<()> {
        let bytes = value.to_le_bytes();
        self.slice_mut(address, bytes.len())?.copy_from_slice(&bytes);
        Ok(())
    }

    /// Parse `literal` as `kind` and write it.
    ///
    /// A malformed literal fails with a conversion error and the buffer is
    /// left untouched.
    pub fn write_literal(
        &mut self,
        kind: ValueKind,
        address: usize,
        literal: &str,
    ) -> Result<Value> {
        let value = Value::parse(kind, literal)?;
        self.write_value(address, &value)?;
        trace!("Wrote {} {} at {:#x}", kind, value, address);
        Ok(value)
    }

    pub fn write_u8(&mut self, address: usize, value: u8) -> Result<()> {
        self.write(address, value)
    }

    pub fn write_i8(&mut self, address: usize, value: i8) -> Result<()> {
        self.write(address, value)
    }

    pub fn write_u16(&mut self, address: usize, value: u16) -> Result<()> {
        self.write(address, value)
    }

    pub fn write_i16(&mut self, address: usize, value: i16) -> Result<()> {
        self.write(address, value)
    }

    pub fn write_u32(&mut self, address: usize, value: u32) -> Result<()> {
        self.write(address, value)
    }

    pub fn write_i32(&mut self, address: usize, value: i32) -> Result<()> {
        self.write(address, value)
    }

    pub fn write_u64(&mut self, address: usize, value: u64) -> Result<()> {
        self.write(address, value)
    }

    pub fn write_i64(&mut self, address: usize, value: i64) -> Result<()> {
        self.write(address, value)
    }

    pub fn write_f32(&mut self, address: usize, value: f32) -> Result<()> {
        self.write(address, value)
    }

    pub fn write_f64(&mut self, address: usize, value: f64) -> Result<()> {
        self.write(address, value)
    }

    /// Write `value` one byte per character followed by a NUL terminator.
    ///
    /// Characters above U+00FF have no single-byte form and are rejected
    /// before anything is written.
    pub fn write_string(&mut self, address: usize, value: &str) -> Result<()> {
        let mut bytes = string_to_latin1(value)?;
        bytes.push(0);
        self.write_bytes(address, &bytes)
    }

    pub fn write_bytes(&mut self, address: usize, values: &[u8]) -> Result<()> {
        self.slice_mut(address, values.len())?.copy_from_slice(values);
        Ok(())
    }
}

/// Decode bytes one character per byte.
fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Encode characters one byte per character, failing on code points above U+00FF.
pub(crate) fn string_to_latin1(value: &str) -> Result<Vec<u8>> {
    value
        .chars()
        .map(|c| {
            u8::try_from(c).map_err(|_| Error::TypeConversion {
                kind: ValueKind::U8,
                input: value.to_string(),
                reason: format!("character {:?} does not fit in a single byte", c),
            })
        })
        .collect()
}
