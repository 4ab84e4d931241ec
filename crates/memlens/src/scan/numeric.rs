use tracing::debug;

use super::Scanner;
use super::matches::{Collector, MatchSet};
use crate::value::{Primitive, Value};

impl<B: AsRef<[u8]>> Scanner<'_, '_, B> {
    /// Find every stride-aligned address where the buffer decodes to `target`.
    ///
    /// The stride is the width of `T`. Floats compare with IEEE equality, so
    /// searching for NaN never matches.
    pub fn search<T: Primitive>(&self, target: T) -> MatchSet {
        let mut collector = Collector::new(&self.options);

        for (index, chunk) in self.view.as_bytes().chunks_exact(T::WIDTH).enumerate() {
            if collector.interrupted() {
                break;
            }
            if T::decode_le(chunk) == target && collector.push(index * T::WIDTH) {
                break;
            }
        }

        let matches = collector.finish();
        debug!(
            "{} search for {:?}: {} match(es)",
            T::KIND,
            target,
            matches.len()
        );
        matches
    }

    /// Search for a value whose kind is only known at runtime.
    pub fn search_value(&self, target: &Value) -> MatchSet {
        match *target {
            Value::U8(v) => self.search(v),
            Value::I8(v) => self.search(v),
            Value::U16(v) => self.search(v),
            Value::I16(v) => self.search(v),
            Value::U32(v) => self.search(v),
            Value::I32(v) => self.search(v),
            Value::U64(v) => self.search(v),
            Value::I64(v) => self.search(v),
            Value::F32(v) => self.search(v),
            Value::F64(v) => self.search(v),
        }
    }

    pub fn search_u8(&self, target: u8) -> MatchSet {
        self.search(target)
    }

    pub fn search_i8(&self, target: i8) -> MatchSet {
        self.search(target)
    }

    pub fn search_u16(&self, target: u16) -> MatchSet {
        self.search(target)
    }

    pub fn search_i16(&self, target: i16) -> MatchSet {
        self.search(target)
    }

    pub fn search_u32(&self, target: u32) -> MatchSet {
        self.search(target)
    }

    pub fn search_i32(&self, target: i32) -> MatchSet {
        self.search(target)
    }

    pub fn search_u64(&self, target: u64) -> MatchSet {
        self.search(target)
    }

    pub fn search_i64(&self, target: i64) -> MatchSet {
        self.search(target)
    }

    pub fn search_f32(&self, target: f32) -> MatchSet {
        self.search(target)
    }

    pub fn search_f64(&self, target: f64) -> MatchSet {
        self.search(target)
    }
}
