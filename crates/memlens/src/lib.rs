//! # memlens
//!
//! Typed access and value search over a raw memory buffer.
//!
//! This crate provides:
//! - Little-endian typed reads and writes at byte offsets (`MemoryView`)
//! - NUL-terminated string and raw byte helpers
//! - Linear value scans for every primitive kind (`Scanner`)
//! - Literal and regex search across NUL-terminated string runs
//!
//! The buffer is supplied by the caller, typically a snapshot of another
//! process's address space. Addresses are plain byte offsets into it.

pub mod error;
pub mod memory;
pub mod prelude;
pub mod scan;
pub mod value;

pub use error::{Error, Result};
pub use memory::{MemoryDump, MemoryView, hex_dump_lines};
pub use scan::{MatchSet, ScanOptions, Scanner, compile_pattern};
pub use value::{Primitive, Value, ValueKind};
