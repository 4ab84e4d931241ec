//! Prelude module for convenient imports
//!
//! ```ignore
//! use memlens::prelude::*;
//! ```

pub use crate::error::{Error, Result};
pub use crate::memory::MemoryView;
pub use crate::scan::{MatchSet, ScanOptions, Scanner};
pub use crate::value::{Primitive, Value, ValueKind};
