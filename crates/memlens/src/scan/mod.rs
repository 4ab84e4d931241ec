//! Value search over a memory buffer.
//!
//! # Search Strategy
//!
//! Every scan is a full linear pass over the buffer:
//!
//! - Numeric scans decode the buffer at every multiple of the kind's width
//!   (`0, W, 2W, ... <= len - W`) and keep offsets equal to the target.
//! - The literal string scan prefilters with a byte scan for the first
//!   character, then confirms each candidate against the whole run.
//! - The regex scan walks the buffer run by run, where a run is a maximal span
//!   of non-zero bytes, and reports the address of every match start. Patterns
//!   run over the raw bytes with ASCII-only character classes.
//!
//! Results are always in ascending address order.

mod matches;
mod numeric;
mod text;

use crate::memory::MemoryView;

pub use matches::{MatchSet, ScanOptions};
pub use text::compile_pattern;

/// Runs searches against a [`MemoryView`].
///
/// The scanner only reads; it borrows the view for its lifetime so the buffer
/// cannot be written while a scan is running.
pub struct Scanner<'v, 'o, B> {
    view: &'v MemoryView<B>,
    options: ScanOptions<'o>,
}

impl<'v, B: AsRef<[u8]>> Scanner<'v, 'static, B> {
    pub fn new(view: &'v MemoryView<B>) -> Self {
        Self {
            view,
            options: ScanOptions::default(),
        }
    }
}

impl<'v, 'o, B: AsRef<[u8]>> Scanner<'v, 'o, B> {
    /// Create a scanner bounded by a cancellation token and/or a match limit.
    pub fn with_options(view: &'v MemoryView<B>, options: ScanOptions<'o>) -> Self {
        Self { view, options }
    }

    pub fn view(&self) -> &MemoryView<B> {
        self.view
    }

    pub fn options(&self) -> &ScanOptions<'o> {
        &self.options
    }
}
