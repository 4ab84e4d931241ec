use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

/// Ordered addresses produced by a single scan.
///
/// Addresses are strictly ascending. A scan that stopped early because of a
/// cancellation request or a match limit still returns what it found so far,
/// and says so through [`is_cancelled`](Self::is_cancelled) or
/// [`is_truncated`](Self::is_truncated).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchSet {
    addresses: Vec<usize>,
    cancelled: bool,
    truncated: bool,
}

impl MatchSet {
    pub fn addresses(&self) -> &[usize] {
        &self.addresses
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.addresses
    }

    /// The scan was interrupted before reaching the end of the buffer
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// The match limit was full and at least one more match was found
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Scanned the whole buffer
    pub fn is_complete(&self) -> bool {
        !self.cancelled && !self.truncated
    }
}

impl Deref for MatchSet {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.addresses
    }
}

impl IntoIterator for MatchSet {
    type Item = usize;
    type IntoIter = std::vec::IntoIter<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.addresses.into_iter()
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.addresses.iter()
    }
}

/// Accumulates matches while honouring the scan options.
pub(crate) struct Collector<'o> {
    cancel: Option<&'o AtomicBool>,
    limit: Option<usize>,
    matches: MatchSet,
}

impl<'o> Collector<'o> {
    pub(crate) fn new(options: &ScanOptions<'o>) -> Self {
        Self {
            cancel: options.cancel,
            limit: options.limit,
            matches: MatchSet::default(),
        }
    }

    /// Record that the scan was stopped by the cancellation token.
    pub(crate) fn mark_cancelled(&mut self) {
        self.matches.cancelled = true;
    }

    /// Check the cancellation token. Returns `true` when the scan must stop.
    #[inline]
    pub(crate) fn interrupted(&mut self) -> bool {
        if self.matches.truncated {
            return true;
        }
        if self.cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
            self.mark_cancelled();
            return true;
        }
        false
    }

    /// Record an address. Returns `true` when the scan must stop.
    ///
    /// A match found once the limit is full is dropped and marks the set as
    /// truncated, so a limit equal to the number of matches leaves it complete.
    pub(crate) fn push(&mut self, address: usize) -> bool {
        if self.limit.is_some_and(|l| self.matches.addresses.len() >= l) {
            self.matches.truncated = true;
            return true;
        }
        self.matches.addresses.push(address);
        false
    }

    pub(crate) fn finish(self) -> MatchSet {
        self.matches
    }
}

/// Options that bound a scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions<'o> {
    /// Stop as soon as this flag becomes `true`
    pub cancel: Option<&'o AtomicBool>,
    /// Stop after this many matches
    pub limit: Option<usize>,
}

impl<'o> ScanOptions<'o> {
    pub fn cancel(mut self, token: &'o AtomicBool) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
