use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use tracing::info;

/// Cancellation flag for long scans, triggered by Ctrl+C.
pub struct Interrupt {
    flag: AtomicBool,
}

impl Interrupt {
    /// Create a new interrupt in the non-triggered state.
    pub fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    /// Create an interrupt and route Ctrl+C to it.
    pub fn install() -> Result<Arc<Self>> {
        let interrupt = Arc::new(Self::new());
        let interrupt_ctrlc = Arc::clone(&interrupt);
        ctrlc::set_handler(move || {
            info!("Received interrupt, stopping scan...");
            interrupt_ctrlc.trigger();
        })?;
        Ok(interrupt)
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// The underlying flag, as expected by `ScanOptions::cancel`.
    pub fn as_atomic(&self) -> &AtomicBool {
        &self.flag
    }
}

impl Default for Interrupt {
    fn default() -> Self {
        Self::new()
    }
}
