//! Cooperative cancellation between trials.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Polled before every trial; once it returns `true` no further trial starts.
///
/// A trial already in progress is never cut short, since the solver call
/// is an opaque blocking operation bounded only by its own timeout.
pub trait ShouldStop {
    fn should_stop(&self) -> bool;
}

impl ShouldStop for AtomicBool {
    fn should_stop(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: ShouldStop + ?Sized> ShouldStop for &T {
    fn should_stop(&self) -> bool {
        (**self).should_stop()
    }
}

/// Stop condition that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStop;

impl ShouldStop for NeverStop {
    fn should_stop(&self) -> bool {
        false
    }
}

/// Shareable stop flag, typically raised from a signal handler thread.
///
/// # Example
///
/// ```
/// use solvebench_core::{ShouldStop, StopFlag};
///
/// let flag = StopFlag::new();
/// let handle = flag.clone();
/// assert!(!flag.should_stop());
///
/// handle.request_stop();
/// assert!(flag.should_stop());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StopFlag {
    raised: Arc<AtomicBool>,
}

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag. Idempotent.
    pub fn request_stop(&self) {
        self.raised.store(true, Ordering::Relaxed);
    }

    /// Lowers the flag so the same handle can drive another run.
    pub fn reset(&self) {
        self.raised.store(false, Ordering::Relaxed);
    }
}

impl ShouldStop for StopFlag {
    fn should_stop(&self) -> bool {
        self.raised.load(Ordering::Relaxed)
    }
}
