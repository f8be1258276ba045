//! Time sources for components that timestamp their own samples.
//!
//! The estimator never reads a process-wide timer directly; it asks an
//! injected [`Clock`]. Production code uses [`MonotonicClock`], tests and
//! simulations drive time explicitly with [`ManualClock`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A monotonic source of timestamps in seconds.
pub trait Clock {
    /// Current time in seconds since the clock's epoch.
    fn now(&self) -> f64;
}

/// Wall-independent clock that reads zero at construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    /// Create a clock whose epoch is now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Manually driven clock.
///
/// Clones share the same time, so a test can hold one handle while the
/// estimator owns another.
///
/// # Example
///
/// ```
/// use drishti::{Clock, ManualClock};
///
/// let clock = ManualClock::new(0.0);
/// let handle = clock.clone();
/// handle.advance(0.02);
/// assert!((clock.now() - 0.02).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Create a clock reading `start` seconds.
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Jump to an absolute time.
    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }

    /// Move time forward by `seconds`.
    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}
