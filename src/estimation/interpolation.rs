//! Time-indexed sample buffer with interpolated lookup.
//!
//! Stores timestamped values in ascending time order and answers
//! "what was the value at time t" by interpolating between the two
//! samples that bracket `t`. Samples older than the configured history
//! (measured from the newest sample) are discarded on insertion, which
//! bounds the buffer by `history × sample rate`.

use std::collections::VecDeque;

use crate::core::math::lerp;
use crate::core::types::{Pose2D, Timestamped};

/// Values that can be blended between two samples.
pub trait Interpolate {
    /// Value at fraction `t` in [0, 1] of the way from `self` to `end`.
    fn interpolate(&self, end: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, end: &Self, t: f64) -> Self {
        lerp(*self, *end, t)
    }
}

impl Interpolate for Pose2D {
    fn interpolate(&self, end: &Self, t: f64) -> Self {
        Pose2D::interpolate(self, end, t)
    }
}

/// A time-ordered buffer of samples bounded by age.
///
/// # Example
///
/// ```
/// use drishti::{Pose2D, TimeInterpolatableBuffer};
///
/// let mut buffer = TimeInterpolatableBuffer::new(1.5);
/// buffer.add_sample(0.0, Pose2D::new(0.0, 0.0, 0.0));
/// buffer.add_sample(2.0, Pose2D::new(4.0, 0.0, 0.0));
///
/// let mid = buffer.sample(1.0).unwrap();
/// assert!((mid.x - 2.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct TimeInterpolatableBuffer<T> {
    /// Maximum age of a sample relative to the newest one (seconds).
    history: f64,
    /// Samples in strictly ascending timestamp order.
    samples: VecDeque<Timestamped<T>>,
}

impl<T: Interpolate + Clone> TimeInterpolatableBuffer<T> {
    /// Create an empty buffer that keeps `history_seconds` of samples.
    ///
    /// Negative or NaN history is treated as zero (only the newest sample
    /// survives each insertion).
    pub fn new(history_seconds: f64) -> Self {
        Self {
            history: history_seconds.max(0.0),
            samples: VecDeque::new(),
        }
    }

    /// Insert a sample, replacing any sample with the same timestamp, then
    /// drop every sample older than `newest - history`.
    ///
    /// Non-finite timestamps are ignored.
    pub fn add_sample(&mut self, timestamp: f64, value: T) {
        if !timestamp.is_finite() {
            log::debug!("Ignoring sample with non-finite timestamp {}", timestamp);
            return;
        }

        let idx = self.samples.partition_point(|s| s.timestamp < timestamp);
        if self.samples.get(idx).is_some_and(|s| s.timestamp == timestamp) {
            self.samples[idx].data = value;
        } else {
            self.samples.insert(idx, Timestamped::new(value, timestamp));
        }

        self.prune();
    }

    /// Sample the buffer at `timestamp`.
    ///
    /// Returns `None` if the buffer is empty. Timestamps outside the stored
    /// range clamp to the oldest or newest sample.
    pub fn sample(&self, timestamp: f64) -> Option<T> {
        let first = self.samples.front()?;
        let last = self.samples.back()?;

        if timestamp <= first.timestamp {
            return Some(first.data.clone());
        }
        if timestamp >= last.timestamp {
            return Some(last.data.clone());
        }

        // First sample at or after the query; 0 < idx < len after the clamps
        // above, except for NaN which falls through to the oldest sample.
        let idx = self.samples.partition_point(|s| s.timestamp < timestamp);
        if idx == 0 {
            return Some(first.data.clone());
        }

        let ceil = &self.samples[idx];
        if ceil.timestamp == timestamp {
            return Some(ceil.data.clone());
        }

        let floor = &self.samples[idx - 1];
        let fraction = (timestamp - floor.timestamp) / (ceil.timestamp - floor.timestamp);
        Some(floor.data.interpolate(&ceil.data, fraction))
    }

    /// Remove all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    fn prune(&mut self) {
        let Some(newest) = self.newest_timestamp() else {
            return;
        };
        let cutoff = newest - self.history;
        while self.samples.front().is_some_and(|s| s.timestamp < cutoff) {
            self.samples.pop_front();
        }
    }
}

impl<T> TimeInterpolatableBuffer<T> {
    /// Configured history length in seconds.
    pub fn history_seconds(&self) -> f64 {
        self.history
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Timestamp of the oldest stored sample.
    pub fn oldest_timestamp(&self) -> Option<f64> {
        self.samples.front().map(|s| s.timestamp)
    }

    /// Timestamp of the newest stored sample.
    pub fn newest_timestamp(&self) -> Option<f64> {
        self.samples.back().map(|s| s.timestamp)
    }

    /// Iterate over samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Timestamped<T>> {
        self.samples.iter()
    }
}
