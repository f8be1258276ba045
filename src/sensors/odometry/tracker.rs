//! Dead-reckoning pose accumulation.

use super::{OdometrySource, WheelOdometry};
use crate::core::types::Pose2D;

/// Accumulates body-frame motion deltas into a global odometry pose.
///
/// This is the simplest [`OdometrySource`]: whatever produces deltas
/// (wheel encoders, an optical flow sensor, a simulator) feeds
/// [`update`](Self::update) once per cycle and the estimator reads
/// [`pose`](OdometrySource::pose).
///
/// # Example
///
/// ```
/// use drishti::{OdometrySource, OdometryTracker, Pose2D};
///
/// let mut tracker = OdometryTracker::new();
/// tracker.update(&Pose2D::new(0.1, 0.0, 0.0));
/// tracker.update(&Pose2D::new(0.1, 0.0, 0.0));
/// assert!((tracker.pose().x - 0.2).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct OdometryTracker {
    current: Pose2D,
}

impl OdometryTracker {
    /// Create a new tracker starting at identity.
    pub fn new() -> Self {
        Self {
            current: Pose2D::identity(),
        }
    }

    /// Create starting at a specific pose.
    pub fn with_initial(pose: Pose2D) -> Self {
        Self { current: pose }
    }

    /// Update with a pose delta (compose onto current).
    pub fn update(&mut self, delta: &Pose2D) {
        self.current = self.current.compose(delta);
    }

    /// Read both encoders and compose the resulting delta, if any.
    ///
    /// Returns the updated pose.
    pub fn update_from_encoders(
        &mut self,
        wheels: &mut WheelOdometry,
        left: u16,
        right: u16,
    ) -> Pose2D {
        if let Some(delta) = wheels.update(left, right) {
            self.update(&delta);
        }
        self.current
    }

    /// Set absolute pose (e.g. from a sensor that reports global poses).
    pub fn set(&mut self, pose: Pose2D) {
        self.current = pose;
    }
}

impl Default for OdometryTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl OdometrySource for OdometryTracker {
    fn pose(&self) -> Pose2D {
        self.current
    }

    fn reset_pose(&mut self, pose: Pose2D) {
        self.set(pose);
    }
}
