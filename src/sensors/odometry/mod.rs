//! Odometry sources for dead-reckoning.
//!
//! # Components
//!
//! - [`OdometrySource`]: What the pose estimator reads each cycle
//! - [`OdometryTracker`]: Accumulates body-frame deltas into a global pose
//! - [`WheelOdometry`]: Convert encoder ticks to pose deltas
//!
//! # Example
//!
//! ```
//! use drishti::{OdometrySource, OdometryTracker, WheelOdometry, WheelOdometryConfig};
//!
//! let config = WheelOdometryConfig {
//!     ticks_per_meter: 1000.0,
//!     wheel_base: 0.17,
//! };
//! let mut wheels = WheelOdometry::new(config);
//! let mut odometry = OdometryTracker::new();
//!
//! // First reading initializes encoder state
//! odometry.update_from_encoders(&mut wheels, 0, 0);
//! odometry.update_from_encoders(&mut wheels, 100, 100);
//! assert!((odometry.pose().x - 0.1).abs() < 1e-9);
//! ```

mod tracker;
mod wheel_odometry;

pub use tracker::OdometryTracker;
pub use wheel_odometry::{WheelOdometry, WheelOdometryConfig};

use crate::core::types::Pose2D;

/// A dead-reckoning pose source.
///
/// The estimator reads [`pose`](Self::pose) every cycle and calls
/// [`reset_pose`](Self::reset_pose) when the global position becomes known
/// authoritatively. The source's internal state is advanced by the caller.
pub trait OdometrySource {
    /// Current odometry-only pose.
    fn pose(&self) -> Pose2D;

    /// Re-seed the odometry pose.
    fn reset_pose(&mut self, pose: Pose2D);
}
