//! Drishti - Vision-corrected pose estimation for wheeled robots
//!
//! # Architecture
//!
//! The crate is organized into 4 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    control/                         │  ← Feedback control
//! │           (pid, trapezoid profile)                  │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                  estimation/                        │  ← Sensor fusion
//! │   (pose estimator, interpolation, vision ledger)    │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                   sensors/                          │  ← Sensor processing
//! │                  (odometry)                         │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │              (types, math, clock)                   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! The host control loop owns a [`PoseEstimator`], advances its odometry
//! source and calls [`PoseEstimator::update`] every cycle. Vision poses are
//! added whenever they arrive, stamped with their capture time:
//!
//! ```
//! use drishti::{ManualClock, OdometryTracker, Pose2D, PoseEstimator};
//!
//! let clock = ManualClock::new(0.0);
//! let mut estimator = PoseEstimator::with_clock(
//!     OdometryTracker::new(),
//!     [0.1, 0.1, 0.1],
//!     [0.9, 0.9, 0.9],
//!     clock.clone(),
//! );
//!
//! for _ in 0..10 {
//!     estimator.odometry_mut().update(&Pose2D::new(0.01, 0.0, 0.0));
//!     estimator.update();
//!     clock.advance(0.02);
//! }
//!
//! estimator.add_vision_measurement(Pose2D::new(0.2, 0.0, 0.0), 0.1);
//! let pose = estimator.estimated_pose();
//! assert!(pose.x > 0.1 && pose.x < 0.2);
//! ```

// ============================================================================
// Layer 1: Core foundation (no internal deps)
// ============================================================================
pub mod core;

// ============================================================================
// Layer 2: Sensor processing (depends on core)
// ============================================================================
pub mod sensors;

// ============================================================================
// Layer 3: Estimation (depends on core, sensors)
// ============================================================================
pub mod estimation;

// ============================================================================
// Layer 4: Control (depends on core)
// ============================================================================
pub mod control;

pub mod error;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

// Core
pub use crate::core::clock::{Clock, ManualClock, MonotonicClock};
pub use crate::core::math;
pub use crate::core::types::{ProcessNoise, Twist2D};
pub use crate::core::types::{Point2D, Pose2D, Timestamped, Transform2D};

// Sensors - Odometry
pub use sensors::odometry::{OdometrySource, OdometryTracker, WheelOdometry, WheelOdometryConfig};

// Estimation
pub use estimation::{
    EstimatorConfig, Interpolate, PoseEstimator, TimeInterpolatableBuffer, VisionGain,
    VisionLedger, VisionOutcome, VisionUpdate, compensate,
};

// Control
pub use control::{Constraints, PidController, ProfiledPidController, State, TrapezoidProfile};

// Errors
pub use error::{EstimatorError, Result};
