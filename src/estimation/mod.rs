//! Pose estimation layer.
//!
//! Fuses dead-reckoning odometry with delayed absolute pose measurements
//! from a vision system.
//!
//! # Contents
//!
//! - [`PoseEstimator`]: The fusion loop
//! - [`TimeInterpolatableBuffer`]: Odometry history with interpolated lookup
//! - [`VisionLedger`]: Vision corrections keyed by capture time
//! - [`VisionGain`]: Steady-state per-axis trust in vision
//! - [`EstimatorConfig`]: TOML configuration

mod config;
mod gain;
mod interpolation;
mod pose_estimator;
mod vision;

pub use config::{DEFAULT_BUFFER_DURATION, EstimatorConfig};
pub use gain::VisionGain;
pub use interpolation::{Interpolate, TimeInterpolatableBuffer};
pub use pose_estimator::{PoseEstimator, VisionOutcome};
pub use vision::{VisionLedger, VisionUpdate, compensate};
