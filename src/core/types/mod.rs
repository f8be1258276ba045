//! Core data types for pose estimation.
//!
//! Geometry:
//! - [`Point2D`]: 2D point / translation in meters
//! - [`Pose2D`]: Robot pose (x, y, theta) in meters and radians
//! - [`Transform2D`]: Relative rigid transform between poses
//!
//! Motion and uncertainty:
//! - [`Twist2D`]: Finite body-frame motion (exp/log map partner of `Pose2D`)
//! - [`ProcessNoise`]: Per-axis odometry variance
//!
//! Time:
//! - [`Timestamped<T>`]: Generic timestamp wrapper

mod odometry;
mod pose;
mod timestamped;
mod transform;

pub use odometry::{ProcessNoise, Twist2D};
pub use pose::{Point2D, Pose2D};
pub use timestamped::Timestamped;
pub use transform::Transform2D;
