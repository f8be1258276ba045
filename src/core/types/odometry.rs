//! Motion and uncertainty types.

use serde::{Deserialize, Serialize};

/// A finite body-frame motion (dx, dy, dtheta).
///
/// Related to a pose delta through [`Pose2D::exp`](super::Pose2D::exp) and
/// [`Pose2D::log`](super::Pose2D::log).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Twist2D {
    /// Forward motion in meters
    pub dx: f64,
    /// Leftward motion in meters
    pub dy: f64,
    /// Counter-clockwise rotation in radians (not normalized)
    pub dtheta: f64,
}

impl Twist2D {
    /// Create a new twist.
    #[inline]
    pub fn new(dx: f64, dy: f64, dtheta: f64) -> Self {
        Self { dx, dy, dtheta }
    }

    /// Scale each component by its own factor `[kx, ky, ktheta]`.
    #[inline]
    pub fn scaled_per_axis(&self, k: [f64; 3]) -> Self {
        Self::new(self.dx * k[0], self.dy * k[1], self.dtheta * k[2])
    }
}

/// Per-axis odometry variance `[σ²x, σ²y, σ²θ]`.
///
/// Only the diagonal of the odometry covariance is modeled; the axes are
/// treated as independent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessNoise([f64; 3]);

impl ProcessNoise {
    /// Create from standard deviations `[σx, σy, σθ]`.
    #[inline]
    pub fn from_std_devs(std_devs: [f64; 3]) -> Self {
        Self(std_devs.map(|s| s * s))
    }

    /// Variances `[xx, yy, tt]`.
    #[inline]
    pub fn variances(&self) -> [f64; 3] {
        self.0
    }
}
