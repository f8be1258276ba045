//! Steady-state correction gain for vision measurements.
//!
//! With no process dynamics (A = 0) and direct observation (C = I), the
//! continuous-time Kalman filter settles to a diagonal gain
//!
//! ```text
//! K[i] = Q[i] / (Q[i] + sqrt(Q[i] · R[i]))
//! ```
//!
//! where `Q` is the state (odometry) variance and `R` the measurement
//! variance. `K[i]` is the fraction of a measured discrepancy on axis `i`
//! that is applied to the estimate.

use crate::core::types::{ProcessNoise, Twist2D};

/// Per-axis trust in vision measurements, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisionGain([f64; 3]);

impl VisionGain {
    /// Compute the gain from process noise and vision standard deviations.
    ///
    /// An axis with zero process variance never trusts vision. An axis with
    /// zero measurement variance (and nonzero process variance) trusts it
    /// fully. A non-finite or negative standard deviation, or a non-finite
    /// process variance, also yields zero trust on that axis.
    pub fn compute(process_noise: &ProcessNoise, vision_std_devs: [f64; 3]) -> Self {
        let q = process_noise.variances();
        let mut k = [0.0; 3];

        for (axis, gain) in k.iter_mut().enumerate() {
            let q_i = q[axis];
            let std_dev = vision_std_devs[axis];
            if std_dev.is_nan() || std_dev < 0.0 || !q_i.is_finite() {
                log::warn!(
                    "Ignoring vision on axis {}: std dev {} with process variance {}",
                    axis,
                    std_dev,
                    q_i
                );
                continue;
            }

            let r_i = std_dev * std_dev;
            *gain = if q_i == 0.0 {
                0.0
            } else {
                q_i / (q_i + (q_i * r_i).sqrt())
            };
        }

        Self(k)
    }

    /// Gain that ignores vision entirely.
    pub fn zero() -> Self {
        Self([0.0; 3])
    }

    /// Scale a twist component-wise by the gain.
    pub fn apply(&self, twist: &Twist2D) -> Twist2D {
        twist.scaled_per_axis(self.0)
    }

    /// Diagonal entries `[kx, ky, ktheta]`.
    pub fn as_array(&self) -> [f64; 3] {
        self.0
    }
}

impl Default for VisionGain {
    fn default() -> Self {
        Self::zero()
    }
}
