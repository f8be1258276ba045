//! Wheel odometry from encoder ticks.
//!
//! Converts differential drive wheel encoder readings to pose deltas
//! using differential drive kinematics.

use crate::core::types::Pose2D;

/// Configuration for wheel odometry.
#[derive(Debug, Clone, Copy, serde::Deserialize)]
#[serde(default)]
pub struct WheelOdometryConfig {
    /// Encoder ticks per meter of wheel travel.
    ///
    /// This is calculated as: ticks_per_revolution / (π × wheel_diameter)
    pub ticks_per_meter: f64,

    /// Distance between wheel centers in meters.
    pub wheel_base: f64,
}

impl Default for WheelOdometryConfig {
    fn default() -> Self {
        Self {
            ticks_per_meter: 1000.0,
            wheel_base: 0.17,
        }
    }
}

/// Wheel odometry calculator.
///
/// Maintains encoder state and computes pose deltas from tick changes.
/// Handles 16-bit encoder wraparound correctly.
///
/// The pose delta is computed in the robot's local frame, where:
/// - x = forward
/// - y = left
/// - theta = counter-clockwise rotation
#[derive(Debug)]
pub struct WheelOdometry {
    config: WheelOdometryConfig,
    last_ticks: Option<(u16, u16)>,
}

impl WheelOdometry {
    /// Create a new wheel odometry calculator.
    pub fn new(config: WheelOdometryConfig) -> Self {
        Self {
            config,
            last_ticks: None,
        }
    }

    /// Update with new encoder readings.
    ///
    /// Returns `None` on the first call (initializes state).
    /// Returns `Some(delta)` on subsequent calls with the pose change
    /// in the robot's local frame at the start of the motion.
    pub fn update(&mut self, left: u16, right: u16) -> Option<Pose2D> {
        let result = self
            .last_ticks
            .map(|(prev_left, prev_right)| self.compute_delta(prev_left, prev_right, left, right));

        self.last_ticks = Some((left, right));
        result
    }

    /// Forget the previous reading; the next update only primes state.
    pub fn reset(&mut self) {
        self.last_ticks = None;
    }

    /// Signed tick delta with 16-bit wraparound.
    #[inline]
    fn tick_delta(current: u16, previous: u16) -> i32 {
        // Cast to i16 interprets large positive differences as negative
        let diff = current.wrapping_sub(previous) as i16;
        diff as i32
    }

    fn compute_delta(&self, prev_left: u16, prev_right: u16, left: u16, right: u16) -> Pose2D {
        let delta_left = Self::tick_delta(left, prev_left) as f64 / self.config.ticks_per_meter;
        let delta_right = Self::tick_delta(right, prev_right) as f64 / self.config.ticks_per_meter;

        self.differential_drive_delta(delta_left, delta_right)
    }

    /// Pose change in the local frame for the given wheel displacements.
    fn differential_drive_delta(&self, delta_left: f64, delta_right: f64) -> Pose2D {
        const STRAIGHT_THRESHOLD: f64 = 1e-9;

        let delta_theta = (delta_right - delta_left) / self.config.wheel_base;

        if delta_theta.abs() < STRAIGHT_THRESHOLD {
            let delta_x = (delta_left + delta_right) / 2.0;
            Pose2D::new(delta_x, 0.0, 0.0)
        } else {
            // Radius to the instantaneous center of curvature
            let radius = (delta_left + delta_right) / (2.0 * delta_theta);

            let delta_x = radius * delta_theta.sin();
            let delta_y = radius * (1.0 - delta_theta.cos());

            Pose2D::new(delta_x, delta_y, delta_theta)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_config() -> WheelOdometryConfig {
        WheelOdometryConfig {
            ticks_per_meter: 1000.0,
            wheel_base: 0.2,
        }
    }

    #[test]
    fn test_first_update_primes() {
        let mut odom = WheelOdometry::new(test_config());
        assert!(odom.update(0, 0).is_none());
        assert!(odom.update(0, 0).is_some());
    }

    #[test]
    fn test_straight_line() {
        let mut odom = WheelOdometry::new(test_config());
        odom.update(0, 0);
        let delta = odom.update(500, 500).unwrap();

        assert_relative_eq!(delta.x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(delta.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(delta.theta, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_in_place() {
        let mut odom = WheelOdometry::new(test_config());
        odom.update(1000, 1000);
        // Left back 0.1m, right forward 0.1m over a 0.2m base = 1 rad
        let delta = odom.update(900, 1100).unwrap();

        assert_relative_eq!(delta.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(delta.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(delta.theta, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_encoder_wraparound() {
        let mut odom = WheelOdometry::new(test_config());
        odom.update(65500, 65500);
        let delta = odom.update(64, 64).unwrap();

        // 100 ticks forward across the wrap
        assert_relative_eq!(delta.x, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_reset_reprimes() {
        let mut odom = WheelOdometry::new(test_config());
        odom.update(0, 0);
        odom.reset();
        assert!(odom.update(300, 300).is_none());
    }
}
