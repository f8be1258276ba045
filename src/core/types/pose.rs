//! Pose and point types for planar robot state.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::{Transform2D, Twist2D};
use crate::core::math::{angle_diff, angle_lerp, lerp, normalize_angle};

/// Below this rotation the exp/log maps switch to their Taylor series.
const SMALL_ANGLE: f64 = 1e-9;

/// A 2D point (or translation) in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate in meters
    pub x: f64,
    /// Y coordinate in meters
    pub y: f64,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Distance from the origin.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Rotate counter-clockwise about the origin by `theta` radians.
    #[inline]
    pub fn rotate_by(&self, theta: f64) -> Point2D {
        let (sin_t, cos_t) = theta.sin_cos();
        Point2D::new(
            self.x * cos_t - self.y * sin_t,
            self.x * sin_t + self.y * cos_t,
        )
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point2D {
    type Output = Point2D;

    fn neg(self) -> Point2D {
        Point2D::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Point2D;

    fn mul(self, rhs: f64) -> Point2D {
        Point2D::new(self.x * rhs, self.y * rhs)
    }
}

/// Robot pose in 2D space.
///
/// Represents position (x, y) in meters and heading (theta) in radians.
/// Theta is normalized to (-π, π].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position in meters
    pub x: f64,
    /// Y position in meters
    pub y: f64,
    /// Heading in radians, normalized to (-π, π]
    pub theta: f64,
}

impl Pose2D {
    /// Create a new pose with theta normalized to (-π, π].
    #[inline]
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// Create a pose from a translation and heading.
    #[inline]
    pub fn from_parts(translation: Point2D, theta: f64) -> Self {
        Self::new(translation.x, translation.y, theta)
    }

    /// Identity pose at origin with zero heading.
    #[inline]
    pub fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            theta: 0.0,
        }
    }

    /// Returns true if every component is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.theta.is_finite()
    }

    /// Position component of the pose.
    #[inline]
    pub fn translation(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Compose two poses: self ⊕ other
    ///
    /// Applies `other` transform relative to `self` frame.
    /// ```text
    /// C = A ⊕ B:
    ///   C.x = A.x + B.x * cos(A.θ) - B.y * sin(A.θ)
    ///   C.y = A.y + B.x * sin(A.θ) + B.y * cos(A.θ)
    ///   C.θ = normalize(A.θ + B.θ)
    /// ```
    #[inline]
    pub fn compose(&self, other: &Pose2D) -> Pose2D {
        let (sin_t, cos_t) = self.theta.sin_cos();
        Pose2D::new(
            self.x + other.x * cos_t - other.y * sin_t,
            self.y + other.x * sin_t + other.y * cos_t,
            self.theta + other.theta,
        )
    }

    /// Inverse of this pose.
    ///
    /// Returns the transform that undoes this pose.
    #[inline]
    pub fn inverse(&self) -> Pose2D {
        let (sin_t, cos_t) = self.theta.sin_cos();
        Pose2D::new(
            -self.x * cos_t - self.y * sin_t,
            self.x * sin_t - self.y * cos_t,
            -self.theta,
        )
    }

    /// Apply a body-frame transform to this pose.
    #[inline]
    pub fn plus(&self, transform: &Transform2D) -> Pose2D {
        let offset = transform.translation.rotate_by(self.theta);
        Pose2D::new(
            self.x + offset.x,
            self.y + offset.y,
            self.theta + transform.rotation,
        )
    }

    /// The transform that carries `origin` onto `self`, in `origin`'s frame.
    ///
    /// `origin.plus(&self.minus(origin)) == self`.
    #[inline]
    pub fn minus(&self, origin: &Pose2D) -> Transform2D {
        let translation = (self.translation() - origin.translation()).rotate_by(-origin.theta);
        Transform2D::new(translation, angle_diff(origin.theta, self.theta))
    }

    /// Express this pose in the frame of `origin`.
    #[inline]
    pub fn relative_to(&self, origin: &Pose2D) -> Pose2D {
        let transform = self.minus(origin);
        Pose2D::from_parts(transform.translation, transform.rotation)
    }

    /// Transform a point from local frame to global frame.
    #[inline]
    pub fn transform_point(&self, point: &Point2D) -> Point2D {
        self.translation() + point.rotate_by(self.theta)
    }

    /// Transform a point from global frame to local frame.
    #[inline]
    pub fn inverse_transform_point(&self, point: &Point2D) -> Point2D {
        (*point - self.translation()).rotate_by(-self.theta)
    }

    /// Integrate a body-frame twist starting from this pose.
    ///
    /// Closed-form SE(2) exponential map: the robot follows a constant
    /// curvature arc whose chord is the twist translation scaled by
    /// `sin(θ)/θ` and `(1 - cos(θ))/θ`.
    pub fn exp(&self, twist: &Twist2D) -> Pose2D {
        let dtheta = twist.dtheta;
        let (sin_t, cos_t) = dtheta.sin_cos();

        let (s, c) = if dtheta.abs() < SMALL_ANGLE {
            (1.0 - dtheta * dtheta / 6.0, 0.5 * dtheta)
        } else {
            (sin_t / dtheta, (1.0 - cos_t) / dtheta)
        };

        let transform = Transform2D::new(
            Point2D::new(twist.dx * s - twist.dy * c, twist.dx * c + twist.dy * s),
            dtheta,
        );
        self.plus(&transform)
    }

    /// The twist that carries this pose onto `end`.
    ///
    /// Inverse of [`Pose2D::exp`]: `self.exp(&self.log(end)) == end`.
    pub fn log(&self, end: &Pose2D) -> Twist2D {
        let transform = end.minus(self);
        let dtheta = transform.rotation;
        let half_dtheta = dtheta / 2.0;
        let cos_minus_one = dtheta.cos() - 1.0;

        let half_theta_by_tan = if cos_minus_one.abs() < SMALL_ANGLE {
            1.0 - dtheta * dtheta / 12.0
        } else {
            -(half_dtheta * dtheta.sin()) / cos_minus_one
        };

        let t = transform.translation;
        Twist2D::new(
            half_theta_by_tan * t.x + half_dtheta * t.y,
            half_theta_by_tan * t.y - half_dtheta * t.x,
            dtheta,
        )
    }

    /// Interpolate towards `end` by fraction `t`.
    ///
    /// Uses linear interpolation for x, y and shortest-path angular
    /// interpolation for theta.
    pub fn interpolate(&self, end: &Pose2D, t: f64) -> Pose2D {
        Pose2D {
            x: lerp(self.x, end.x, t),
            y: lerp(self.y, end.y, t),
            theta: angle_lerp(self.theta, end.theta, t),
        }
    }
}

impl Default for Pose2D {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_pose_eq(a: &Pose2D, b: &Pose2D) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
        assert_relative_eq!(angle_diff(a.theta, b.theta), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_point2d_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0);
        assert_relative_eq!(a.distance_squared(&b), 25.0);
        assert_relative_eq!(b.norm(), 5.0);
    }

    #[test]
    fn test_point_rotate_by() {
        let p = Point2D::new(1.0, 0.0).rotate_by(FRAC_PI_2);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pose_heading_half_turn_is_positive() {
        assert_eq!(Pose2D::new(0.0, 0.0, -PI).theta, PI);
        assert_eq!(Pose2D::new(0.0, 0.0, PI).theta, PI);
    }

    #[test]
    fn test_pose_is_finite() {
        assert!(Pose2D::new(1.0, -2.0, 0.5).is_finite());
        assert!(!Pose2D::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Pose2D::new(0.0, f64::INFINITY, 0.0).is_finite());
        assert!(!Pose2D::new(0.0, 0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_pose_inverse_roundtrip() {
        let p = Pose2D::new(1.0, 2.0, 0.5);
        let result = p.compose(&p.inverse());
        assert_pose_eq(&result, &Pose2D::identity());
    }

    #[test]
    fn test_pose_composition_order() {
        let move_forward = Pose2D::new(1.0, 0.0, 0.0);
        let rotate = Pose2D::new(0.0, 0.0, FRAC_PI_2);

        let result = move_forward.compose(&rotate);
        assert_pose_eq(&result, &Pose2D::new(1.0, 0.0, FRAC_PI_2));

        let result2 = rotate.compose(&move_forward);
        assert_pose_eq(&result2, &Pose2D::new(0.0, 1.0, FRAC_PI_2));
    }

    #[test]
    fn test_minus_then_plus_recovers_pose() {
        let origin = Pose2D::new(1.0, -2.0, 0.7);
        let target = Pose2D::new(-3.0, 0.5, -2.9);

        let delta = target.minus(&origin);
        assert_pose_eq(&origin.plus(&delta), &target);
    }

    #[test]
    fn test_minus_is_in_origin_frame() {
        // Robot facing +Y; a point one meter ahead in world +Y is +X in body frame
        let origin = Pose2D::new(0.0, 0.0, FRAC_PI_2);
        let ahead = Pose2D::new(0.0, 1.0, FRAC_PI_2);

        let delta = ahead.minus(&origin);
        assert_relative_eq!(delta.translation.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(delta.translation.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(delta.rotation, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_relative_to_matches_inverse_compose() {
        let origin = Pose2D::new(2.0, 1.0, 0.4);
        let pose = Pose2D::new(3.0, 4.0, -1.1);

        let expected = origin.inverse().compose(&pose);
        assert_pose_eq(&pose.relative_to(&origin), &expected);
    }

    #[test]
    fn test_transform_point_roundtrip() {
        let pose = Pose2D::new(1.0, 0.0, FRAC_PI_2);
        let global = pose.transform_point(&Point2D::new(1.0, 0.0));
        assert_relative_eq!(global.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(global.y, 1.0, epsilon = 1e-12);

        let local = pose.inverse_transform_point(&global);
        assert_relative_eq!(local.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(local.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_exp_straight_line() {
        let start = Pose2D::new(1.0, 1.0, FRAC_PI_2);
        let end = start.exp(&Twist2D::new(2.0, 0.0, 0.0));
        assert_pose_eq(&end, &Pose2D::new(1.0, 3.0, FRAC_PI_2));
    }

    #[test]
    fn test_exp_quarter_circle() {
        // Driving a quarter circle of radius 1 to the left
        let twist = Twist2D::new(FRAC_PI_2, 0.0, FRAC_PI_2);
        let end = Pose2D::identity().exp(&twist);
        assert_pose_eq(&end, &Pose2D::new(1.0, 1.0, FRAC_PI_2));
    }

    #[test]
    fn test_log_quarter_circle() {
        let twist = Pose2D::identity().log(&Pose2D::new(1.0, 1.0, FRAC_PI_2));
        assert_relative_eq!(twist.dx, FRAC_PI_2, epsilon = 1e-9);
        assert_relative_eq!(twist.dy, 0.0, epsilon = 1e-9);
        assert_relative_eq!(twist.dtheta, FRAC_PI_2, epsilon = 1e-9);
    }

    #[test]
    fn test_log_inverts_exp() {
        let start = Pose2D::new(1.0, 2.0, 0.3);
        let end = Pose2D::new(2.0, -1.0, 1.2);

        let twist = start.log(&end);
        assert_pose_eq(&start.exp(&twist), &end);
    }

    #[test]
    fn test_log_small_rotation_uses_series() {
        let start = Pose2D::new(0.0, 0.0, 0.0);
        let end = Pose2D::new(1.0, 0.0, 1e-12);

        let twist = start.log(&end);
        assert_relative_eq!(twist.dx, 1.0, epsilon = 1e-9);
        assert!(twist.dy.is_finite());
        assert_pose_eq(&start.exp(&twist), &end);
    }

    #[test]
    fn test_pose_interpolation() {
        let start = Pose2D::new(0.0, 0.0, 0.0);
        let end = Pose2D::new(2.0, 4.0, PI / 2.0);

        let p = start.interpolate(&end, 0.5);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.theta, PI / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pose_interpolation_angle_wrap() {
        let start = Pose2D::new(0.0, 0.0, PI - 0.1);
        let end = Pose2D::new(0.0, 0.0, -PI + 0.1);

        let p = start.interpolate(&end, 0.5);
        assert!(p.theta.abs() > PI - 0.01);
    }
}
