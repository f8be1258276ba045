//! Mathematical primitives for planar estimation and control.
//!
//! Functions for angle normalization, angular arithmetic and scalar wrapping.

use std::f64::consts::PI;

/// Normalize angle to (-π, π].
///
/// `-π` maps to `π`, so every heading has exactly one representation.
///
/// # Example
/// ```
/// use drishti::core::math::normalize_angle;
/// use std::f64::consts::PI;
///
/// assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-9);
/// assert!((normalize_angle(-3.0 * PI) - PI).abs() < 1e-9);
/// ```
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a <= -PI {
        a += 2.0 * PI;
    }
    a
}

/// Shortest angular difference from angle `a` to angle `b`.
///
/// Returns the signed angle you need to add to `a` to reach `b`,
/// taking the shortest path around the circle.
///
/// # Example
/// ```
/// use drishti::core::math::angle_diff;
/// use std::f64::consts::PI;
///
/// // Crossing the ±π boundary takes the short way
/// let diff = angle_diff(PI - 0.1, -PI + 0.1);
/// assert!((diff - 0.2).abs() < 1e-9);
/// ```
#[inline]
pub fn angle_diff(a: f64, b: f64) -> f64 {
    normalize_angle(b - a)
}

/// Linear interpolation between two angles, taking the shortest path.
///
/// `t` should be in [0, 1] where 0 returns `a` and 1 returns `b`.
#[inline]
pub fn angle_lerp(a: f64, b: f64, t: f64) -> f64 {
    normalize_angle(a + angle_diff(a, b) * t)
}

/// Linear interpolation between two scalars.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Wrap `input` into the half-open range `[min, max)`.
///
/// Used for continuous inputs such as a heading measured in [-π, π),
/// where the error between two values should go the short way around.
/// A non-positive range returns `input` untouched.
#[inline]
pub fn input_modulus(input: f64, min: f64, max: f64) -> f64 {
    let modulus = max - min;
    if modulus <= 0.0 {
        return input;
    }
    min + (input - min).rem_euclid(modulus)
}
