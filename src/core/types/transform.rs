//! Rigid body transform between two poses.

use serde::{Deserialize, Serialize};

use super::Point2D;
use crate::core::math::normalize_angle;

/// A relative rigid transform: rotate by `rotation`, translate by `translation`.
///
/// The translation is expressed in the frame the transform is applied from,
/// so `pose.plus(&t)` moves `translation` along the pose's own axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Translation in meters (source frame)
    pub translation: Point2D,
    /// Rotation in radians, normalized to (-π, π]
    pub rotation: f64,
}

impl Transform2D {
    /// Create a new transform with the rotation normalized.
    #[inline]
    pub fn new(translation: Point2D, rotation: f64) -> Self {
        Self {
            translation,
            rotation: normalize_angle(rotation),
        }
    }

    /// The transform that changes nothing.
    #[inline]
    pub fn identity() -> Self {
        Self {
            translation: Point2D::default(),
            rotation: 0.0,
        }
    }

    /// The transform that undoes this one.
    #[inline]
    pub fn inverse(&self) -> Transform2D {
        Transform2D::new((-self.translation).rotate_by(-self.rotation), -self.rotation)
    }

    /// Apply `self` first, then `next` in the resulting frame.
    #[inline]
    pub fn then(&self, next: &Transform2D) -> Transform2D {
        Transform2D::new(
            self.translation + next.translation.rotate_by(self.rotation),
            self.rotation + next.rotation,
        )
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}
