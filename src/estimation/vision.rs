//! Vision correction records and the ledger that keeps them.
//!
//! A [`VisionUpdate`] says: "the odometry pose `odometry_pose` observed at
//! some instant should be read as `vision_pose`". Any later odometry pose is
//! reprojected into the corrected frame by applying the same relative motion
//! to `vision_pose` (see [`compensate`]). Drift accumulated after the fix is
//! preserved; the frame is anchored to the corrected pose.
//!
//! The [`VisionLedger`] keeps updates keyed by measurement time. It only
//! needs one entry at or before the oldest buffered odometry sample, plus
//! everything newer.

use std::collections::VecDeque;

use crate::core::types::{Pose2D, Timestamped};

/// A vision-corrected pose paired with the odometry pose at the same instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisionUpdate {
    /// The vision-compensated pose estimate.
    pub vision_pose: Pose2D,
    /// The odometry-only pose at the measurement timestamp.
    pub odometry_pose: Pose2D,
}

impl VisionUpdate {
    /// Create a new update record.
    pub fn new(vision_pose: Pose2D, odometry_pose: Pose2D) -> Self {
        Self {
            vision_pose,
            odometry_pose,
        }
    }

    /// Reproject an odometry pose into this update's corrected frame.
    pub fn compensate(&self, pose: &Pose2D) -> Pose2D {
        compensate(self, pose)
    }
}

/// Reproject `pose` from the odometry frame into the frame anchored by `update`.
///
/// ```text
/// result = vision_pose ⊕ (pose ⊖ odometry_pose)
/// ```
pub fn compensate(update: &VisionUpdate, pose: &Pose2D) -> Pose2D {
    let delta = pose.minus(&update.odometry_pose);
    update.vision_pose.plus(&delta)
}

/// Time-ordered vision updates.
#[derive(Debug, Clone, Default)]
pub struct VisionLedger {
    /// Updates in strictly ascending timestamp order.
    updates: VecDeque<Timestamped<VisionUpdate>>,
}

impl VisionLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an update at `timestamp`, replacing one at the same time.
    ///
    /// Every entry with a later timestamp is discarded: measurements are
    /// assumed to arrive in non-decreasing time order and a new one
    /// supersedes anything recorded after it. Returns the number of
    /// discarded later entries.
    pub fn record(&mut self, timestamp: f64, update: VisionUpdate) -> usize {
        let superseded =
            self.updates.len() - self.updates.partition_point(|u| u.timestamp <= timestamp);

        let keep = self.updates.partition_point(|u| u.timestamp < timestamp);
        self.updates.truncate(keep);
        self.updates.push_back(Timestamped::new(update, timestamp));

        superseded
    }

    /// Drop updates that can no longer compensate any buffered odometry.
    ///
    /// Keeps the newest update at or before `oldest_odometry_timestamp` and
    /// everything after it. Returns the number of removed entries.
    pub fn prune_before(&mut self, oldest_odometry_timestamp: f64) -> usize {
        let at_or_before = self
            .updates
            .partition_point(|u| u.timestamp <= oldest_odometry_timestamp);
        if at_or_before <= 1 {
            return 0;
        }

        let removed = at_or_before - 1;
        self.updates.drain(..removed);
        removed
    }

    /// The newest update at or before `timestamp`.
    pub fn floor(&self, timestamp: f64) -> Option<&VisionUpdate> {
        let idx = self.updates.partition_point(|u| u.timestamp <= timestamp);
        idx.checked_sub(1).map(|i| &self.updates[i].data)
    }

    /// The most recent update.
    pub fn latest(&self) -> Option<&VisionUpdate> {
        self.updates.back().map(|u| &u.data)
    }

    /// Timestamp of the oldest update.
    pub fn first_timestamp(&self) -> Option<f64> {
        self.updates.front().map(|u| u.timestamp)
    }

    /// Number of stored updates.
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// Returns true if no updates are stored.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Remove all updates.
    pub fn clear(&mut self) {
        self.updates.clear();
    }

    /// Iterate over updates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Timestamped<VisionUpdate>> {
        self.updates.iter()
    }
}
