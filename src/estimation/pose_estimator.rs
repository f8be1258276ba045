//! Odometry-vision pose fusion.
//!
//! The estimator keeps a short history of odometry poses and a ledger of
//! vision corrections. Odometry drives the estimate every cycle; vision
//! measurements, which arrive late and at irregular rates, are reconciled
//! against the odometry pose at their capture time and then carried forward
//! to the present by reprojecting live odometry into the corrected frame.
//!
//! ```text
//!   update()                       add_vision_measurement(pose, t)
//!      │                                      │
//!      ▼                                      ▼
//!  ┌──────────────┐  sample(t)   ┌────────────────────────┐
//!  │ odometry     │─────────────▶│ estimate at t          │
//!  │ buffer       │              │ log → scale by K → exp │
//!  └──────────────┘              └───────────┬────────────┘
//!         │                                  │ record(t)
//!         │ live pose            ┌───────────▼────────────┐
//!         └─────────────────────▶│ vision ledger          │──▶ estimate
//!                  compensate    └────────────────────────┘
//! ```

use super::config::{DEFAULT_BUFFER_DURATION, EstimatorConfig};
use super::gain::VisionGain;
use super::interpolation::TimeInterpolatableBuffer;
use super::vision::{VisionLedger, VisionUpdate};
use crate::core::clock::{Clock, MonotonicClock};
use crate::core::types::{Point2D, Pose2D, ProcessNoise};
use crate::error::Result;
use crate::sensors::odometry::OdometrySource;

/// What happened to a vision measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisionOutcome {
    /// The measurement was folded into the estimate.
    Applied,
    /// The measurement predates the odometry history, or its timestamp or
    /// pose is not finite, and was dropped.
    Stale,
    /// No odometry has been recorded yet; the measurement was dropped.
    NoOdometry,
}

/// Fuses an [`OdometrySource`] with delayed vision pose measurements.
///
/// Call [`update`](Self::update) once per control cycle after advancing the
/// odometry source. Call [`add_vision_measurement`](Self::add_vision_measurement)
/// whenever a camera produces a pose, with the timestamp at which the image
/// was captured.
///
/// # Example
///
/// ```
/// use drishti::{ManualClock, OdometryTracker, Pose2D, PoseEstimator, VisionOutcome};
///
/// let clock = ManualClock::new(0.0);
/// let mut estimator = PoseEstimator::with_clock(
///     OdometryTracker::new(),
///     [0.1, 0.1, 0.1],
///     [0.0, 0.0, 0.0],
///     clock.clone(),
/// );
///
/// estimator.update();
/// clock.advance(0.02);
/// estimator.odometry_mut().update(&Pose2D::new(0.1, 0.0, 0.0));
/// estimator.update();
///
/// let outcome = estimator.add_vision_measurement(Pose2D::new(1.0, 0.0, 0.0), 0.0);
/// assert_eq!(outcome, VisionOutcome::Applied);
/// assert!((estimator.estimated_pose().x - 1.1).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct PoseEstimator<O: OdometrySource, C: Clock = MonotonicClock> {
    odometry: O,
    clock: C,
    /// Process variance per axis, fixed at construction.
    q: ProcessNoise,
    /// Vision gain, recomputed when vision std devs change.
    gain: VisionGain,
    odometry_buffer: TimeInterpolatableBuffer<Pose2D>,
    vision_updates: VisionLedger,
    pose_estimate: Pose2D,
}

impl<O: OdometrySource> PoseEstimator<O, MonotonicClock> {
    /// Create an estimator timed by a monotonic clock starting now.
    ///
    /// `state_std_devs` and `vision_std_devs` are `[x (m), y (m), heading (rad)]`.
    /// Larger values mean less trust in that source.
    pub fn new(odometry: O, state_std_devs: [f64; 3], vision_std_devs: [f64; 3]) -> Self {
        Self::with_clock(
            odometry,
            state_std_devs,
            vision_std_devs,
            MonotonicClock::new(),
        )
    }
}

impl<O: OdometrySource, C: Clock> PoseEstimator<O, C> {
    /// Create an estimator with an explicit time source.
    pub fn with_clock(
        odometry: O,
        state_std_devs: [f64; 3],
        vision_std_devs: [f64; 3],
        clock: C,
    ) -> Self {
        Self::build(
            odometry,
            state_std_devs,
            vision_std_devs,
            DEFAULT_BUFFER_DURATION,
            clock,
        )
    }

    /// Create an estimator from a validated configuration.
    pub fn from_config(odometry: O, config: &EstimatorConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(
            odometry,
            config.state_std_devs,
            config.vision_std_devs,
            config.buffer_duration,
            clock,
        ))
    }

    fn build(
        odometry: O,
        state_std_devs: [f64; 3],
        vision_std_devs: [f64; 3],
        buffer_duration: f64,
        clock: C,
    ) -> Self {
        let q = ProcessNoise::from_std_devs(state_std_devs);
        let pose_estimate = odometry.pose();

        Self {
            odometry,
            clock,
            q,
            gain: VisionGain::compute(&q, vision_std_devs),
            odometry_buffer: TimeInterpolatableBuffer::new(buffer_duration),
            vision_updates: VisionLedger::new(),
            pose_estimate,
        }
    }

    /// Change how much vision measurements are trusted.
    ///
    /// Applies to every subsequent measurement.
    pub fn set_vision_measurement_std_devs(&mut self, std_devs: [f64; 3]) {
        self.gain = VisionGain::compute(&self.q, std_devs);
    }

    /// Current per-axis vision gain.
    pub fn vision_gain(&self) -> VisionGain {
        self.gain
    }

    /// Reset the robot pose.
    pub fn reset_pose(&mut self, pose: Pose2D) {
        self.reseed(pose);
    }

    /// Reset position from a field pose, taking heading from the gyro.
    pub fn reset_position(&mut self, gyro_angle: f64, pose: Pose2D) {
        self.reseed(Pose2D::new(pose.x, pose.y, gyro_angle));
    }

    /// Reset translation, keeping the estimated heading.
    pub fn reset_translation(&mut self, translation: Point2D) {
        self.reseed(Pose2D::from_parts(translation, self.pose_estimate.theta));
    }

    /// Reset heading, keeping the estimated position.
    pub fn reset_rotation(&mut self, theta: f64) {
        self.reseed(Pose2D::from_parts(self.pose_estimate.translation(), theta));
    }

    fn reseed(&mut self, pose: Pose2D) {
        self.odometry.reset_pose(pose);
        self.odometry_buffer.clear();
        self.vision_updates.clear();
        self.pose_estimate = self.odometry.pose();

        log::debug!(
            "Estimator reset to ({:.3}, {:.3}, {:.3})",
            self.pose_estimate.x,
            self.pose_estimate.y,
            self.pose_estimate.theta
        );
    }

    /// Best current pose estimate.
    #[inline]
    pub fn estimated_pose(&self) -> Pose2D {
        self.pose_estimate
    }

    /// Estimated pose at a past `timestamp`.
    ///
    /// Returns `None` until the first [`update`](Self::update). Timestamps
    /// outside the buffered history clamp to its oldest or newest sample.
    pub fn sample_at(&self, timestamp: f64) -> Option<Pose2D> {
        let oldest = self.odometry_buffer.oldest_timestamp()?;
        let newest = self.odometry_buffer.newest_timestamp()?;
        let timestamp = timestamp.max(oldest).min(newest);

        let odometry_pose = self.odometry_buffer.sample(timestamp)?;
        match self.vision_updates.floor(timestamp) {
            Some(update) => Some(update.compensate(&odometry_pose)),
            None => Some(odometry_pose),
        }
    }

    /// Fold in a vision pose captured at `timestamp`.
    ///
    /// Measurements must be added in non-decreasing timestamp order; one
    /// older than an already-applied measurement replaces it and every
    /// later one.
    pub fn add_vision_measurement(&mut self, vision_pose: Pose2D, timestamp: f64) -> VisionOutcome {
        let Some(newest) = self.odometry_buffer.newest_timestamp() else {
            log::debug!("Vision measurement at {:.3}s before any odometry", timestamp);
            return VisionOutcome::NoOdometry;
        };

        let horizon = newest - self.odometry_buffer.history_seconds();
        if !timestamp.is_finite() || horizon > timestamp {
            log::warn!(
                "Dropping vision measurement at {:.3}s, odometry history starts at {:.3}s",
                timestamp,
                horizon
            );
            return VisionOutcome::Stale;
        }

        if !vision_pose.is_finite() {
            log::warn!(
                "Dropping non-finite vision pose ({}, {}, {}) at {:.3}s",
                vision_pose.x,
                vision_pose.y,
                vision_pose.theta,
                timestamp
            );
            return VisionOutcome::Stale;
        }

        if let Some(oldest) = self.odometry_buffer.oldest_timestamp() {
            self.vision_updates.prune_before(oldest);
        }

        let (Some(odometry_sample), Some(vision_sample)) = (
            self.odometry_buffer.sample(timestamp),
            self.sample_at(timestamp),
        ) else {
            return VisionOutcome::NoOdometry;
        };

        let twist = vision_sample.log(&vision_pose);
        let scaled = self.gain.apply(&twist);
        let update = VisionUpdate::new(vision_sample.exp(&scaled), odometry_sample);

        let superseded = self.vision_updates.record(timestamp, update);
        if superseded > 0 {
            log::debug!(
                "Vision measurement at {:.3}s superseded {} later correction(s)",
                timestamp,
                superseded
            );
        }

        self.pose_estimate = update.compensate(&self.odometry.pose());
        VisionOutcome::Applied
    }

    /// Like [`add_vision_measurement`](Self::add_vision_measurement), but
    /// first replaces the vision standard deviations.
    ///
    /// The new standard deviations stay in effect for later measurements.
    pub fn add_vision_measurement_with_std_devs(
        &mut self,
        vision_pose: Pose2D,
        timestamp: f64,
        std_devs: [f64; 3],
    ) -> VisionOutcome {
        self.set_vision_measurement_std_devs(std_devs);
        self.add_vision_measurement(vision_pose, timestamp)
    }

    /// Record the current odometry pose at the clock's time.
    pub fn update(&mut self) -> Pose2D {
        let now = self.clock.now();
        self.update_with_time(now)
    }

    /// Record the current odometry pose at `timestamp`.
    pub fn update_with_time(&mut self, timestamp: f64) -> Pose2D {
        let odometry_pose = self.odometry.pose();
        self.odometry_buffer.add_sample(timestamp, odometry_pose);

        self.pose_estimate = match self.vision_updates.latest() {
            Some(update) => update.compensate(&odometry_pose),
            None => odometry_pose,
        };

        log::trace!(
            "t={:.3}s odom=({:.3}, {:.3}, {:.3}) est=({:.3}, {:.3}, {:.3})",
            timestamp,
            odometry_pose.x,
            odometry_pose.y,
            odometry_pose.theta,
            self.pose_estimate.x,
            self.pose_estimate.y,
            self.pose_estimate.theta
        );

        self.pose_estimate
    }

    /// The wrapped odometry source.
    pub fn odometry(&self) -> &O {
        &self.odometry
    }

    /// Mutable access to the odometry source, to advance it each cycle.
    pub fn odometry_mut(&mut self) -> &mut O {
        &mut self.odometry
    }

    /// Current time according to the estimator's clock.
    pub fn timestamp(&self) -> f64 {
        self.clock.now()
    }

    /// Number of odometry poses in the history buffer.
    pub fn buffered_samples(&self) -> usize {
        self.odometry_buffer.len()
    }

    /// Vision corrections still needed to compensate buffered odometry.
    pub fn vision_updates(&self) -> &VisionLedger {
        &self.vision_updates
    }
}
