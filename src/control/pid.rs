//! Discrete PID controller.

use crate::core::math::input_modulus;

/// Default loop period in seconds (50 Hz).
pub const DEFAULT_PERIOD: f64 = 0.02;

/// A PID controller sampled at a fixed period.
///
/// The integral term is accumulated as `error × period` and clamped so that
/// its contribution `ki × integral` stays within the integrator range. The
/// derivative term is the change in error divided by the period.
///
/// # Example
///
/// ```
/// use drishti::PidController;
///
/// let mut pid = PidController::new(2.0, 0.0, 0.0);
/// assert!((pid.calculate(0.25, 1.0) - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct PidController {
    kp: f64,
    ki: f64,
    kd: f64,
    period: f64,

    // Continuous input range
    continuous: Option<(f64, f64)>,

    min_integral: f64,
    max_integral: f64,

    position_error: f64,
    velocity_error: f64,
    prev_error: f64,
    total_error: f64,

    position_tolerance: f64,
    velocity_tolerance: f64,

    setpoint: f64,
    have_measurement: bool,
}

impl PidController {
    /// Create a controller with the default period.
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self::with_period(kp, ki, kd, DEFAULT_PERIOD)
    }

    /// Create a controller with an explicit loop period (seconds).
    ///
    /// Non-positive periods fall back to [`DEFAULT_PERIOD`].
    pub fn with_period(kp: f64, ki: f64, kd: f64, period: f64) -> Self {
        let period = if period > 0.0 {
            period
        } else {
            log::warn!("Invalid PID period {}, using {}", period, DEFAULT_PERIOD);
            DEFAULT_PERIOD
        };

        Self {
            kp,
            ki,
            kd,
            period,
            continuous: None,
            min_integral: -1.0,
            max_integral: 1.0,
            position_error: 0.0,
            velocity_error: 0.0,
            prev_error: 0.0,
            total_error: 0.0,
            position_tolerance: 0.05,
            velocity_tolerance: f64::INFINITY,
            setpoint: 0.0,
            have_measurement: false,
        }
    }

    /// Replace all three gains.
    pub fn set_pid(&mut self, kp: f64, ki: f64, kd: f64) {
        self.kp = kp;
        self.ki = ki;
        self.kd = kd;
    }

    /// Gains as `(kp, ki, kd)`.
    pub fn gains(&self) -> (f64, f64, f64) {
        (self.kp, self.ki, self.kd)
    }

    /// Loop period in seconds.
    #[inline]
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Last setpoint passed to [`calculate`](Self::calculate).
    #[inline]
    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    /// Treat inputs as wrapping around `[min, max)`, e.g. a heading.
    ///
    /// The error is then always taken the short way around.
    pub fn enable_continuous_input(&mut self, min: f64, max: f64) {
        self.continuous = Some((min, max));
    }

    /// Treat inputs as unbounded.
    pub fn disable_continuous_input(&mut self) {
        self.continuous = None;
    }

    /// Returns true if continuous input is enabled.
    pub fn is_continuous_input_enabled(&self) -> bool {
        self.continuous.is_some()
    }

    /// Bound the integral term's contribution to `[min, max]`.
    pub fn set_integrator_range(&mut self, min: f64, max: f64) {
        self.min_integral = min;
        self.max_integral = max;
    }

    /// Tolerances used by [`at_setpoint`](Self::at_setpoint).
    pub fn set_tolerance(&mut self, position: f64, velocity: f64) {
        self.position_tolerance = position;
        self.velocity_tolerance = velocity;
    }

    /// Error from the last [`calculate`](Self::calculate).
    pub fn position_error(&self) -> f64 {
        self.position_error
    }

    /// Rate of change of the error from the last [`calculate`](Self::calculate).
    pub fn velocity_error(&self) -> f64 {
        self.velocity_error
    }

    /// Returns true once a measurement has been taken and both errors are
    /// within tolerance.
    pub fn at_setpoint(&self) -> bool {
        self.have_measurement
            && self.position_error.abs() < self.position_tolerance
            && self.velocity_error.abs() < self.velocity_tolerance
    }

    /// Compute the control output for one cycle.
    pub fn calculate(&mut self, measurement: f64, setpoint: f64) -> f64 {
        self.setpoint = setpoint;
        self.prev_error = self.position_error;
        self.have_measurement = true;

        self.position_error = match self.continuous {
            Some((min, max)) => {
                let error_bound = (max - min) / 2.0;
                input_modulus(setpoint - measurement, -error_bound, error_bound)
            }
            None => setpoint - measurement,
        };
        self.velocity_error = (self.position_error - self.prev_error) / self.period;

        if self.ki != 0.0 {
            let lo = self.min_integral / self.ki;
            let hi = self.max_integral / self.ki;
            self.total_error = (self.total_error + self.position_error * self.period)
                .clamp(lo.min(hi), lo.max(hi));
        }

        self.kp * self.position_error + self.ki * self.total_error + self.kd * self.velocity_error
    }

    /// Clear accumulated error state.
    pub fn reset(&mut self) {
        self.position_error = 0.0;
        self.prev_error = 0.0;
        self.velocity_error = 0.0;
        self.total_error = 0.0;
        self.have_measurement = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_proportional_only() {
        let mut pid = PidController::new(2.0, 0.0, 0.0);
        assert_relative_eq!(pid.calculate(0.0, 1.0), 2.0);
        assert_relative_eq!(pid.calculate(1.0, 1.0), 0.0);
    }

    #[test]
    fn test_integral_accumulates() {
        let mut pid = PidController::with_period(0.0, 1.0, 0.0, 0.1);
        pid.calculate(0.0, 1.0);
        let output = pid.calculate(0.0, 1.0);

        // Two cycles of error 1.0 × 0.1 s
        assert_relative_eq!(output, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_integrator_is_clamped() {
        let mut pid = PidController::with_period(0.0, 2.0, 0.0, 0.5);
        pid.set_integrator_range(-0.5, 0.5);

        let mut output = 0.0;
        for _ in 0..100 {
            output = pid.calculate(0.0, 10.0);
        }
        assert_relative_eq!(output, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_derivative_opposes_change() {
        let mut pid = PidController::with_period(0.0, 0.0, 1.0, 0.1);
        pid.calculate(0.0, 1.0);
        // Error shrinks from 1.0 to 0.5 over 0.1 s
        let output = pid.calculate(0.5, 1.0);
        assert_relative_eq!(output, -5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_continuous_input_takes_short_way() {
        let mut pid = PidController::new(1.0, 0.0, 0.0);
        pid.enable_continuous_input(-PI, PI);

        let output = pid.calculate(3.0, -3.0);
        assert_relative_eq!(output, 2.0 * PI - 6.0, epsilon = 1e-12);
        assert!(pid.is_continuous_input_enabled());
    }

    #[test]
    fn test_at_setpoint() {
        let mut pid = PidController::new(1.0, 0.0, 0.0);
        pid.set_tolerance(0.1, f64::INFINITY);
        assert!(!pid.at_setpoint());

        pid.calculate(0.95, 1.0);
        assert!(pid.at_setpoint());

        pid.calculate(0.5, 1.0);
        assert!(!pid.at_setpoint());
    }

    #[test]
    fn test_reset_clears_state() {
        let mut pid = PidController::with_period(1.0, 1.0, 1.0, 0.1);
        pid.calculate(0.0, 1.0);
        pid.reset();

        assert_eq!(pid.position_error(), 0.0);
        assert!(!pid.at_setpoint());
        // No derivative kick from stale error, no integral carry-over
        assert_relative_eq!(pid.calculate(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_invalid_period_falls_back() {
        let pid = PidController::with_period(1.0, 0.0, 0.0, 0.0);
        assert_eq!(pid.period(), DEFAULT_PERIOD);
    }
}
