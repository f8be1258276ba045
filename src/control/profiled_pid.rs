//! PID control along a trapezoidal motion profile.

use super::pid::PidController;
use super::trapezoid_profile::{Constraints, State, TrapezoidProfile};
use crate::core::math::input_modulus;

/// A [`PidController`] whose setpoint follows a [`TrapezoidProfile`]
/// towards the goal.
///
/// Each [`calculate`](Self::calculate) advances the setpoint by one period
/// along the profile and runs PID against it, so the mechanism is never
/// asked to jump further than the constraints allow.
///
/// # Example
///
/// ```
/// use drishti::{Constraints, ProfiledPidController};
///
/// let mut controller = ProfiledPidController::new(1.0, 0.0, 0.0, Constraints::new(1.0, 2.0));
/// controller.set_goal(1.0);
/// let output = controller.calculate(0.0);
///
/// // One 20 ms step at 2 m/s²
/// assert!((controller.setpoint().velocity - 0.04).abs() < 1e-9);
/// assert!(output > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct ProfiledPidController {
    controller: PidController,
    profile: TrapezoidProfile,
    continuous: Option<(f64, f64)>,
    goal: State,
    setpoint: State,
}

impl ProfiledPidController {
    /// Create a controller with the default period.
    pub fn new(kp: f64, ki: f64, kd: f64, constraints: Constraints) -> Self {
        Self::from_controller(PidController::new(kp, ki, kd), constraints)
    }

    /// Wrap an already configured PID controller.
    pub fn from_controller(controller: PidController, constraints: Constraints) -> Self {
        Self {
            controller,
            profile: TrapezoidProfile::new(constraints),
            continuous: None,
            goal: State::default(),
            setpoint: State::default(),
        }
    }

    /// Replace the PID gains.
    pub fn set_pid(&mut self, kp: f64, ki: f64, kd: f64) {
        self.controller.set_pid(kp, ki, kd);
    }

    /// The inner PID controller.
    pub fn controller(&self) -> &PidController {
        &self.controller
    }

    /// Set a stationary goal position.
    pub fn set_goal(&mut self, position: f64) {
        self.goal = State::new(position, 0.0);
    }

    /// Set a goal state.
    pub fn set_goal_state(&mut self, goal: State) {
        self.goal = goal;
    }

    /// Current goal.
    pub fn goal(&self) -> State {
        self.goal
    }

    /// Current profile setpoint.
    pub fn setpoint(&self) -> State {
        self.setpoint
    }

    /// Replace the profile constraints.
    pub fn set_constraints(&mut self, constraints: Constraints) {
        self.profile.set_constraints(constraints);
    }

    /// Treat inputs as wrapping around `[min, max)`.
    pub fn enable_continuous_input(&mut self, min: f64, max: f64) {
        self.controller.enable_continuous_input(min, max);
        self.continuous = Some((min, max));
    }

    /// Treat inputs as unbounded.
    pub fn disable_continuous_input(&mut self) {
        self.controller.disable_continuous_input();
        self.continuous = None;
    }

    /// Tolerances for [`at_setpoint`](Self::at_setpoint) and [`at_goal`](Self::at_goal).
    pub fn set_tolerance(&mut self, position: f64, velocity: f64) {
        self.controller.set_tolerance(position, velocity);
    }

    /// Returns true if the mechanism is within tolerance of the setpoint.
    pub fn at_setpoint(&self) -> bool {
        self.controller.at_setpoint()
    }

    /// Returns true if the profile has reached the goal and the mechanism
    /// is within tolerance of it.
    pub fn at_goal(&self) -> bool {
        self.at_setpoint() && self.goal == self.setpoint
    }

    /// Advance the setpoint one period and compute the control output.
    pub fn calculate(&mut self, measurement: f64) -> f64 {
        if let Some((min, max)) = self.continuous {
            // Move goal and setpoint next to the measurement so the profile
            // takes the short way around
            let error_bound = (max - min) / 2.0;
            self.goal.position = measurement
                + input_modulus(self.goal.position - measurement, -error_bound, error_bound);
            self.setpoint.position = measurement
                + input_modulus(self.setpoint.position - measurement, -error_bound, error_bound);
        }

        self.setpoint = self
            .profile
            .calculate(self.controller.period(), self.setpoint, self.goal);
        self.controller.calculate(measurement, self.setpoint.position)
    }

    /// Set a new goal, then [`calculate`](Self::calculate).
    pub fn calculate_to(&mut self, measurement: f64, goal: f64) -> f64 {
        self.set_goal(goal);
        self.calculate(measurement)
    }

    /// Restart the profile from a measured state.
    pub fn reset(&mut self, measurement: State) {
        self.controller.reset();
        self.setpoint = measurement;
    }
}
