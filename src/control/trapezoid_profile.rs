//! Trapezoidal motion profile.
//!
//! Accelerates at the maximum rate until reaching the maximum velocity,
//! cruises, then decelerates so that it arrives at the goal with the goal's
//! velocity. Short moves never reach cruise and form a triangle instead.
//!
//! ```text
//!  v ▲    ______________
//!    │   /              \
//!    │  /                \
//!    │ /                  \
//!    └──────────────────────▶ t
//!      accel   cruise   decel
//! ```

/// Velocity and acceleration limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    /// Maximum speed (units/s).
    pub max_velocity: f64,
    /// Maximum acceleration (units/s²).
    pub max_acceleration: f64,
}

impl Constraints {
    /// Create constraints.
    pub fn new(max_velocity: f64, max_acceleration: f64) -> Self {
        Self {
            max_velocity,
            max_acceleration,
        }
    }
}

/// A point on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct State {
    /// Position (units).
    pub position: f64,
    /// Velocity (units/s).
    pub velocity: f64,
}

impl State {
    /// Create a state.
    pub fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }
}

/// Time-optimal profile between two states under [`Constraints`].
///
/// Phase boundaries are recomputed on each [`calculate`](Self::calculate);
/// [`total_time`](Self::total_time) and [`is_finished`](Self::is_finished)
/// refer to the most recent one.
#[derive(Debug, Clone)]
pub struct TrapezoidProfile {
    constraints: Constraints,
    /// +1 or -1; the profile is always computed moving forward.
    direction: f64,
    end_accel: f64,
    end_full_speed: f64,
    end_decel: f64,
}

impl TrapezoidProfile {
    /// Create a profile generator.
    pub fn new(constraints: Constraints) -> Self {
        Self {
            constraints,
            direction: 1.0,
            end_accel: 0.0,
            end_full_speed: 0.0,
            end_decel: 0.0,
        }
    }

    /// Limits in use.
    pub fn constraints(&self) -> Constraints {
        self.constraints
    }

    /// Replace the limits.
    pub fn set_constraints(&mut self, constraints: Constraints) {
        self.constraints = constraints;
    }

    /// State `t` seconds after `current` on the way to `goal`.
    pub fn calculate(&mut self, t: f64, current: State, goal: State) -> State {
        let max_v = self.constraints.max_velocity;
        let max_a = self.constraints.max_acceleration;

        self.direction = if current.position > goal.position {
            -1.0
        } else {
            1.0
        };
        let mut current = self.direct(current);
        let goal = self.direct(goal);

        if current.velocity.abs() > max_v {
            current.velocity = max_v.copysign(current.velocity);
        }

        // Portions of the full trapezoid cut off by nonzero boundary velocities
        let cutoff_begin = current.velocity / max_a;
        let cutoff_dist_begin = cutoff_begin * cutoff_begin * max_a / 2.0;
        let cutoff_end = goal.velocity / max_a;
        let cutoff_dist_end = cutoff_end * cutoff_end * max_a / 2.0;

        let full_trapezoid_dist =
            cutoff_dist_begin + (goal.position - current.position) + cutoff_dist_end;
        let mut acceleration_time = max_v / max_a;
        let mut full_speed_dist = full_trapezoid_dist - acceleration_time * acceleration_time * max_a;

        // Triangle profile
        if full_speed_dist < 0.0 {
            acceleration_time = (full_trapezoid_dist / max_a).sqrt();
            full_speed_dist = 0.0;
        }

        self.end_accel = acceleration_time - cutoff_begin;
        self.end_full_speed = self.end_accel + full_speed_dist / max_v;
        self.end_decel = self.end_full_speed + acceleration_time - cutoff_end;

        let result = if t < self.end_accel {
            State::new(
                current.position + (current.velocity + t * max_a / 2.0) * t,
                current.velocity + t * max_a,
            )
        } else if t < self.end_full_speed {
            State::new(
                current.position
                    + (current.velocity + self.end_accel * max_a / 2.0) * self.end_accel
                    + max_v * (t - self.end_accel),
                max_v,
            )
        } else if t <= self.end_decel {
            let time_left = self.end_decel - t;
            State::new(
                goal.position - (goal.velocity + time_left * max_a / 2.0) * time_left,
                goal.velocity + time_left * max_a,
            )
        } else {
            goal
        };

        self.direct(result)
    }

    /// Duration of the most recently calculated profile (seconds).
    pub fn total_time(&self) -> f64 {
        self.end_decel
    }

    /// Returns true if `t` is at or past the end of the profile.
    pub fn is_finished(&self, t: f64) -> bool {
        t >= self.total_time()
    }

    #[inline]
    fn direct(&self, state: State) -> State {
        State::new(state.position * self.direction, state.velocity * self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_trapezoid_total_time() {
        // 1 s up to 1 m/s (0.5 m), 2 s cruise (2 m), 1 s down (0.5 m)
        let mut profile = TrapezoidProfile::new(Constraints::new(1.0, 1.0));
        profile.calculate(0.0, State::default(), State::new(3.0, 0.0));

        assert_relative_eq!(profile.total_time(), 4.0, epsilon = 1e-12);
        assert!(!profile.is_finished(3.9));
        assert!(profile.is_finished(4.0));
    }

    #[test]
    fn test_phases() {
        let mut profile = TrapezoidProfile::new(Constraints::new(1.0, 1.0));
        let goal = State::new(3.0, 0.0);

        let accel = profile.calculate(0.5, State::default(), goal);
        assert_relative_eq!(accel.velocity, 0.5, epsilon = 1e-12);
        assert_relative_eq!(accel.position, 0.125, epsilon = 1e-12);

        let cruise = profile.calculate(2.0, State::default(), goal);
        assert_relative_eq!(cruise.velocity, 1.0, epsilon = 1e-12);
        assert_relative_eq!(cruise.position, 1.5, epsilon = 1e-12);

        let decel = profile.calculate(3.5, State::default(), goal);
        assert_relative_eq!(decel.velocity, 0.5, epsilon = 1e-12);
        assert_relative_eq!(decel.position, 2.875, epsilon = 1e-12);

        let done = profile.calculate(10.0, State::default(), goal);
        assert_eq!(done, goal);
    }

    #[test]
    fn test_triangle_profile() {
        // 1 m with 1 m/s² never reaches 10 m/s: peak at t = 1 s
        let mut profile = TrapezoidProfile::new(Constraints::new(10.0, 1.0));
        let peak = profile.calculate(1.0, State::default(), State::new(1.0, 0.0));

        assert_relative_eq!(profile.total_time(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(peak.velocity, 1.0, epsilon = 1e-12);
        assert_relative_eq!(peak.position, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_reverse_direction() {
        let mut profile = TrapezoidProfile::new(Constraints::new(1.0, 1.0));
        let state = profile.calculate(0.5, State::default(), State::new(-3.0, 0.0));

        assert_relative_eq!(state.velocity, -0.5, epsilon = 1e-12);
        assert_relative_eq!(state.position, -0.125, epsilon = 1e-12);
    }

    #[test]
    fn test_initial_velocity_clamped_to_max() {
        let mut profile = TrapezoidProfile::new(Constraints::new(1.0, 1.0));
        let state = profile.calculate(0.0, State::new(0.0, 5.0), State::new(10.0, 0.0));
        assert_relative_eq!(state.velocity, 1.0, epsilon = 1e-12);
    }
}
