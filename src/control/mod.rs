//! Feedback control.
//!
//! # Contents
//!
//! - [`PidController`]: Discrete PID with continuous input and integrator clamping
//! - [`TrapezoidProfile`]: Velocity/acceleration limited motion profile
//! - [`ProfiledPidController`]: PID whose setpoint follows a trapezoidal profile

mod pid;
mod profiled_pid;
mod trapezoid_profile;

pub use pid::{DEFAULT_PERIOD, PidController};
pub use profiled_pid::ProfiledPidController;
pub use trapezoid_profile::{Constraints, State, TrapezoidProfile};
