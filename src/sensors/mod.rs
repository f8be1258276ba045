//! Sensor processing layer.
//!
//! # Contents
//!
//! - [`odometry`]: Wheel odometry and dead-reckoning pose sources

pub mod odometry;
