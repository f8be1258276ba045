//! Core foundation layer.
//!
//! This is the bottom layer of the stack with no internal dependencies.
//! All other layers depend on core.
//!
//! # Contents
//!
//! - [`types`]: Core data types (poses, transforms, twists)
//! - [`math`]: Mathematical primitives (angle normalization, interpolation)
//! - [`clock`]: Injected monotonic time sources

pub mod clock;
pub mod math;
pub mod types;
