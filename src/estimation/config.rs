//! Pose estimator configuration.
//!
//! Loaded from TOML; every field has a default so a partial file (or none
//! at all) is valid.
//!
//! ```toml
//! state_std_devs = [0.05, 0.05, 0.02]
//! vision_std_devs = [0.5, 0.5, 0.8]
//! buffer_duration = 1.5
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EstimatorError, Result};

/// Default odometry pose history kept for late vision measurements (seconds).
pub const DEFAULT_BUFFER_DURATION: f64 = 1.5;

/// Configuration for [`PoseEstimator`](super::PoseEstimator).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Odometry standard deviations [x (m), y (m), heading (rad)].
    /// Larger values trust odometry less.
    pub state_std_devs: [f64; 3],
    /// Vision standard deviations [x (m), y (m), heading (rad)].
    /// Larger values trust vision less.
    pub vision_std_devs: [f64; 3],
    /// How far back vision measurements may reach (seconds).
    pub buffer_duration: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            state_std_devs: [0.1, 0.1, 0.1],
            vision_std_devs: [0.9, 0.9, 0.9],
            buffer_duration: DEFAULT_BUFFER_DURATION,
        }
    }
}

impl EstimatorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: EstimatorConfig = basic_toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        log::info!("Loaded estimator config from {}", path.display());
        Ok(config)
    }

    /// Check that every value is usable.
    ///
    /// Standard deviations must be finite and non-negative; the buffer
    /// duration must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        check_std_devs("state_std_devs", &self.state_std_devs)?;
        check_std_devs("vision_std_devs", &self.vision_std_devs)?;

        if !self.buffer_duration.is_finite() || self.buffer_duration < 0.0 {
            return Err(EstimatorError::InvalidParameter(format!(
                "buffer_duration must be a non-negative number of seconds, got {}",
                self.buffer_duration
            )));
        }
        Ok(())
    }
}

fn check_std_devs(name: &str, values: &[f64; 3]) -> Result<()> {
    const AXES: [&str; 3] = ["x", "y", "heading"];

    for (axis, value) in AXES.iter().zip(values) {
        if !value.is_finite() || *value < 0.0 {
            return Err(EstimatorError::InvalidParameter(format!(
                "{}[{}] must be finite and non-negative, got {}",
                name, axis, value
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EstimatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.buffer_duration, 1.5);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EstimatorConfig::from_toml("vision_std_devs = [0.5, 0.5, 1.0]").unwrap();

        assert_eq!(config.vision_std_devs, [0.5, 0.5, 1.0]);
        assert_eq!(config.state_std_devs, [0.1, 0.1, 0.1]);
        assert_eq!(config.buffer_duration, DEFAULT_BUFFER_DURATION);
    }

    #[test]
    fn test_full_toml() {
        let toml = r#"
            state_std_devs = [0.05, 0.05, 0.02]
            vision_std_devs = [0.5, 0.5, 0.8]
            buffer_duration = 0.75
        "#;
        let config = EstimatorConfig::from_toml(toml).unwrap();

        assert_eq!(config.state_std_devs, [0.05, 0.05, 0.02]);
        assert_eq!(config.buffer_duration, 0.75);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = EstimatorConfig::from_toml("state_std_devs = \"wide\"").unwrap_err();
        assert!(matches!(err, EstimatorError::Config(_)));
    }

    #[test]
    fn test_negative_std_dev_rejected() {
        let err = EstimatorConfig::from_toml("state_std_devs = [0.1, -0.1, 0.1]").unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidParameter(_)));
        assert!(err.to_string().contains("state_std_devs[y]"));
    }

    #[test]
    fn test_negative_buffer_duration_rejected() {
        let config = EstimatorConfig {
            buffer_duration: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EstimatorConfig::from_file(Path::new("/nonexistent/drishti.toml")).unwrap_err();
        assert!(matches!(err, EstimatorError::Io(_)));
    }
}
