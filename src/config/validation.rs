//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::kinematics::KinematicsConfig;

use super::{AxisConfig, AxisResolution, McuConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Tick frequency is finite and positive
/// - Every axis has a usable step geometry
/// - Delta towers have a positive arm length
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_mcu(&config.mcu)?;

    for (_name, axis) in config.axes.iter() {
        validate_axis(axis)?;
    }

    Ok(())
}

fn validate_mcu(mcu: &McuConfig) -> Result<()> {
    if !is_positive(mcu.tick_frequency) {
        return Err(Error::Config(ConfigError::InvalidTickFrequency(
            mcu.tick_frequency,
        )));
    }
    Ok(())
}

/// Validate a single axis configuration.
pub fn validate_axis(config: &AxisConfig) -> Result<()> {
    if !is_positive(config.rotation_distance.0) {
        return Err(Error::Config(ConfigError::InvalidRotationDistance(
            config.rotation_distance.0,
        )));
    }

    if config.full_steps_per_rotation == 0 {
        return Err(Error::Config(ConfigError::InvalidFullSteps(
            config.full_steps_per_rotation,
        )));
    }

    if !is_positive(config.gear_ratio) {
        return Err(Error::Config(ConfigError::InvalidGearRatio(config.gear_ratio)));
    }

    // Covers both the override and the derived value
    let step_distance = AxisResolution::from_config(config).step_distance.0;
    if !is_positive(step_distance) {
        return Err(Error::Config(ConfigError::InvalidStepDistance(step_distance)));
    }

    if let KinematicsConfig::Delta { arm_length, .. } = config.kinematics {
        if !is_positive(arm_length) {
            return Err(Error::Config(ConfigError::InvalidArmLength(arm_length)));
        }
    }

    Ok(())
}

#[inline]
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
