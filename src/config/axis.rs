//! Axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

use crate::kinematics::{Kinematics, KinematicsConfig};

use super::units::{Microsteps, Millimeters};

/// Complete configuration of one stepper axis.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Kinematic topology the axis belongs to.
    pub kinematics: KinematicsConfig,

    /// Distance travelled per full motor rotation.
    pub rotation_distance: Millimeters,

    /// Full steps per motor rotation (200 for 1.8° motors).
    #[serde(default = "default_full_steps")]
    pub full_steps_per_rotation: u16,

    /// Microstep setting of the driver.
    #[serde(default)]
    pub microsteps: Microsteps,

    /// Gear ratio (output:input, e.g. 3.0 means 3:1 reduction).
    #[serde(default = "default_gear_ratio")]
    pub gear_ratio: f64,

    /// Explicit step distance, overriding the derived one.
    #[serde(default)]
    pub step_distance: Option<Millimeters>,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_dir: bool,
}

fn default_full_steps() -> u16 {
    200
}

fn default_gear_ratio() -> f64 {
    1.0
}

impl AxisConfig {
    /// Microsteps per motor rotation.
    pub fn steps_per_rotation(&self) -> u32 {
        self.full_steps_per_rotation as u32 * self.microsteps.value() as u32
    }

    /// Build the configured kinematic topology.
    pub fn build_kinematics(&self) -> Kinematics {
        Kinematics::from_config(&self.kinematics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::Axis;

    #[test]
    fn test_steps_per_rotation() {
        let config = AxisConfig {
            name: String::try_from("x").unwrap(),
            kinematics: KinematicsConfig::Cartesian { axis: Axis::X },
            rotation_distance: Millimeters(40.0),
            full_steps_per_rotation: 200,
            microsteps: Microsteps::SIXTEENTH,
            gear_ratio: 1.0,
            step_distance: None,
            invert_dir: false,
        };

        assert_eq!(config.steps_per_rotation(), 3200);
        assert!(matches!(config.build_kinematics(), Kinematics::Cartesian(_)));
    }
}
