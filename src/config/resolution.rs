//! Step resolution derived from axis configuration.

use super::axis::AxisConfig;
use super::units::Millimeters;

/// Derived step geometry of one axis.
///
/// Computed once at initialization and handed to the step generator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisResolution {
    /// Microsteps per motor rotation (full steps × microsteps).
    pub steps_per_rotation: u32,

    /// Distance moved by one step.
    pub step_distance: Millimeters,

    /// Steps per unit of axis travel.
    pub steps_per_mm: f64,
}

impl AxisResolution {
    /// Compute the resolution of an axis.
    ///
    /// An explicit `step_distance` wins over the value derived from
    /// `rotation_distance / (full_steps × microsteps × gear_ratio)`.
    pub fn from_config(config: &AxisConfig) -> Self {
        let steps_per_rotation = config.steps_per_rotation();

        let step_distance = match config.step_distance {
            Some(d) => d,
            None => Millimeters(
                config.rotation_distance.0 / (steps_per_rotation as f64 * config.gear_ratio),
            ),
        };

        Self {
            steps_per_rotation,
            step_distance,
            steps_per_mm: 1.0 / step_distance.0,
        }
    }

    /// Convert a distance to a (fractional) number of steps.
    #[inline]
    pub fn mm_to_steps(&self, distance: Millimeters) -> f64 {
        distance.0 * self.steps_per_mm
    }

    /// Convert a number of steps to a distance.
    #[inline]
    pub fn steps_to_mm(&self, steps: i64) -> Millimeters {
        Millimeters(steps as f64 * self.step_distance.0)
    }
}
