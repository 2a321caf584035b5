//! Kinematics module for stepper-stepgen.
//!
//! A kinematic topology maps a segment's cartesian path onto the position of
//! one stepper axis. The step generator only sees the [`PositionSampler`]
//! trait, so any topology (or a plain closure) can drive it.

mod cartesian;
mod corexy;
mod delta;

pub use cartesian::{Axis, CartesianKinematics};
pub use corexy::{CoreStepper, CoreXYKinematics, CoreXZKinematics};
pub use delta::DeltaKinematics;

use serde::Deserialize;

use crate::motion::Move;

/// Axis position as a function of time within a segment.
///
/// Implementations must be pure and continuous over the segment.
pub trait PositionSampler {
    /// Position of the axis at `move_time` seconds into `m`.
    fn position(&self, m: &Move, move_time: f64) -> f64;
}

impl<F> PositionSampler for F
where
    F: Fn(&Move, f64) -> f64,
{
    #[inline]
    fn position(&self, m: &Move, move_time: f64) -> f64 {
        self(m, move_time)
    }
}

/// Kinematic topology selection from TOML.
///
/// ```toml
/// [axes.stepper_a.kinematics.corexy]
/// stepper = "plus"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KinematicsConfig {
    /// One stepper per cartesian axis.
    Cartesian {
        /// Driven axis.
        axis: Axis,
    },
    /// CoreXY belt arrangement.
    Corexy {
        /// Which of the two motors.
        stepper: CoreStepper,
    },
    /// CoreXZ belt arrangement.
    Corexz {
        /// Which of the two motors.
        stepper: CoreStepper,
    },
    /// Linear delta tower.
    Delta {
        /// Diagonal rod length.
        arm_length: f64,
        /// Tower X location.
        tower_x: f64,
        /// Tower Y location.
        tower_y: f64,
    },
}

/// Any of the built-in topologies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kinematics {
    /// See [`CartesianKinematics`].
    Cartesian(CartesianKinematics),
    /// See [`CoreXYKinematics`].
    CoreXY(CoreXYKinematics),
    /// See [`CoreXZKinematics`].
    CoreXZ(CoreXZKinematics),
    /// See [`DeltaKinematics`].
    Delta(DeltaKinematics),
}

impl Kinematics {
    /// Build the topology described by `config`.
    pub fn from_config(config: &KinematicsConfig) -> Self {
        match *config {
            KinematicsConfig::Cartesian { axis } => Self::Cartesian(CartesianKinematics::new(axis)),
            KinematicsConfig::Corexy { stepper } => Self::CoreXY(CoreXYKinematics::new(stepper)),
            KinematicsConfig::Corexz { stepper } => Self::CoreXZ(CoreXZKinematics::new(stepper)),
            KinematicsConfig::Delta {
                arm_length,
                tower_x,
                tower_y,
            } => Self::Delta(DeltaKinematics::new(arm_length, tower_x, tower_y)),
        }
    }
}

impl PositionSampler for Kinematics {
    fn position(&self, m: &Move, move_time: f64) -> f64 {
        match self {
            Kinematics::Cartesian(k) => k.position(m, move_time),
            Kinematics::CoreXY(k) => k.position(m, move_time),
            Kinematics::CoreXZ(k) => k.position(m, move_time),
            Kinematics::Delta(k) => k.position(m, move_time),
        }
    }
}
