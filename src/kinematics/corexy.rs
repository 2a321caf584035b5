//! CoreXY and CoreXZ kinematics.

use serde::Deserialize;

use crate::motion::Move;

use super::PositionSampler;

/// Which motor of a core belt pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CoreStepper {
    /// Sum of the two axes.
    Plus,
    /// Difference of the two axes.
    Minus,
}

impl CoreStepper {
    /// Parse a stepper type: `+`/`plus` or `-`/`minus`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "+" | "plus" | "Plus" | "PLUS" => Some(CoreStepper::Plus),
            "-" | "minus" | "Minus" | "MINUS" => Some(CoreStepper::Minus),
            _ => None,
        }
    }

    #[inline]
    fn combine(self, a: f64, b: f64) -> f64 {
        match self {
            CoreStepper::Plus => a + b,
            CoreStepper::Minus => a - b,
        }
    }
}

/// CoreXY: motors drive `x + y` and `x - y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreXYKinematics {
    stepper: CoreStepper,
}

impl CoreXYKinematics {
    /// Create kinematics for one CoreXY motor.
    pub const fn new(stepper: CoreStepper) -> Self {
        Self { stepper }
    }
}

impl PositionSampler for CoreXYKinematics {
    fn position(&self, m: &Move, move_time: f64) -> f64 {
        let c = m.coord_at(move_time);
        self.stepper.combine(c.x, c.y)
    }
}

/// CoreXZ: motors drive `x + z` and `x - z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreXZKinematics {
    stepper: CoreStepper,
}

impl CoreXZKinematics {
    /// Create kinematics for one CoreXZ motor.
    pub const fn new(stepper: CoreStepper) -> Self {
        Self { stepper }
    }
}

impl PositionSampler for CoreXZKinematics {
    fn position(&self, m: &Move, move_time: f64) -> f64 {
        let c = m.coord_at(move_time);
        self.stepper.combine(c.x, c.z)
    }
}
