//! Cartesian kinematics: each stepper drives one axis directly.

use serde::Deserialize;

use crate::motion::Move;

use super::PositionSampler;

/// Cartesian axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

impl Axis {
    /// Parse an axis name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "x" | "X" => Some(Axis::X),
            "y" | "Y" => Some(Axis::Y),
            "z" | "Z" => Some(Axis::Z),
            _ => None,
        }
    }
}

/// Stepper bound to a single cartesian axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartesianKinematics {
    axis: Axis,
}

impl CartesianKinematics {
    /// Create kinematics for `axis`.
    pub const fn new(axis: Axis) -> Self {
        Self { axis }
    }

    /// Driven axis.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }
}

impl PositionSampler for CartesianKinematics {
    fn position(&self, m: &Move, move_time: f64) -> f64 {
        let c = m.coord_at(move_time);
        match self.axis {
            Axis::X => c.x,
            Axis::Y => c.y,
            Axis::Z => c.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Coord;

    #[test]
    fn test_axis_parse() {
        assert_eq!(Axis::parse("x"), Some(Axis::X));
        assert_eq!(Axis::parse("Y"), Some(Axis::Y));
        assert_eq!(Axis::parse("z"), Some(Axis::Z));
        assert_eq!(Axis::parse("e"), None);
    }

    #[test]
    fn test_axis_selection() {
        let m = Move::constant_velocity(
            0.0,
            1.0,
            Coord::new(1.0, 2.0, 3.0),
            Coord::new(0.0, 1.0, 0.0),
            4.0,
        );
        assert_eq!(CartesianKinematics::new(Axis::X).position(&m, 0.5), 1.0);
        assert_eq!(CartesianKinematics::new(Axis::Y).position(&m, 0.5), 4.0);
        assert_eq!(CartesianKinematics::new(Axis::Z).position(&m, 0.5), 3.0);
    }
}
