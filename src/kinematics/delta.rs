//! Linear delta tower kinematics.

use libm::sqrt;

use crate::motion::Move;

use super::PositionSampler;

/// Carriage height on one delta tower.
///
/// Positions outside the reachable radius have no real solution and sample
/// as NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaKinematics {
    arm2: f64,
    tower_x: f64,
    tower_y: f64,
}

impl DeltaKinematics {
    /// Create kinematics for a tower at (`tower_x`, `tower_y`).
    pub fn new(arm_length: f64, tower_x: f64, tower_y: f64) -> Self {
        Self {
            arm2: arm_length * arm_length,
            tower_x,
            tower_y,
        }
    }
}

impl PositionSampler for DeltaKinematics {
    fn position(&self, m: &Move, move_time: f64) -> f64 {
        let c = m.coord_at(move_time);
        let dx = self.tower_x - c.x;
        let dy = self.tower_y - c.y;
        sqrt(self.arm2 - dx * dx - dy * dy) + c.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Coord;

    #[test]
    fn test_over_tower() {
        let kin = DeltaKinematics::new(250.0, 0.0, 100.0);
        let m = Move::at_rest(0.0, Coord::new(0.0, 100.0, 5.0));
        assert!((kin.position(&m, 0.0) - 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset() {
        let kin = DeltaKinematics::new(5.0, 0.0, 0.0);
        let m = Move::at_rest(0.0, Coord::new(3.0, 0.0, 1.0));
        assert!((kin.position(&m, 0.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_unreachable_is_nan() {
        let kin = DeltaKinematics::new(1.0, 0.0, 0.0);
        let m = Move::at_rest(0.0, Coord::new(3.0, 0.0, 0.0));
        assert!(kin.position(&m, 0.0).is_nan());
    }
}
