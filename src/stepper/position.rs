//! Commanded position tracking for stepper axes.

use libm::round;

/// Continuous commanded position of one axis.
///
/// The position is kept in the axis' own units (not steps). It only changes
/// when a segment completes or when set explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisPosition {
    commanded: f64,
    step_distance: f64,
}

impl AxisPosition {
    /// Create a tracker at position zero.
    #[inline]
    pub fn new(step_distance: f64) -> Self {
        Self::at(0.0, step_distance)
    }

    /// Create a tracker at a specific position.
    #[inline]
    pub fn at(commanded: f64, step_distance: f64) -> Self {
        Self {
            commanded,
            step_distance,
        }
    }

    /// Commanded position.
    #[inline]
    pub fn commanded(&self) -> f64 {
        self.commanded
    }

    /// Overwrite the commanded position.
    #[inline]
    pub fn set_commanded(&mut self, position: f64) {
        self.commanded = position;
    }

    /// Distance of one step.
    #[inline]
    pub fn step_distance(&self) -> f64 {
        self.step_distance
    }

    /// Change the distance of one step.
    #[inline]
    pub fn set_step_distance(&mut self, step_distance: f64) {
        self.step_distance = step_distance;
    }

    /// Commanded position as a whole number of steps from zero.
    #[inline]
    pub fn steps(&self) -> i64 {
        round(self.commanded / self.step_distance) as i64
    }
}
