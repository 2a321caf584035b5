//! Trajectory segments.
//!
//! A [`Move`] is a straight-line trapezoidal segment: an acceleration phase,
//! a cruise phase and a deceleration phase along a fixed unit direction.
//! The step generator never looks inside it; only position samplers do.

use libm::sqrt;

/// Direction of stepping along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Increasing position.
    #[default]
    Forward,
    /// Decreasing position.
    Reverse,
}

impl Direction {
    /// Direction of a signed displacement.
    ///
    /// Only a strictly positive displacement is forward; zero (of either
    /// sign) counts as reverse.
    #[inline]
    pub fn from_distance(distance: f64) -> Self {
        if distance > 0.0 {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Reverse => -1.0,
        }
    }

    /// Whether this is the forward direction.
    #[inline]
    pub fn is_forward(self) -> bool {
        self == Direction::Forward
    }

    /// The opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

impl From<bool> for Direction {
    fn from(forward: bool) -> Self {
        if forward {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }
}

/// Current phase of a segment at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    /// Velocity changing from `start_v` toward `cruise_v`.
    Accelerating,
    /// Constant velocity.
    Cruising,
    /// Velocity falling from `cruise_v`.
    Decelerating,
    /// Past the end of the segment.
    Complete,
}

/// Cartesian coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Coord {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Coord {
    /// Create a new coordinate.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length.
    #[inline]
    pub fn length(&self) -> f64 {
        sqrt(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Scale every component.
    #[inline]
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

/// Phase durations and rates of a trapezoidal segment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveTiming {
    /// Acceleration phase duration.
    pub accel_t: f64,
    /// Cruise phase duration.
    pub cruise_t: f64,
    /// Deceleration phase duration.
    pub decel_t: f64,
    /// Velocity at the start of the segment.
    pub start_v: f64,
    /// Velocity during the cruise phase.
    pub cruise_v: f64,
    /// Acceleration magnitude (same for both ramps).
    pub accel: f64,
}

/// Distance polynomial `(c1 + c2 * t) * t` for a ramp phase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Ramp {
    c1: f64,
    c2: f64,
}

impl Ramp {
    #[inline]
    fn distance(&self, t: f64) -> f64 {
        (self.c1 + self.c2 * t) * t
    }
}

/// A trapezoidal trajectory segment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Move {
    /// Absolute time at which the segment starts.
    pub print_time: f64,
    /// Total duration of the segment.
    pub move_t: f64,
    /// Acceleration phase duration.
    pub accel_t: f64,
    /// Cruise phase duration.
    pub cruise_t: f64,
    /// Start position.
    pub start_pos: Coord,
    /// Unit direction of travel (zero for a stationary segment).
    pub axes_r: Coord,
    cruise_v: f64,
    cruise_start_d: f64,
    decel_start_d: f64,
    accel: Ramp,
    decel: Ramp,
}

impl Move {
    /// Create a trapezoidal segment.
    ///
    /// `axes_d` is the full displacement of the segment; only its direction
    /// is kept; the distance actually travelled is defined by `timing`.
    pub fn trapezoid(print_time: f64, start_pos: Coord, axes_d: Coord, timing: MoveTiming) -> Self {
        let move_d = axes_d.length();
        let axes_r = if move_d > 0.0 {
            axes_d.scale(1.0 / move_d)
        } else {
            Coord::default()
        };

        let accel = Ramp {
            c1: timing.start_v,
            c2: 0.5 * timing.accel,
        };
        let decel = Ramp {
            c1: timing.cruise_v,
            c2: -0.5 * timing.accel,
        };
        let cruise_start_d = accel.distance(timing.accel_t);
        let decel_start_d = cruise_start_d + timing.cruise_t * timing.cruise_v;

        Self {
            print_time,
            move_t: timing.accel_t + timing.cruise_t + timing.decel_t,
            accel_t: timing.accel_t,
            cruise_t: timing.cruise_t,
            start_pos,
            axes_r,
            cruise_v: timing.cruise_v,
            cruise_start_d,
            decel_start_d,
            accel,
            decel,
        }
    }

    /// Create a segment travelling at a constant velocity.
    pub fn constant_velocity(
        print_time: f64,
        duration: f64,
        start_pos: Coord,
        axes_d: Coord,
        velocity: f64,
    ) -> Self {
        Self::trapezoid(
            print_time,
            start_pos,
            axes_d,
            MoveTiming {
                cruise_t: duration,
                start_v: velocity,
                cruise_v: velocity,
                ..MoveTiming::default()
            },
        )
    }

    /// Create a zero-duration, zero-velocity segment sitting at `pos`.
    pub fn at_rest(print_time: f64, pos: Coord) -> Self {
        Self::trapezoid(print_time, pos, Coord::default(), MoveTiming::default())
    }

    /// Absolute start time.
    #[inline]
    pub fn start_time(&self) -> f64 {
        self.print_time
    }

    /// Duration of the segment.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.move_t
    }

    /// Distance travelled along `axes_r` at `move_time` into the segment.
    pub fn distance_at(&self, move_time: f64) -> f64 {
        if move_time < self.accel_t {
            return self.accel.distance(move_time);
        }
        let t = move_time - self.accel_t;
        if t <= self.cruise_t {
            return self.cruise_start_d + self.cruise_v * t;
        }
        self.decel_start_d + self.decel.distance(t - self.cruise_t)
    }

    /// Cartesian position at `move_time` into the segment.
    pub fn coord_at(&self, move_time: f64) -> Coord {
        let d = self.distance_at(move_time);
        Coord::new(
            self.start_pos.x + self.axes_r.x * d,
            self.start_pos.y + self.axes_r.y * d,
            self.start_pos.z + self.axes_r.z * d,
        )
    }

    /// Phase of the segment at `move_time`.
    pub fn phase_at(&self, move_time: f64) -> MotionPhase {
        if move_time >= self.move_t {
            MotionPhase::Complete
        } else if move_time < self.accel_t {
            MotionPhase::Accelerating
        } else if move_time < self.accel_t + self.cruise_t {
            MotionPhase::Cruising
        } else {
            MotionPhase::Decelerating
        }
    }
}
