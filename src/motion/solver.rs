//! Step-time root finding.
//!
//! Locates the time at which a sampled trajectory crosses a target position
//! using false position (regula falsi). The bracket is updated so that it
//! always straddles the target, which keeps the search convergent on
//! non-linear trajectories where a plain secant iteration could wander off.

use libm::fabs;

use crate::kinematics::PositionSampler;

use super::profile::Move;

/// Two successive guesses closer than this (in seconds) end the search.
pub const CONVERGENCE_TIME: f64 = 0.000_000_001;

/// Upper bound on sampler evaluations for a single step.
pub const MAX_SOLVER_ITERATIONS: u32 = 1_000;

/// A sampled point on a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimePos {
    /// Time into the segment.
    pub time: f64,
    /// Axis position at `time`.
    pub position: f64,
}

impl TimePos {
    /// Create a new sample.
    #[inline]
    pub const fn new(time: f64, position: f64) -> Self {
        Self { time, position }
    }

    /// Sample `kinematics` at `time`.
    #[inline]
    pub fn sample<K: PositionSampler + ?Sized>(kinematics: &K, m: &Move, time: f64) -> Self {
        Self::new(time, kinematics.position(m, time))
    }
}

/// Find the time in `[low.time, high.time]` at which the trajectory reaches `target`.
///
/// Returns `high` unchanged when it already sits exactly on the target. When
/// `low` and `high` lie on the same side of the target the range holds no
/// crossing and `(low.time, target)` is returned as a clamped result.
///
/// A non-finite sample ends the search at the last finite guess.
pub fn find_step<K: PositionSampler + ?Sized>(
    kinematics: &K,
    m: &Move,
    low: TimePos,
    high: TimePos,
    target: f64,
) -> TimePos {
    let mut best_guess = high;
    let mut low = TimePos::new(low.time, low.position - target);
    let mut high = TimePos::new(high.time, high.position - target);
    if high.position == 0.0 {
        return best_guess;
    }
    // Zero offsets count as non-negative on both ends.
    let high_below = high.position < 0.0;
    if high_below == (low.position < 0.0) {
        return TimePos::new(low.time, target);
    }

    for _ in 0..MAX_SOLVER_ITERATIONS {
        let guess_time = (low.time * high.position - high.time * low.position)
            / (high.position - low.position);
        if !guess_time.is_finite() || fabs(guess_time - best_guess.time) <= CONVERGENCE_TIME {
            break;
        }
        let sample = TimePos::sample(kinematics, m, guess_time);
        if !sample.position.is_finite() {
            break;
        }
        best_guess = sample;
        let guess_offset = best_guess.position - target;
        if (guess_offset < 0.0) == high_below {
            high = TimePos::new(guess_time, guess_offset);
        } else {
            low = TimePos::new(guess_time, guess_offset);
        }
    }
    best_guess
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::profile::Coord;

    fn segment() -> Move {
        Move::at_rest(0.0, Coord::default())
    }

    #[test]
    fn test_linear_exact() {
        let kin = |_: &Move, t: f64| 10.0 * t;
        let m = segment();
        let low = TimePos::sample(&kin, &m, 0.0);
        let high = TimePos::sample(&kin, &m, 1.0);

        let step = find_step(&kin, &m, low, high, 2.5);
        assert!((step.time - 0.25).abs() < 1e-12);
        assert!((step.position - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_high_is_exact_hit() {
        let kin = |_: &Move, t: f64| 4.0 * t;
        let m = segment();
        let low = TimePos::new(0.0, 0.0);
        let high = TimePos::new(0.5, 2.0);

        assert_eq!(find_step(&kin, &m, low, high, 2.0), high);
    }

    #[test]
    fn test_not_bracketed_returns_low_time() {
        let kin = |_: &Move, t: f64| t;
        let m = segment();
        let low = TimePos::new(0.1, 0.1);
        let high = TimePos::new(0.2, 0.2);

        let step = find_step(&kin, &m, low, high, 5.0);
        assert_eq!(step, TimePos::new(0.1, 5.0));
    }

    #[test]
    fn test_low_exactly_on_target() {
        // A zero offset at `low` is non-negative, same side as a positive `high`.
        let kin = |_: &Move, t: f64| t;
        let m = segment();
        let step = find_step(&kin, &m, TimePos::new(0.3, 0.3), TimePos::new(0.6, 0.6), 0.3);
        assert_eq!(step, TimePos::new(0.3, 0.3));
    }

    #[test]
    fn test_nonlinear_converges() {
        let kin = |_: &Move, t: f64| t * t * t;
        let m = segment();
        let low = TimePos::sample(&kin, &m, 0.0);
        let high = TimePos::sample(&kin, &m, 2.0);

        let step = find_step(&kin, &m, low, high, 1.0);
        assert!((step.time - 1.0).abs() < 1e-6);
        assert!(step.time >= low.time && step.time <= high.time);
    }

    #[test]
    fn test_descending_bracket() {
        let kin = |_: &Move, t: f64| 1.0 - t * t;
        let m = segment();
        let low = TimePos::sample(&kin, &m, 0.0);
        let high = TimePos::sample(&kin, &m, 1.0);

        let step = find_step(&kin, &m, low, high, 0.75);
        assert!((step.time - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_sampler_terminates() {
        let kin = |_: &Move, t: f64| if t > 0.0 && t < 1.0 { f64::NAN } else { t - 0.5 };
        let m = segment();
        let low = TimePos::sample(&kin, &m, 0.0);
        let high = TimePos::sample(&kin, &m, 1.0);

        // Search stops inside the bracket at the last finite guess
        let step = find_step(&kin, &m, low, high, 0.0);
        assert!(step.time >= low.time && step.time <= high.time);
        assert!(step.position.is_finite());
    }
}
