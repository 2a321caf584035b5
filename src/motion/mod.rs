//! Motion module for stepper-stepgen.
//!
//! Provides trajectory segments, the step-time root finder and the
//! per-segment step generator.

mod executor;
mod profile;
mod solver;

pub use executor::{StepExecutor, StepStats, MIN_SEEK_TIME, REVERSAL_NOISE, SEEK_TIME_RESET};
pub use profile::{Coord, Direction, MotionPhase, Move, MoveTiming};
pub use solver::{find_step, TimePos, CONVERGENCE_TIME, MAX_SOLVER_ITERATIONS};
