//! Stepper axis: persistent per-axis state and the segment entry point.

use crate::error::{ConfigError, Error, Result};
use crate::kinematics::PositionSampler;
use crate::motion::{Coord, Move, StepExecutor, StepStats};
use crate::sink::StepSink;

use super::position::AxisPosition;

/// Rounding added to every step time when it is converted to clock ticks.
pub const STEP_CLOCK_ROUNDING: f64 = 0.5;

/// One physical stepper axis.
///
/// Generic over:
/// - `K`: position sampler for the machine's kinematic topology
/// - `S`: event sink receiving this axis' steps
/// - `H`: hook run after each completed segment (defaults to a plain `fn`)
///
/// Segments must be fed in non-decreasing time order, one at a time. The
/// commanded position advances only when a segment completes; a sink failure
/// leaves it where the segment started.
pub struct StepperAxis<K, S, H = fn(f64)> {
    /// Axis name for logging/debugging.
    name: heapless::String<32>,

    /// Commanded position and step distance.
    position: AxisPosition,

    /// Kinematic topology.
    kinematics: K,

    /// Bound event sink.
    sink: S,

    /// Runs after every successful segment with the new commanded position.
    post_hook: Option<H>,
}

impl<K, S, H> StepperAxis<K, S, H>
where
    K: PositionSampler,
    S: StepSink,
    H: FnMut(f64),
{
    pub(crate) fn new(
        name: heapless::String<32>,
        position: AxisPosition,
        kinematics: K,
        sink: S,
        post_hook: Option<H>,
    ) -> Self {
        Self {
            name,
            position,
            kinematics,
            sink,
            post_hook,
        }
    }

    /// Generate the steps of one segment into the bound sink.
    ///
    /// # Errors
    ///
    /// Returns the sink's error from the first `append` or `set_direction`
    /// that fails. The batch is left unfinished, the commanded position is
    /// unchanged and the post hook does not run.
    pub fn generate_steps(&mut self, m: &Move) -> core::result::Result<StepStats, S::Error> {
        self.generate_steps_range(m, 0.0, m.duration())
    }

    /// Generate the steps of the part of a segment between `start` and `end`.
    ///
    /// Times are seconds from the segment start and are clamped to the
    /// segment. Ranges of one segment must be fed in order and must not
    /// overlap; each one is its own batch and advances the commanded
    /// position on success.
    ///
    /// # Errors
    ///
    /// Same as [`generate_steps`](Self::generate_steps).
    pub fn generate_steps_range(
        &mut self,
        m: &Move,
        start: f64,
        end: f64,
    ) -> core::result::Result<StepStats, S::Error> {
        let mut batch = self.sink.begin_batch(m.start_time(), STEP_CLOCK_ROUNDING);
        let mut executor = StepExecutor::new(
            self.position.step_distance(),
            self.position.commanded(),
            self.sink.current_direction(),
        );

        let run = executor.run_range(&self.kinematics, &mut self.sink, &mut batch, m, start, end);
        let stats = match run {
            Ok(stats) => stats,
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "{}: sink failed after {} steps",
                    self.name.as_str(),
                    executor.stats().steps
                );
                return Err(e);
            }
        };

        self.sink.finish_batch(batch);
        self.position.set_commanded(stats.end_position);
        if let Some(hook) = self.post_hook.as_mut() {
            hook(stats.end_position);
        }

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "{}: {} steps, {} direction changes, position {}",
            self.name.as_str(),
            stats.steps,
            stats.direction_changes,
            stats.end_position
        );

        Ok(stats)
    }

    /// Bind a new sink and step distance, returning the previous sink.
    ///
    /// # Errors
    ///
    /// Returns an error (and keeps the current binding) if `step_distance`
    /// is not a finite positive number.
    pub fn bind_sink(&mut self, sink: S, step_distance: f64) -> Result<S> {
        validate_step_distance(step_distance)?;
        self.position.set_step_distance(step_distance);
        Ok(core::mem::replace(&mut self.sink, sink))
    }

    /// Axis position for a cartesian coordinate, without changing any state.
    pub fn calc_position_from_coord(&self, coord: Coord) -> f64 {
        let m = Move::at_rest(0.0, coord);
        self.kinematics.position(&m, 0.0)
    }

    /// Set the commanded position to match a cartesian coordinate.
    pub fn set_position(&mut self, coord: Coord) {
        let position = self.calc_position_from_coord(coord);
        self.position.set_commanded(position);
    }

    /// Replace the post-segment hook.
    pub fn set_post_hook(&mut self, hook: Option<H>) {
        self.post_hook = hook;
    }
}

impl<K, S, H> StepperAxis<K, S, H> {
    /// Get the axis name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Commanded position.
    #[inline]
    pub fn commanded_position(&self) -> f64 {
        self.position.commanded()
    }

    /// Force the commanded position, e.g. after homing.
    #[inline]
    pub fn set_commanded_position(&mut self, position: f64) {
        self.position.set_commanded(position);
    }

    /// Commanded position rounded to whole steps.
    #[inline]
    pub fn mcu_position(&self) -> i64 {
        self.position.steps()
    }

    /// Distance of one step.
    #[inline]
    pub fn step_distance(&self) -> f64 {
        self.position.step_distance()
    }

    /// Kinematic topology.
    #[inline]
    pub fn kinematics(&self) -> &K {
        &self.kinematics
    }

    /// Bound sink.
    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Bound sink, mutably (e.g. to drain events).
    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Take the axis apart.
    pub fn release(self) -> (K, S) {
        (self.kinematics, self.sink)
    }
}

pub(crate) fn validate_step_distance(step_distance: f64) -> Result<()> {
    if !step_distance.is_finite() || step_distance <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidStepDistance(step_distance)));
    }
    Ok(())
}
