//! Step generation over one trajectory segment.
//!
//! [`StepExecutor`] walks a segment (or a time range of it), keeping a
//! search bracket ahead of the last emitted step. Each pass either widens
//! the bracket, resolves a direction change, or hands the bracket to
//! [`find_step`] and emits the resulting step to the sink.

use libm::fabs;

use crate::kinematics::PositionSampler;
use crate::sink::StepSink;

use super::profile::{Direction, Move};
use super::solver::{find_step, TimePos};

/// Initial bracket growth step, in seconds.
pub const SEEK_TIME_RESET: f64 = 0.000_100;

/// Smallest bracket growth step carried over from the previous step interval.
pub const MIN_SEEK_TIME: f64 = 0.000_000_001;

/// Margin past the half-step that a reversal must clear to count.
pub const REVERSAL_NOISE: f64 = 0.000_000_001;

/// Summary of a completed segment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepStats {
    /// Steps emitted.
    pub steps: u32,
    /// Direction changes emitted.
    pub direction_changes: u32,
    /// Position committed by the last step (or the start position if none).
    pub end_position: f64,
}

/// What the next pass of the loop has to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    /// Compare the bracket against the last step and maybe emit one.
    Evaluate,
    /// Push `high` further into the segment.
    Widen,
}

/// Runtime state while stepping through one segment.
#[derive(Debug, Clone)]
pub struct StepExecutor {
    half_step: f64,
    last: TimePos,
    low: TimePos,
    high: TimePos,
    seek_time_delta: f64,
    direction: Direction,
    stats: StepStats,
}

impl StepExecutor {
    /// Create an executor starting at `position` (time zero of the segment).
    pub fn new(step_distance: f64, position: f64, direction: Direction) -> Self {
        let last = TimePos::new(0.0, position);
        Self {
            half_step: 0.5 * step_distance,
            last,
            low: last,
            high: last,
            seek_time_delta: SEEK_TIME_RESET,
            direction,
            stats: StepStats {
                end_position: position,
                ..StepStats::default()
            },
        }
    }

    /// Current stepping direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Counts so far.
    #[inline]
    pub fn stats(&self) -> StepStats {
        self.stats
    }

    /// Generate every step in `m`, appending them to `batch`.
    ///
    /// Stops at the first sink failure and returns it unchanged.
    pub fn run<K, S>(
        &mut self,
        kinematics: &K,
        sink: &mut S,
        batch: &mut S::Batch,
        m: &Move,
    ) -> Result<StepStats, S::Error>
    where
        K: PositionSampler + ?Sized,
        S: StepSink + ?Sized,
    {
        self.run_range(kinematics, sink, batch, m, 0.0, m.duration())
    }

    /// Generate the steps of `m` between `start` and `end`.
    ///
    /// Times are relative to the segment start and clamped to the segment.
    /// The search restarts at `start` from the executor's current position,
    /// so consecutive ranges on one executor continue where the last ended.
    pub fn run_range<K, S>(
        &mut self,
        kinematics: &K,
        sink: &mut S,
        batch: &mut S::Batch,
        m: &Move,
        start: f64,
        end: f64,
    ) -> Result<StepStats, S::Error>
    where
        K: PositionSampler + ?Sized,
        S: StepSink + ?Sized,
    {
        let start = start.max(0.0);
        let end = end.min(m.duration());
        self.last = TimePos::new(start, self.last.position);
        self.low = self.last;
        self.high = self.last;
        self.seek_time_delta = SEEK_TIME_RESET;

        let tick_frequency = sink.tick_frequency();
        let mut pass = Pass::Evaluate;

        loop {
            if pass == Pass::Widen {
                if self.high.time >= end {
                    break;
                }
                self.widen(kinematics, m, end);
                pass = Pass::Evaluate;
                continue;
            }

            let dist = self.high.position - self.last.position;
            if fabs(dist) < self.half_step {
                pass = Pass::Widen;
                continue;
            }

            let next_direction = Direction::from_distance(dist);
            if next_direction != self.direction {
                if fabs(dist) < self.half_step + REVERSAL_NOISE {
                    // Not past the midpoint yet
                    pass = Pass::Widen;
                    continue;
                }
                if self.last.time >= self.low.time && self.high.time > self.last.time {
                    // Shrink toward the last step so it is not found again
                    let time = 0.5 * (self.last.time + self.high.time);
                    self.high = TimePos::sample(kinematics, m, time);
                    continue;
                }
                sink.set_direction(batch, next_direction)?;
                self.direction = next_direction;
                self.stats.direction_changes += 1;
            }

            let offset = self.direction.sign() * self.half_step;
            let target = self.last.position + offset;
            let next = find_step(kinematics, m, self.low, self.high, target);
            sink.append(batch, next.time * tick_frequency)?;
            self.stats.steps += 1;

            self.seek_time_delta = (next.time - self.last.time).max(MIN_SEEK_TIME);
            self.last = TimePos::new(next.time, target + offset);
            self.low = next;
            if self.last.time >= self.high.time {
                pass = Pass::Widen;
            }
        }

        self.stats.end_position = self.last.position;
        Ok(self.stats)
    }

    fn widen<K: PositionSampler + ?Sized>(&mut self, kinematics: &K, m: &Move, end: f64) {
        self.low = self.high;
        let time = (self.last.time + self.seek_time_delta).min(end);
        self.seek_time_delta += self.seek_time_delta;
        self.high = TimePos::sample(kinematics, m, time);
    }
}
