//! Sink module for stepper-stepgen.
//!
//! The step generator reports its results through a [`StepSink`]: an ordered
//! stream of step times and direction changes grouped into one batch per
//! segment. [`StepQueue`] is a fixed-capacity implementation that converts
//! times to integer clock ticks.

mod queue;

pub use queue::{QueueBatch, StepEvent, StepQueue};

use crate::motion::Direction;

/// Receiver of step events for one axis.
///
/// Calls for one axis arrive from a single thread in time order. Sinks shared
/// between axes must serialize internally.
pub trait StepSink {
    /// Failure reported by `append` or `set_direction`.
    type Error;

    /// Handle for the events of one segment.
    type Batch;

    /// Direction the next step will be taken in.
    fn current_direction(&self) -> Direction;

    /// Ticks per second of the sink's clock.
    fn tick_frequency(&self) -> f64;

    /// Open a batch for a segment starting at `start_time` (seconds).
    ///
    /// `rounding` is added to every tick value before it is truncated.
    fn begin_batch(&mut self, start_time: f64, rounding: f64) -> Self::Batch;

    /// Queue a step `ticks` after the batch start.
    fn append(&mut self, batch: &mut Self::Batch, ticks: f64) -> Result<(), Self::Error>;

    /// Queue a direction change ahead of the next step.
    fn set_direction(&mut self, batch: &mut Self::Batch, direction: Direction) -> Result<(), Self::Error>;

    /// Close a batch whose segment completed.
    fn finish_batch(&mut self, batch: Self::Batch);
}

impl<S: StepSink + ?Sized> StepSink for &mut S {
    type Error = S::Error;
    type Batch = S::Batch;

    #[inline]
    fn current_direction(&self) -> Direction {
        (**self).current_direction()
    }

    #[inline]
    fn tick_frequency(&self) -> f64 {
        (**self).tick_frequency()
    }

    #[inline]
    fn begin_batch(&mut self, start_time: f64, rounding: f64) -> Self::Batch {
        (**self).begin_batch(start_time, rounding)
    }

    #[inline]
    fn append(&mut self, batch: &mut Self::Batch, ticks: f64) -> Result<(), Self::Error> {
        (**self).append(batch, ticks)
    }

    #[inline]
    fn set_direction(&mut self, batch: &mut Self::Batch, direction: Direction) -> Result<(), Self::Error> {
        (**self).set_direction(batch, direction)
    }

    #[inline]
    fn finish_batch(&mut self, batch: Self::Batch) {
        (**self).finish_batch(batch)
    }
}
