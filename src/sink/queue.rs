//! Fixed-capacity step event queue.

use heapless::Vec;

use crate::error::SinkError;
use crate::motion::Direction;

use super::StepSink;

/// An event queued for the motor controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepEvent {
    /// Step at an absolute clock tick.
    Step {
        /// Absolute clock tick.
        clock: u64,
    },
    /// Following steps go in this direction.
    Direction(Direction),
}

/// Open batch on a [`StepQueue`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueBatch {
    clock_offset: f64,
}

impl QueueBatch {
    /// Tick value (before truncation) of the batch start.
    #[inline]
    pub fn clock_offset(&self) -> f64 {
        self.clock_offset
    }
}

/// Step queue holding up to `N` events.
///
/// Events of an open batch stay pending until [`finish_batch`] commits them.
/// A batch abandoned after a failed segment is dropped by the next
/// [`begin_batch`] (or [`discard_pending`]), which also restores the
/// direction and clock the queue had before it.
///
/// [`finish_batch`]: StepSink::finish_batch
/// [`begin_batch`]: StepSink::begin_batch
/// [`discard_pending`]: StepQueue::discard_pending
#[derive(Debug, Clone)]
pub struct StepQueue<const N: usize> {
    tick_frequency: f64,
    events: Vec<StepEvent, N>,
    committed: usize,
    direction: Direction,
    committed_direction: Direction,
    last_clock: u64,
    committed_last_clock: u64,
}

impl<const N: usize> StepQueue<N> {
    /// Create an empty queue whose next step is forward.
    pub fn new(tick_frequency: f64) -> Self {
        Self::with_direction(tick_frequency, Direction::Forward)
    }

    /// Create an empty queue whose next step goes in `direction`.
    pub fn with_direction(tick_frequency: f64, direction: Direction) -> Self {
        Self {
            tick_frequency,
            events: Vec::new(),
            committed: 0,
            direction,
            committed_direction: direction,
            last_clock: 0,
            committed_last_clock: 0,
        }
    }

    /// Committed events, oldest first.
    #[inline]
    pub fn events(&self) -> &[StepEvent] {
        &self.events[..self.committed]
    }

    /// Events of a batch that has not been finished.
    #[inline]
    pub fn pending(&self) -> &[StepEvent] {
        &self.events[self.committed..]
    }

    /// Number of committed events.
    #[inline]
    pub fn len(&self) -> usize {
        self.committed
    }

    /// Whether no events are committed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.committed == 0
    }

    /// Maximum number of events.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of committed step events.
    pub fn step_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, StepEvent::Step { .. }))
            .count()
    }

    /// Clock of the most recent step, pending or committed.
    #[inline]
    pub fn last_clock(&self) -> u64 {
        self.last_clock
    }

    /// Drop the events of an unfinished batch.
    ///
    /// Returns how many events were dropped.
    pub fn discard_pending(&mut self) -> usize {
        let dropped = self.events.len() - self.committed;
        if dropped > 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!("discarding {} events of an unfinished batch", dropped);
            self.events.truncate(self.committed);
        }
        self.direction = self.committed_direction;
        self.last_clock = self.committed_last_clock;
        dropped
    }

    /// Remove every event, pending ones included.
    ///
    /// Direction and last clock are kept so later steps stay ordered.
    pub fn clear(&mut self) {
        self.discard_pending();
        self.events.clear();
        self.committed = 0;
    }
}

impl<const N: usize> StepSink for StepQueue<N> {
    type Error = SinkError;
    type Batch = QueueBatch;

    #[inline]
    fn current_direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    fn tick_frequency(&self) -> f64 {
        self.tick_frequency
    }

    fn begin_batch(&mut self, start_time: f64, rounding: f64) -> QueueBatch {
        self.discard_pending();
        QueueBatch {
            clock_offset: start_time * self.tick_frequency + rounding,
        }
    }

    fn append(&mut self, batch: &mut QueueBatch, ticks: f64) -> Result<(), SinkError> {
        let value = batch.clock_offset + ticks;
        if !value.is_finite() || value < 0.0 {
            return Err(SinkError::InvalidClock);
        }
        let clock = value as u64;
        if clock < self.last_clock {
            return Err(SinkError::ClockRegression {
                clock,
                last_clock: self.last_clock,
            });
        }
        self.events
            .push(StepEvent::Step { clock })
            .map_err(|_| SinkError::QueueFull)?;
        self.last_clock = clock;
        Ok(())
    }

    fn set_direction(&mut self, _batch: &mut QueueBatch, direction: Direction) -> Result<(), SinkError> {
        self.events
            .push(StepEvent::Direction(direction))
            .map_err(|_| SinkError::QueueFull)?;
        self.direction = direction;
        Ok(())
    }

    fn finish_batch(&mut self, _batch: QueueBatch) {
        self.committed = self.events.len();
        self.committed_direction = self.direction;
        self.committed_last_clock = self.last_clock;
    }
}
