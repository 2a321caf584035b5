//! Real-time replay of queued step events on GPIO pins.
//!
//! Generic over embedded-hal 1.0 pin and delay types.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{AxisConfig, McuConfig, Seconds};
use crate::error::DriverError;
use crate::motion::Direction;
use crate::sink::StepEvent;

/// Default STEP pulse width in nanoseconds.
pub const DEFAULT_PULSE_WIDTH_NS: u32 = 2_000;

/// STEP/DIR pulse generator.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `DELAY`: Delay provider (must implement `DelayNs`)
///
/// The first replayed step is emitted immediately and anchors the replay
/// clock; later steps wait until their clock relative to it.
pub struct PulseDriver<STEP, DIR, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    /// STEP pin (pulse to move one step).
    step_pin: STEP,

    /// DIR pin (high = forward, or inverted).
    dir_pin: DIR,

    /// Delay provider for step timing.
    delay: DELAY,

    /// Clock ticks per second of the replayed events.
    tick_frequency: f64,

    /// STEP high time.
    pulse_width_ns: u32,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// Direction currently driven on DIR (cached to avoid unnecessary pin writes).
    current_direction: Option<Direction>,

    /// Clock of the last emitted step.
    now: Option<u64>,
}

impl<STEP, DIR, DELAY> PulseDriver<STEP, DIR, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    /// Create a driver for events clocked at `tick_frequency`.
    pub fn new(step_pin: STEP, dir_pin: DIR, delay: DELAY, tick_frequency: f64) -> Self {
        Self {
            step_pin,
            dir_pin,
            delay,
            tick_frequency,
            pulse_width_ns: DEFAULT_PULSE_WIDTH_NS,
            invert_direction: false,
            current_direction: None,
            now: None,
        }
    }

    /// Create a driver using controller timing and the axis' pin polarity.
    pub fn from_config(
        step_pin: STEP,
        dir_pin: DIR,
        delay: DELAY,
        mcu: &McuConfig,
        axis: &AxisConfig,
    ) -> Self {
        Self::new(step_pin, dir_pin, delay, mcu.tick_frequency)
            .pulse_width(mcu.step_pulse_duration)
            .invert_direction(axis.invert_dir)
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Set the STEP pulse width.
    pub fn pulse_width(mut self, width: Seconds) -> Self {
        self.pulse_width_ns = width.as_nanos().min(u32::MAX as u64) as u32;
        self
    }

    /// Clock of the last emitted step, if any.
    #[inline]
    pub fn clock(&self) -> Option<u64> {
        self.now
    }

    /// Direction currently driven on DIR, if any.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.current_direction
    }

    /// Play events in order, blocking until the last step is emitted.
    ///
    /// Steps seen before any direction event go forward.
    ///
    /// Returns the number of steps emitted.
    ///
    /// # Errors
    ///
    /// Stops at the first pin failure or at a step clock earlier than the
    /// previous one.
    pub fn replay(&mut self, events: &[StepEvent]) -> Result<u32, DriverError> {
        let mut steps = 0;
        for event in events {
            match *event {
                StepEvent::Direction(direction) => self.set_direction(direction)?,
                StepEvent::Step { clock } => {
                    if self.current_direction.is_none() {
                        self.set_direction(Direction::Forward)?;
                    }
                    self.step_at(clock)?;
                    steps += 1;
                }
            }
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("replayed {} steps", steps);

        Ok(steps)
    }

    /// Drive the DIR pin.
    pub fn set_direction(&mut self, direction: Direction) -> Result<(), DriverError> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        let pin_high = direction.is_forward() != self.invert_direction;
        if pin_high {
            self.dir_pin.set_high().map_err(|_| DriverError::PinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| DriverError::PinError)?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }

    /// Forget the replay clock so the next step is emitted immediately.
    pub fn reset_clock(&mut self) {
        self.now = None;
    }

    /// Take the driver apart.
    pub fn release(self) -> (STEP, DIR, DELAY) {
        (self.step_pin, self.dir_pin, self.delay)
    }

    fn step_at(&mut self, clock: u64) -> Result<(), DriverError> {
        if let Some(now) = self.now {
            if clock < now {
                return Err(DriverError::ClockRegression { clock, now });
            }
            // The previous pulse already used part of the interval
            let wait_ns = self
                .ticks_to_ns(clock - now)
                .saturating_sub(self.pulse_width_ns as u64);
            self.wait_ns(wait_ns);
        }

        self.step_pin.set_high().map_err(|_| DriverError::PinError)?;
        self.delay.delay_ns(self.pulse_width_ns);
        self.step_pin.set_low().map_err(|_| DriverError::PinError)?;

        self.now = Some(clock);
        Ok(())
    }

    fn ticks_to_ns(&self, ticks: u64) -> u64 {
        (ticks as f64 * 1e9 / self.tick_frequency) as u64
    }

    fn wait_ns(&mut self, mut ns: u64) {
        while ns > 0 {
            let chunk = ns.min(u32::MAX as u64) as u32;
            self.delay.delay_ns(chunk);
            ns -= chunk as u64;
        }
    }
}
