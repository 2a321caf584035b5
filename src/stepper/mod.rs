//! Stepper module for stepper-stepgen.
//!
//! Per-axis state and the segment entry point ([`StepperAxis`]), its builder,
//! and a GPIO pulse driver that replays queued step events.

mod axis;
mod builder;
mod position;
mod pulse;

pub use axis::{StepperAxis, STEP_CLOCK_ROUNDING};
pub use builder::StepperAxisBuilder;
pub use position::AxisPosition;
pub use pulse::{PulseDriver, DEFAULT_PULSE_WIDTH_NS};
