//! # stepper-stepgen
//!
//! Iterative step generation for stepper motors with embedded-hal 1.0 support.
//!
//! Given a motion segment and a function giving an axis' position over time,
//! the generator finds the exact instants at which the axis crosses each step
//! boundary and reports them, with direction changes, to an event sink.
//!
//! ## Features
//!
//! - **Kinematics-agnostic**: any [`PositionSampler`] (or closure) drives the generator
//! - **Root finding**: bracketed regula falsi, accurate to a nanosecond
//! - **Reversal-safe**: direction changes are detected mid-segment and
//!   numerical jitter at a turnaround never produces spurious steps
//! - **no_std compatible**: core is allocation-free (`heapless`, `libm`)
//! - **Configuration-driven**: axes and controller timing from TOML files
//! - **embedded-hal 1.0**: replays queued steps on `OutputPin`s with `DelayNs`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_stepgen::{Coord, Kinematics, Move, StepQueue, StepperAxisBuilder};
//!
//! let config = stepper_stepgen::load_config("printer.toml")?;
//!
//! let mut axis = StepperAxisBuilder::<Kinematics, _>::new()
//!     .from_config(&config, "x")?
//!     .sink(StepQueue::<1024>::new(config.mcu.tick_frequency))
//!     .build()?;
//!
//! let m = Move::constant_velocity(0.0, 1.0, Coord::default(), Coord::new(10.0, 0.0, 0.0), 10.0);
//! let stats = axis.generate_steps(&m)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod config;
pub mod error;
pub mod kinematics;
pub mod motion;
pub mod sink;
pub mod stepper;

// Re-exports for ergonomic API
pub use config::{validate_config, AxisConfig, AxisResolution, McuConfig, SystemConfig};
pub use error::{Error, Result};
pub use kinematics::{Kinematics, KinematicsConfig, PositionSampler};
pub use motion::{find_step, Coord, Direction, MotionPhase, Move, MoveTiming, StepExecutor, StepStats, TimePos};
pub use sink::{StepEvent, StepQueue, StepSink};
pub use stepper::{PulseDriver, StepperAxis, StepperAxisBuilder};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Microsteps, Millimeters, Seconds};
