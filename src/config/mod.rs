//! Configuration module for stepper-stepgen.
//!
//! Provides types for loading and validating controller and axis
//! configurations from TOML files (with `std` feature) or pre-parsed data.

mod axis;
mod resolution;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use axis::AxisConfig;
pub use resolution::AxisResolution;
pub use system::{McuConfig, SystemConfig};
pub use validation::{validate_axis, validate_config};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Microsteps, Millimeters, Seconds};
