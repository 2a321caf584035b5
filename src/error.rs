//! Error types for stepper-stepgen.
//!
//! The step generator itself never invents errors: it hands back whatever its
//! [`StepSink`](crate::sink::StepSink) reported. The types here cover the
//! crate's own collaborators (configuration, the step queue, pulse replay).

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-stepgen operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Step queue rejected an event
    Sink(SinkError),
    /// Pulse replay error
    Driver(DriverError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep value (must be power of 2: 1, 2, 4, 8, 16, 32, 64, 128, 256)
    InvalidMicrosteps(u16),
    /// Axis name not found in configuration
    AxisNotFound(heapless::String<32>),
    /// Invalid rotation distance (must be > 0)
    InvalidRotationDistance(f64),
    /// Invalid full steps per rotation (must be > 0)
    InvalidFullSteps(u16),
    /// Invalid gear ratio (must be > 0)
    InvalidGearRatio(f64),
    /// Invalid step distance (must be finite and > 0)
    InvalidStepDistance(f64),
    /// Invalid tick frequency (must be finite and > 0)
    InvalidTickFrequency(f64),
    /// Invalid delta arm length (must be > 0)
    InvalidArmLength(f64),
    /// A builder was missing a required field
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Errors reported by [`StepQueue`](crate::sink::StepQueue).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SinkError {
    /// The queue has no room for another event
    QueueFull,
    /// A step time converted to a negative or non-finite clock
    InvalidClock,
    /// A step clock went backwards
    ClockRegression {
        /// Clock of the rejected step
        clock: u64,
        /// Clock of the previously queued step
        last_clock: u64,
    },
}

/// Pulse replay errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// Pin operation failed
    PinError,
    /// A step clock was earlier than the replay position
    ClockRegression {
        /// Clock of the rejected step
        clock: u64,
        /// Clock already reached by the replay
        now: u64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Sink(e) => write!(f, "Step queue error: {}", e),
            Error::Driver(e) => write!(f, "Driver error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMicrosteps(v) => {
                write!(f, "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16, 32, 64, 128, 256", v)
            }
            ConfigError::AxisNotFound(name) => write!(f, "Axis '{}' not found", name),
            ConfigError::InvalidRotationDistance(v) => {
                write!(f, "Invalid rotation distance: {}. Must be > 0", v)
            }
            ConfigError::InvalidFullSteps(v) => {
                write!(f, "Invalid full steps per rotation: {}. Must be > 0", v)
            }
            ConfigError::InvalidGearRatio(v) => write!(f, "Invalid gear ratio: {}. Must be > 0", v),
            ConfigError::InvalidStepDistance(v) => {
                write!(f, "Invalid step distance: {}. Must be > 0", v)
            }
            ConfigError::InvalidTickFrequency(v) => {
                write!(f, "Invalid tick frequency: {}. Must be > 0", v)
            }
            ConfigError::InvalidArmLength(v) => write!(f, "Invalid arm length: {}. Must be > 0", v),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::QueueFull => write!(f, "step queue is full"),
            SinkError::InvalidClock => write!(f, "step time does not map to a valid clock"),
            SinkError::ClockRegression { clock, last_clock } => {
                write!(f, "step clock {} is before previous clock {}", clock, last_clock)
            }
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::PinError => write!(f, "GPIO pin operation failed"),
            DriverError::ClockRegression { clock, now } => {
                write!(f, "step clock {} is before replay clock {}", clock, now)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<SinkError> for Error {
    fn from(e: SinkError) -> Self {
        Error::Sink(e)
    }
}

impl From<DriverError> for Error {
    fn from(e: DriverError) -> Self {
        Error::Driver(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for SinkError {}

#[cfg(feature = "std")]
impl std::error::Error for DriverError {}
