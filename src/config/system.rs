//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::axis::AxisConfig;
use super::units::Seconds;

/// Motor controller timing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct McuConfig {
    /// Controller clock ticks per second.
    pub tick_frequency: f64,

    /// Width of one STEP pulse.
    #[serde(default = "default_step_pulse_duration")]
    pub step_pulse_duration: Seconds,
}

fn default_step_pulse_duration() -> Seconds {
    Seconds(2e-6)
}

impl Default for McuConfig {
    fn default() -> Self {
        Self {
            tick_frequency: 1_000_000.0,
            step_pulse_duration: default_step_pulse_duration(),
        }
    }
}

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Controller timing.
    #[serde(default)]
    pub mcu: McuConfig,

    /// Named axis configurations.
    pub axes: FnvIndexMap<String<32>, AxisConfig, 8>,
}

impl SystemConfig {
    /// Get an axis configuration by name.
    pub fn axis(&self, name: &str) -> Option<&AxisConfig> {
        self.axes
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all axis names.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(|s| s.as_str())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            mcu: McuConfig::default(),
            axes: FnvIndexMap::new(),
        }
    }
}
