//! Builder pattern for StepperAxis.

use crate::config::{validate_axis, AxisConfig, AxisResolution, SystemConfig};
use crate::error::{ConfigError, Error, Result};
use crate::kinematics::{Kinematics, PositionSampler};
use crate::sink::StepSink;

use super::axis::{validate_step_distance, StepperAxis};
use super::position::AxisPosition;

/// Builder for creating StepperAxis instances.
pub struct StepperAxisBuilder<K, S, H = fn(f64)> {
    name: Option<heapless::String<32>>,
    kinematics: Option<K>,
    sink: Option<S>,
    step_distance: Option<f64>,
    commanded_position: f64,
    post_hook: Option<H>,
}

impl<K, S> Default for StepperAxisBuilder<K, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> StepperAxisBuilder<K, S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            name: None,
            kinematics: None,
            sink: None,
            step_distance: None,
            commanded_position: 0.0,
            post_hook: None,
        }
    }
}

impl<K, S, H> StepperAxisBuilder<K, S, H> {
    /// Set the axis name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set the kinematic topology.
    pub fn kinematics(mut self, kinematics: K) -> Self {
        self.kinematics = Some(kinematics);
        self
    }

    /// Set the event sink.
    pub fn sink(mut self, sink: S) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set the distance of one step.
    pub fn step_distance(mut self, step_distance: f64) -> Self {
        self.step_distance = Some(step_distance);
        self
    }

    /// Set the initial commanded position.
    pub fn commanded_position(mut self, position: f64) -> Self {
        self.commanded_position = position;
        self
    }

    /// Set a hook run after every completed segment.
    pub fn post_hook<H2>(self, hook: H2) -> StepperAxisBuilder<K, S, H2>
    where
        H2: FnMut(f64),
    {
        StepperAxisBuilder {
            name: self.name,
            kinematics: self.kinematics,
            sink: self.sink,
            step_distance: self.step_distance,
            commanded_position: self.commanded_position,
            post_hook: Some(hook),
        }
    }

    /// Build the StepperAxis.
    ///
    /// # Errors
    ///
    /// Returns an error if kinematics, sink or step distance is missing, or
    /// if the step distance is not a finite positive number.
    pub fn build(self) -> Result<StepperAxis<K, S, H>>
    where
        K: PositionSampler,
        S: StepSink,
        H: FnMut(f64),
    {
        let kinematics = self
            .kinematics
            .ok_or(Error::Config(ConfigError::MissingField("kinematics")))?;

        let sink = self
            .sink
            .ok_or(Error::Config(ConfigError::MissingField("sink")))?;

        let step_distance = self
            .step_distance
            .ok_or(Error::Config(ConfigError::MissingField("step_distance")))?;
        validate_step_distance(step_distance)?;

        let name = self
            .name
            .unwrap_or_else(|| heapless::String::try_from("axis").unwrap_or_default());

        Ok(StepperAxis::new(
            name,
            AxisPosition::at(self.commanded_position, step_distance),
            kinematics,
            sink,
            self.post_hook,
        ))
    }
}

impl<S, H> StepperAxisBuilder<Kinematics, S, H> {
    /// Configure name, kinematics and step distance from an AxisConfig.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis configuration is invalid.
    pub fn from_axis_config(mut self, config: &AxisConfig) -> Result<Self> {
        validate_axis(config)?;
        let resolution = AxisResolution::from_config(config);

        self.name = Some(config.name.clone());
        self.kinematics = Some(config.build_kinematics());
        self.step_distance = Some(resolution.step_distance.0);
        Ok(self)
    }

    /// Configure from SystemConfig by axis name.
    pub fn from_config(self, config: &SystemConfig, axis_name: &str) -> Result<Self> {
        let axis_config = config.axis(axis_name).ok_or_else(|| {
            Error::Config(ConfigError::AxisNotFound(
                heapless::String::try_from(axis_name).unwrap_or_default(),
            ))
        })?;

        self.from_axis_config(axis_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{Microsteps, Millimeters};
    use crate::kinematics::{Axis, CartesianKinematics, KinematicsConfig};
    use crate::sink::StepQueue;

    #[test]
    fn test_missing_sink() {
        let result = StepperAxisBuilder::<CartesianKinematics, StepQueue<8>>::new()
            .kinematics(CartesianKinematics::new(Axis::X))
            .step_distance(0.01)
            .build();

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField("sink")))
        ));
    }

    #[test]
    fn test_missing_step_distance() {
        let result = StepperAxisBuilder::new()
            .kinematics(CartesianKinematics::new(Axis::Y))
            .sink(StepQueue::<8>::new(1000.0))
            .build();

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField("step_distance")))
        ));
    }

    #[test]
    fn test_from_axis_config() {
        let config = AxisConfig {
            name: heapless::String::try_from("z").unwrap(),
            kinematics: KinematicsConfig::Cartesian { axis: Axis::Z },
            rotation_distance: Millimeters(8.0),
            full_steps_per_rotation: 200,
            microsteps: Microsteps::SIXTEENTH,
            gear_ratio: 1.0,
            step_distance: None,
            invert_dir: false,
        };

        let axis = StepperAxisBuilder::<Kinematics, _>::new()
            .from_axis_config(&config)
            .unwrap()
            .sink(StepQueue::<8>::new(1000.0))
            .commanded_position(1.0)
            .build()
            .unwrap();

        assert_eq!(axis.name(), "z");
        assert!((axis.step_distance() - 0.0025).abs() < 1e-12);
        assert_eq!(axis.commanded_position(), 1.0);
        assert_eq!(axis.mcu_position(), 400);
    }

    #[test]
    fn test_axis_not_found() {
        let result = StepperAxisBuilder::<Kinematics, StepQueue<8>>::new()
            .from_config(&SystemConfig::default(), "e");

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::AxisNotFound(_)))
        ));
    }
}
