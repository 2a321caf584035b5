//! Unit tests for configuration validation.

use stepper_stepgen::config::{parse_config, validate_config, SystemConfig};
use stepper_stepgen::error::{ConfigError, Error};

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let toml_str = r#"
[mcu]
tick_frequency = 16000000.0

[axes.x]
name = "x"
rotation_distance = 40.0
kinematics = { cartesian = { axis = "x" } }

[axes.a]
name = "tower_a"
rotation_distance = 40.0
kinematics = { delta = { arm_length = 217.0, tower_x = -86.6, tower_y = -50.0 } }
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for a non-positive rotation distance.
#[test]
fn test_zero_rotation_distance() {
    let toml_str = r#"
[axes.x]
name = "x"
rotation_distance = 0.0
kinematics = { cartesian = { axis = "x" } }
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidRotationDistance(_)))
    ));
}

/// Test validation fails for zero full steps per rotation.
#[test]
fn test_zero_full_steps() {
    let toml_str = r#"
[axes.x]
name = "x"
rotation_distance = 40.0
full_steps_per_rotation = 0
kinematics = { cartesian = { axis = "x" } }
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidFullSteps(0)))
    ));
}

/// Test validation fails for a negative tick frequency.
#[test]
fn test_negative_tick_frequency() {
    let toml_str = r#"
[mcu]
tick_frequency = -1.0

[axes.x]
name = "x"
rotation_distance = 40.0
kinematics = { cartesian = { axis = "x" } }
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidTickFrequency(_)))
    ));
}

/// Test that parse_config runs validation.
#[test]
fn test_parse_config_validates() {
    let toml_str = r#"
[axes.a]
name = "tower_a"
rotation_distance = 40.0
kinematics = { delta = { arm_length = -5.0, tower_x = 0.0, tower_y = 100.0 } }
"#;

    assert!(matches!(
        parse_config(toml_str),
        Err(Error::Config(ConfigError::InvalidArmLength(_)))
    ));
}

/// Test that error messages name the offending value.
#[test]
fn test_error_display() {
    let err = Error::Config(ConfigError::InvalidGearRatio(-2.0));
    assert_eq!(
        err.to_string(),
        "Configuration error: Invalid gear ratio: -2. Must be > 0"
    );
}
