//! Unit tests for TOML configuration parsing.

use std::io::Write;

use stepper_stepgen::config::{load_config, AxisResolution, Microsteps, SystemConfig};
use stepper_stepgen::kinematics::{Axis, CoreStepper, KinematicsConfig};

/// Test parsing a cartesian axis with every field set.
#[test]
fn test_parse_axis_config() {
    let toml_str = r#"
[axes.stepper_x]
name = "x_axis"
rotation_distance = 32.0
full_steps_per_rotation = 400
microsteps = 32
gear_ratio = 1.0
invert_dir = true

[axes.stepper_x.kinematics.cartesian]
axis = "x"
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let axis = config.axis("stepper_x").expect("Axis not found");

    assert_eq!(axis.name.as_str(), "x_axis");
    assert_eq!(axis.rotation_distance.0, 32.0);
    assert_eq!(axis.full_steps_per_rotation, 400);
    assert_eq!(axis.microsteps, Microsteps::THIRTY_SECOND);
    assert!(axis.invert_dir);
    assert_eq!(axis.kinematics, KinematicsConfig::Cartesian { axis: Axis::X });
}

/// Test parsing a CoreXY pair with defaults filled in.
#[test]
fn test_parse_corexy_defaults() {
    let toml_str = r#"
[mcu]
tick_frequency = 72000000.0

[axes.stepper_a]
name = "a"
rotation_distance = 40.0
kinematics = { corexy = { stepper = "plus" } }

[axes.stepper_b]
name = "b"
rotation_distance = 40.0
kinematics = { corexy = { stepper = "minus" } }
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert_eq!(config.mcu.tick_frequency, 72_000_000.0);
    assert_eq!(config.mcu.step_pulse_duration.0, 2e-6);

    let names: Vec<&str> = config.axis_names().collect();
    assert_eq!(names, vec!["stepper_a", "stepper_b"]);

    let b = config.axis("stepper_b").unwrap();
    assert_eq!(b.kinematics, KinematicsConfig::Corexy { stepper: CoreStepper::Minus });
    assert_eq!(b.full_steps_per_rotation, 200);
    assert_eq!(b.microsteps.value(), 16);
    assert_eq!(b.gear_ratio, 1.0);
    assert!(b.step_distance.is_none());
    assert!(!b.invert_dir);
}

/// Test that an explicit step distance overrides the derived one.
#[test]
fn test_parse_step_distance_override() {
    let toml_str = r#"
[axes.z]
name = "z"
rotation_distance = 8.0
step_distance = 0.0025
gear_ratio = 3.0
kinematics = { cartesian = { axis = "z" } }
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let resolution = AxisResolution::from_config(config.axis("z").unwrap());
    assert_eq!(resolution.step_distance.0, 0.0025);
}

/// Test that an invalid microstep value is rejected at parse time.
#[test]
fn test_invalid_microsteps_rejected() {
    let toml_str = r#"
[axes.x]
name = "x"
rotation_distance = 40.0
microsteps = 24
kinematics = { cartesian = { axis = "x" } }
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test that an unknown kinematics name is rejected.
#[test]
fn test_unknown_kinematics_rejected() {
    let toml_str = r#"
[axes.x]
name = "x"
rotation_distance = 40.0
kinematics = { polar = { axis = "x" } }
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test loading configuration from a file on disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join("stepper_stepgen_load_config_test.toml");
    {
        let mut file = std::fs::File::create(&path).expect("Failed to create file");
        file.write_all(
            br#"
[axes.e]
name = "extruder"
rotation_distance = 22.6
kinematics = { cartesian = { axis = "x" } }
"#,
        )
        .expect("Failed to write file");
    }

    let config = load_config(&path).expect("Failed to load config");
    assert_eq!(config.axis("e").unwrap().name.as_str(), "extruder");

    let _ = std::fs::remove_file(&path);
}
