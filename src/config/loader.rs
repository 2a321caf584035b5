//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use stepper_stepgen::load_config;
///
/// let config = load_config("printer.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref())
        .map_err(|e| Error::Config(ConfigError::IoError(truncated(&e.to_string()))))?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content).map_err(|e| {
        let msg = truncated(e.message());
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

// heapless::String::try_from fails outright on overflow; keep what fits.
fn truncated(msg: &str) -> heapless::String<128> {
    let mut out = heapless::String::new();
    for c in msg.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::KinematicsConfig;

    #[test]
    fn test_long_messages_are_truncated() {
        let long = "x".repeat(200);
        let msg = truncated(&long);
        assert_eq!(msg.len(), 128);
        assert!(long.starts_with(msg.as_str()));

        // Multi-byte characters are never split
        let wide = "é".repeat(100);
        assert_eq!(truncated(&wide).chars().count(), 64);
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[axes.x]
name = "X"
rotation_distance = 40.0
kinematics = { cartesian = { axis = "x" } }
"#;

        let config = parse_config(toml).unwrap();
        let axis = config.axis("x").unwrap();
        assert_eq!(axis.full_steps_per_rotation, 200);
        assert_eq!(axis.microsteps.value(), 16);
        assert_eq!(config.mcu.tick_frequency, 1_000_000.0);
    }

    #[test]
    fn test_parse_delta_tower() {
        let toml = r#"
[mcu]
tick_frequency = 16000000.0

[axes.stepper_a]
name = "A"
rotation_distance = 40.0
microsteps = 32

[axes.stepper_a.kinematics.delta]
arm_length = 250.0
tower_x = -86.6
tower_y = -50.0
"#;

        let config = parse_config(toml).unwrap();
        let axis = config.axis("stepper_a").unwrap();
        assert!(matches!(
            axis.kinematics,
            KinematicsConfig::Delta { arm_length, .. } if arm_length == 250.0
        ));
    }

    #[test]
    fn test_parse_rejects_bad_microsteps() {
        let toml = r#"
[axes.x]
name = "X"
rotation_distance = 40.0
microsteps = 12
kinematics = { cartesian = { axis = "x" } }
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_config("/nonexistent/printer.toml"),
            Err(Error::Config(ConfigError::IoError(_)))
        ));
    }
}
