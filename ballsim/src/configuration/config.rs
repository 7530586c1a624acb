//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – duration, step size, stiffness, restitution
//! - [`BoundaryConfig`]   – the four wall positions
//! - [`BodyConfig`]       – initial state for each of the two bodies
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! The head-on scenario shipped in `scenarios/head_on.yaml`:
//!
//! ```yaml
//! parameters:
//!   t_end: 2.0              # total simulation time
//!   dt: 1.0e-6              # penalty model step size
//!   stiffness: 500.0        # Hooke constant k
//!   restitution: 1.0        # optional, impulse model e (default 1.0)
//!   analytical_samples: 2000000  # optional, default t_end / dt
//!
//! boundary:
//!   left: -1.0
//!   right: 1.0
//!   bottom: -1.0
//!   top: 1.0
//!
//! bodies:
//!   - x: [ -0.5, 0.02 ]
//!     speed: 1.25           # polar velocity ...
//!     angle_deg: 0.0
//!     m: 1.0
//!     radius: 0.1
//!   - x: [ 0.0, 0.0 ]
//!     v: [ 0.0, 0.0 ]       # ... or cartesian
//!     m: 1.0
//!     radius: 0.1
//! ```
//!
//! `Scenario::build_scenario` validates this and maps it into runtime types.

use std::path::Path;

use serde::Deserialize;

use crate::error::{SimError, SimResult};

fn default_restitution() -> f64 {
    1.0
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ParametersConfig {
    pub t_end: f64, // time end
    pub dt: f64, // penalty step size
    pub stiffness: f64, // spring constant for the penalty model
    #[serde(default = "default_restitution")]
    pub restitution: f64, // impulse model e, 1.0 = elastic
    #[serde(default)]
    pub analytical_samples: Option<usize>, // analytical grid size, defaults to the penalty step count
}

/// Wall positions
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BoundaryConfig {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

/// Initial velocity, either as components or as speed and heading
#[derive(Debug, Clone, PartialEq)]
pub enum VelocityConfig {
    Cartesian { v: Vec<f64> }, // [vx, vy]
    Polar { speed: f64, angle_deg: f64 }, // heading counter-clockwise from +x
}

/// Configuration for a single body's initial state.
/// Velocity is given either as `v` or as `speed` plus `angle_deg`, never both.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    pub x: Vec<f64>, // Initial position [x, y]
    #[serde(default)]
    pub v: Option<Vec<f64>>, // Initial velocity [vx, vy]
    #[serde(default)]
    pub speed: Option<f64>, // Initial speed, with angle_deg
    #[serde(default)]
    pub angle_deg: Option<f64>, // Initial heading, with speed
    pub m: f64, // Mass of the body
    pub radius: f64, // Radius of the body
}

impl BodyConfig {
    /// Resolve the velocity form; `index` is reported back in the error
    pub fn velocity(&self, index: usize) -> SimResult<VelocityConfig> {
        match (&self.v, self.speed, self.angle_deg) {
            (Some(v), None, None) => Ok(VelocityConfig::Cartesian { v: v.clone() }),
            (None, Some(speed), Some(angle_deg)) => Ok(VelocityConfig::Polar { speed, angle_deg }),
            (Some(_), _, _) => Err(SimError::Config(format!(
                "body {index}: give either `v` or `speed`/`angle_deg`, not both"
            ))),
            (None, None, None) => Err(SimError::Config(format!(
                "body {index}: missing velocity, give `v` or `speed` and `angle_deg`"
            ))),
            (None, _, _) => Err(SimError::Config(format!(
                "body {index}: `speed` and `angle_deg` must be given together"
            ))),
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig, // Numerical and physical parameters
    pub boundary: BoundaryConfig, // The confining rectangle
    pub bodies: Vec<BodyConfig>, // Exactly two bodies
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> SimResult<Self> {
        serde_yaml::from_str(text).map_err(|e| SimError::Config(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEAD_ON: &str = r#"
parameters:
  t_end: 2.0
  dt: 1.0e-6
  stiffness: 500.0
boundary: { left: -1.0, right: 1.0, bottom: -1.0, top: 1.0 }
bodies:
  - x: [-0.5, 0.02]
    speed: 1.25
    angle_deg: 0
    m: 1.0
    radius: 0.1
  - x: [0.0, 0.0]
    v: [0.0, 0.0]
    m: 1.0
    radius: 0.1
"#;

    #[test]
    fn parses_both_velocity_forms() {
        let cfg = ScenarioConfig::from_yaml_str(HEAD_ON).unwrap();
        assert_eq!(cfg.bodies.len(), 2);
        assert_eq!(
            cfg.bodies[0].velocity(0).unwrap(),
            VelocityConfig::Polar {
                speed: 1.25,
                angle_deg: 0.0
            }
        );
        assert_eq!(
            cfg.bodies[1].velocity(1).unwrap(),
            VelocityConfig::Cartesian { v: vec![0.0, 0.0] }
        );
    }

    fn body_with(velocity: &str) -> BodyConfig {
        let text = format!("x: [0.0, 0.0]\n{velocity}m: 1.0\nradius: 0.1\n");
        serde_yaml::from_str(&text).unwrap()
    }

    #[test]
    fn ambiguous_or_missing_velocity_names_the_body() {
        let both = body_with("v: [1.0, 0.0]\nspeed: 1.0\nangle_deg: 0.0\n");
        let err = both.velocity(1).unwrap_err();
        assert_eq!(
            err,
            SimError::Config("body 1: give either `v` or `speed`/`angle_deg`, not both".to_string())
        );

        let neither = body_with("");
        assert!(matches!(neither.velocity(0), Err(SimError::Config(msg)) if msg.starts_with("body 0: missing velocity")));

        let half = body_with("speed: 2.0\n");
        assert!(matches!(half.velocity(0), Err(SimError::Config(msg)) if msg.contains("together")));
    }

    #[test]
    fn unknown_body_field_is_a_config_error() {
        let text = HEAD_ON.replace("    m: 1.0\n    radius: 0.1\n  - x: [0.0, 0.0]", "    mass: 1.0\n    radius: 0.1\n  - x: [0.0, 0.0]");
        assert!(matches!(
            ScenarioConfig::from_yaml_str(&text),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn optional_parameters_default() {
        let cfg = ScenarioConfig::from_yaml_str(HEAD_ON).unwrap();
        assert_eq!(cfg.parameters.restitution, 1.0);
        assert_eq!(cfg.parameters.analytical_samples, None);
    }

    #[test]
    fn missing_boundary_is_a_config_error() {
        let text = "parameters: { t_end: 1.0, dt: 0.1, stiffness: 1.0 }\nbodies: []\n";
        assert!(matches!(
            ScenarioConfig::from_yaml_str(text),
            Err(SimError::Config(_))
        ));
    }
}
