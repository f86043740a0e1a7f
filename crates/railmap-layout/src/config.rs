use crate::algo::{Algorithm, PhysicsOptions, SpringOptions};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedOptions {
    /// Authoritative coordinates are divided by this before use.
    pub coordinate_scale: f64,
    pub max_rounds: usize,
    /// Length of the per-station offset that keeps stations with identical neighbors apart.
    pub jitter: f64,
    /// Radius of the circle unreachable stations are scattered on. Zero leaves them stacked on
    /// the origin, where no relaxation force can separate them.
    pub scatter: f64,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            coordinate_scale: 100.0,
            max_rounds: 10,
            jitter: 0.1,
            scatter: 1.0,
        }
    }
}

/// Everything a layout run can be tuned with.
///
/// Every field has a default, so a partial JSON document only overrides the keys it names:
///
/// ```
/// let cfg = railmap_layout::LayoutConfig::from_json_str(
///     r#"{ "algorithm": "spring", "spring": { "gravity": 0.05 } }"#,
/// )
/// .unwrap();
/// assert_eq!(cfg.algorithm, railmap_layout::Algorithm::Spring);
/// assert_eq!(cfg.spring.adjacent_target, 5.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub algorithm: Algorithm,
    /// Reject networks with platforms leading to unknown stations instead of skipping them.
    pub strict: bool,
    pub seed: SeedOptions,
    pub physics: PhysicsOptions,
    pub spring: SpringOptions,
}

impl LayoutConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        positive("seed.coordinate_scale", self.seed.coordinate_scale)?;
        non_negative("seed.jitter", self.seed.jitter)?;
        non_negative("seed.scatter", self.seed.scatter)?;

        let p = &self.physics;
        non_negative("physics.separate", p.separate)?;
        non_negative("physics.separate_radius", p.separate_radius)?;
        non_negative("physics.neighbours", p.neighbours)?;
        non_negative("physics.neighbours_distance", p.neighbours_distance)?;
        non_negative("physics.gravity", p.gravity)?;
        positive("physics.dt", p.dt)?;
        non_negative("physics.threshold", p.threshold)?;
        non_negative("physics.velocity_retention", p.velocity_retention)?;
        if p.velocity_retention > 1.0 {
            return Err(invalid("physics.velocity_retention", "must not exceed 1"));
        }

        let s = &self.spring;
        non_negative("spring.gravity", s.gravity)?;
        non_negative("spring.adjacent", s.adjacent)?;
        non_negative("spring.adjacent_target", s.adjacent_target)?;
        non_negative("spring.not_adjacent", s.not_adjacent)?;
        non_negative("spring.not_adjacent_threshold", s.not_adjacent_threshold)?;
        non_negative("spring.stop_threshold", s.stop_threshold)?;
        Ok(())
    }
}

fn invalid(key: &'static str, reason: impl Into<String>) -> Error {
    Error::InvalidConfig {
        key,
        reason: reason.into(),
    }
}

fn non_negative(key: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(key, format!("must be finite and >= 0 (got {value})")))
    }
}

fn positive(key: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(key, format!("must be finite and > 0 (got {value})")))
    }
}
