pub mod physics;
pub mod spring;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Continuous force simulation with velocity and acceleration state.
    #[default]
    Physics,
    /// Stateless pairwise spring steps applied until displacement is negligible.
    Spring,
}

impl std::str::FromStr for Algorithm {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "physics" | "force" => Ok(Self::Physics),
            "spring" | "pairwise" => Ok(Self::Spring),
            _ => Err(()),
        }
    }
}

/// Force relaxation constants. Only the relative magnitudes matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsOptions {
    /// Peak short-range repulsion between any two stations.
    pub separate: f64,
    /// Repulsion fades linearly to zero at this distance. `0` disables it.
    pub separate_radius: f64,
    /// Spring constant pulling connected stations together.
    pub neighbours: f64,
    /// Connected stations are not pulled once they are this close.
    pub neighbours_distance: f64,
    /// Pull of every station towards the world origin.
    pub gravity: f64,
    pub dt: f64,
    /// Fraction of velocity carried into the next tick.
    ///
    /// The default keeps only the last displacement (`v * dt` at 60 ticks per second), which
    /// acts as heavy drag. `1.0` is the undamped integrator and may orbit forever.
    pub velocity_retention: f64,
    /// Iteration continues while the mean squared displacement per tick is at or above this.
    pub threshold: f64,
    /// Safety cap on ticks; `None` iterates until the threshold is crossed.
    pub max_ticks: Option<usize>,
}

impl Default for PhysicsOptions {
    fn default() -> Self {
        Self {
            separate: 600.0,
            separate_radius: 15.0,
            neighbours: 600.0,
            neighbours_distance: 5.0,
            gravity: 0.01,
            dt: 1.0 / 60.0,
            velocity_retention: 1.0 / 60.0,
            threshold: 0.0105 / 60.0,
            max_ticks: Some(200_000),
        }
    }
}

/// Pairwise spring step constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringOptions {
    /// Fixed distance every point moves towards the origin per step.
    ///
    /// The step is clamped at the origin: a point closer than `gravity` lands exactly on it
    /// instead of overshooting to the far side.
    pub gravity: f64,
    /// Strength of the bidirectional spring between adjacent points.
    pub adjacent: f64,
    pub adjacent_target: f64,
    /// Strength of the inverse-power push between non-adjacent points.
    pub not_adjacent: f64,
    /// Non-adjacent points further apart than this do not interact.
    pub not_adjacent_threshold: f64,
    /// Stepping stops once the mean per-point displacement is at or below this.
    pub stop_threshold: f64,
    pub max_steps: Option<usize>,
}

impl Default for SpringOptions {
    fn default() -> Self {
        Self {
            gravity: 0.2,
            adjacent: 0.12,
            adjacent_target: 5.0,
            not_adjacent: 1.2,
            not_adjacent_threshold: 8.0,
            stop_threshold: 0.035,
            max_steps: Some(10_000),
        }
    }
}
