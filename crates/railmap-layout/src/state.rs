//! Per-station kinematic state and the context that owns it.

use crate::graph::{GraphSnapshot, Network};
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Planar position on the ground plane. `z` is the world z axis; world y is decoration only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub z: f64,
}

impl From<Vector2<f64>> for Point {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v.x, z: v.y }
    }
}

impl From<Point> for Vector2<f64> {
    fn from(p: Point) -> Self {
        Vector2::new(p.x, p.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// `x` is world x, `y` is world z.
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    pub acceleration: Vector2<f64>,
}

impl Default for Body {
    fn default() -> Self {
        Self::at(Vector2::zeros())
    }
}

impl Body {
    pub fn at(position: Vector2<f64>) -> Self {
        Self {
            position,
            velocity: Vector2::zeros(),
            acceleration: Vector2::zeros(),
        }
    }

    /// The origin doubles as the "not yet placed" sentinel.
    pub fn is_placed(&self) -> bool {
        self.position.x != 0.0 || self.position.y != 0.0
    }

    /// Embeds the planar position into the 3D scene frame.
    pub fn world(&self, elevation: f64) -> Vector3<f64> {
        Vector3::new(self.position.x, elevation, self.position.y)
    }

    /// Semi-implicit Euler step. Returns the squared displacement of this step.
    pub fn integrate(&mut self, dt: f64, velocity_retention: f64) -> f64 {
        self.velocity += self.acceleration * dt;
        let step = self.velocity * dt;
        self.position += step;
        self.velocity *= velocity_retention;
        step.norm_squared()
    }

    pub fn settle(&mut self) {
        self.velocity = Vector2::zeros();
        self.acceleration = Vector2::zeros();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutState {
    bodies: Vec<Body>,
}

impl LayoutState {
    pub fn new(len: usize) -> Self {
        Self {
            bodies: vec![Body::default(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn positions(&self) -> Vec<Vector2<f64>> {
        self.bodies.iter().map(|b| b.position).collect()
    }

    /// Overwrites positions from a stateless pass. Kinematic state no longer matches the new
    /// positions, so it is cleared.
    pub fn commit_positions(&mut self, positions: &[Vector2<f64>]) {
        for (body, &p) in self.bodies.iter_mut().zip(positions) {
            body.position = p;
            body.settle();
        }
    }
}

/// The single owner of mutable layout state.
///
/// Layout passes take `&mut LayoutContext`; renderers and other readers only ever see `&self`,
/// so at most one driver can run against a context at a time.
#[derive(Debug, Clone)]
pub struct LayoutContext {
    snapshot: GraphSnapshot,
    fixed: Vec<Option<Vector2<f64>>>,
    state: LayoutState,
}

impl LayoutContext {
    pub fn new(network: &Network) -> Self {
        let snapshot = GraphSnapshot::build(network);
        let fixed = snapshot
            .ids()
            .iter()
            .map(|id| {
                network
                    .fixed_coordinate(id)
                    .map(|(cx, cz)| Vector2::new(cx, cz))
            })
            .collect();
        let state = LayoutState::new(snapshot.ids().len());
        Self {
            snapshot,
            fixed,
            state,
        }
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn snapshot(&self) -> &GraphSnapshot {
        &self.snapshot
    }

    /// Authoritative coordinate of station `i` in source units.
    pub fn fixed_coordinate(&self, i: usize) -> Option<Vector2<f64>> {
        self.fixed.get(i).copied().flatten()
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut LayoutState {
        &mut self.state
    }

    /// Splits the context so a pass can read topology while mutating state.
    pub(crate) fn parts_mut(&mut self) -> (&GraphSnapshot, &mut LayoutState) {
        (&self.snapshot, &mut self.state)
    }

    pub fn position(&self, shortcode: &str) -> Option<Vector2<f64>> {
        let i = self.snapshot.index_of(shortcode)?;
        self.state.bodies().get(i).map(|b| b.position)
    }

    pub fn set_position(&mut self, shortcode: &str, position: Vector2<f64>) -> bool {
        let Some(i) = self.snapshot.index_of(shortcode) else {
            return false;
        };
        match self.state.bodies_mut().get_mut(i) {
            Some(body) => {
                body.position = position;
                true
            }
            None => false,
        }
    }

    pub fn positions(&self) -> BTreeMap<String, Point> {
        self.snapshot
            .ids()
            .iter()
            .zip(self.state.bodies())
            .map(|(id, b)| (id.clone(), Point::from(b.position)))
            .collect()
    }
}
