//! Per-connection placement data for whatever draws the connecting elements.

use crate::graph::ServiceKind;
use crate::state::{LayoutContext, Point};
use nalgebra::Vector2;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub a: String,
    pub b: String,
    pub a_platform: String,
    pub b_platform: String,
    pub kind: ServiceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    pub midpoint: Point,
    /// Heading from `a` to `b` in radians, measured from the x axis towards z.
    pub orientation: f64,
    pub length: f64,
}

/// Midpoint, heading and length of the straight line from `a` to `b`.
pub fn span(a: Vector2<f64>, b: Vector2<f64>) -> (Vector2<f64>, f64, f64) {
    let d = b - a;
    ((a + b) / 2.0, d.y.atan2(d.x), d.norm())
}

pub fn segments(ctx: &LayoutContext) -> Vec<Segment> {
    let snapshot = ctx.snapshot();
    let bodies = ctx.state().bodies();
    snapshot
        .links()
        .iter()
        .filter_map(|link| {
            let (a, b) = (bodies.get(link.a)?, bodies.get(link.b)?);
            let (midpoint, orientation, length) = span(a.position, b.position);
            Some(Segment {
                a: snapshot.id(link.a)?.to_string(),
                b: snapshot.id(link.b)?.to_string(),
                a_platform: link.a_platform.clone(),
                b_platform: link.b_platform.clone(),
                kind: link.kind.clone(),
                service: link.service.clone(),
                midpoint: midpoint.into(),
                orientation,
                length,
            })
        })
        .collect()
}
