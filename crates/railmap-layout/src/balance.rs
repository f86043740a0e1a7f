//! Recentering: translate everything so the centroid sits at the origin.

use crate::state::Body;
use nalgebra::Vector2;

pub fn centroid<'a>(points: impl IntoIterator<Item = &'a Vector2<f64>>) -> Option<Vector2<f64>> {
    let mut sum = Vector2::zeros();
    let mut n = 0usize;
    for p in points {
        sum += p;
        n += 1;
    }
    (n > 0).then(|| sum / n as f64)
}

pub fn recenter(bodies: &mut [Body]) {
    let Some(mean) = centroid(bodies.iter().map(|b| &b.position)) else {
        return;
    };
    for body in bodies {
        body.position -= mean;
    }
}

pub fn centered(points: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    let Some(mean) = centroid(points) else {
        return Vec::new();
    };
    points.iter().map(|p| p - mean).collect()
}
