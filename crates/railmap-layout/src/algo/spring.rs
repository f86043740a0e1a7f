//! Stateless pairwise spring step.
//!
//! Given points and an adjacency relation, returns new points after three rules:
//! every point moves a fixed distance towards the origin, adjacent pairs move towards a target
//! distance from each other, and non-adjacent pairs that are close push apart with a force that
//! grows as `distance^-1.5`. Pair terms are computed from the input points, not from the partly
//! updated output.

use crate::algo::SpringOptions;
use crate::graph::Adjacency;
use nalgebra::Vector2;

pub fn step<A>(points: &[Vector2<f64>], adjacency: &A, opts: &SpringOptions) -> Vec<Vector2<f64>>
where
    A: Adjacency + ?Sized,
{
    let mut next: Vec<Vector2<f64>> = points
        .iter()
        .map(|p| {
            let len = p.norm();
            if len > 0.0 {
                // Clamped so a point near the origin lands on it rather than overshooting.
                p - p * (opts.gravity.min(len) / len)
            } else {
                *p
            }
        })
        .collect();

    for i in 0..points.len() {
        for j in 0..i {
            let diff = points[j] - points[i];
            let dist = diff.norm();
            if dist <= 0.0 {
                continue;
            }
            let direction = diff / dist;

            let magnitude = if adjacency.adjacent(i, j) {
                opts.adjacent * (opts.adjacent_target - dist)
            } else if dist <= opts.not_adjacent_threshold {
                opts.not_adjacent / dist.powf(1.5)
            } else {
                continue;
            };

            let delta = direction * magnitude;
            next[j] += delta;
            next[i] -= delta;
        }
    }

    next
}

/// Mean Euclidean distance between corresponding points. Zero for empty input.
pub fn mean_displacement(old: &[Vector2<f64>], new: &[Vector2<f64>]) -> f64 {
    let n = old.len().min(new.len());
    if n == 0 {
        return 0.0;
    }
    let total: f64 = old.iter().zip(new).map(|(a, b)| (b - a).norm()).sum();
    total / n as f64
}
