//! Initial placement.
//!
//! Stations with an authoritative coordinate are placed at `coordinate / coordinate_scale`.
//! Everything else grows outward from them in rounds: an unplaced station with at least one
//! placed neighbor moves to the centroid of those neighbors, nudged by a small offset derived
//! from its shortcode so that stations sharing a neighbor set do not coincide. Stations are
//! visited in network order and a station placed earlier in a round already counts for later
//! ones.
//!
//! Stations no round reached are scattered on a circle of radius `scatter` around the origin,
//! each at its own shortcode-derived angle, so relaxation has a direction to push them apart.

use crate::config::SeedOptions;
use crate::state::LayoutContext;
use nalgebra::Vector2;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedReport {
    /// Stations placed from authoritative coordinates.
    pub anchored: usize,
    /// Neighbor-averaging rounds that ran.
    pub rounds: usize,
    /// Shortcodes no round reached. They start scattered around the origin.
    pub unplaced: Vec<String>,
}

pub fn place(ctx: &mut LayoutContext, opts: &SeedOptions) -> SeedReport {
    let mut report = SeedReport::default();
    let mut remaining: Vec<usize> = Vec::new();

    for i in 0..ctx.len() {
        match ctx.fixed_coordinate(i) {
            Some(coord) => {
                let body = &mut ctx.state_mut().bodies_mut()[i];
                body.position = coord / opts.coordinate_scale;
                body.settle();
                report.anchored += 1;
            }
            None => remaining.push(i),
        }
    }

    let (snapshot, state) = ctx.parts_mut();
    while !remaining.is_empty() && report.rounds < opts.max_rounds {
        tracing::debug!(
            round = report.rounds,
            remaining = remaining.len(),
            "seeding stations with no location"
        );
        let mut next: Vec<usize> = Vec::new();
        for &i in &remaining {
            let bodies = state.bodies();
            let mut sum = Vector2::zeros();
            let mut count = 0usize;
            for &j in snapshot.neighbors(i) {
                if bodies[j].is_placed() {
                    sum += bodies[j].position;
                    count += 1;
                }
            }
            if count == 0 {
                next.push(i);
                continue;
            }
            let id = snapshot.id(i).unwrap_or_default();
            let position = sum / count as f64 + jitter(id, opts.jitter);
            state.bodies_mut()[i].position = position;
        }
        remaining = next;
        report.rounds += 1;
    }

    for &i in &remaining {
        let id = snapshot.id(i).unwrap_or_default();
        state.bodies_mut()[i].position = jitter(id, opts.scatter);
    }

    report.unplaced = remaining
        .iter()
        .filter_map(|&i| snapshot.id(i))
        .map(str::to_string)
        .collect();
    if !report.unplaced.is_empty() {
        tracing::warn!(
            count = report.unplaced.len(),
            rounds = report.rounds,
            "stations unreachable from any anchor, scattered around the origin: {:?}",
            report.unplaced
        );
    }
    report
}

/// Deterministic offset of length `len` in a direction picked by hashing `id`.
pub fn jitter(id: &str, len: f64) -> Vector2<f64> {
    let angle = hash_angle(id);
    Vector2::new(angle.cos(), angle.sin()) * len
}

fn hash_angle(id: &str) -> f64 {
    let mut hasher = FxHasher::default();
    id.hash(&mut hasher);
    // Top 53 bits map exactly onto an f64 in [0, 1).
    let unit = (hasher.finish() >> 11) as f64 / (1u64 << 53) as f64;
    unit * std::f64::consts::TAU
}
