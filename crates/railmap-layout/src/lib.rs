#![forbid(unsafe_code)]

//! Headless layout for transit networks.
//!
//! Stations with authoritative coordinates anchor the drawing; everything else is seeded from
//! its neighbors and then relaxed, either by a continuous force simulation
//! ([`Algorithm::Physics`]) or by repeated stateless spring steps ([`Algorithm::Spring`]).
//! Motion is confined to the ground plane; the vertical axis is left to the renderer.

pub mod algo;
pub mod balance;
pub mod config;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod seed;
pub mod state;

pub use railmap_graph as graph;

pub use algo::{Algorithm, PhysicsOptions, SpringOptions};
pub use config::{LayoutConfig, SeedOptions};
pub use driver::{Driver, PhysicsRelaxation, Progress, Relaxation, RunReport, SpringRelaxation};
pub use error::{Error, Result};
pub use geometry::Segment;
pub use seed::SeedReport;
pub use state::{Body, LayoutContext, LayoutState, Point};

use graph::Network;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    pub positions: BTreeMap<String, Point>,
    pub segments: Vec<Segment>,
    pub ticks: usize,
    pub converged: bool,
    /// Stations seeding could not reach; they were placed by relaxation alone.
    pub unplaced: Vec<String>,
}

/// Headless entry point: seed, relax to convergence, and report final positions.
pub fn layout(network: &Network, config: &LayoutConfig) -> Result<LayoutResult> {
    config.validate()?;
    if config.strict {
        network.validate()?;
    }

    let mut ctx = LayoutContext::new(network);
    let seeded = seed::place(&mut ctx, &config.seed);

    let report = match config.algorithm {
        Algorithm::Physics => {
            Driver::new(&mut ctx, PhysicsRelaxation::new(config.physics.clone())).run_blocking()
        }
        Algorithm::Spring => {
            Driver::new(&mut ctx, SpringRelaxation::new(config.spring.clone())).run_blocking()
        }
    };

    Ok(LayoutResult {
        positions: ctx.positions(),
        segments: geometry::segments(&ctx),
        ticks: report.ticks,
        converged: report.converged,
        unplaced: seeded.unplaced,
    })
}
