//! Force relaxation.
//!
//! Every tick each station feels, from every other station at non-zero distance:
//! - a short-range linear repulsion (`separate`, fading to zero at `separate_radius`);
//! - a one-sided spring towards connected stations further than `neighbours_distance`.
//!
//! A weak pull towards the origin keeps disconnected parts from drifting off. Forces are computed from the positions at the start of
//! the tick, integrated, and the layout is recentered.

use crate::algo::PhysicsOptions;
use crate::balance;
use crate::graph::Adjacency;
use crate::state::LayoutContext;
use nalgebra::Vector2;

/// Net force on every point. Point masses are 1, so this is also the acceleration.
pub fn accumulate_forces<A>(
    positions: &[Vector2<f64>],
    adjacency: &A,
    opts: &PhysicsOptions,
) -> Vec<Vector2<f64>>
where
    A: Adjacency + ?Sized,
{
    let mut forces = Vec::with_capacity(positions.len());
    for (me, &here) in positions.iter().enumerate() {
        let mut f = here * -opts.gravity;
        for (you, &there) in positions.iter().enumerate() {
            let diff = there - here;
            let distance = diff.norm();
            if you == me || distance <= 0.0 {
                continue;
            }
            let direction = diff / distance;

            if opts.separate_radius > 0.0 {
                let push = opts.separate * (1.0 - distance / opts.separate_radius).max(0.0);
                f -= direction * push;
            }

            if adjacency.adjacent(me, you) {
                let pull = opts.neighbours * (distance - opts.neighbours_distance).max(0.0);
                f += direction * pull;
            }
        }
        forces.push(f);
    }
    forces
}

/// Runs one tick and returns the mean squared displacement of the tick.
pub fn tick(ctx: &mut LayoutContext, opts: &PhysicsOptions) -> f64 {
    let (snapshot, state) = ctx.parts_mut();
    if state.is_empty() {
        return 0.0;
    }

    let forces = accumulate_forces(&state.positions(), snapshot, opts);
    let bodies = state.bodies_mut();
    let mut movement = 0.0;
    for (body, force) in bodies.iter_mut().zip(forces) {
        body.acceleration = force;
        movement += body.integrate(opts.dt, opts.velocity_retention);
    }
    balance::recenter(bodies);

    movement / bodies.len() as f64
}
