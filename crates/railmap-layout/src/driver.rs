//! Iteration drivers.
//!
//! A [`Driver`] repeatedly ticks one [`Relaxation`] against a [`LayoutContext`] until the
//! relaxation reports convergence or its tick cap is reached. It holds the only `&mut` to the
//! context for its lifetime, so two drivers can never run on the same station positions.
//!
//! [`Driver::run_cooperative`] yields to the executor between ticks instead of looping, so a
//! single-threaded executor can interleave it with rendering or input handling. Readers
//! observe positions only between ticks, through the observer callback.

use crate::algo::{PhysicsOptions, SpringOptions, physics, spring};
use crate::state::LayoutContext;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// One iterative layout mechanism.
pub trait Relaxation {
    fn name(&self) -> &'static str;

    /// Advances the layout by one iteration and returns its movement metric.
    fn tick(&mut self, ctx: &mut LayoutContext) -> f64;

    fn converged(&self, movement: f64) -> bool;

    fn max_ticks(&self) -> Option<usize>;
}

#[derive(Debug, Clone, Default)]
pub struct PhysicsRelaxation {
    opts: PhysicsOptions,
}

impl PhysicsRelaxation {
    pub fn new(opts: PhysicsOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &PhysicsOptions {
        &self.opts
    }
}

impl Relaxation for PhysicsRelaxation {
    fn name(&self) -> &'static str {
        "physics"
    }

    fn tick(&mut self, ctx: &mut LayoutContext) -> f64 {
        physics::tick(ctx, &self.opts)
    }

    fn converged(&self, movement: f64) -> bool {
        movement < self.opts.threshold
    }

    fn max_ticks(&self) -> Option<usize> {
        self.opts.max_ticks
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpringRelaxation {
    opts: SpringOptions,
}

impl SpringRelaxation {
    pub fn new(opts: SpringOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &SpringOptions {
        &self.opts
    }
}

impl Relaxation for SpringRelaxation {
    fn name(&self) -> &'static str {
        "spring"
    }

    fn tick(&mut self, ctx: &mut LayoutContext) -> f64 {
        let (snapshot, state) = ctx.parts_mut();
        let old = state.positions();
        let new = spring::step(&old, snapshot, &self.opts);
        state.commit_positions(&new);
        spring::mean_displacement(&old, &new)
    }

    fn converged(&self, movement: f64) -> bool {
        movement <= self.opts.stop_threshold
    }

    fn max_ticks(&self) -> Option<usize> {
        self.opts.max_steps
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInfo {
    /// 1-based index of the tick that just committed.
    pub tick: usize,
    pub movement: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Running,
    Converged,
    CapReached,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunReport {
    pub ticks: usize,
    pub last_movement: f64,
    pub converged: bool,
}

type Observer<'a> = Box<dyn FnMut(&LayoutContext, TickInfo) + 'a>;

pub struct Driver<'a, R: Relaxation> {
    ctx: &'a mut LayoutContext,
    relaxation: R,
    ticks: usize,
    last_movement: f64,
    progress: Progress,
    observer: Option<Observer<'a>>,
}

impl<'a, R: Relaxation> Driver<'a, R> {
    pub fn new(ctx: &'a mut LayoutContext, relaxation: R) -> Self {
        Self {
            ctx,
            relaxation,
            ticks: 0,
            last_movement: f64::INFINITY,
            progress: Progress::Running,
            observer: None,
        }
    }

    /// Called after every committed tick with a read-only view of the context.
    pub fn with_observer(mut self, observer: impl FnMut(&LayoutContext, TickInfo) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn context(&self) -> &LayoutContext {
        self.ctx
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Runs one tick unless the driver has already stopped.
    pub fn step(&mut self) -> Progress {
        if self.progress != Progress::Running {
            return self.progress;
        }
        if self.relaxation.max_ticks().is_some_and(|cap| self.ticks >= cap) {
            return self.stop_at_cap();
        }

        let movement = self.relaxation.tick(self.ctx);
        self.ticks += 1;
        self.last_movement = movement;
        tracing::trace!(
            relaxation = self.relaxation.name(),
            tick = self.ticks,
            movement,
            "tick"
        );
        if let Some(observer) = self.observer.as_mut() {
            observer(
                self.ctx,
                TickInfo {
                    tick: self.ticks,
                    movement,
                },
            );
        }

        if self.relaxation.converged(movement) {
            tracing::debug!(
                relaxation = self.relaxation.name(),
                ticks = self.ticks,
                movement,
                "layout converged"
            );
            self.progress = Progress::Converged;
        } else if self.relaxation.max_ticks().is_some_and(|cap| self.ticks >= cap) {
            return self.stop_at_cap();
        }
        self.progress
    }

    fn stop_at_cap(&mut self) -> Progress {
        tracing::warn!(
            relaxation = self.relaxation.name(),
            ticks = self.ticks,
            movement = self.last_movement,
            "layout stopped at the tick cap without converging"
        );
        self.progress = Progress::CapReached;
        self.progress
    }

    pub fn report(&self) -> RunReport {
        RunReport {
            ticks: self.ticks,
            last_movement: self.last_movement,
            converged: self.progress == Progress::Converged,
        }
    }

    pub fn run_blocking(mut self) -> RunReport {
        while self.step() == Progress::Running {}
        self.report()
    }

    /// Like [`Driver::run_blocking`], but yields to the executor after every tick.
    pub async fn run_cooperative(mut self) -> RunReport {
        while self.step() == Progress::Running {
            yield_now().await;
        }
        self.report()
    }
}

/// Returns `Pending` once, waking itself, so other tasks on the executor get a turn.
pub fn yield_now() -> YieldNow {
    YieldNow { yielded: false }
}

#[derive(Debug)]
#[must_use = "futures do nothing unless awaited"]
pub struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            return Poll::Ready(());
        }
        self.yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}
