use futures::executor::{LocalPool, block_on};
use futures::task::LocalSpawnExt;
use nalgebra::Vector2;
use railmap_layout::driver::{TickInfo, yield_now};
use railmap_layout::graph::{Network, PlatformRecord, StationRecord};
use railmap_layout::{
    Driver, LayoutContext, PhysicsOptions, PhysicsRelaxation, Progress, Relaxation,
    SpringRelaxation,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn pair() -> LayoutContext {
    let mut net = Network::new();
    net.insert_station("A", StationRecord::default());
    net.insert_station("B", StationRecord::default());
    net.insert_platform("A", "1", PlatformRecord::new("B"))
        .unwrap();
    net.insert_platform("B", "1", PlatformRecord::new("A"))
        .unwrap();

    let mut ctx = LayoutContext::new(&net);
    ctx.set_position("A", Vector2::new(-10.0, 0.0));
    ctx.set_position("B", Vector2::new(10.0, 0.0));
    ctx
}

#[test]
fn driver_stops_at_the_tick_cap() {
    let mut ctx = pair();
    let opts = PhysicsOptions {
        max_ticks: Some(3),
        ..Default::default()
    };
    let report = Driver::new(&mut ctx, PhysicsRelaxation::new(opts)).run_blocking();

    assert_eq!(report.ticks, 3);
    assert!(!report.converged);
    assert!(report.last_movement > 0.0);
}

#[test]
fn driver_does_not_tick_after_stopping() {
    let mut ctx = pair();
    let mut driver = Driver::new(&mut ctx, PhysicsRelaxation::default());
    while driver.step() == Progress::Running {}

    let before = driver.report();
    assert_eq!(driver.step(), Progress::Converged);
    assert_eq!(driver.report(), before);
}

#[test]
fn driver_reports_every_tick_to_the_observer() {
    let mut ctx = pair();
    let seen: RefCell<Vec<TickInfo>> = RefCell::new(Vec::new());

    let report = Driver::new(&mut ctx, PhysicsRelaxation::default())
        .with_observer(|ctx, info| {
            assert_eq!(ctx.len(), 2);
            seen.borrow_mut().push(info);
        })
        .run_blocking();

    let seen = seen.into_inner();
    assert_eq!(seen.len(), report.ticks);
    assert!(seen.iter().enumerate().all(|(i, t)| t.tick == i + 1));
    assert!(seen.iter().all(|t| t.movement >= 0.0));
    assert_eq!(seen.last().map(|t| t.movement), Some(report.last_movement));
}

#[test]
fn empty_network_converges_immediately() {
    let mut ctx = LayoutContext::new(&Network::new());
    let report = Driver::new(&mut ctx, SpringRelaxation::default()).run_blocking();
    assert!(report.converged);
    assert_eq!(report.ticks, 1);
}

#[test]
fn cooperative_run_matches_blocking_run() {
    let mut blocking = pair();
    let mut cooperative = pair();

    let a = Driver::new(&mut blocking, PhysicsRelaxation::default()).run_blocking();
    let b = block_on(Driver::new(&mut cooperative, PhysicsRelaxation::default()).run_cooperative());

    assert_eq!(a, b);
    assert_eq!(blocking.positions(), cooperative.positions());
}

#[test]
fn cooperative_run_interleaves_with_other_tasks() {
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();

    let ticks = Rc::new(Cell::new(0usize));
    let done = Rc::new(Cell::new(false));
    let seen_by_render = Rc::new(RefCell::new(Vec::new()));

    {
        let ticks = ticks.clone();
        let done = done.clone();
        spawner
            .spawn_local(async move {
                let mut ctx = pair();
                let report = Driver::new(&mut ctx, PhysicsRelaxation::default())
                    .with_observer(|_, info| ticks.set(info.tick))
                    .run_cooperative()
                    .await;
                assert!(report.converged);
                done.set(true);
            })
            .unwrap();
    }
    {
        let ticks = ticks.clone();
        let done = done.clone();
        let seen_by_render = seen_by_render.clone();
        spawner
            .spawn_local(async move {
                while !done.get() {
                    seen_by_render.borrow_mut().push(ticks.get());
                    yield_now().await;
                }
            })
            .unwrap();
    }

    pool.run();

    assert!(done.get());
    let total = ticks.get();
    let seen = seen_by_render.borrow();
    assert!(total > 1);
    assert!(
        seen.iter().any(|&t| t > 0 && t < total),
        "render task only ran before or after the layout: {seen:?}"
    );
}

#[test]
fn relaxations_name_themselves() {
    assert_eq!(PhysicsRelaxation::default().name(), "physics");
    assert_eq!(SpringRelaxation::default().name(), "spring");
}
