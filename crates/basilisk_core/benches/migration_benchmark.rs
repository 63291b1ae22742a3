//! # Migration Benchmark
//!
//! Measures schema churn: the cost of moving an entity's row between
//! archetypes when components are added and removed.

#![allow(missing_docs)]

use std::sync::Arc;

use basilisk_core::{Component, ComponentRegistry, ComponentTypeInfo, World};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

#[derive(Clone, Copy, Debug, Default)]
struct Position {
    x: f32,
    y: f32,
}

impl Component for Position {
    fn reflect(info: &mut ComponentTypeInfo) {
        info.property::<f32>("x", 0);
        info.property::<f32>("y", 4);
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Velocity {
    dx: f32,
    dy: f32,
}

impl Component for Velocity {
    fn reflect(info: &mut ComponentTypeInfo) {
        info.property::<f32>("dx", 0);
        info.property::<f32>("dy", 4);
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Burning {
    seconds_left: f32,
}

impl Component for Burning {
    fn reflect(info: &mut ComponentTypeInfo) {
        info.property::<f32>("seconds_left", 0);
    }
}

fn registry() -> Arc<ComponentRegistry> {
    let mut registry = ComponentRegistry::new();
    registry.register::<Position>("Position");
    registry.register::<Velocity>("Velocity");
    registry.register::<Burning>("Burning");
    Arc::new(registry)
}

fn bench_single_entity_round_trip(c: &mut Criterion) {
    let mut world = World::new(registry());
    let entity = world.spawn();
    world.add_component(entity, Position { x: 0.0, y: 0.0 });
    world.add_component(entity, Velocity { dx: 1.0, dy: 1.0 });

    // Steady state: both archetypes exist, the row ping-pongs between them
    c.bench_function("migration_round_trip", |b| {
        b.iter(|| {
            world.add_component(entity, Burning { seconds_left: 3.0 });
            let burning = world.remove_component::<Burning>(entity);
            black_box(burning.seconds_left)
        });
    });
}

fn bench_bulk_status_effect(c: &mut Criterion) {
    const COUNT: usize = 1_000;

    let mut world = World::new(registry());
    let mut ids = Vec::with_capacity(COUNT);
    for _ in 0..COUNT {
        let entity = world.spawn();
        world.add_component(entity, Position { x: 0.0, y: 0.0 });
        world.add_component(entity, Velocity { dx: 1.0, dy: 1.0 });
        ids.push(entity);
    }

    c.bench_function("migration_bulk_1k", |b| {
        b.iter(|| {
            for id in &ids {
                world.add_component(*id, Burning { seconds_left: 1.0 });
            }
            for id in &ids {
                let _ = world.remove_component::<Burning>(*id);
            }
            black_box(world.archetype_count())
        });
    });
}

criterion_group!(benches, bench_single_entity_round_trip, bench_bulk_status_effect);
criterion_main!(benches);
