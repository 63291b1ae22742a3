//! # BASILISK Sandbox
//!
//! Headless ECS exercise: registers the demo components, spawns an entity
//! population from a TOML config, and runs the systems in a fixed tick loop
//! while reporting timings.
//!
//! ## CRITICAL REQUIREMENTS
//! - NO GPU
//! - NO WINDOW
//! - HEADLESS ONLY
//!
//! ```bash
//! # Run with defaults
//! cargo run --bin sandbox
//!
//! # Run with a config file
//! cargo run --bin sandbox -- sandbox.toml
//! ```

use std::sync::Arc;
use std::time::Instant;

use basilisk::core::{ComponentRegistry, World};
use basilisk::{
    inspector, Health, MovementSystem, Position, RegenSystem, SandboxConfig, Velocity,
};

/// Fixed timestep, in seconds.
const TICK_SECONDS: f32 = 1.0 / 60.0;

/// Deterministic xorshift for spawn parameters - no RNG dependency needed.
fn xorshift(state: &mut u64) -> u64 {
    *state ^= *state << 13;
    *state ^= *state >> 7;
    *state ^= *state << 17;
    *state
}

fn main() {
    println!("═══════════════════════════════════════════════════════════════════");
    println!("                     BASILISK SANDBOX v0.1.0");
    println!("                        HEADLESS MODE");
    println!("═══════════════════════════════════════════════════════════════════");
    println!();

    // === CONFIG ===
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sandbox.toml".to_owned());
    let config = match SandboxConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("✗ FATAL: {err}");
            std::process::exit(1);
        }
    };
    println!("  Config:   {config_path}");
    println!("  Entities: {}", config.entities);
    println!("  Ticks:    {}", config.ticks);
    println!();

    // === COMPONENT REGISTRY ===
    let mut registry = ComponentRegistry::new();
    registry.register::<Position>("Position");
    registry.register::<Velocity>("Velocity");
    registry.register::<Health>("Health");

    println!("🧬 Registered component schemas:");
    for line in inspector::registry_report(&registry).lines() {
        println!("   {line}");
    }
    println!();

    let registry = Arc::new(registry);

    // === WORLD SETUP ===
    let mut world = World::with_entity_capacity(Arc::clone(&registry), config.entities);

    let spawn_start = Instant::now();
    let mut rng_state = 0xBA51_115Cu64;
    for i in 0..config.entities {
        let x = (i % 256) as f32;
        let y = (i / 256) as f32;
        let dx = (xorshift(&mut rng_state) % 200) as f32 / 100.0 - 1.0;
        let dy = (xorshift(&mut rng_state) % 200) as f32 / 100.0 - 1.0;

        let entity = world
            .spawn_ref()
            .add(Position::new(x, y))
            .add(Velocity::new(dx, dy));
        // Every fourth entity is damageable - a third archetype
        if i % 4 == 0 {
            let _ = entity.add(Health::full(100));
        }
    }
    println!(
        "🏗️  Spawned {} entities across {} archetypes in {:.2?}",
        world.entity_count(),
        world.archetype_count(),
        spawn_start.elapsed()
    );

    // === TICK LOOP ===
    let movement = MovementSystem::new(&registry);
    let regen = RegenSystem::new(&registry);

    let run_start = Instant::now();
    for tick in 1..=config.ticks {
        movement.run(&mut world, TICK_SECONDS);
        regen.run(&mut world);

        if config.report_every > 0 && tick % config.report_every == 0 {
            let elapsed = run_start.elapsed();
            println!(
                "   tick {:>6} | {:>8.2?} elapsed | {:.3} ms/tick avg",
                tick,
                elapsed,
                elapsed.as_secs_f64() * 1000.0 / f64::from(tick)
            );
        }
    }

    let total = run_start.elapsed();
    let damageable = world
        .entities()
        .filter(|id| world.get(*id).is_some_and(|entity| entity.has::<Health>()))
        .count();
    println!();
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  Entities:  {} ({damageable} damageable)", world.entity_count());
    println!("  Archetypes: {}", world.archetype_count());
    println!("  Ticks:     {} in {:.2?}", config.ticks, total);
    println!(
        "  Average:   {:.3} ms/tick",
        total.as_secs_f64() * 1000.0 / f64::from(config.ticks.max(1))
    );
    println!("═══════════════════════════════════════════════════════════════════");
}
