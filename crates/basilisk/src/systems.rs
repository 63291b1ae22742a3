//! # Sandbox Systems
//!
//! Query-driven logic over the demo components. Each system resolves its
//! component identifiers once at construction and reuses the same filter
//! every tick.

use basilisk_core::{ComponentRegistry, ComponentType, Query, World};

use crate::components::{Health, Position, Velocity};

/// Integrates positions by velocities once per tick.
pub struct MovementSystem {
    position: ComponentType,
    velocity: ComponentType,
}

impl MovementSystem {
    /// Creates the system, resolving component identifiers from the
    /// registry.
    ///
    /// # Panics
    ///
    /// Panics if `Position` or `Velocity` were not registered.
    #[must_use]
    pub fn new(registry: &ComponentRegistry) -> Self {
        Self {
            position: registry.component_type_of::<Position>(),
            velocity: registry.component_type_of::<Velocity>(),
        }
    }

    /// Advances every moving entity by one step of `delta_time` seconds.
    pub fn run(&self, world: &mut World, delta_time: f32) {
        let mut visited = 0usize;
        Query::new()
            .read(self.velocity)
            .write(self.position)
            .execute(world, |view| {
                let velocity = *view.read::<Velocity>();
                let position = view.write::<Position>();
                position.x += velocity.dx * delta_time;
                position.y += velocity.dy * delta_time;
                visited += 1;
            });
        tracing::trace!("movement system advanced {} entities", visited);
    }
}

/// Regenerates one hit point per tick, up to the maximum.
pub struct RegenSystem {
    health: ComponentType,
}

impl RegenSystem {
    /// Creates the system, resolving component identifiers from the
    /// registry.
    ///
    /// # Panics
    ///
    /// Panics if `Health` was not registered.
    #[must_use]
    pub fn new(registry: &ComponentRegistry) -> Self {
        Self {
            health: registry.component_type_of::<Health>(),
        }
    }

    /// Ticks regeneration for every damageable entity.
    pub fn run(&self, world: &mut World) {
        Query::new().write(self.health).execute(world, |view| {
            let health = view.write::<Health>();
            if health.current < health.max {
                health.current += 1;
            }
        });
    }
}
