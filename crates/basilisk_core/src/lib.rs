//! # BASILISK Core Engine
//!
//! A registry-backed archetype Entity Component System designed for:
//! - Component types registered at startup, no compile-time component list
//! - Dense, column-wise archetype storage with O(1) slot reuse
//! - Generational entity handles that never alias after recycling
//!
//! ## Architecture Rules
//!
//! 1. **Signature is identity** - No two archetypes ever share the same
//!    exact component-type set
//! 2. **Rows move as a unit** - When an entity's schema changes, every
//!    column of its row migrates (or is discarded) together
//! 3. **Contracts panic, absences don't** - Programmer errors halt with a
//!    diagnostic; missing values are `Option`s
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use basilisk_core::{ComponentRegistry, Query, World};
//!
//! let mut registry = ComponentRegistry::new();
//! let position = registry.register::<Position>("Position");
//! let velocity = registry.register::<Velocity>("Velocity");
//!
//! let mut world = World::new(Arc::new(registry));
//! let entity = world.spawn();
//! world.add_component(entity, Position::new(0.0, 0.0));
//! world.add_component(entity, Velocity::new(1.0, 1.0));
//!
//! Query::new().read(velocity).write(position).execute(&mut world, |view| {
//!     let vel = *view.read::<Velocity>();
//!     let pos = view.write::<Position>();
//!     pos.x += vel.dx;
//!     pos.y += vel.dy;
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod ecs;
pub mod memory;

pub use ecs::{
    AnyStorage, Archetype, Component, ComponentRegistry, ComponentType, ComponentTypeInfo,
    EntityId, EntityLocation, EntityRef, EntityRefMut, Property, PropertyKind, PropertyValue,
    Query, Storage, View, World,
};
pub use memory::{PoolHandle, SlotError, SlotPool};
