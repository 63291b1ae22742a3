//! # Entity Component System
//!
//! A registry-backed archetype ECS.
//!
//! ## Design Philosophy
//!
//! - Component types are registered at startup, not hardcoded: the registry
//!   maps stable name-derived identifiers to metadata and storage factories
//! - Entities with identical component sets share an archetype, stored
//!   column-wise with a common free-slot list
//! - Entity ids are generational handles; stale ids are always rejected
//! - Contract violations panic with a diagnostic; expected absences are
//!   `Option` values — no error-as-control-flow anywhere
//! - Zero unsafe code: type erasure is trait objects plus `dyn Any` downcasts

pub mod archetype;
pub mod component;
pub mod entity;
pub mod query;
pub mod storage;
pub mod world;

pub use archetype::Archetype;
pub use component::{
    Component, ComponentRegistry, ComponentType, ComponentTypeInfo, Property, PropertyKind,
    PropertyValue,
};
pub use entity::{EntityId, EntityLocation};
pub use query::{Query, View};
pub use storage::{AnyStorage, Storage};
pub use world::{EntityRef, EntityRefMut, World};
