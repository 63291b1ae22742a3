//! # Entity Handles and Records
//!
//! Entities are lightweight generational handles into the World's entity
//! table. The table slot holds the bookkeeping record: which component types
//! the entity carries and where its data row lives.

use crate::memory::PoolHandle;

use super::component::ComponentType;

/// Unique identifier for an entity.
///
/// Wraps a generational [`PoolHandle`] into the World's entity table:
/// index in the lower 32 bits, generation in the upper 32. A handle issued
/// before its table slot was recycled is rejected by every lookup — a stale
/// id never aliases a different entity.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct EntityId(PoolHandle);

impl EntityId {
    /// Null/invalid entity id.
    pub const NULL: Self = Self(PoolHandle::NULL);

    /// Wraps a table handle.
    #[inline]
    #[must_use]
    pub(crate) const fn from_handle(handle: PoolHandle) -> Self {
        Self(handle)
    }

    /// Returns the underlying table handle.
    #[inline]
    #[must_use]
    pub(crate) const fn handle(self) -> PoolHandle {
        self.0
    }

    /// Returns the index portion of the id.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0.index()
    }

    /// Returns the generation portion of the id.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.0.generation()
    }

    /// Checks if this id is null.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0.is_null()
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::NULL
    }
}

impl std::fmt::Debug for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            write!(f, "EntityId(NULL)")
        } else {
            write!(f, "EntityId({}v{})", self.index(), self.generation())
        }
    }
}

/// Where an entity's data row lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityLocation {
    /// Index into the World's archetype list.
    pub archetype: usize,
    /// Row index within that archetype's columns.
    pub slot: usize,
}

/// Per-entity bookkeeping, owned by the World's entity table.
///
/// Invariant: `location` is `Some` exactly when `components` is non-empty.
/// An entity with no components is *unassigned* — it exists in the table but
/// owns no archetype row.
pub(crate) struct EntityRecord {
    /// Component types the entity carries, kept sorted.
    pub(crate) components: Vec<ComponentType>,
    /// The entity's data row, if assigned to an archetype.
    pub(crate) location: Option<EntityLocation>,
}

impl EntityRecord {
    /// A freshly spawned, unassigned record.
    pub(crate) const fn empty() -> Self {
        Self {
            components: Vec::new(),
            location: None,
        }
    }

    /// Checks whether the entity carries a component type.
    pub(crate) fn has(&self, ty: ComponentType) -> bool {
        self.components.binary_search(&ty).is_ok()
    }
}
