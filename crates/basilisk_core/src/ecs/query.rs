//! # Queries and Views
//!
//! A query is a read/write filter over component types: it selects every
//! archetype whose signature contains the full read set and the full write
//! set, then visits each occupied row through a short-lived [`View`]. The
//! view gates typed access against the declared sets, so a system cannot
//! quietly touch data it never asked for.

use super::archetype::Archetype;
use super::component::{Component, ComponentRegistry, ComponentType};
use super::world::World;

/// A read/write component-type filter.
///
/// Built by value: `Query::new().read(a).write(b)`. The filter is stateless
/// between executions; duplicates are tolerated and call order is
/// irrelevant. Selection is subset containment, not exact signature match —
/// a query deliberately visits archetypes carrying extra, irrelevant
/// components.
///
/// # Example
///
/// ```rust,ignore
/// Query::new()
///     .read(velocity_type)
///     .write(position_type)
///     .execute(&mut world, |view| {
///         let vel = *view.read::<Velocity>();
///         let pos = view.write::<Position>();
///         pos.x += vel.dx;
///     });
/// ```
#[derive(Clone, Debug, Default)]
pub struct Query {
    reads: Vec<ComponentType>,
    writes: Vec<ComponentType>,
}

impl Query {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component type to the read set.
    #[must_use]
    pub fn read(mut self, ty: ComponentType) -> Self {
        if !self.reads.contains(&ty) {
            self.reads.push(ty);
        }
        self
    }

    /// Adds a component type to the write set.
    #[must_use]
    pub fn write(mut self, ty: ComponentType) -> Self {
        if !self.writes.contains(&ty) {
            self.writes.push(ty);
        }
        self
    }

    /// Returns the read set.
    #[inline]
    #[must_use]
    pub fn reads(&self) -> &[ComponentType] {
        &self.reads
    }

    /// Returns the write set.
    #[inline]
    #[must_use]
    pub fn writes(&self) -> &[ComponentType] {
        &self.writes
    }

    /// Checks whether an archetype satisfies both filter sets.
    fn matches(&self, archetype: &Archetype) -> bool {
        self.reads
            .iter()
            .chain(self.writes.iter())
            .all(|ty| archetype.supports(*ty))
    }

    /// Runs the query against a world.
    ///
    /// Matching archetypes are visited in creation order, occupied rows in
    /// ascending slot order — deterministic, but not entity-spawn order once
    /// migrations have occurred. The callback receives one [`View`] per
    /// occupied row; the view mutably borrows the archetype, so the world's
    /// structure cannot be mutated while iteration is in progress.
    pub fn execute<F>(&self, world: &mut World, mut callback: F)
    where
        F: FnMut(&mut View<'_>),
    {
        let World {
            archetypes,
            registry,
            ..
        } = world;
        let registry: &ComponentRegistry = registry;

        for archetype in archetypes.iter_mut() {
            if !self.matches(archetype) {
                continue;
            }
            for slot in 0..archetype.total_slots() {
                if !archetype.is_slot_used(slot) {
                    continue;
                }
                let mut view = View {
                    query: self,
                    archetype: &mut *archetype,
                    slot,
                    registry,
                };
                callback(&mut view);
            }
        }
    }
}

/// Typed accessor for one entity's row during query iteration.
///
/// Bound to the query's read/write sets, the matched archetype, and a slot
/// index for the duration of one callback invocation; it cannot be stored
/// beyond the callback.
pub struct View<'a> {
    query: &'a Query,
    archetype: &'a mut Archetype,
    slot: usize,
    registry: &'a ComponentRegistry,
}

impl View<'_> {
    /// Returns the slot index this view is bound to.
    #[inline]
    #[must_use]
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Reads the entity's component of type `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not registered, if `T`'s type is not in the query's
    /// declared read set, or if the value is absent — impossible for an
    /// occupied row unless the engine itself is buggy, but checked.
    #[must_use]
    pub fn read<T: Component>(&self) -> &T {
        let ty = self.registry.component_type_of::<T>();
        assert!(
            self.query.reads.contains(&ty),
            "view read of `{}` which is not in the query's read set",
            self.registry.find(ty).name()
        );
        self.archetype
            .typed_column::<T>(ty)
            .read(self.slot)
            .unwrap_or_else(|| {
                panic!(
                    "component `{}` vacant at occupied slot {}",
                    self.registry.find(ty).name(),
                    self.slot
                )
            })
    }

    /// Gets mutable access to the entity's component of type `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not registered, if `T`'s type is not in the query's
    /// declared write set, or if the value is absent.
    pub fn write<T: Component>(&mut self) -> &mut T {
        let ty = self.registry.component_type_of::<T>();
        assert!(
            self.query.writes.contains(&ty),
            "view write of `{}` which is not in the query's write set",
            self.registry.find(ty).name()
        );
        let slot = self.slot;
        let registry = self.registry;
        self.archetype
            .typed_column_mut::<T>(ty)
            .write(slot)
            .unwrap_or_else(move || {
                panic!(
                    "component `{}` vacant at occupied slot {slot}",
                    registry.find(ty).name()
                )
            })
    }
}
