//! # ECS World
//!
//! The central container: the authoritative entity table, the append-only
//! archetype list, and a shared handle to the component registry. The World
//! orchestrates archetype lookup/creation and migrates entity rows between
//! archetypes whenever an entity's component set changes.

use std::sync::Arc;

use crate::memory::SlotPool;

use super::archetype::Archetype;
use super::component::{Component, ComponentRegistry, ComponentType};
use super::entity::{EntityId, EntityLocation, EntityRecord};

/// The ECS World.
///
/// Entities progress through two states: *unassigned* (spawned, no
/// components, no archetype row) and *assigned* (at least one component,
/// exactly one row in exactly one archetype). Adding or removing a component
/// moves the entity's row to the archetype matching its new exact component
/// set, creating that archetype on first use.
///
/// Archetypes are never destroyed; their indices are stable for the World's
/// lifetime. All operations are synchronous and single-threaded.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = ComponentRegistry::new();
/// registry.register::<Position>("Position");
/// let registry = Arc::new(registry);
///
/// let mut world = World::new(Arc::clone(&registry));
/// let entity = world.spawn();
/// world.add_component(entity, Position::new(0.0, 0.0));
/// ```
pub struct World {
    /// The entity table. Slot generations make stale ids detectable.
    pub(crate) entities: SlotPool<EntityRecord>,
    /// Append-only archetype list; indices are stable.
    pub(crate) archetypes: Vec<Archetype>,
    /// Shared, frozen component registry.
    pub(crate) registry: Arc<ComponentRegistry>,
}

impl World {
    /// Creates an empty world bound to a registry.
    #[must_use]
    pub fn new(registry: Arc<ComponentRegistry>) -> Self {
        Self {
            entities: SlotPool::new(),
            archetypes: Vec::new(),
            registry,
        }
    }

    /// Creates an empty world with room for `capacity` entities before the
    /// table reallocates.
    #[must_use]
    pub fn with_entity_capacity(registry: Arc<ComponentRegistry>, capacity: usize) -> Self {
        Self {
            entities: SlotPool::with_capacity(capacity),
            archetypes: Vec::new(),
            registry,
        }
    }

    /// Returns the registry this world is bound to.
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Returns the number of live entities.
    #[inline]
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.live_count()
    }

    /// Returns the number of archetypes created so far.
    #[inline]
    #[must_use]
    pub fn archetype_count(&self) -> usize {
        self.archetypes.len()
    }

    /// Returns the archetype list for inspection (creation order).
    #[inline]
    #[must_use]
    pub fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }

    /// Spawns a new entity with an empty component set.
    pub fn spawn(&mut self) -> EntityId {
        EntityId::from_handle(self.entities.insert(EntityRecord::empty()))
    }

    /// Spawns a new entity and returns the mutable reference wrapper bound
    /// to it, for chained component insertion.
    pub fn spawn_ref(&mut self) -> EntityRefMut<'_> {
        let id = self.spawn();
        EntityRefMut { world: self, id }
    }

    /// Checks whether an id refers to a live entity.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.is_valid(id.handle())
    }

    /// Gets a read-only reference wrapper for an entity. `None` if the id is
    /// stale or was never issued.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<EntityRef<'_>> {
        if self.entities.is_valid(id.handle()) {
            Some(EntityRef { world: self, id })
        } else {
            None
        }
    }

    /// Gets a mutable reference wrapper for an entity. `None` if the id is
    /// stale or was never issued.
    pub fn get_mut(&mut self, id: EntityId) -> Option<EntityRefMut<'_>> {
        if self.entities.is_valid(id.handle()) {
            Some(EntityRefMut { world: self, id })
        } else {
            None
        }
    }

    /// Iterates over all live entity ids, in table order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities
            .iter()
            .map(|(handle, _)| EntityId::from_handle(handle))
    }

    /// Attaches a component to an entity, migrating its row to the archetype
    /// matching the enlarged component set.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not registered, if `id` is invalid/stale, or if the
    /// entity already has a component of type `T`.
    pub fn add_component<T: Component>(&mut self, id: EntityId, value: T) {
        let ty = self.registry.component_type_of::<T>();
        let record = self.record(id, "add_component");
        if record.has(ty) {
            panic!(
                "add_component: entity {id:?} already has component `{}`",
                self.registry.find(ty).name()
            );
        }
        let old_location = record.location;
        let mut new_set = record.components.clone();
        new_set.push(ty);
        new_set.sort_unstable();

        let archetype_index = self.find_or_create_archetype(&new_set);
        let slot = self.archetypes[archetype_index].pop_free_index();
        self.archetypes[archetype_index].store(ty, value, slot);

        if let Some(old) = old_location {
            let (source, target) =
                archetype_pair(&mut self.archetypes, old.archetype, archetype_index);
            source.transfer_to(target, old.slot, slot);
            tracing::trace!(
                "migrated entity {:?} from archetype {} to {}",
                id,
                old.archetype,
                archetype_index
            );
        }

        let record = self.record_mut(id, "add_component");
        record.components = new_set;
        record.location = Some(EntityLocation {
            archetype: archetype_index,
            slot,
        });
    }

    /// Detaches a component from an entity, returning its value. Remaining
    /// components migrate to the archetype matching the reduced set; an
    /// entity whose last component is removed becomes unassigned.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not registered, if `id` is invalid/stale, or if the
    /// entity does not have a component of type `T`.
    pub fn remove_component<T: Component>(&mut self, id: EntityId) -> T {
        let ty = self.registry.component_type_of::<T>();
        let record = self.record(id, "remove_component");
        if !record.has(ty) {
            panic!(
                "remove_component: entity {id:?} does not have component `{}`",
                self.registry.find(ty).name()
            );
        }
        let Some(location) = record.location else {
            unreachable!("entity with components must be assigned to an archetype")
        };
        let mut new_set = record.components.clone();
        new_set.retain(|t| *t != ty);

        let removed = self.archetypes[location.archetype]
            .typed_column_mut::<T>(ty)
            .remove(location.slot)
            .unwrap_or_else(|| {
                panic!(
                    "component `{}` vacant at occupied slot {}",
                    self.registry.find(ty).name(),
                    location.slot
                )
            });

        if new_set.is_empty() {
            self.archetypes[location.archetype].clear_row(location.slot);
            let record = self.record_mut(id, "remove_component");
            record.components.clear();
            record.location = None;
            return removed;
        }

        let archetype_index = self.find_or_create_archetype(&new_set);
        let slot = self.archetypes[archetype_index].pop_free_index();
        let (source, target) =
            archetype_pair(&mut self.archetypes, location.archetype, archetype_index);
        source.transfer_to(target, location.slot, slot);
        tracing::trace!(
            "migrated entity {:?} from archetype {} to {}",
            id,
            location.archetype,
            archetype_index
        );

        let record = self.record_mut(id, "remove_component");
        record.components = new_set;
        record.location = Some(EntityLocation {
            archetype: archetype_index,
            slot,
        });
        removed
    }

    /// Despawns an entity, clearing its archetype row and recycling its
    /// table slot with a bumped generation.
    ///
    /// Returns `false` if the id was already invalid (non-fatal, matching
    /// the fault-free lookup paths).
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let Some(record) = self.entities.remove(id.handle()) else {
            return false;
        };
        if let Some(location) = record.location {
            self.archetypes[location.archetype].clear_row(location.slot);
        }
        true
    }

    /// Reads a component value of an entity. `None` if the id is invalid or
    /// the entity does not carry `T`.
    #[must_use]
    pub fn read_component<T: Component>(&self, id: EntityId) -> Option<&T> {
        let record = self.entities.get(id.handle())?;
        let location = record.location?;
        let ty = self.registry.component_type_of::<T>();
        if !record.has(ty) {
            return None;
        }
        self.archetypes[location.archetype]
            .typed_column::<T>(ty)
            .read(location.slot)
    }

    /// Gets mutable access to a component value of an entity. `None` if the
    /// id is invalid or the entity does not carry `T`.
    pub fn write_component<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        let record = self.entities.get(id.handle())?;
        let location = record.location?;
        let ty = self.registry.component_type_of::<T>();
        if !record.has(ty) {
            return None;
        }
        self.archetypes[location.archetype]
            .typed_column_mut::<T>(ty)
            .write(location.slot)
    }

    /// Fetches the record for a fatal-contract operation, folding the slot
    /// pool's diagnostic into the panic message on failure.
    fn record(&self, id: EntityId, operation: &str) -> &EntityRecord {
        self.entities
            .get_checked(id.handle())
            .unwrap_or_else(|err| panic!("{operation}: invalid entity {id:?}: {err}"))
    }

    /// Mutable counterpart of [`Self::record`].
    fn record_mut(&mut self, id: EntityId, operation: &str) -> &mut EntityRecord {
        self.entities
            .get_checked_mut(id.handle())
            .unwrap_or_else(|err| panic!("{operation}: invalid entity {id:?}: {err}"))
    }

    /// Finds the archetype whose signature exactly equals `signature`
    /// (sorted), creating and appending it if none exists.
    ///
    /// Exact-set equality is deliberate: matching on "supports at least this
    /// set" could reuse a broader archetype and break the
    /// one-archetype-one-signature invariant.
    fn find_or_create_archetype(&mut self, signature: &[ComponentType]) -> usize {
        if let Some(index) = self
            .archetypes
            .iter()
            .position(|archetype| archetype.signature_matches(signature))
        {
            return index;
        }

        let columns = signature
            .iter()
            .map(|ty| self.registry.find(*ty).new_storage())
            .collect();
        self.archetypes
            .push(Archetype::new(signature.to_vec(), columns));
        let index = self.archetypes.len() - 1;
        tracing::debug!(
            "created archetype {} with {} component types",
            index,
            signature.len()
        );
        index
    }
}

/// Borrows two distinct archetypes from the list mutably.
fn archetype_pair(
    archetypes: &mut [Archetype],
    first: usize,
    second: usize,
) -> (&mut Archetype, &mut Archetype) {
    debug_assert_ne!(
        first, second,
        "migration source and target must be distinct archetypes"
    );
    if first < second {
        let (left, right) = archetypes.split_at_mut(second);
        (&mut left[first], &mut right[0])
    } else {
        let (left, right) = archetypes.split_at_mut(first);
        (&mut right[0], &mut left[second])
    }
}

/// Read-only reference wrapper for one entity.
pub struct EntityRef<'w> {
    world: &'w World,
    id: EntityId,
}

impl EntityRef<'_> {
    /// Returns the entity's id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the component types the entity carries (sorted).
    #[must_use]
    pub fn component_types(&self) -> &[ComponentType] {
        self.world
            .entities
            .get(self.id.handle())
            .map_or(&[][..], |record| record.components.as_slice())
    }

    /// Checks whether the entity carries a component of type `T`.
    #[must_use]
    pub fn has<T: Component>(&self) -> bool {
        self.world.read_component::<T>(self.id).is_some()
    }

    /// Reads a component value. `None` if the entity does not carry `T`.
    #[must_use]
    pub fn read<T: Component>(&self) -> Option<&T> {
        self.world.read_component(self.id)
    }
}

/// Mutable reference wrapper for one entity.
pub struct EntityRefMut<'w> {
    world: &'w mut World,
    id: EntityId,
}

impl EntityRefMut<'_> {
    /// Returns the entity's id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the component types the entity carries (sorted).
    #[must_use]
    pub fn component_types(&self) -> &[ComponentType] {
        self.world
            .entities
            .get(self.id.handle())
            .map_or(&[][..], |record| record.components.as_slice())
    }

    /// Checks whether the entity carries a component of type `T`.
    #[must_use]
    pub fn has<T: Component>(&self) -> bool {
        self.world.read_component::<T>(self.id).is_some()
    }

    /// Reads a component value. `None` if the entity does not carry `T`.
    #[must_use]
    pub fn read<T: Component>(&self) -> Option<&T> {
        self.world.read_component(self.id)
    }

    /// Gets mutable access to a component value. `None` if the entity does
    /// not carry `T`.
    pub fn write<T: Component>(&mut self) -> Option<&mut T> {
        self.world.write_component(self.id)
    }

    /// Attaches a component, consuming and returning the wrapper so
    /// insertions chain.
    ///
    /// # Panics
    ///
    /// Same contract as [`World::add_component`].
    #[must_use]
    pub fn add<T: Component>(self, value: T) -> Self {
        self.world.add_component(self.id, value);
        self
    }

    /// Detaches a component, returning its value.
    ///
    /// # Panics
    ///
    /// Same contract as [`World::remove_component`].
    pub fn remove<T: Component>(&mut self) -> T {
        self.world.remove_component(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::ComponentTypeInfo;

    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    struct Pos {
        x: f32,
        y: f32,
    }

    impl Component for Pos {
        fn reflect(info: &mut ComponentTypeInfo) {
            info.property::<f32>("x", 0);
            info.property::<f32>("y", 4);
        }
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    struct Vel {
        dx: f32,
        dy: f32,
    }

    impl Component for Vel {
        fn reflect(info: &mut ComponentTypeInfo) {
            info.property::<f32>("dx", 0);
            info.property::<f32>("dy", 4);
        }
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    struct Tag {
        value: u32,
    }

    impl Component for Tag {
        fn reflect(info: &mut ComponentTypeInfo) {
            info.property::<u32>("value", 0);
        }
    }

    fn test_world() -> World {
        let mut registry = ComponentRegistry::new();
        registry.register::<Pos>("Pos");
        registry.register::<Vel>("Vel");
        registry.register::<Tag>("Tag");
        World::new(Arc::new(registry))
    }

    #[test]
    fn test_spawn_starts_unassigned() {
        let mut world = test_world();
        let entity = world.spawn();

        assert!(world.is_alive(entity));
        assert_eq!(world.entity_count(), 1);
        assert_eq!(world.archetype_count(), 0);
        assert!(world.get(entity).unwrap().component_types().is_empty());
    }

    #[test]
    fn test_add_component_assigns_archetype() {
        let mut world = test_world();
        let entity = world.spawn();

        world.add_component(entity, Pos { x: 1.0, y: 2.0 });

        assert_eq!(world.archetype_count(), 1);
        assert_eq!(world.archetypes()[0].live_count(), 1);
        assert_eq!(
            world.read_component::<Pos>(entity),
            Some(&Pos { x: 1.0, y: 2.0 })
        );
    }

    #[test]
    fn test_migration_preserves_values() {
        let mut world = test_world();
        let entity = world.spawn();

        world.add_component(entity, Pos { x: 1.0, y: 2.0 });
        world.add_component(entity, Vel { dx: 3.0, dy: 4.0 });

        // {Pos} archetype plus {Pos, Vel} archetype
        assert_eq!(world.archetype_count(), 2);
        assert_eq!(world.archetypes()[0].live_count(), 0);
        assert_eq!(world.archetypes()[1].live_count(), 1);
        assert_eq!(
            world.read_component::<Pos>(entity),
            Some(&Pos { x: 1.0, y: 2.0 })
        );
        assert_eq!(
            world.read_component::<Vel>(entity),
            Some(&Vel { dx: 3.0, dy: 4.0 })
        );
    }

    #[test]
    fn test_archetype_signatures_stay_unique() {
        let mut world = test_world();

        for _ in 0..8 {
            let entity = world.spawn();
            world.add_component(entity, Pos::default());
            world.add_component(entity, Vel::default());
        }

        assert_eq!(world.archetype_count(), 2);
        for (i, a) in world.archetypes().iter().enumerate() {
            for b in world.archetypes().iter().skip(i + 1) {
                assert!(!a.signature_matches(b.signature()));
            }
        }
    }

    #[test]
    fn test_freed_slot_is_reused_after_migration() {
        let mut world = test_world();

        let first = world.spawn();
        world.add_component(first, Pos { x: 1.0, y: 1.0 });
        // Migrating out of {Pos} frees its slot 0
        world.add_component(first, Vel::default());

        let second = world.spawn();
        world.add_component(second, Pos { x: 2.0, y: 2.0 });

        // The {Pos} archetype reused the freed slot instead of appending
        assert_eq!(world.archetypes()[0].total_slots(), 1);
        assert_eq!(world.archetypes()[0].live_count(), 1);
        assert_eq!(
            world.read_component::<Pos>(second),
            Some(&Pos { x: 2.0, y: 2.0 })
        );
    }

    #[test]
    fn test_remove_component_returns_value() {
        let mut world = test_world();
        let entity = world.spawn();

        world.add_component(entity, Pos { x: 1.0, y: 2.0 });
        world.add_component(entity, Vel { dx: 3.0, dy: 4.0 });
        world.add_component(entity, Tag { value: 5 });

        let removed = world.remove_component::<Vel>(entity);
        assert_eq!(removed, Vel { dx: 3.0, dy: 4.0 });
        assert_eq!(
            world.read_component::<Pos>(entity),
            Some(&Pos { x: 1.0, y: 2.0 })
        );
        assert_eq!(world.read_component::<Tag>(entity), Some(&Tag { value: 5 }));
        assert_eq!(world.read_component::<Vel>(entity), None);
    }

    #[test]
    fn test_remove_last_component_unassigns() {
        let mut world = test_world();
        let entity = world.spawn();

        world.add_component(entity, Pos::default());
        let _ = world.remove_component::<Pos>(entity);

        assert!(world.is_alive(entity));
        assert!(world.get(entity).unwrap().component_types().is_empty());
        assert_eq!(world.archetypes()[0].live_count(), 0);
    }

    #[test]
    fn test_despawn_and_stale_handle_rejection() {
        let mut world = test_world();

        let first = world.spawn();
        world.add_component(first, Pos::default());
        assert!(world.despawn(first));
        assert!(!world.despawn(first)); // Already dead
        assert!(!world.is_alive(first));
        assert!(world.get(first).is_none());

        // The table slot is recycled with a new generation
        let second = world.spawn();
        assert_eq!(second.index(), first.index());
        assert_ne!(second.generation(), first.generation());
        assert!(!world.is_alive(first));
        assert!(world.is_alive(second));
    }

    #[test]
    fn test_entity_ref_wrappers() {
        let mut world = test_world();

        let id = world
            .spawn_ref()
            .add(Pos { x: 1.0, y: 2.0 })
            .add(Vel { dx: 0.5, dy: 0.5 })
            .id();

        let entity = world.get(id).unwrap();
        assert!(entity.has::<Pos>());
        assert!(entity.has::<Vel>());
        assert!(!entity.has::<Tag>());
        assert_eq!(entity.component_types().len(), 2);

        let mut entity = world.get_mut(id).unwrap();
        entity.write::<Pos>().unwrap().x = 10.0;
        assert_eq!(entity.read::<Pos>().unwrap().x, 10.0);

        let vel = entity.remove::<Vel>();
        assert_eq!(vel, Vel { dx: 0.5, dy: 0.5 });
    }

    #[test]
    #[should_panic(expected = "already has component")]
    fn test_duplicate_add_panics() {
        let mut world = test_world();
        let entity = world.spawn();
        world.add_component(entity, Pos::default());
        world.add_component(entity, Pos::default());
    }

    #[test]
    #[should_panic(expected = "does not have component")]
    fn test_remove_missing_component_panics() {
        let mut world = test_world();
        let entity = world.spawn();
        world.add_component(entity, Pos::default());
        let _ = world.remove_component::<Vel>(entity);
    }

    #[test]
    #[should_panic(expected = "invalid entity")]
    fn test_add_to_despawned_entity_panics() {
        let mut world = test_world();
        let entity = world.spawn();
        world.despawn(entity);
        world.add_component(entity, Pos::default());
    }

    #[test]
    #[should_panic(expected = "was never registered")]
    fn test_unregistered_component_panics() {
        #[derive(Clone, Copy, Default)]
        struct Ghost;
        impl Component for Ghost {
            fn reflect(_info: &mut ComponentTypeInfo) {}
        }

        let mut world = test_world();
        let entity = world.spawn();
        world.add_component(entity, Ghost);
    }
}
