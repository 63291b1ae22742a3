//! # Archetypes
//!
//! An archetype groups every entity that carries exactly the same set of
//! component types, stored column-wise: one type-erased [`Storage`] per type
//! in the signature, all sharing a single free-slot list.
//!
//! ## Row alignment
//!
//! The load-bearing invariant: for any slot index, every column is either
//! live or vacant in lockstep, so one index always denotes one entity's row
//! across all columns. Every mutation path maintains it — transfers vacate
//! or move all columns of a row together, and freed rows are fully cleared
//! before the index is recycled. Debug builds assert it on the hot accessors.

use super::component::{Component, ComponentType};
use super::storage::{AnyStorage, Storage};

/// A group of entities sharing an identical component-type signature.
///
/// The signature is the archetype's identity: the World never creates two
/// archetypes with the same exact signature. Columns are ordered to match
/// the sorted signature.
pub struct Archetype {
    /// Sorted, deduplicated component types — the archetype's identity.
    signature: Vec<ComponentType>,
    /// One column per signature entry, in signature order.
    columns: Vec<Box<dyn AnyStorage>>,
    /// Vacated row indices available for reuse, shared by all columns.
    free_slots: Vec<usize>,
}

impl Archetype {
    /// Builds an archetype from a sorted signature and its matching columns.
    pub(crate) fn new(signature: Vec<ComponentType>, columns: Vec<Box<dyn AnyStorage>>) -> Self {
        assert!(
            !signature.is_empty(),
            "archetype must have at least one component type"
        );
        assert_eq!(
            signature.len(),
            columns.len(),
            "archetype signature and column count must match"
        );
        debug_assert!(
            signature.windows(2).all(|pair| pair[0] < pair[1]),
            "archetype signature must be sorted and deduplicated"
        );
        Self {
            signature,
            columns,
            free_slots: Vec::new(),
        }
    }

    /// Returns the archetype's signature (sorted).
    #[inline]
    #[must_use]
    pub fn signature(&self) -> &[ComponentType] {
        &self.signature
    }

    /// Checks whether this archetype has a column for `ty`.
    #[inline]
    #[must_use]
    pub fn supports(&self, ty: ComponentType) -> bool {
        self.signature.binary_search(&ty).is_ok()
    }

    /// Checks whether this archetype's signature exactly equals `types`
    /// (which must be sorted).
    #[inline]
    #[must_use]
    pub fn signature_matches(&self, types: &[ComponentType]) -> bool {
        self.signature == types
    }

    /// Returns the column position for `ty`, if supported.
    fn column_index(&self, ty: ComponentType) -> Option<usize> {
        self.signature.binary_search(&ty).ok()
    }

    /// Returns the type-erased column for `ty`.
    ///
    /// # Panics
    ///
    /// Panics if the archetype does not support `ty`.
    pub(crate) fn column(&self, ty: ComponentType) -> &dyn AnyStorage {
        let index = self
            .column_index(ty)
            .unwrap_or_else(|| panic!("archetype has no column for {ty:?}"));
        self.columns[index].as_ref()
    }

    /// Returns the typed column for `T`.
    ///
    /// # Panics
    ///
    /// Panics if the archetype does not support `ty` or the column stores a
    /// different component type (engine bug).
    pub(crate) fn typed_column<T: Component>(&self, ty: ComponentType) -> &Storage<T> {
        self.column(ty)
            .as_any()
            .downcast_ref::<Storage<T>>()
            .unwrap_or_else(|| {
                panic!(
                    "column {ty:?} does not store component `{}`",
                    std::any::type_name::<T>()
                )
            })
    }

    /// Returns the typed column for `T`, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the archetype does not support `ty` or the column stores a
    /// different component type (engine bug).
    pub(crate) fn typed_column_mut<T: Component>(&mut self, ty: ComponentType) -> &mut Storage<T> {
        let index = self
            .column_index(ty)
            .unwrap_or_else(|| panic!("archetype has no column for {ty:?}"));
        self.columns[index]
            .as_any_mut()
            .downcast_mut::<Storage<T>>()
            .unwrap_or_else(|| {
                panic!(
                    "column {ty:?} does not store component `{}`",
                    std::any::type_name::<T>()
                )
            })
    }

    /// Reserves a row index: a recycled free slot if available, else the
    /// current append position.
    pub fn pop_free_index(&mut self) -> usize {
        debug_assert!(
            self.columns
                .iter()
                .all(|column| column.total_slots() == self.columns[0].total_slots()),
            "archetype column lengths diverged"
        );
        self.free_slots
            .pop()
            .unwrap_or_else(|| self.columns[0].total_slots())
    }

    /// Stores a component value into the column for `ty` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the archetype does not support `ty`, or if `index` was not
    /// reserved (beyond the append position).
    pub fn store<T: Component>(&mut self, ty: ComponentType, value: T, index: usize) {
        self.typed_column_mut::<T>(ty).store(value, index);
    }

    /// Moves one entity's row into another archetype.
    ///
    /// Every column shared with `other` is moved value-by-value into row
    /// `to_index`; columns absent from `other` are discarded — the row must
    /// be fully vacant before its index is recycled. Afterward `from_index`
    /// is marked free in this archetype.
    pub fn transfer_to(&mut self, other: &mut Archetype, from_index: usize, to_index: usize) {
        for (position, ty) in self.signature.iter().enumerate() {
            match other.column_index(*ty) {
                Some(target) => {
                    self.columns[position].transfer_to(
                        other.columns[target].as_mut(),
                        from_index,
                        to_index,
                    );
                }
                None => {
                    self.columns[position].discard(from_index);
                }
            }
        }
        self.free_slots.push(from_index);
    }

    /// Vacates every column of a row and marks the index free.
    pub(crate) fn clear_row(&mut self, index: usize) {
        for column in &mut self.columns {
            column.discard(index);
        }
        self.free_slots.push(index);
    }

    /// Returns the high-water mark of row indices.
    #[inline]
    #[must_use]
    pub fn total_slots(&self) -> usize {
        self.columns[0].total_slots()
    }

    /// Returns the number of occupied rows.
    #[inline]
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.columns[0].live_count()
    }

    /// Checks whether row `index` is occupied.
    #[inline]
    #[must_use]
    pub fn is_slot_used(&self, index: usize) -> bool {
        let used = self.columns[0].is_slot_used(index);
        debug_assert!(
            self.is_row_aligned(index),
            "row alignment violated at slot {index}"
        );
        used
    }

    /// Checks that every column agrees on the occupancy of row `index`.
    ///
    /// Inspection helper for tests and debug assertions; always true unless
    /// the engine itself is buggy.
    #[must_use]
    pub fn is_row_aligned(&self, index: usize) -> bool {
        let used = self.columns[0].is_slot_used(index);
        self.columns
            .iter()
            .all(|column| column.is_slot_used(index) == used)
    }
}

impl std::fmt::Debug for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archetype")
            .field("signature", &self.signature)
            .field("total_slots", &self.total_slots())
            .field("live_count", &self.live_count())
            .finish()
    }
}
