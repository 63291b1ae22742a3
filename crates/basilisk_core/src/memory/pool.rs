//! # Generational Slot Pool
//!
//! Slot allocator for objects that are frequently inserted and removed.
//! Every slot carries a generation counter, so a handle to a removed object
//! is rejected forever instead of silently aliasing whatever value was
//! recycled into the same slot.

use thiserror::Error;

/// Handle to a value in a [`SlotPool`].
///
/// The handle is split into two parts:
/// - Lower 32 bits: index into the pool's slot array
/// - Upper 32 bits: generation counter for detecting stale handles
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct PoolHandle(u64);

impl PoolHandle {
    /// Creates a new handle from index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the index portion of the handle.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the handle.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Null/invalid handle.
    pub const NULL: Self = Self(u64::MAX);

    /// Checks if this handle is null.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for PoolHandle {
    fn default() -> Self {
        Self::NULL
    }
}

impl std::fmt::Debug for PoolHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            write!(f, "PoolHandle(NULL)")
        } else {
            write!(f, "PoolHandle({}v{})", self.index(), self.generation())
        }
    }
}

/// Reasons a [`PoolHandle`] fails validation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotError {
    /// The handle is the null sentinel.
    #[error("handle is null")]
    Null,

    /// The handle's index has never been allocated.
    #[error("handle index {index} is out of bounds (pool has {len} slots)")]
    BadIndex {
        /// Index carried by the handle.
        index: u32,
        /// Number of slots ever allocated by the pool.
        len: usize,
    },

    /// The slot exists but holds no value.
    #[error("slot {0} is vacant (value was removed)")]
    Vacant(u32),

    /// The slot was recycled since the handle was issued.
    #[error("stale handle: slot {index} was recycled (handle generation {handle}, current {current})")]
    StaleGeneration {
        /// Index carried by the handle.
        index: u32,
        /// Generation carried by the handle.
        handle: u32,
        /// Generation currently stored in the slot.
        current: u32,
    },
}

/// One slot of a [`SlotPool`]: the current generation plus the value, if any.
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// A generational slot pool.
///
/// Values are stored in a dense array of optional slots with a free-index
/// list, so insert, remove, and lookup are all O(1). Removing a value pushes
/// its index onto the free list; the next insert into that index bumps the
/// slot's generation, invalidating every handle issued before the removal.
///
/// # Example
///
/// ```rust,ignore
/// let mut pool: SlotPool<u32> = SlotPool::new();
/// let handle = pool.insert(42);
/// assert_eq!(pool.get(handle), Some(&42));
///
/// pool.remove(handle);
/// assert!(!pool.is_valid(handle));
/// ```
pub struct SlotPool<T> {
    /// Slot array. Grows on demand; never shrinks.
    slots: Vec<Slot<T>>,
    /// Indices of vacant slots available for reuse.
    free_list: Vec<usize>,
    /// Number of live values.
    live_count: usize,
}

impl<T> SlotPool<T> {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            live_count: 0,
        }
    }

    /// Creates an empty pool with room for `capacity` values before
    /// reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            live_count: 0,
        }
    }

    /// Returns the number of live values.
    #[inline]
    #[must_use]
    pub const fn live_count(&self) -> usize {
        self.live_count
    }

    /// Returns the number of slots ever allocated (live or vacant).
    #[inline]
    #[must_use]
    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    /// Inserts a value, returning its handle.
    ///
    /// Reuses a vacant slot if one exists, bumping its generation so stale
    /// handles to the slot stay rejected.
    pub fn insert(&mut self, value: T) -> PoolHandle {
        self.live_count += 1;

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index];
            slot.generation = slot.generation.wrapping_add(1);
            slot.value = Some(value);
            return PoolHandle::new(index as u32, slot.generation);
        }

        let index = self.slots.len();
        assert!(
            index < u32::MAX as usize,
            "slot pool exhausted the u32 index space"
        );
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        PoolHandle::new(index as u32, 0)
    }

    /// Validates a handle, reporting exactly why it is invalid.
    ///
    /// # Errors
    ///
    /// Returns the specific [`SlotError`] for a null, out-of-bounds, vacant,
    /// or stale handle.
    pub fn check(&self, handle: PoolHandle) -> Result<(), SlotError> {
        if handle.is_null() {
            return Err(SlotError::Null);
        }
        let index = handle.index() as usize;
        let slot = self.slots.get(index).ok_or(SlotError::BadIndex {
            index: handle.index(),
            len: self.slots.len(),
        })?;
        if slot.generation != handle.generation() {
            return Err(SlotError::StaleGeneration {
                index: handle.index(),
                handle: handle.generation(),
                current: slot.generation,
            });
        }
        if slot.value.is_none() {
            return Err(SlotError::Vacant(handle.index()));
        }
        Ok(())
    }

    /// Checks whether a handle refers to a live value.
    #[inline]
    #[must_use]
    pub fn is_valid(&self, handle: PoolHandle) -> bool {
        self.check(handle).is_ok()
    }

    /// Gets a reference to the value behind a handle, with the validation
    /// failure preserved for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns the [`SlotError`] describing why the handle is invalid.
    pub fn get_checked(&self, handle: PoolHandle) -> Result<&T, SlotError> {
        self.check(handle)?;
        match self.slots[handle.index() as usize].value.as_ref() {
            Some(value) => Ok(value),
            None => Err(SlotError::Vacant(handle.index())),
        }
    }

    /// Gets a mutable reference to the value behind a handle, with the
    /// validation failure preserved for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns the [`SlotError`] describing why the handle is invalid.
    pub fn get_checked_mut(&mut self, handle: PoolHandle) -> Result<&mut T, SlotError> {
        self.check(handle)?;
        match self.slots[handle.index() as usize].value.as_mut() {
            Some(value) => Ok(value),
            None => Err(SlotError::Vacant(handle.index())),
        }
    }

    /// Gets a reference to the value behind a handle.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        self.get_checked(handle).ok()
    }

    /// Gets a mutable reference to the value behind a handle.
    #[inline]
    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.get_checked_mut(handle).ok()
    }

    /// Removes the value behind a handle, freeing its slot for reuse.
    ///
    /// Returns `None` if the handle is invalid or the value was already
    /// removed.
    pub fn remove(&mut self, handle: PoolHandle) -> Option<T> {
        self.check(handle).ok()?;
        let index = handle.index() as usize;
        let value = self.slots[index].value.take();
        if value.is_some() {
            self.free_list.push(index);
            self.live_count -= 1;
        }
        value
    }

    /// Iterates over all live values with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (PoolHandle, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value
                .as_ref()
                .map(|value| (PoolHandle::new(index as u32, slot.generation), value))
        })
    }
}

impl<T> Default for SlotPool<T> {
    fn default() -> Self {
        Self::new()
    }
}
