//! # Memory Management
//!
//! Allocation primitives backing the ECS entity table.

mod pool;

pub use pool::{PoolHandle, SlotError, SlotPool};
