//! # BASILISK
//!
//! The headless sandbox crate: demo components, query-driven systems, and
//! run configuration for exercising the core ECS end to end.
//!
//! ## Modules
//!
//! - `components`: the demo component set with reflection hooks
//! - `systems`: movement and regeneration over queries
//! - `config`: TOML run parameters, loaded once at startup
//! - `inspector`: text dump of registered component schemas

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod components;
pub mod config;
pub mod inspector;
pub mod systems;

// Re-export the kernel
pub use basilisk_core as core;

// Re-export commonly used types
pub use components::{Health, Position, Velocity};
pub use config::{ConfigError, SandboxConfig};
pub use systems::{MovementSystem, RegenSystem};
