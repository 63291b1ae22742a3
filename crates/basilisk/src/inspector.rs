//! # Registry Inspector
//!
//! Text dump of the registered component types and their reflected field
//! layouts. This is the consumer of the reflection metadata: tooling that
//! enumerates schemas without knowing any component type at compile time.

use std::fmt::Write;

use basilisk_core::ComponentRegistry;

/// Formats every registered component type with its field layout.
#[must_use]
pub fn registry_report(registry: &ComponentRegistry) -> String {
    let mut report = String::new();
    for info in registry.iter() {
        let _ = writeln!(report, "{} ({} bytes)", info.name(), info.size());
        for property in info.properties() {
            let _ = writeln!(
                report,
                "  .{:<12} {:?} @ bytes {}..{}",
                property.name,
                property.kind,
                property.offset,
                property.offset + property.size
            );
        }
    }
    report
}
