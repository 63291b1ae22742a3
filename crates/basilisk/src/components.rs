//! # Sandbox Components
//!
//! The demo component set. Plain data, `repr(C)`, with reflection hooks
//! registering every field so inspectors can enumerate layouts at runtime.

use basilisk_core::{Component, ComponentTypeInfo};
use bytemuck::{Pod, Zeroable};

/// 2D position in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Position {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Position {
    /// Creates a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Component for Position {
    fn reflect(info: &mut ComponentTypeInfo) {
        info.property::<f32>("x", bytemuck::offset_of!(Position, x));
        info.property::<f32>("y", bytemuck::offset_of!(Position, y));
    }
}

/// 2D velocity in world units per second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Velocity {
    /// X velocity component.
    pub dx: f32,
    /// Y velocity component.
    pub dy: f32,
}

impl Velocity {
    /// Creates a new velocity.
    #[inline]
    #[must_use]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

impl Component for Velocity {
    fn reflect(info: &mut ComponentTypeInfo) {
        info.property::<f32>("dx", bytemuck::offset_of!(Velocity, dx));
        info.property::<f32>("dy", bytemuck::offset_of!(Velocity, dy));
    }
}

/// Hit points for damageable entities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct Health {
    /// Current hit points.
    pub current: u32,
    /// Maximum hit points.
    pub max: u32,
}

impl Health {
    /// Creates a health component at full hit points.
    #[inline]
    #[must_use]
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }
}

impl Component for Health {
    fn reflect(info: &mut ComponentTypeInfo) {
        info.property::<u32>("current", bytemuck::offset_of!(Health, current));
        info.property::<u32>("max", bytemuck::offset_of!(Health, max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basilisk_core::{ComponentRegistry, PropertyKind};

    #[test]
    fn test_position_reflection_layout() {
        let mut registry = ComponentRegistry::new();
        let ty = registry.register::<Position>("Position");

        let info = registry.find(ty);
        assert_eq!(info.size(), 8);

        let properties = info.properties();
        assert_eq!(properties.len(), 2);
        assert_eq!(properties[0].name, "x");
        assert_eq!(properties[0].offset, 0);
        assert_eq!(properties[0].kind, PropertyKind::F32);
        assert_eq!(properties[1].name, "y");
        assert_eq!(properties[1].offset, 4);
    }

    #[test]
    fn test_health_reflection_layout() {
        let mut registry = ComponentRegistry::new();
        let ty = registry.register::<Health>("Health");

        let properties = registry.find(ty).properties();
        assert_eq!(properties[0].kind, PropertyKind::U32);
        assert_eq!(properties[1].offset, 4);
    }

    #[test]
    fn test_health_full() {
        let health = Health::full(100);
        assert_eq!(health.current, 100);
        assert_eq!(health.max, 100);
    }
}
