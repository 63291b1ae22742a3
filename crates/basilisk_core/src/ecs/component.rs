//! # Component Types and Registry
//!
//! Components are pure data containers with no behavior. Unlike a
//! compile-time component list, BASILISK registers component types at
//! startup: each type gets a stable, name-derived [`ComponentType`]
//! identifier and a [`ComponentTypeInfo`] record holding its reflection
//! metadata and a storage factory. Worlds share one frozen registry.

use std::any::TypeId;
use std::collections::HashMap;
use std::hash::Hasher;

use siphasher::sip::SipHasher13;

use super::storage::{AnyStorage, Storage};

/// Hash keys for [`ComponentType`] derivation. Fixed so identifiers are
/// stable across processes and platforms.
const TYPE_HASH_KEY_0: u64 = 0x4241_5349_4c49_534b; // "BASILISK"
const TYPE_HASH_KEY_1: u64 = 0x4543_535f_5459_5045; // "ECS_TYPE"

/// Marker trait for ECS components.
///
/// Components must be plain data. The only required method is the static
/// field-registration hook, which appends one [`Property`] per field to the
/// type's metadata. Properties feed reflection/tooling (inspectors, editors);
/// the core storage and query logic never reads them.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone, Copy, Default, Pod, Zeroable)]
/// #[repr(C)]
/// struct Position {
///     x: f32,
///     y: f32,
/// }
///
/// impl Component for Position {
///     fn reflect(info: &mut ComponentTypeInfo) {
///         info.property::<f32>("x", bytemuck::offset_of!(Position, x));
///         info.property::<f32>("y", bytemuck::offset_of!(Position, y));
///     }
/// }
/// ```
pub trait Component: Send + Sync + 'static {
    /// Appends one property descriptor per field to `info`.
    fn reflect(info: &mut ComponentTypeInfo);
}

/// Stable identifier for a registered component type.
///
/// Derived deterministically from the registered name (SipHash-1-3 with
/// fixed keys), so the same name always yields the same identifier,
/// independent of registration order or process.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ComponentType(u64);

impl ComponentType {
    /// Computes the identifier for a component name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let mut hasher = SipHasher13::new_with_keys(TYPE_HASH_KEY_0, TYPE_HASH_KEY_1);
        hasher.write(name.as_bytes());
        Self(hasher.finish())
    }

    /// Returns the raw hash value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ComponentType({:#018x})", self.0)
    }
}

/// Primitive kind of a reflected component field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 32-bit unsigned integer.
    U32,
    /// 64-bit unsigned integer.
    U64,
    /// Boolean flag.
    Bool,
}

/// Field types that can appear as reflected component properties.
pub trait PropertyValue {
    /// The kind tag recorded for this field type.
    const KIND: PropertyKind;
}

macro_rules! impl_property_value {
    ($($ty:ty => $kind:ident),+ $(,)?) => {
        $(
            impl PropertyValue for $ty {
                const KIND: PropertyKind = PropertyKind::$kind;
            }
        )+
    };
}

impl_property_value! {
    f32 => F32,
    f64 => F64,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    bool => Bool,
}

/// One reflected field of a component type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    /// Field name.
    pub name: &'static str,
    /// Byte offset of the field within the component.
    pub offset: usize,
    /// Byte size of the field.
    pub size: usize,
    /// Primitive kind of the field.
    pub kind: PropertyKind,
}

/// Metadata for one registered component type.
///
/// Built once at registration time and immutable afterward. Owns the factory
/// that produces fresh, empty typed storages for archetype columns.
pub struct ComponentTypeInfo {
    name: String,
    component_type: ComponentType,
    size: usize,
    properties: Vec<Property>,
    factory: fn() -> Box<dyn AnyStorage>,
}

impl ComponentTypeInfo {
    /// Returns the registered display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the component's identifier.
    #[inline]
    #[must_use]
    pub const fn component_type(&self) -> ComponentType {
        self.component_type
    }

    /// Returns the in-memory size of the component in bytes.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the reflected field descriptors, in declaration order.
    #[inline]
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Appends a property descriptor for a field of type `F` at `offset`.
    ///
    /// Called from [`Component::reflect`] implementations, once per field.
    pub fn property<F: PropertyValue>(&mut self, name: &'static str, offset: usize) {
        self.properties.push(Property {
            name,
            offset,
            size: std::mem::size_of::<F>(),
            kind: F::KIND,
        });
    }

    /// Creates a fresh, empty storage for this component type.
    #[must_use]
    pub fn new_storage(&self) -> Box<dyn AnyStorage> {
        (self.factory)()
    }
}

impl std::fmt::Debug for ComponentTypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentTypeInfo")
            .field("name", &self.name)
            .field("component_type", &self.component_type)
            .field("size", &self.size)
            .field("properties", &self.properties)
            .finish()
    }
}

/// Monomorphized storage factory stored in [`ComponentTypeInfo`].
fn new_storage<T: Component>() -> Box<dyn AnyStorage> {
    Box::new(Storage::<T>::new())
}

/// Registry of component types.
///
/// Maps [`ComponentType`] identifiers to their metadata, plus a reverse map
/// from Rust [`TypeId`] so typed API surfaces can resolve `T` to its
/// registered identifier at runtime.
///
/// Registration happens once, before the first World is built; the registry
/// is then frozen behind an `Arc` and shared read-only. Looking up an
/// unregistered type is a contract violation and panics.
pub struct ComponentRegistry {
    infos: HashMap<ComponentType, ComponentTypeInfo>,
    by_rust_type: HashMap<TypeId, ComponentType>,
    /// Registration order, for deterministic iteration.
    order: Vec<ComponentType>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            infos: HashMap::new(),
            by_rust_type: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Registers component type `T` under `name`, returning its identifier.
    ///
    /// Invokes `T::reflect` to populate the type's property descriptors.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered, or if `T` was already
    /// registered under another name. Duplicate registration is a programmer
    /// error, not a runtime condition.
    pub fn register<T: Component>(&mut self, name: &str) -> ComponentType {
        let component_type = ComponentType::from_name(name);
        assert!(
            !self.infos.contains_key(&component_type),
            "duplicate component registration: `{name}`"
        );
        assert!(
            !self.by_rust_type.contains_key(&TypeId::of::<T>()),
            "component type `{}` is already registered (attempted to re-register as `{name}`)",
            std::any::type_name::<T>()
        );

        let mut info = ComponentTypeInfo {
            name: name.to_owned(),
            component_type,
            size: std::mem::size_of::<T>(),
            properties: Vec::new(),
            factory: new_storage::<T>,
        };
        T::reflect(&mut info);

        self.by_rust_type.insert(TypeId::of::<T>(), component_type);
        self.order.push(component_type);
        self.infos.insert(component_type, info);
        component_type
    }

    /// Looks up the metadata for a component identifier.
    ///
    /// # Panics
    ///
    /// Panics if the identifier was never registered.
    #[must_use]
    pub fn find(&self, ty: ComponentType) -> &ComponentTypeInfo {
        self.infos
            .get(&ty)
            .unwrap_or_else(|| panic!("component type {ty:?} was never registered"))
    }

    /// Resolves a Rust type to its registered identifier.
    ///
    /// # Panics
    ///
    /// Panics if `T` was never registered.
    #[must_use]
    pub fn component_type_of<T: Component>(&self) -> ComponentType {
        *self
            .by_rust_type
            .get(&TypeId::of::<T>())
            .unwrap_or_else(|| {
                panic!(
                    "component `{}` was never registered",
                    std::any::type_name::<T>()
                )
            })
    }

    /// Checks whether an identifier is registered.
    #[inline]
    #[must_use]
    pub fn contains(&self, ty: ComponentType) -> bool {
        self.infos.contains_key(&ty)
    }

    /// Returns the number of registered component types.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    /// Checks if the registry is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// Iterates over registered type metadata in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentTypeInfo> {
        self.order.iter().map(|ty| &self.infos[ty])
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
