//! Service key types for the dependency injection container.

use std::any::TypeId;

/// Key for service storage and lookup.
///
/// Keys uniquely identify registrations in the container. Transient
/// registrations are keyed by their own variants so that a transient
/// registration of `T` never collides with a singleton or scoped
/// registration of the same `T`.
///
/// # Key Types
///
/// - **Type**: singleton/scoped registrations of a concrete type
/// - **TransientOf**: transient registrations of a concrete type
/// - **Trait**: singleton/scoped registrations of a trait object
/// - **TransientTrait**: transient registrations of a trait object
#[derive(Debug, Clone)]
pub enum Key {
    /// Concrete type key with TypeId and name for diagnostics
    Type(TypeId, &'static str),
    /// Transient wrapper of a concrete type, keyed separately from `Type`
    TransientOf(TypeId, &'static str),
    /// Trait-object binding key; traits carry no TypeId, only the name
    Trait(&'static str),
    /// Transient wrapper of a trait object
    TransientTrait(&'static str),
}

impl Key {
    /// Get the type or trait name for display.
    ///
    /// This is the `std::any::type_name` result, used in error messages and
    /// introspection output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Key::Type(_, name) => name,
            Key::TransientOf(_, name) => name,
            Key::Trait(name) => name,
            Key::TransientTrait(name) => name,
        }
    }

    /// Whether this key names a transient registration.
    pub fn is_transient(&self) -> bool {
        matches!(self, Key::TransientOf(_, _) | Key::TransientTrait(_))
    }
}

// TypeId-only comparison for concrete types on the hot path; the name string
// is carried for diagnostics only.
impl PartialEq for Key {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Type(a, _), Key::Type(b, _)) => a == b,
            (Key::TransientOf(a, _), Key::TransientOf(b, _)) => a == b,
            (Key::Trait(a), Key::Trait(b)) => a == b,
            (Key::TransientTrait(a), Key::TransientTrait(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl std::hash::Hash for Key {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Key::Type(id, _) => {
                0u8.hash(state);
                id.hash(state);
            }
            Key::TransientOf(id, _) => {
                1u8.hash(state);
                id.hash(state);
            }
            Key::Trait(name) => {
                2u8.hash(state);
                name.hash(state);
            }
            Key::TransientTrait(name) => {
                3u8.hash(state);
                name.hash(state);
            }
        }
    }
}

#[inline(always)]
pub fn key_of_type<T: 'static>() -> Key {
    Key::Type(TypeId::of::<T>(), std::any::type_name::<T>())
}

#[inline(always)]
pub fn key_of_transient<T: 'static>() -> Key {
    Key::TransientOf(TypeId::of::<T>(), std::any::type_name::<T>())
}
