//! Resolver traits for service resolution.

use std::any::TypeId;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::Key;
use crate::registration::AnyArc;

/// Core resolver trait for object-safe service resolution.
///
/// Handles the low-level resolution mechanics over type-erased handles.
/// Most users should use the [`Resolver`] trait instead, which provides
/// ergonomic generic methods built on top of this one.
pub trait ResolverCore: Send + Sync {
    /// Resolves the last-registered descriptor for `key`.
    ///
    /// Returns the converted, service-typed handle wrapped in an
    /// `Arc<dyn Any>`. An absent registration is an error, distinct from the
    /// empty result of [`resolve_many`](Self::resolve_many).
    fn resolve_any(&self, key: &Key) -> DiResult<AnyArc>;

    /// Resolves every descriptor for `key`, in registration order.
    ///
    /// An unregistered key yields an empty vector, never an error.
    fn resolve_many(&self, key: &Key) -> DiResult<Vec<AnyArc>>;
}

fn downcast_concrete<T: 'static + Send + Sync>(any: AnyArc) -> DiResult<Arc<T>> {
    any.downcast::<T>()
        .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
}

// Trait handles are stored double-wrapped: the Any holds an Arc<Arc<T>>.
fn downcast_trait<T: ?Sized + 'static + Send + Sync>(any: AnyArc) -> DiResult<Arc<T>>
where
    Arc<T>: 'static,
{
    any.downcast::<Arc<T>>()
        .map(|boxed| (*boxed).clone())
        .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
}

/// High-level resolver interface with generic methods for type-safe service
/// resolution.
///
/// Implemented by `ServiceProvider`, `Scope` and `ResolverContext`, making
/// them interchangeable for resolution within their respective contexts.
///
/// Singleton and scoped services are resolved with `get*`; transient services
/// have their own accessors (`get_transient*`) because transient
/// registrations are keyed separately and are never cached. The `*_required`
/// variants panic on failure, the fail-fast path for dependencies the caller
/// cannot run without.
///
/// # Examples
///
/// ```
/// use anvil_di::{ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// trait Logger: Send + Sync {
///     fn log(&self, msg: &str);
/// }
///
/// struct ConsoleLogger;
/// impl Logger for ConsoleLogger {
///     fn log(&self, msg: &str) {
///         println!("LOG: {}", msg);
///     }
/// }
///
/// let mut collection = ServiceCollection::new();
/// collection.add_singleton_instance(42usize);
/// collection.add_singleton_trait(Arc::new(ConsoleLogger) as Arc<dyn Logger>);
///
/// let provider = collection.build();
///
/// let number = provider.get_required::<usize>();
/// assert_eq!(*number, 42);
///
/// let logger = provider.get_required_trait::<dyn Logger>();
/// logger.log("resolved");
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves a singleton or scoped service of concrete type `T`.
    ///
    /// If multiple implementations are registered for `T`, the last-registered
    /// one is returned.
    fn get<T: 'static + Send + Sync>(&self) -> DiResult<Arc<T>> {
        let key = Key::Type(TypeId::of::<T>(), std::any::type_name::<T>());
        downcast_concrete(self.resolve_any(&key)?)
    }

    /// Resolves a singleton or scoped service, panicking on failure.
    fn get_required<T: 'static + Send + Sync>(&self) -> Arc<T> {
        self.get::<T>().unwrap_or_else(|e| {
            panic!("Failed to resolve {}: {}", std::any::type_name::<T>(), e)
        })
    }

    /// Builds a fresh transient instance of concrete type `T`.
    ///
    /// Every call runs the registration's factory again; the returned `Arc`
    /// is the caller's to keep.
    fn get_transient<T: 'static + Send + Sync>(&self) -> DiResult<Arc<T>> {
        let key = Key::TransientOf(TypeId::of::<T>(), std::any::type_name::<T>());
        downcast_concrete(self.resolve_any(&key)?)
    }

    /// Builds a fresh transient instance, panicking on failure.
    fn get_required_transient<T: 'static + Send + Sync>(&self) -> Arc<T> {
        self.get_transient::<T>().unwrap_or_else(|e| {
            panic!("Failed to resolve transient {}: {}", std::any::type_name::<T>(), e)
        })
    }

    /// Resolves all singleton/scoped registrations of `T`, in registration
    /// order. Unregistered types yield an empty vector.
    fn get_all<T: 'static + Send + Sync>(&self) -> DiResult<Vec<Arc<T>>> {
        let key = Key::Type(TypeId::of::<T>(), std::any::type_name::<T>());
        let anys = self.resolve_many(&key)?;
        anys.into_iter().map(|a| downcast_concrete::<T>(a)).collect()
    }

    /// Builds one fresh instance per transient registration of `T`, in
    /// registration order. Unregistered types yield an empty vector.
    fn get_all_transient<T: 'static + Send + Sync>(&self) -> DiResult<Vec<Arc<T>>> {
        let key = Key::TransientOf(TypeId::of::<T>(), std::any::type_name::<T>());
        let anys = self.resolve_many(&key)?;
        anys.into_iter().map(|a| downcast_concrete::<T>(a)).collect()
    }

    /// Resolves the last-registered singleton/scoped implementation of a
    /// trait.
    fn get_trait<T: ?Sized + 'static + Send + Sync>(&self) -> DiResult<Arc<T>>
    where
        Arc<T>: 'static,
    {
        let key = Key::Trait(std::any::type_name::<T>());
        downcast_trait(self.resolve_any(&key)?)
    }

    /// Resolves a trait implementation, panicking on failure.
    fn get_required_trait<T: ?Sized + 'static + Send + Sync>(&self) -> Arc<T>
    where
        Arc<T>: 'static,
    {
        self.get_trait::<T>().unwrap_or_else(|e| {
            panic!("Failed to resolve trait {}: {}", std::any::type_name::<T>(), e)
        })
    }

    /// Resolves all singleton/scoped implementations of a trait, in
    /// registration order.
    fn get_all_trait<T: ?Sized + 'static + Send + Sync>(&self) -> DiResult<Vec<Arc<T>>>
    where
        Arc<T>: 'static,
    {
        let key = Key::Trait(std::any::type_name::<T>());
        let anys = self.resolve_many(&key)?;
        anys.into_iter().map(|a| downcast_trait::<T>(a)).collect()
    }

    /// Builds a fresh transient implementation of a trait.
    fn get_transient_trait<T: ?Sized + 'static + Send + Sync>(&self) -> DiResult<Arc<T>>
    where
        Arc<T>: 'static,
    {
        let key = Key::TransientTrait(std::any::type_name::<T>());
        downcast_trait(self.resolve_any(&key)?)
    }

    /// Builds a fresh transient trait implementation, panicking on failure.
    fn get_required_transient_trait<T: ?Sized + 'static + Send + Sync>(&self) -> Arc<T>
    where
        Arc<T>: 'static,
    {
        self.get_transient_trait::<T>().unwrap_or_else(|e| {
            panic!("Failed to resolve transient trait {}: {}", std::any::type_name::<T>(), e)
        })
    }

    /// Builds one fresh instance per transient trait registration, in
    /// registration order.
    fn get_all_transient_trait<T: ?Sized + 'static + Send + Sync>(&self) -> DiResult<Vec<Arc<T>>>
    where
        Arc<T>: 'static,
    {
        let key = Key::TransientTrait(std::any::type_name::<T>());
        let anys = self.resolve_many(&key)?;
        anys.into_iter().map(|a| downcast_trait::<T>(a)).collect()
    }
}
