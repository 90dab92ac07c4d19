//! Service lifetime definitions.

/// Service lifetimes controlling instance caching behavior.
///
/// Defines how service instances are created, cached, and shared within
/// the container. The set is closed and every resolution path matches on
/// it exhaustively.
///
/// # Examples
///
/// ```rust
/// use anvil_di::{ServiceCollection, Resolver, Injectable};
/// use std::sync::Arc;
///
/// struct Database { url: String }
///
/// impl Injectable for Database {
///     type Deps = ();
///     fn construct(_: ()) -> Self {
///         Database { url: "postgres://localhost".to_string() }
///     }
/// }
///
/// let mut services = ServiceCollection::new();
///
/// // Singleton: one instance for the lifetime of the root provider
/// services.add_singleton::<Database>();
///
/// let provider = services.build();
/// let db1 = provider.get_required::<Database>();
/// let scope = provider.create_scope();
/// let db2 = scope.get_required::<Database>();
/// assert!(Arc::ptr_eq(&db1, &db2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Single instance per root provider, shared by all scopes.
    ///
    /// Created lazily on first request, cached in the root provider, and
    /// dropped when the root provider is dropped.
    Singleton,
    /// Single instance per scope, distinct across scopes.
    ///
    /// The root provider acts as its own scope: resolving a scoped service
    /// directly from the provider caches it in the root's table.
    Scoped,
    /// Fresh instance on every resolution, never cached.
    ///
    /// Transient instances are owned by the caller and never enter a
    /// teardown log.
    Transient,
}
