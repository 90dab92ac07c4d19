//! Service resolution.
//!
//! [`ServiceProvider`] is the root container produced by
//! [`ServiceCollection::build`](crate::ServiceCollection::build). It owns the
//! immutable registry and the singleton cache, and it behaves as its own
//! scope, so scoped services resolved directly on the root are cached there.
//! [`Scope`] layers a second cache for scoped services on top of a shared
//! root.
//!
//! Every cached instance is recorded in its owner's teardown log at the
//! moment it is first built; dropping the owner tears the instances down in
//! reverse construction order.

mod scope;

pub(crate) mod context;

pub use context::ResolverContext;
pub use scope::Scope;

use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::internal::SlotTable;
use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::registration::{AnyArc, Registration, Registry};
use crate::traits::{Resolver, ResolverCore};

/// Builds one handle for the registration at `index`, caching the owning
/// instance per its lifetime.
///
/// The cache a lifetime lands in and the resolver the constructor sees are
/// deliberately independent: a scope resolving a singleton commits the
/// instance to the root's table while the constructor still resolves its own
/// dependencies through the scope. Transient registrations skip caching and
/// the teardown log entirely.
pub(crate) fn resolve_index(
    reg: &Registration,
    key: &Key,
    index: usize,
    len: usize,
    singleton_table: &SlotTable,
    scoped_table: &SlotTable,
    dep_ctx: &dyn ResolverCore,
) -> DiResult<AnyArc> {
    let ctx = ResolverContext::new(dep_ctx);
    let owned = match reg.lifetime {
        Lifetime::Singleton => {
            singleton_table.get_or_create(key, index, len, || (reg.create)(&ctx))?
        }
        Lifetime::Scoped => scoped_table.get_or_create(key, index, len, || (reg.create)(&ctx))?,
        Lifetime::Transient => (reg.create)(&ctx)?,
    };
    (reg.convert)(&owned)
}

fn missing(key: &Key) -> DiError {
    if key.is_transient() {
        DiError::TransientNotFound(key.display_name())
    } else {
        DiError::NotFound(key.display_name())
    }
}

/// Resolves the last registration for `key`, the one that wins single-item
/// queries.
pub(crate) fn resolve_one(
    registry: &Registry,
    key: &Key,
    singleton_table: &SlotTable,
    scoped_table: &SlotTable,
    dep_ctx: &dyn ResolverCore,
) -> DiResult<AnyArc> {
    let entries = registry.get(key).ok_or_else(|| missing(key))?;
    let index = entries.len() - 1;
    resolve_index(
        &entries[index],
        key,
        index,
        entries.len(),
        singleton_table,
        scoped_table,
        dep_ctx,
    )
}

/// Resolves every registration for `key` in registration order. A key with no
/// registrations yields an empty list rather than an error.
pub(crate) fn resolve_all(
    registry: &Registry,
    key: &Key,
    singleton_table: &SlotTable,
    scoped_table: &SlotTable,
    dep_ctx: &dyn ResolverCore,
) -> DiResult<Vec<AnyArc>> {
    let entries = match registry.get(key) {
        Some(entries) => entries,
        None => return Ok(Vec::new()),
    };
    entries
        .iter()
        .enumerate()
        .map(|(index, reg)| {
            resolve_index(
                reg,
                key,
                index,
                entries.len(),
                singleton_table,
                scoped_table,
                dep_ctx,
            )
        })
        .collect()
}

pub(crate) struct ProviderInner {
    pub(crate) registry: Registry,
    pub(crate) slots: SlotTable,
}

impl Drop for ProviderInner {
    fn drop(&mut self) {
        self.slots.unwind();
    }
}

/// Root service provider.
///
/// Cheap to clone; all clones share the registry and the singleton cache.
/// Dropping the last handle (scopes hold one internally) tears down every
/// cached instance in reverse construction order.
///
/// # Examples
///
/// ```
/// use anvil_di::{ServiceCollection, Resolver};
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton_instance(String::from("hello"));
///
/// let provider = services.build();
/// assert_eq!(*provider.get_required::<String>(), "hello");
/// ```
#[derive(Clone)]
pub struct ServiceProvider {
    inner: Arc<ProviderInner>,
}

impl ServiceProvider {
    pub(crate) fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(ProviderInner {
                registry,
                slots: SlotTable::new(),
            }),
        }
    }

    pub(crate) fn inner(&self) -> &ProviderInner {
        &self.inner
    }

    /// Creates a scope with its own cache for scoped services.
    ///
    /// Singletons resolved through the scope still land in this provider's
    /// cache; dropping the scope tears down only the scoped instances.
    pub fn create_scope(&self) -> Scope {
        Scope::new(self.clone())
    }
}

impl ResolverCore for ServiceProvider {
    fn resolve_any(&self, key: &Key) -> DiResult<AnyArc> {
        // The root is its own scope: scoped services cache alongside
        // singletons here.
        resolve_one(
            &self.inner.registry,
            key,
            &self.inner.slots,
            &self.inner.slots,
            self,
        )
    }

    fn resolve_many(&self, key: &Key) -> DiResult<Vec<AnyArc>> {
        resolve_all(
            &self.inner.registry,
            key,
            &self.inner.slots,
            &self.inner.slots,
            self,
        )
    }
}

impl Resolver for ServiceProvider {}
