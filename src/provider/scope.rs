use super::{resolve_all, resolve_one, ServiceProvider};
use crate::error::DiResult;
use crate::internal::SlotTable;
use crate::key::Key;
use crate::registration::AnyArc;
use crate::traits::{Resolver, ResolverCore};

/// An isolated resolution scope.
///
/// Scoped services resolved here are cached per scope; singletons are shared
/// with the root provider. When the scope is dropped, its scoped instances
/// are torn down in reverse construction order while root singletons live
/// on.
///
/// # Examples
///
/// ```
/// use anvil_di::{Injectable, ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// struct RequestId;
/// impl Injectable for RequestId {
///     type Deps = ();
///     fn construct(_: ()) -> Self { RequestId }
/// }
///
/// let mut services = ServiceCollection::new();
/// services.add_scoped::<RequestId>();
/// let provider = services.build();
///
/// let a = provider.create_scope();
/// let b = provider.create_scope();
/// let id_a = a.get_required::<RequestId>();
/// let id_b = b.get_required::<RequestId>();
/// assert!(!Arc::ptr_eq(&id_a, &id_b));
/// assert!(Arc::ptr_eq(&id_a, &a.get_required::<RequestId>()));
/// ```
pub struct Scope {
    root: ServiceProvider,
    slots: SlotTable,
}

impl Scope {
    pub(crate) fn new(root: ServiceProvider) -> Self {
        Self {
            root,
            slots: SlotTable::new(),
        }
    }

    /// The root provider this scope was created from.
    pub fn root(&self) -> &ServiceProvider {
        &self.root
    }
}

impl ResolverCore for Scope {
    fn resolve_any(&self, key: &Key) -> DiResult<AnyArc> {
        // Singletons cache at the root but resolve their dependencies
        // through this scope; whichever scope builds a singleton first fixes
        // the scoped dependencies it captured.
        resolve_one(
            &self.root.inner().registry,
            key,
            &self.root.inner().slots,
            &self.slots,
            self,
        )
    }

    fn resolve_many(&self, key: &Key) -> DiResult<Vec<AnyArc>> {
        resolve_all(
            &self.root.inner().registry,
            key,
            &self.root.inner().slots,
            &self.slots,
            self,
        )
    }
}

impl Resolver for Scope {}

impl Drop for Scope {
    fn drop(&mut self) {
        self.slots.unwind();
    }
}
