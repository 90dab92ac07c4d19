//! Service registration types.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::DiResult;
use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::provider::ResolverContext;

/// Type-erased Arc used to carry any service instance through the engine.
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

pub(crate) type CreateFn =
    Arc<dyn for<'a> Fn(&ResolverContext<'a>) -> DiResult<AnyArc> + Send + Sync>;
pub(crate) type ConvertFn = Arc<dyn Fn(&AnyArc) -> DiResult<AnyArc> + Send + Sync>;

/// One registration entry for a key.
///
/// `create` builds the concrete implementation in its owning form; what it
/// returns is what a cache slot stores and what the teardown log owns.
/// `convert` narrows that owning form to the service-typed handle actually
/// handed to callers, and runs on every resolution. For trait registrations
/// the converted handle is stored double-wrapped (`Arc<Arc<dyn Svc>>` inside
/// the `Any`) so the accessor can downcast it.
#[derive(Clone)]
pub(crate) struct Registration {
    pub(crate) lifetime: Lifetime,
    pub(crate) create: CreateFn,
    pub(crate) convert: ConvertFn,
    /// Implementation type name, when the registration site knows it
    pub(crate) impl_type_name: Option<&'static str>,
}

impl Registration {
    pub(crate) fn new(lifetime: Lifetime, create: CreateFn, convert: ConvertFn) -> Self {
        Self {
            lifetime,
            create,
            convert,
            impl_type_name: None,
        }
    }

    pub(crate) fn with_impl_name(
        lifetime: Lifetime,
        create: CreateFn,
        convert: ConvertFn,
        impl_type_name: &'static str,
    ) -> Self {
        let mut reg = Self::new(lifetime, create, convert);
        reg.impl_type_name = Some(impl_type_name);
        reg
    }
}

/// Registry mapping each key to its registrations in insertion order.
///
/// Append-only while the `ServiceCollection` is being populated; moved into
/// the root provider at build time and never mutated afterwards. Insertion
/// order is semantically meaningful: single-item queries resolve the last
/// entry, multi-item queries resolve all entries in ascending order.
#[derive(Clone, Default)]
pub(crate) struct Registry {
    entries: HashMap<Key, Vec<Registration>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub(crate) fn push(&mut self, key: Key, registration: Registration) {
        self.entries.entry(key).or_default().push(registration);
    }

    #[inline(always)]
    pub(crate) fn get(&self, key: &Key) -> Option<&[Registration]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Key, &[Registration])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }
}
