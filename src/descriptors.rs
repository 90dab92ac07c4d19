//! Registration metadata for inspection.

use std::fmt;

use crate::key::Key;
use crate::lifetime::Lifetime;

/// Describes one registration: what service it provides, under which
/// lifetime, and which concrete type backs it when known.
///
/// Obtained from
/// [`ServiceCollection::get_service_descriptors`](crate::ServiceCollection::get_service_descriptors);
/// useful for startup-time validation and diagnostics.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    key: Key,
    index: usize,
    lifetime: Lifetime,
    impl_type_name: Option<&'static str>,
}

impl ServiceDescriptor {
    pub(crate) fn new(
        key: Key,
        index: usize,
        lifetime: Lifetime,
        impl_type_name: Option<&'static str>,
    ) -> Self {
        Self {
            key,
            index,
            lifetime,
            impl_type_name,
        }
    }

    /// Name of the service type or trait this registration provides.
    pub fn service_name(&self) -> &'static str {
        self.key.display_name()
    }

    /// Position among the registrations for the same service; the highest
    /// index wins single-item queries.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// Whether the registration is resolved through the transient accessors.
    pub fn is_transient(&self) -> bool {
        self.key.is_transient()
    }

    /// Concrete implementation type, when the registration site recorded one.
    pub fn impl_type_name(&self) -> Option<&'static str> {
        self.impl_type_name
    }
}

impl fmt::Display for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{:?}]", self.service_name(), self.lifetime)?;
        if let Some(impl_name) = self.impl_type_name {
            write!(f, " <- {}", impl_name)?;
        }
        Ok(())
    }
}
