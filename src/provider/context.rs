use crate::error::DiResult;
use crate::key::Key;
use crate::registration::AnyArc;
use crate::traits::{Resolver, ResolverCore};

/// Borrowed resolver handed to factory closures and [`Injectable`] constructors.
///
/// Resolution through the context goes back to the provider or scope that
/// initiated the current resolution, so a factory can pull further
/// dependencies with the same lifetime rules as the original call.
///
/// [`Injectable`]: crate::Injectable
///
/// # Examples
///
/// ```
/// use anvil_di::{ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// struct Config { url: String }
/// struct Client { config: Arc<Config> }
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton_instance(Config { url: "localhost".into() });
/// services.add_singleton_factory(|ctx| Client {
///     config: ctx.get_required::<Config>(),
/// });
///
/// let provider = services.build();
/// assert_eq!(provider.get_required::<Client>().config.url, "localhost");
/// ```
pub struct ResolverContext<'a> {
    inner: &'a dyn ResolverCore,
}

impl<'a> ResolverContext<'a> {
    pub(crate) fn new(inner: &'a dyn ResolverCore) -> Self {
        Self { inner }
    }
}

impl ResolverCore for ResolverContext<'_> {
    fn resolve_any(&self, key: &Key) -> DiResult<AnyArc> {
        self.inner.resolve_any(key)
    }

    fn resolve_many(&self, key: &Key) -> DiResult<Vec<AnyArc>> {
        self.inner.resolve_many(key)
    }
}

impl Resolver for ResolverContext<'_> {}
