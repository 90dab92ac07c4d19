//! Constructor auto-wiring.
//!
//! Rust has no constructor introspection, so a type opts into auto-wiring by
//! declaring its dependency list once, as an [`Injectable`] impl. The rest of
//! the engine only ever consumes `T::Deps::resolve(..)` and never looks at
//! the type itself.
//!
//! Each dependency picks its resolution shape through the [`Dep`] trait:
//!
//! - `Arc<T>`: a required singleton or scoped instance
//! - [`Transient<T>`]: a required fresh transient instance
//! - [`TraitDep<T>`]: a required singleton or scoped trait-object service
//! - [`TransientTraitDep<T>`]: a required fresh transient trait object
//! - `Vec<Arc<T>>` / `Vec<TraitDep<T>>`: every singleton/scoped
//!   registration, in registration order (empty when none)
//! - `Vec<Transient<T>>` / `Vec<TransientTraitDep<T>>`: one fresh instance
//!   per transient registration (empty when none)
//! - `()` or a tuple of the above (up to 8 elements)
//!
//! # Examples
//!
//! ```
//! use anvil_di::{Injectable, ServiceCollection, Resolver, Transient};
//! use std::sync::Arc;
//!
//! struct Database;
//! impl Injectable for Database {
//!     type Deps = ();
//!     fn construct(_: ()) -> Self { Database }
//! }
//!
//! struct AuditTrail;
//! impl Injectable for AuditTrail {
//!     type Deps = ();
//!     fn construct(_: ()) -> Self { AuditTrail }
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//!     audit: Transient<AuditTrail>,
//! }
//! impl Injectable for UserService {
//!     type Deps = (Arc<Database>, Transient<AuditTrail>);
//!     fn construct((db, audit): Self::Deps) -> Self {
//!         UserService { db, audit }
//!     }
//! }
//!
//! let mut services = ServiceCollection::new();
//! services.add_singleton::<Database>();
//! services.add_transient::<AuditTrail>();
//! services.add_singleton::<UserService>();
//!
//! let provider = services.build();
//! let users = provider.get_required::<UserService>();
//! assert!(Arc::ptr_eq(&users.db, &provider.get_required::<Database>()));
//! ```

use std::ops::Deref;
use std::sync::Arc;

use crate::error::DiResult;
use crate::provider::ResolverContext;
use crate::traits::Resolver;

/// Owning handle to a freshly built transient instance.
///
/// A distinct type from `Arc<T>` so a constructor signature states whether it
/// wants the shared cached instance or its own fresh one; the keying of
/// transient registrations is separate for the same reason.
pub struct Transient<T: ?Sized>(Arc<T>);

impl<T: ?Sized> Transient<T> {
    pub(crate) fn new(inner: Arc<T>) -> Self {
        Self(inner)
    }

    /// Unwraps into the underlying `Arc`.
    pub fn into_arc(self) -> Arc<T> {
        self.0
    }
}

impl<T: ?Sized> Deref for Transient<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> Clone for Transient<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// Shared handle to a registered trait-object service.
///
/// Trait objects resolve through their own key space, so they get a shape
/// distinct from `Arc<T>` in a dependency list. Dereferences to the trait.
///
/// # Examples
///
/// ```
/// use anvil_di::{Injectable, ServiceCollection, Resolver, TraitDep};
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
/// impl Greeter for English {
///     fn greet(&self) -> String { "hello".to_string() }
/// }
/// impl Injectable for English {
///     type Deps = ();
///     fn construct(_: ()) -> Self { English }
/// }
///
/// struct Kiosk {
///     greeter: TraitDep<dyn Greeter>,
/// }
/// impl Injectable for Kiosk {
///     type Deps = TraitDep<dyn Greeter>;
///     fn construct(greeter: Self::Deps) -> Self {
///         Kiosk { greeter }
///     }
/// }
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton_impl::<dyn Greeter, English>(|i| i);
/// services.add_singleton::<Kiosk>();
///
/// let provider = services.build();
/// assert_eq!(provider.get_required::<Kiosk>().greeter.greet(), "hello");
/// ```
pub struct TraitDep<T: ?Sized>(Arc<T>);

impl<T: ?Sized> TraitDep<T> {
    /// Unwraps into the underlying `Arc`.
    pub fn into_arc(self) -> Arc<T> {
        self.0
    }
}

impl<T: ?Sized> Deref for TraitDep<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> Clone for TraitDep<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// Owning handle to a freshly built transient trait-object service.
pub struct TransientTraitDep<T: ?Sized>(Arc<T>);

impl<T: ?Sized> TransientTraitDep<T> {
    /// Unwraps into the underlying `Arc`.
    pub fn into_arc(self) -> Arc<T> {
        self.0
    }
}

impl<T: ?Sized> Deref for TransientTraitDep<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> Clone for TransientTraitDep<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// A dependency list resolvable from the active resolver context.
///
/// Implemented for the single-parameter shapes, their `Vec` collection
/// forms, `()` and tuples of shapes. Tuples resolve left to right.
pub trait Dep: Sized {
    fn resolve(ctx: &ResolverContext<'_>) -> DiResult<Self>;
}

impl Dep for () {
    #[inline]
    fn resolve(_ctx: &ResolverContext<'_>) -> DiResult<Self> {
        Ok(())
    }
}

impl<T: 'static + Send + Sync> Dep for Arc<T> {
    #[inline]
    fn resolve(ctx: &ResolverContext<'_>) -> DiResult<Self> {
        ctx.get::<T>()
    }
}

impl<T: 'static + Send + Sync> Dep for Transient<T> {
    #[inline]
    fn resolve(ctx: &ResolverContext<'_>) -> DiResult<Self> {
        Ok(Transient::new(ctx.get_transient::<T>()?))
    }
}

impl<T: 'static + Send + Sync> Dep for Vec<Arc<T>> {
    #[inline]
    fn resolve(ctx: &ResolverContext<'_>) -> DiResult<Self> {
        ctx.get_all::<T>()
    }
}

impl<T: 'static + Send + Sync> Dep for Vec<Transient<T>> {
    #[inline]
    fn resolve(ctx: &ResolverContext<'_>) -> DiResult<Self> {
        Ok(ctx
            .get_all_transient::<T>()?
            .into_iter()
            .map(Transient::new)
            .collect())
    }
}

impl<T> Dep for TraitDep<T>
where
    T: ?Sized + 'static + Send + Sync,
    Arc<T>: 'static,
{
    #[inline]
    fn resolve(ctx: &ResolverContext<'_>) -> DiResult<Self> {
        Ok(TraitDep(ctx.get_trait::<T>()?))
    }
}

impl<T> Dep for TransientTraitDep<T>
where
    T: ?Sized + 'static + Send + Sync,
    Arc<T>: 'static,
{
    #[inline]
    fn resolve(ctx: &ResolverContext<'_>) -> DiResult<Self> {
        Ok(TransientTraitDep(ctx.get_transient_trait::<T>()?))
    }
}

impl<T> Dep for Vec<TraitDep<T>>
where
    T: ?Sized + 'static + Send + Sync,
    Arc<T>: 'static,
{
    #[inline]
    fn resolve(ctx: &ResolverContext<'_>) -> DiResult<Self> {
        Ok(ctx.get_all_trait::<T>()?.into_iter().map(TraitDep).collect())
    }
}

impl<T> Dep for Vec<TransientTraitDep<T>>
where
    T: ?Sized + 'static + Send + Sync,
    Arc<T>: 'static,
{
    #[inline]
    fn resolve(ctx: &ResolverContext<'_>) -> DiResult<Self> {
        Ok(ctx
            .get_all_transient_trait::<T>()?
            .into_iter()
            .map(TransientTraitDep)
            .collect())
    }
}

macro_rules! impl_dep_tuple {
    ($($T:ident),+) => {
        impl<$($T: Dep),+> Dep for ($($T,)+) {
            #[inline]
            fn resolve(ctx: &ResolverContext<'_>) -> DiResult<Self> {
                Ok(($($T::resolve(ctx)?,)+))
            }
        }
    };
}

impl_dep_tuple!(A);
impl_dep_tuple!(A, B);
impl_dep_tuple!(A, B, C);
impl_dep_tuple!(A, B, C, D);
impl_dep_tuple!(A, B, C, D, E);
impl_dep_tuple!(A, B, C, D, E, F);
impl_dep_tuple!(A, B, C, D, E, F, G);
impl_dep_tuple!(A, B, C, D, E, F, G, H);

/// A type the container can construct by resolving its declared dependencies.
///
/// The single declaration per type replaces constructor-signature discovery;
/// `construct` is the constructor the container invokes.
pub trait Injectable: Send + Sync + Sized + 'static {
    /// Constructor parameters, resolved in order through the active resolver.
    type Deps: Dep;

    /// Builds one instance from the resolved dependencies.
    fn construct(deps: Self::Deps) -> Self;
}
