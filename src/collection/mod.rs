//! Service registration surface.
//!
//! A [`ServiceCollection`] accumulates registrations and is consumed by
//! [`build`](ServiceCollection::build) into an immutable
//! [`ServiceProvider`](crate::ServiceProvider). Registering the same service
//! type again appends rather than replaces: single-item queries resolve the
//! most recent registration, `get_all*` queries resolve every registration in
//! order.

use std::any::type_name;
use std::sync::Arc;

use crate::descriptors::ServiceDescriptor;
use crate::error::DiError;
use crate::inject::{Dep, Injectable};
use crate::key::{key_of_transient, key_of_type, Key};
use crate::lifetime::Lifetime;
use crate::provider::{ResolverContext, ServiceProvider};
use crate::registration::{AnyArc, ConvertFn, CreateFn, Registration, Registry};

fn identity_convert() -> ConvertFn {
    Arc::new(|any: &AnyArc| Ok(any.clone()))
}

fn construct_fn<T: Injectable>() -> CreateFn {
    Arc::new(|ctx: &ResolverContext<'_>| {
        let deps = T::Deps::resolve(ctx)?;
        Ok(Arc::new(T::construct(deps)) as AnyArc)
    })
}

fn factory_fn<T, F>(factory: F) -> CreateFn
where
    T: 'static + Send + Sync,
    F: Fn(&ResolverContext<'_>) -> T + Send + Sync + 'static,
{
    Arc::new(move |ctx: &ResolverContext<'_>| Ok(Arc::new(factory(ctx)) as AnyArc))
}

/// Builder for service registrations.
///
/// Cloning snapshots the registrations, so one configuration can build
/// several independent providers.
///
/// # Examples
///
/// ```
/// use anvil_di::{Injectable, ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// struct Clock;
/// impl Injectable for Clock {
///     type Deps = ();
///     fn construct(_: ()) -> Self { Clock }
/// }
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton::<Clock>();
///
/// let provider = services.build();
/// let a = provider.get_required::<Clock>();
/// let b = provider.get_required::<Clock>();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
#[derive(Clone, Default)]
pub struct ServiceCollection {
    registry: Registry,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    fn push_concrete<T: 'static>(&mut self, lifetime: Lifetime, create: CreateFn) {
        let key = match lifetime {
            Lifetime::Transient => key_of_transient::<T>(),
            _ => key_of_type::<T>(),
        };
        self.registry
            .push(key, Registration::new(lifetime, create, identity_convert()));
    }

    /// Registers `T` as a singleton, constructed on first resolution from its
    /// declared dependencies.
    pub fn add_singleton<T: Injectable>(&mut self) -> &mut Self {
        self.push_concrete::<T>(Lifetime::Singleton, construct_fn::<T>());
        self
    }

    /// Registers `T` as a scoped service, constructed once per scope.
    pub fn add_scoped<T: Injectable>(&mut self) -> &mut Self {
        self.push_concrete::<T>(Lifetime::Scoped, construct_fn::<T>());
        self
    }

    /// Registers `T` as a transient service, constructed fresh on every
    /// resolution.
    pub fn add_transient<T: Injectable>(&mut self) -> &mut Self {
        self.push_concrete::<T>(Lifetime::Transient, construct_fn::<T>());
        self
    }

    /// Registers a singleton built by `factory` on first resolution.
    pub fn add_singleton_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext<'_>) -> T + Send + Sync + 'static,
    {
        self.push_concrete::<T>(Lifetime::Singleton, factory_fn(factory));
        self
    }

    /// Registers a scoped service built by `factory` once per scope.
    pub fn add_scoped_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext<'_>) -> T + Send + Sync + 'static,
    {
        self.push_concrete::<T>(Lifetime::Scoped, factory_fn(factory));
        self
    }

    /// Registers a transient service built by `factory` on every resolution.
    pub fn add_transient_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext<'_>) -> T + Send + Sync + 'static,
    {
        self.push_concrete::<T>(Lifetime::Transient, factory_fn(factory));
        self
    }

    /// Registers an existing value as a singleton.
    pub fn add_singleton_instance<T: 'static + Send + Sync>(&mut self, value: T) -> &mut Self {
        self.add_singleton_arc(Arc::new(value))
    }

    /// Registers an existing shared handle as a singleton.
    ///
    /// The handle is still committed to the cache and teardown log on first
    /// resolution, so it participates in reverse-order teardown like any
    /// built singleton.
    pub fn add_singleton_arc<T: 'static + Send + Sync>(&mut self, value: Arc<T>) -> &mut Self {
        let create: CreateFn = Arc::new(move |_: &ResolverContext<'_>| Ok(value.clone() as AnyArc));
        self.push_concrete::<T>(Lifetime::Singleton, create);
        self
    }

    fn push_trait<S: ?Sized + 'static>(
        &mut self,
        lifetime: Lifetime,
        create: CreateFn,
        convert: ConvertFn,
        impl_type_name: Option<&'static str>,
    ) {
        let key = match lifetime {
            Lifetime::Transient => Key::TransientTrait(type_name::<S>()),
            _ => Key::Trait(type_name::<S>()),
        };
        let reg = match impl_type_name {
            Some(name) => Registration::with_impl_name(lifetime, create, convert, name),
            None => Registration::new(lifetime, create, convert),
        };
        self.registry.push(key, reg);
    }

    /// Registers an existing trait object as a singleton.
    pub fn add_singleton_trait<S: ?Sized + 'static + Send + Sync>(
        &mut self,
        value: Arc<S>,
    ) -> &mut Self {
        let create: CreateFn =
            Arc::new(move |_: &ResolverContext<'_>| Ok(Arc::new(value.clone()) as AnyArc));
        self.push_trait::<S>(Lifetime::Singleton, create, identity_convert(), None);
        self
    }

    /// Registers a singleton trait object built by `factory` on first
    /// resolution.
    pub fn add_singleton_trait_factory<S, F>(&mut self, factory: F) -> &mut Self
    where
        S: ?Sized + 'static + Send + Sync,
        F: Fn(&ResolverContext<'_>) -> Arc<S> + Send + Sync + 'static,
    {
        let create: CreateFn =
            Arc::new(move |ctx: &ResolverContext<'_>| Ok(Arc::new(factory(ctx)) as AnyArc));
        self.push_trait::<S>(Lifetime::Singleton, create, identity_convert(), None);
        self
    }

    /// Registers a scoped trait object built by `factory` once per scope.
    pub fn add_scoped_trait_factory<S, F>(&mut self, factory: F) -> &mut Self
    where
        S: ?Sized + 'static + Send + Sync,
        F: Fn(&ResolverContext<'_>) -> Arc<S> + Send + Sync + 'static,
    {
        let create: CreateFn =
            Arc::new(move |ctx: &ResolverContext<'_>| Ok(Arc::new(factory(ctx)) as AnyArc));
        self.push_trait::<S>(Lifetime::Scoped, create, identity_convert(), None);
        self
    }

    /// Registers a transient trait object built by `factory` on every
    /// resolution.
    pub fn add_transient_trait_factory<S, F>(&mut self, factory: F) -> &mut Self
    where
        S: ?Sized + 'static + Send + Sync,
        F: Fn(&ResolverContext<'_>) -> Arc<S> + Send + Sync + 'static,
    {
        let create: CreateFn =
            Arc::new(move |ctx: &ResolverContext<'_>| Ok(Arc::new(factory(ctx)) as AnyArc));
        self.push_trait::<S>(Lifetime::Transient, create, identity_convert(), None);
        self
    }

    fn coerce_convert<S, I>(coerce: fn(Arc<I>) -> Arc<S>) -> ConvertFn
    where
        S: ?Sized + 'static + Send + Sync,
        I: Injectable,
    {
        // The cache owns the concrete Arc<I>; the coerced handle is rebuilt
        // from it on every resolution and stored double-wrapped for the
        // trait accessors.
        Arc::new(move |any: &AnyArc| {
            let concrete = any
                .clone()
                .downcast::<I>()
                .map_err(|_| DiError::TypeMismatch(type_name::<I>()))?;
            Ok(Arc::new(coerce(concrete)) as AnyArc)
        })
    }

    /// Registers `I` as the singleton implementation of trait `S`.
    ///
    /// `coerce` performs the unsizing from the concrete handle, typically
    /// `|i| i as Arc<dyn Svc>`.
    pub fn add_singleton_impl<S, I>(&mut self, coerce: fn(Arc<I>) -> Arc<S>) -> &mut Self
    where
        S: ?Sized + 'static + Send + Sync,
        I: Injectable,
    {
        self.push_trait::<S>(
            Lifetime::Singleton,
            construct_fn::<I>(),
            Self::coerce_convert::<S, I>(coerce),
            Some(type_name::<I>()),
        );
        self
    }

    /// Registers `I` as a scoped implementation of trait `S`.
    pub fn add_scoped_impl<S, I>(&mut self, coerce: fn(Arc<I>) -> Arc<S>) -> &mut Self
    where
        S: ?Sized + 'static + Send + Sync,
        I: Injectable,
    {
        self.push_trait::<S>(
            Lifetime::Scoped,
            construct_fn::<I>(),
            Self::coerce_convert::<S, I>(coerce),
            Some(type_name::<I>()),
        );
        self
    }

    /// Registers `I` as a transient implementation of trait `S`.
    pub fn add_transient_impl<S, I>(&mut self, coerce: fn(Arc<I>) -> Arc<S>) -> &mut Self
    where
        S: ?Sized + 'static + Send + Sync,
        I: Injectable,
    {
        self.push_trait::<S>(
            Lifetime::Transient,
            construct_fn::<I>(),
            Self::coerce_convert::<S, I>(coerce),
            Some(type_name::<I>()),
        );
        self
    }

    /// Snapshot of every registration for inspection or validation tooling.
    pub fn get_service_descriptors(&self) -> Vec<ServiceDescriptor> {
        let mut descriptors: Vec<ServiceDescriptor> = self
            .registry
            .iter()
            .flat_map(|(key, entries)| {
                entries.iter().enumerate().map(move |(index, reg)| {
                    ServiceDescriptor::new(key.clone(), index, reg.lifetime, reg.impl_type_name)
                })
            })
            .collect();
        descriptors.sort_by(|a, b| {
            a.service_name()
                .cmp(&b.service_name())
                .then(a.index().cmp(&b.index()))
        });
        descriptors
    }

    /// Consumes the collection into an immutable root provider.
    pub fn build(self) -> ServiceProvider {
        ServiceProvider::new(self.registry)
    }
}
