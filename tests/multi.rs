use anvil_di::{Injectable, Resolver, ServiceCollection};
use std::sync::Arc;

trait Handler: Send + Sync {
    fn name(&self) -> &'static str;
}

struct AuthHandler;
impl Handler for AuthHandler {
    fn name(&self) -> &'static str {
        "auth"
    }
}
impl Injectable for AuthHandler {
    type Deps = ();
    fn construct(_: ()) -> Self {
        AuthHandler
    }
}

struct LogHandler;
impl Handler for LogHandler {
    fn name(&self) -> &'static str {
        "log"
    }
}
impl Injectable for LogHandler {
    type Deps = ();
    fn construct(_: ()) -> Self {
        LogHandler
    }
}

#[test]
fn test_trait_instance_registration() {
    let mut sc = ServiceCollection::new();
    sc.add_singleton_trait(Arc::new(AuthHandler) as Arc<dyn Handler>);

    let sp = sc.build();
    let handler = sp.get_required_trait::<dyn Handler>();
    assert_eq!(handler.name(), "auth");

    let again = sp.get_required_trait::<dyn Handler>();
    assert!(Arc::ptr_eq(&handler, &again));
}

#[test]
fn test_trait_impl_registration() {
    let mut sc = ServiceCollection::new();
    sc.add_singleton_impl::<dyn Handler, AuthHandler>(|i| i);

    let sp = sc.build();
    let handler = sp.get_required_trait::<dyn Handler>();
    assert_eq!(handler.name(), "auth");
}

#[test]
fn test_trait_multi_binding_order() {
    let mut sc = ServiceCollection::new();
    sc.add_singleton_impl::<dyn Handler, AuthHandler>(|i| i);
    sc.add_singleton_impl::<dyn Handler, LogHandler>(|i| i);

    let sp = sc.build();

    // Last registration wins single queries.
    assert_eq!(sp.get_required_trait::<dyn Handler>().name(), "log");

    // Multi queries return registration order.
    let all = sp.get_all_trait::<dyn Handler>().unwrap();
    let names: Vec<&str> = all.iter().map(|h| h.name()).collect();
    assert_eq!(names, vec!["auth", "log"]);
}

#[test]
fn test_trait_multi_binding_cached_identity() {
    let mut sc = ServiceCollection::new();
    sc.add_singleton_impl::<dyn Handler, AuthHandler>(|i| i);
    sc.add_singleton_impl::<dyn Handler, LogHandler>(|i| i);

    let sp = sc.build();
    let first = sp.get_all_trait::<dyn Handler>().unwrap();
    let second = sp.get_all_trait::<dyn Handler>().unwrap();
    for (a, b) in first.iter().zip(second.iter()) {
        assert!(Arc::ptr_eq(a, b));
    }
}

#[test]
fn test_transient_trait_factory() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NumberedHandler(usize);
    impl Handler for NumberedHandler {
        fn name(&self) -> &'static str {
            "numbered"
        }
    }

    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();

    let mut sc = ServiceCollection::new();
    sc.add_transient_trait_factory::<dyn Handler, _>(move |_| {
        Arc::new(NumberedHandler(counter_clone.fetch_add(1, Ordering::SeqCst))) as Arc<dyn Handler>
    });

    let sp = sc.build();
    let a = sp.get_required_transient_trait::<dyn Handler>();
    let b = sp.get_required_transient_trait::<dyn Handler>();
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_trait_factory_resolves_dependencies() {
    struct TaggedHandler {
        tag: Arc<String>,
    }
    impl Handler for TaggedHandler {
        fn name(&self) -> &'static str {
            "tagged"
        }
    }

    let mut sc = ServiceCollection::new();
    sc.add_singleton_instance("prod".to_string());
    sc.add_singleton_trait_factory::<dyn Handler, _>(|ctx| {
        Arc::new(TaggedHandler {
            tag: ctx.get_required::<String>(),
        }) as Arc<dyn Handler>
    });

    let sp = sc.build();
    let handler = sp.get_required_trait::<dyn Handler>();
    assert_eq!(handler.name(), "tagged");
    let _ = handler;
}

#[test]
fn test_mixed_lifetime_multi_binding() {
    // Each registration keeps its own lifetime when resolved together.
    let mut sc = ServiceCollection::new();
    sc.add_singleton_impl::<dyn Handler, AuthHandler>(|i| i);
    sc.add_scoped_trait_factory::<dyn Handler, _>(|_| Arc::new(LogHandler) as Arc<dyn Handler>);

    let sp = sc.build();
    let scope1 = sp.create_scope();
    let scope2 = sp.create_scope();

    let from1 = scope1.get_all_trait::<dyn Handler>().unwrap();
    let from2 = scope2.get_all_trait::<dyn Handler>().unwrap();
    assert_eq!(from1.len(), 2);

    // Singleton entry shared, scoped entry distinct per scope.
    assert!(Arc::ptr_eq(&from1[0], &from2[0]));
    assert!(!Arc::ptr_eq(&from1[1], &from2[1]));
}

#[test]
fn test_trait_unregistered() {
    let sp = ServiceCollection::new().build();
    assert!(sp.get_trait::<dyn Handler>().is_err());
    assert!(sp.get_all_trait::<dyn Handler>().unwrap().is_empty());
}
