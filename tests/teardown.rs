use anvil_di::{Resolver, ServiceCollection};
use std::sync::{Arc, Mutex};

type DropLog = Arc<Mutex<Vec<&'static str>>>;

struct Tracked {
    name: &'static str,
    log: DropLog,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.log.lock().unwrap().push(self.name);
    }
}

struct First(Tracked);
struct Second(Tracked);
struct Third(Tracked);

fn tracked(name: &'static str, log: &DropLog) -> Tracked {
    Tracked {
        name,
        log: log.clone(),
    }
}

#[test]
fn test_singletons_drop_in_reverse_construction_order() {
    let log: DropLog = Arc::new(Mutex::new(Vec::new()));

    let mut sc = ServiceCollection::new();
    let l = log.clone();
    sc.add_singleton_factory::<First, _>(move |_| First(tracked("first", &l)));
    let l = log.clone();
    sc.add_singleton_factory::<Second, _>(move |_| Second(tracked("second", &l)));
    let l = log.clone();
    sc.add_singleton_factory::<Third, _>(move |_| Third(tracked("third", &l)));

    let sp = sc.build();

    // Construction order is resolution order, not registration order.
    sp.get_required::<Second>();
    sp.get_required::<First>();
    sp.get_required::<Third>();

    assert!(log.lock().unwrap().is_empty());
    drop(sp);

    let order = log.lock().unwrap().clone();
    assert_eq!(order, vec!["third", "first", "second"]);
}

#[test]
fn test_dependency_outlives_dependent() {
    struct Db(Tracked);
    struct App {
        _db: Arc<Db>,
        _marker: Tracked,
    }

    let log: DropLog = Arc::new(Mutex::new(Vec::new()));

    let mut sc = ServiceCollection::new();
    let l = log.clone();
    sc.add_singleton_factory::<Db, _>(move |_| Db(tracked("db", &l)));
    let l = log.clone();
    sc.add_singleton_factory::<App, _>(move |r| App {
        _db: r.get_required::<Db>(),
        _marker: tracked("app", &l),
    });

    let sp = sc.build();
    sp.get_required::<App>();
    drop(sp);

    // The database was constructed first, so it drops last.
    let order = log.lock().unwrap().clone();
    assert_eq!(order, vec!["app", "db"]);
}

#[test]
fn test_singleton_chain_unwinds_top_down() {
    struct S0(Tracked);
    struct S1 {
        _dep: Arc<S0>,
        _marker: Tracked,
    }
    struct S2 {
        _dep: Arc<S1>,
        _marker: Tracked,
    }
    struct S3 {
        _dep: Arc<S2>,
        _marker: Tracked,
    }

    let log: DropLog = Arc::new(Mutex::new(Vec::new()));

    let mut sc = ServiceCollection::new();
    let l = log.clone();
    sc.add_singleton_factory::<S0, _>(move |_| S0(tracked("s0", &l)));
    let l = log.clone();
    sc.add_singleton_factory::<S1, _>(move |r| S1 {
        _dep: r.get_required::<S0>(),
        _marker: tracked("s1", &l),
    });
    let l = log.clone();
    sc.add_singleton_factory::<S2, _>(move |r| S2 {
        _dep: r.get_required::<S1>(),
        _marker: tracked("s2", &l),
    });
    let l = log.clone();
    sc.add_singleton_factory::<S3, _>(move |r| S3 {
        _dep: r.get_required::<S2>(),
        _marker: tracked("s3", &l),
    });

    let sp = sc.build();
    sp.get_required::<S3>();
    drop(sp);

    let order = log.lock().unwrap().clone();
    assert_eq!(order, vec!["s3", "s2", "s1", "s0"]);
}

#[test]
fn test_unresolved_registrations_never_drop() {
    let log: DropLog = Arc::new(Mutex::new(Vec::new()));

    let mut sc = ServiceCollection::new();
    let l = log.clone();
    sc.add_singleton_factory::<First, _>(move |_| First(tracked("first", &l)));
    let l = log.clone();
    sc.add_singleton_factory::<Second, _>(move |_| Second(tracked("second", &l)));

    let sp = sc.build();
    sp.get_required::<First>();
    drop(sp);

    // Never-constructed registrations have nothing to tear down.
    let order = log.lock().unwrap().clone();
    assert_eq!(order, vec!["first"]);
}

#[test]
fn test_scope_teardown_leaves_singletons() {
    struct Shared(Tracked);
    struct PerRequest(Tracked);

    let log: DropLog = Arc::new(Mutex::new(Vec::new()));

    let mut sc = ServiceCollection::new();
    let l = log.clone();
    sc.add_singleton_factory::<Shared, _>(move |_| Shared(tracked("shared", &l)));
    let l = log.clone();
    sc.add_scoped_factory::<PerRequest, _>(move |_| PerRequest(tracked("per-request", &l)));

    let sp = sc.build();
    let scope = sp.create_scope();
    scope.get_required::<Shared>();
    scope.get_required::<PerRequest>();

    drop(scope);
    assert_eq!(log.lock().unwrap().clone(), vec!["per-request"]);

    drop(sp);
    assert_eq!(log.lock().unwrap().clone(), vec!["per-request", "shared"]);
}

#[test]
fn test_scoped_chain_unwinds_top_down() {
    struct Session(Tracked);
    struct UnitOfWork {
        _dep: Arc<Session>,
        _marker: Tracked,
    }
    struct RequestHandler {
        _dep: Arc<UnitOfWork>,
        _marker: Tracked,
    }

    let log: DropLog = Arc::new(Mutex::new(Vec::new()));

    let mut sc = ServiceCollection::new();
    let l = log.clone();
    sc.add_scoped_factory::<Session, _>(move |_| Session(tracked("session", &l)));
    let l = log.clone();
    sc.add_scoped_factory::<UnitOfWork, _>(move |r| UnitOfWork {
        _dep: r.get_required::<Session>(),
        _marker: tracked("unit-of-work", &l),
    });
    let l = log.clone();
    sc.add_scoped_factory::<RequestHandler, _>(move |r| RequestHandler {
        _dep: r.get_required::<UnitOfWork>(),
        _marker: tracked("handler", &l),
    });

    let sp = sc.build();
    let scope = sp.create_scope();
    scope.get_required::<RequestHandler>();

    assert!(log.lock().unwrap().is_empty());
    drop(scope);

    let order = log.lock().unwrap().clone();
    assert_eq!(order, vec!["handler", "unit-of-work", "session"]);
}

#[test]
fn test_scopes_tear_down_independently() {
    struct PerRequest(Tracked);

    let log: DropLog = Arc::new(Mutex::new(Vec::new()));

    let mut sc = ServiceCollection::new();
    let l = log.clone();
    sc.add_scoped_factory::<PerRequest, _>(move |_| PerRequest(tracked("scoped", &l)));

    let sp = sc.build();
    let scope1 = sp.create_scope();
    let scope2 = sp.create_scope();
    scope1.get_required::<PerRequest>();
    scope2.get_required::<PerRequest>();

    drop(scope1);
    assert_eq!(log.lock().unwrap().len(), 1);

    drop(scope2);
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[test]
fn test_transients_drop_with_their_caller() {
    struct Scratch(Tracked);

    let log: DropLog = Arc::new(Mutex::new(Vec::new()));

    let mut sc = ServiceCollection::new();
    let l = log.clone();
    sc.add_transient_factory::<Scratch, _>(move |_| Scratch(tracked("scratch", &l)));

    let sp = sc.build();
    sp.get_required_transient::<Scratch>();

    // The caller held the only reference; the instance is already gone.
    assert_eq!(log.lock().unwrap().clone(), vec!["scratch"]);

    drop(sp);
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[test]
fn test_multi_binding_tears_down_in_reverse() {
    struct Plugin(Tracked);

    let log: DropLog = Arc::new(Mutex::new(Vec::new()));

    let mut sc = ServiceCollection::new();
    let l = log.clone();
    sc.add_singleton_factory::<Plugin, _>(move |_| Plugin(tracked("plugin-a", &l)));
    let l = log.clone();
    sc.add_singleton_factory::<Plugin, _>(move |_| Plugin(tracked("plugin-b", &l)));

    let sp = sc.build();
    sp.get_all::<Plugin>().unwrap();
    drop(sp);

    let order = log.lock().unwrap().clone();
    assert_eq!(order, vec!["plugin-b", "plugin-a"]);
}

#[test]
fn test_root_survives_while_scope_holds_it() {
    struct Shared(Tracked);

    let log: DropLog = Arc::new(Mutex::new(Vec::new()));

    let mut sc = ServiceCollection::new();
    let l = log.clone();
    sc.add_singleton_factory::<Shared, _>(move |_| Shared(tracked("shared", &l)));

    let sp = sc.build();
    let scope = sp.create_scope();
    drop(sp);

    // The scope keeps the root alive; singletons still resolve.
    scope.get_required::<Shared>();
    assert!(log.lock().unwrap().is_empty());

    drop(scope);
    assert_eq!(log.lock().unwrap().clone(), vec!["shared"]);
}
