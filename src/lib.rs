//! # anvil-di
//!
//! Type-keyed dependency injection with explicit lifetimes, inspired by
//! Microsoft.Extensions.DependencyInjection.
//!
//! ## Features
//!
//! - **Three lifetimes**: Singleton, Scoped, and Transient services
//! - **Constructor auto-wiring**: Declare a dependency list once with
//!   [`Injectable`] and let the container build the graph
//! - **Trait support**: Single and multi-binding trait resolution
//! - **Thread-safe**: Lazy initialization runs each constructor exactly once,
//!   even under concurrent first resolution
//! - **Deterministic teardown**: Cached instances drop in reverse
//!   construction order when their provider or scope drops
//!
//! ## Quick Start
//!
//! ```rust
//! use anvil_di::{Injectable, ServiceCollection, Resolver};
//! use std::sync::Arc;
//!
//! struct Database {
//!     connection_string: String,
//! }
//!
//! impl Injectable for Database {
//!     type Deps = ();
//!     fn construct(_: ()) -> Self {
//!         Database {
//!             connection_string: "postgres://localhost".to_string(),
//!         }
//!     }
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! impl Injectable for UserService {
//!     type Deps = Arc<Database>;
//!     fn construct(db: Arc<Database>) -> Self {
//!         UserService { db }
//!     }
//! }
//!
//! let mut services = ServiceCollection::new();
//! services.add_singleton::<Database>();
//! services.add_transient::<UserService>();
//!
//! let provider = services.build();
//! let user_service = provider.get_required_transient::<UserService>();
//! assert_eq!(user_service.db.connection_string, "postgres://localhost");
//! ```
//!
//! ## Service Lifetimes
//!
//! - **Singleton**: Created once and shared across the entire application
//! - **Scoped**: Created once per [`Scope`] (ideal for request contexts)
//! - **Transient**: Created fresh on every resolution, resolved through the
//!   `get_transient*` accessors
//!
//! ## Trait Resolution
//!
//! ```rust
//! use anvil_di::{Injectable, ServiceCollection, Resolver};
//! use std::sync::Arc;
//!
//! trait Notifier: Send + Sync {
//!     fn notify(&self, message: &str) -> String;
//! }
//!
//! struct EmailNotifier;
//! impl Injectable for EmailNotifier {
//!     type Deps = ();
//!     fn construct(_: ()) -> Self { EmailNotifier }
//! }
//! impl Notifier for EmailNotifier {
//!     fn notify(&self, message: &str) -> String {
//!         format!("email: {}", message)
//!     }
//! }
//!
//! let mut services = ServiceCollection::new();
//! services.add_singleton_impl::<dyn Notifier, EmailNotifier>(|i| i);
//!
//! let provider = services.build();
//! let notifier = provider.get_required_trait::<dyn Notifier>();
//! assert_eq!(notifier.notify("hi"), "email: hi");
//! ```

pub mod collection;
pub mod descriptors;
pub mod error;
pub mod inject;
pub mod key;
pub mod lifetime;
pub mod provider;
pub mod traits;

mod internal;
mod registration;

pub use collection::ServiceCollection;
pub use descriptors::ServiceDescriptor;
pub use error::{DiError, DiResult};
pub use inject::{Dep, Injectable, TraitDep, Transient, TransientTraitDep};
pub use key::{key_of_transient, key_of_type, Key};
pub use lifetime::Lifetime;
pub use provider::{ResolverContext, Scope, ServiceProvider};
pub use traits::{Resolver, ResolverCore};
