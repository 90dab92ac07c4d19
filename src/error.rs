//! Error types for the dependency injection container.

use std::fmt;

/// Dependency injection errors.
///
/// Represents the error conditions that can occur during service resolution.
/// Registration itself cannot fail; the registry is append-only and frozen at
/// build time.
///
/// # Examples
///
/// ```rust
/// use anvil_di::{DiError, ServiceCollection, Resolver};
///
/// let provider = ServiceCollection::new().build();
/// match provider.get::<String>() {
///     Err(DiError::NotFound(type_name)) => {
///         assert_eq!(type_name, "alloc::string::String");
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiError {
    /// No singleton or scoped registration exists for the type
    NotFound(&'static str),
    /// No transient registration exists for the type
    TransientNotFound(&'static str),
    /// Type-erased handle did not hold the requested type.
    ///
    /// This is a programming defect (a registration whose convert closure
    /// produces a different handle type than the accessor expects), never a
    /// recoverable condition.
    TypeMismatch(&'static str),
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::NotFound(name) => {
                write!(f, "{} has not been registered as a singleton or scoped service", name)
            }
            DiError::TransientNotFound(name) => {
                write!(f, "{} has not been registered as a transient service", name)
            }
            DiError::TypeMismatch(name) => write!(f, "Type mismatch for: {}", name),
        }
    }
}

impl std::error::Error for DiError {}

/// Result type for DI operations.
pub type DiResult<T> = Result<T, DiError>;
