//! Type introspection: does a name denote a construct, and is it a subtype
//! of another one.

pub mod autoload;
pub mod parser;

pub use autoload::AutoloadIntrospector;
pub use parser::{ConstructDecl, ConstructKind, parse_declarations};

/// Answers existence and subtype questions about fully-qualified names.
///
/// Implementations decide how a name becomes known; an autoloading
/// implementation may load it on demand inside `type_exists`.
pub trait TypeIntrospector: Send + Sync {
    /// Whether `name` denotes a class, interface, trait or enum.
    fn type_exists(&self, name: &str) -> bool;

    /// Whether `name` extends or implements `supertype`, directly or not.
    fn is_subtype_of(&self, name: &str, supertype: &str) -> bool;
}

/// Introspector assembled from two closures.
pub struct FnIntrospector<E, S>
where
    E: Fn(&str) -> bool + Send + Sync,
    S: Fn(&str, &str) -> bool + Send + Sync,
{
    exists: E,
    subtype: S,
}

impl<E, S> FnIntrospector<E, S>
where
    E: Fn(&str) -> bool + Send + Sync,
    S: Fn(&str, &str) -> bool + Send + Sync,
{
    pub fn new(exists: E, subtype: S) -> Self {
        Self { exists, subtype }
    }
}

impl<E, S> TypeIntrospector for FnIntrospector<E, S>
where
    E: Fn(&str) -> bool + Send + Sync,
    S: Fn(&str, &str) -> bool + Send + Sync,
{
    fn type_exists(&self, name: &str) -> bool {
        (self.exists)(name)
    }

    fn is_subtype_of(&self, name: &str, supertype: &str) -> bool {
        (self.subtype)(name, supertype)
    }
}
