pub mod config;
pub mod discovery;
pub mod error;
pub mod introspect;
pub mod logging;
pub mod model;
pub mod project;
pub mod provider;
pub mod resolver;
pub mod runtime;

pub use discovery::ConstructDiscoverer;
pub use error::{FqcnError, Result};
pub use introspect::{AutoloadIntrospector, FnIntrospector, TypeIntrospector};
pub use model::{PrefixMap, Psr4Namespace};
pub use provider::{ComposerPrefixMap, PrefixMapProvider, StaticPrefixMap};
pub use resolver::{PathBuilder, Resolver};
