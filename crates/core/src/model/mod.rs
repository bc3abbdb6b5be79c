pub mod namespace;
pub mod prefix;

pub use namespace::{NAMESPACE_SEPARATOR, Psr4Namespace};
pub use prefix::PrefixMap;
