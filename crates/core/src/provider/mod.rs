//! Prefix map providers - where PSR-4 registrations come from.

pub mod composer;

pub use composer::ComposerPrefixMap;

use crate::error::Result;
use crate::model::PrefixMap;

/// Supplies the PSR-4 prefix map.
///
/// Resolution queries the provider on every call; any caching belongs to
/// the implementation.
pub trait PrefixMapProvider: Send + Sync {
    fn prefix_map(&self) -> Result<PrefixMap>;

    /// Provider name (for logging/debugging)
    fn name(&self) -> &str;
}

/// A fixed, in-memory prefix map
#[derive(Debug, Clone, Default)]
pub struct StaticPrefixMap {
    map: PrefixMap,
}

impl StaticPrefixMap {
    pub fn new(map: PrefixMap) -> Self {
        Self { map }
    }
}

impl PrefixMapProvider for StaticPrefixMap {
    fn prefix_map(&self) -> Result<PrefixMap> {
        Ok(self.map.clone())
    }

    fn name(&self) -> &str {
        "Static Prefix Map"
    }
}
