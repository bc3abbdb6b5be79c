use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Registered PSR-4 prefixes, e.g. `App\` → `["./src", "./lib"]`.
///
/// Both prefixes and their directories keep registration order. Registering
/// a prefix twice appends to the existing directory list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefixMap {
    routes: IndexMap<String, Vec<PathBuf>>,
}

impl PrefixMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prefix with one more base directory
    pub fn register(&mut self, prefix: impl Into<String>, dir: impl Into<PathBuf>) {
        self.routes.entry(prefix.into()).or_default().push(dir.into());
    }

    /// Register multiple directories for a prefix at once
    pub fn register_all(
        &mut self,
        prefix: impl Into<String>,
        dirs: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) {
        let entry = self.routes.entry(prefix.into()).or_default();
        entry.extend(dirs.into_iter().map(Into::into));
    }

    /// Merge `other` after the existing registrations
    pub fn extend(&mut self, other: PrefixMap) {
        for (prefix, dirs) in other.routes {
            self.register_all(prefix, dirs);
        }
    }

    pub fn get(&self, prefix: &str) -> Option<&[PathBuf]> {
        self.routes.get(prefix).map(Vec::as_slice)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.routes.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<P, D> FromIterator<(P, D)> for PrefixMap
where
    P: Into<String>,
    D: Into<PathBuf>,
{
    fn from_iter<T: IntoIterator<Item = (P, D)>>(iter: T) -> Self {
        let mut map = PrefixMap::new();
        for (prefix, dir) in iter {
            map.register(prefix, dir);
        }
        map
    }
}
