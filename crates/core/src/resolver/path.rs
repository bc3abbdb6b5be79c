//! Namespace → directory translation.

use super::prefix::find_best_prefix;
use crate::error::{FqcnError, Result};
use crate::model::{PrefixMap, Psr4Namespace};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Convert a relative namespace fragment into a relative path.
///
/// Both `\` and `/` count as separators, empty segments are dropped, so
/// `\Models\\Concerns\` becomes `Models/Concerns` on unix.
pub fn namespace_to_path(relative: &str) -> PathBuf {
    relative
        .split(['\\', '/'])
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Join `relative` onto `base` and canonicalize; `None` if the path does not exist.
fn canonical_join(base: &Path, relative: &Path) -> Option<PathBuf> {
    match base.join(relative).canonicalize() {
        Ok(path) => Some(path),
        Err(e) => {
            debug!("Skipping {:?} + {:?}: {}", base, relative, e);
            None
        }
    }
}

/// Resolve `namespace` to the existing directories it maps to.
///
/// Fails with `UnregisteredNamespace` when no prefix matches. A matched
/// prefix whose directories do not exist yields an empty list.
pub fn resolve_directories(namespace: &Psr4Namespace, prefixes: &PrefixMap) -> Result<Vec<PathBuf>> {
    let prefix = find_best_prefix(namespace, prefixes.prefixes())
        .ok_or_else(|| FqcnError::UnregisteredNamespace(namespace.to_string()))?;

    let relative = namespace_to_path(&namespace.value()[prefix.len()..]);
    let bases = prefixes.get(prefix).unwrap_or_default();

    let discovered: Vec<PathBuf> = bases
        .iter()
        .filter_map(|base| canonical_join(base, &relative))
        .filter(|path| path.is_dir())
        .collect();

    debug!(
        "Resolved {} via prefix {} to {} of {} directories",
        namespace,
        prefix,
        discovered.len(),
        bases.len()
    );
    Ok(discovered)
}

/// Builds directories for namespaces below a known base directory/namespace
/// pair, without consulting a prefix map.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    path: PathBuf,
    namespace: Psr4Namespace,
}

impl PathBuilder {
    /// `path` must be an existing directory representing `namespace`.
    pub fn new(path: impl Into<PathBuf>, namespace: Psr4Namespace) -> Result<Self> {
        let path = path.into();
        if !path.is_dir() {
            return Err(FqcnError::InvalidBasePath(path));
        }
        Ok(Self { path, namespace })
    }

    pub fn base_path(&self) -> &Path {
        &self.path
    }

    pub fn namespace(&self) -> &Psr4Namespace {
        &self.namespace
    }

    /// Absolute path of `target`, relative to the base pair.
    ///
    /// Returns `Ok(None)` when the path does not exist, and
    /// `NamespaceMismatch` when `target` lives outside the base namespace.
    pub fn resolve(&self, target: &Psr4Namespace) -> Result<Option<PathBuf>> {
        let relative = target
            .relative_to(&self.namespace)
            .ok_or_else(|| FqcnError::NamespaceMismatch {
                target: target.to_string(),
                base: self.namespace.to_string(),
            })?;

        Ok(canonical_join(&self.path, &namespace_to_path(relative)))
    }
}
