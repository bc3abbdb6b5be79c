//! Source-level introspector that "autoloads" PHP files through PSR-4.
//!
//! Existence is answered in two phases, like `class_exists($name, false)`
//! followed by `class_exists($name, true)`:
//! 1. look the name up among constructs already read,
//! 2. otherwise locate `<base>/<suffix>.php` through the prefix map, read
//!    it, register everything it declares and look again.

use super::TypeIntrospector;
use super::parser::{ConstructDecl, parse_declarations};
use crate::error::Result;
use crate::model::{NAMESPACE_SEPARATOR, Psr4Namespace};
use crate::project::DEFAULT_EXTENSION;
use crate::provider::PrefixMapProvider;
use crate::resolver::path::namespace_to_path;
use crate::resolver::prefix::find_best_prefix;
use dashmap::{DashMap, DashSet};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct AutoloadIntrospector {
    provider: Arc<dyn PrefixMapProvider>,
    extension: String,
    /// Lowercased name → declaration; PHP names are case-insensitive.
    loaded: DashMap<String, ConstructDecl>,
    loaded_files: DashSet<PathBuf>,
    /// Names whose autoload already failed.
    missing: DashSet<String>,
}

fn normalize(name: &str) -> &str {
    name.trim_start_matches(NAMESPACE_SEPARATOR)
}

fn key(name: &str) -> String {
    normalize(name).to_ascii_lowercase()
}

impl AutoloadIntrospector {
    pub fn new(provider: Arc<dyn PrefixMapProvider>) -> Self {
        Self {
            provider,
            extension: DEFAULT_EXTENSION.to_string(),
            loaded: DashMap::new(),
            loaded_files: DashSet::new(),
            missing: DashSet::new(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Read a source file and register every construct it declares.
    /// Returns the number of declarations found.
    pub fn load_file(&self, path: &Path) -> Result<usize> {
        let source = fs::read_to_string(path)?;
        let decls = parse_declarations(&source)?;
        let count = decls.len();
        for decl in decls {
            let k = key(&decl.name);
            self.missing.remove(&k);
            self.loaded.insert(k, decl);
        }
        self.loaded_files.insert(path.to_path_buf());
        debug!("Loaded {} declarations from {:?}", count, path);
        Ok(count)
    }

    /// Phase one: already known, no file access.
    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains_key(&key(name))
    }

    /// Phase two: locate and read the PSR-4 file for `name`.
    pub fn autoload(&self, name: &str) -> bool {
        let k = key(name);
        if self.missing.contains(&k) {
            return false;
        }

        let found = self.candidate_files(normalize(name)).into_iter().any(|file| {
            if !self.loaded_files.contains(&file) {
                if let Err(e) = self.load_file(&file) {
                    warn!("Failed to load {:?}: {}", file, e);
                    return false;
                }
            }
            self.loaded.contains_key(&k)
        });

        if !found {
            debug!("Autoload miss for {}", name);
            self.missing.insert(k);
        }
        found
    }

    /// Declaration for `name`, autoloading it if necessary.
    pub fn get(&self, name: &str) -> Option<ConstructDecl> {
        if !self.is_loaded(name) && !self.autoload(name) {
            return None;
        }
        self.loaded.get(&key(name)).map(|d| d.value().clone())
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Forget everything read so far.
    pub fn clear(&self) {
        self.loaded.clear();
        self.loaded_files.clear();
        self.missing.clear();
    }

    /// Existing files that PSR-4 maps `name` to.
    fn candidate_files(&self, name: &str) -> Vec<PathBuf> {
        let Ok(namespace) = Psr4Namespace::new(name) else {
            return Vec::new();
        };
        let prefixes = match self.provider.prefix_map() {
            Ok(prefixes) => prefixes,
            Err(e) => {
                warn!("{} failed: {}", self.provider.name(), e);
                return Vec::new();
            }
        };
        let Some(prefix) = find_best_prefix(&namespace, prefixes.prefixes()) else {
            return Vec::new();
        };

        let relative = namespace_to_path(&namespace.value()[prefix.len()..]);
        if relative.as_os_str().is_empty() {
            return Vec::new();
        }

        prefixes
            .get(prefix)
            .unwrap_or_default()
            .iter()
            .map(|base| {
                let mut file = base.join(&relative);
                file.set_extension(&self.extension);
                file
            })
            .filter(|file| file.is_file())
            .collect()
    }
}

impl TypeIntrospector for AutoloadIntrospector {
    fn type_exists(&self, name: &str) -> bool {
        self.is_loaded(name) || self.autoload(name)
    }

    /// Follows `extends`/`implements` transitively. Traits never count.
    fn is_subtype_of(&self, name: &str, supertype: &str) -> bool {
        let target = key(supertype);
        let Some(decl) = self.get(name) else {
            return false;
        };

        let mut visited = HashSet::new();
        let mut pending: Vec<String> = decl.parents().map(str::to_string).collect();

        while let Some(parent) = pending.pop() {
            let parent_key = key(&parent);
            if parent_key == target {
                return true;
            }
            if !visited.insert(parent_key) {
                continue;
            }
            if let Some(parent_decl) = self.get(&parent) {
                pending.extend(parent_decl.parents().map(str::to_string));
            }
        }
        false
    }
}
