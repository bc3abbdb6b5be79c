//! Composer-backed prefix map.
//!
//! Reads the PSR-4 sections of a project's `composer.json` and of every
//! installed package listed in `<vendor-dir>/composer/installed.json`:
//!
//! ```json
//! { "autoload": { "psr-4": { "App\\": "src/", "Lib\\": ["lib/", "legacy/"] } } }
//! ```

use super::PrefixMapProvider;
use crate::error::Result;
use crate::model::{NAMESPACE_SEPARATOR, PrefixMap};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const MANIFEST_FILE: &str = "composer.json";
const DEFAULT_VENDOR_DIR: &str = "vendor";

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PathList {
    One(String),
    Many(Vec<String>),
}

impl PathList {
    fn paths(&self) -> Vec<&str> {
        match self {
            PathList::One(path) => vec![path.as_str()],
            PathList::Many(paths) => paths.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AutoloadSection {
    #[serde(default, rename = "psr-4")]
    psr4: IndexMap<String, PathList>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ComposerSettings {
    #[serde(default, rename = "vendor-dir")]
    vendor_dir: Option<String>,
}

/// The parts of `composer.json` this crate reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ComposerManifest {
    #[serde(default)]
    autoload: AutoloadSection,
    #[serde(default, rename = "autoload-dev")]
    autoload_dev: AutoloadSection,
    #[serde(default)]
    config: ComposerSettings,
    #[serde(default)]
    pub(crate) extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct InstalledPackage {
    name: String,
    #[serde(default)]
    autoload: AutoloadSection,
    #[serde(default, rename = "install-path")]
    install_path: Option<String>,
}

/// `installed.json` is a bare array before Composer 2 and an object after.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum InstalledManifest {
    Current { packages: Vec<InstalledPackage> },
    Legacy(Vec<InstalledPackage>),
}

impl InstalledManifest {
    fn into_packages(self) -> Vec<InstalledPackage> {
        match self {
            InstalledManifest::Current { packages } => packages,
            InstalledManifest::Legacy(packages) => packages,
        }
    }
}

pub(crate) fn read_manifest(root: &Path) -> Result<ComposerManifest> {
    let content = fs::read_to_string(root.join(MANIFEST_FILE))?;
    Ok(serde_json::from_str(&content)?)
}

/// Register one `psr-4` section, resolving relative paths against `base`.
fn register_section(map: &mut PrefixMap, section: &AutoloadSection, base: &Path) {
    for (prefix, paths) in &section.psr4 {
        let prefix = if prefix.is_empty() || prefix.ends_with(NAMESPACE_SEPARATOR) {
            prefix.clone()
        } else {
            warn!(
                "PSR-4 prefix '{}' does not end with a namespace separator, appending one",
                prefix
            );
            format!("{}{}", prefix, NAMESPACE_SEPARATOR)
        };
        for path in paths.paths() {
            map.register(prefix.clone(), base.join(path));
        }
    }
}

/// Prefix map read from a Composer project on every query.
#[derive(Debug, Clone)]
pub struct ComposerPrefixMap {
    root: PathBuf,
    include_dev: bool,
}

impl ComposerPrefixMap {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include_dev: true,
        }
    }

    /// Whether `autoload-dev` registrations are included (default: yes)
    pub fn with_dev(mut self, include_dev: bool) -> Self {
        self.include_dev = include_dev;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn vendor_dir(&self, manifest: &ComposerManifest) -> PathBuf {
        let dir = manifest
            .config
            .vendor_dir
            .as_deref()
            .unwrap_or(DEFAULT_VENDOR_DIR);
        self.root.join(dir)
    }

    fn register_installed(&self, map: &mut PrefixMap, vendor_dir: &Path) -> Result<()> {
        let installed_path = vendor_dir.join("composer").join("installed.json");
        if !installed_path.is_file() {
            debug!("No installed.json at {:?}", installed_path);
            return Ok(());
        }

        let content = fs::read_to_string(&installed_path)?;
        let installed: InstalledManifest = serde_json::from_str(&content)?;

        for package in installed.into_packages() {
            let package_dir = match &package.install_path {
                Some(install_path) => vendor_dir.join("composer").join(install_path),
                None => vendor_dir.join(&package.name),
            };
            register_section(map, &package.autoload, &package_dir);
        }
        Ok(())
    }
}

impl PrefixMapProvider for ComposerPrefixMap {
    fn prefix_map(&self) -> Result<PrefixMap> {
        let manifest = read_manifest(&self.root)?;
        let mut map = PrefixMap::new();

        register_section(&mut map, &manifest.autoload, &self.root);
        if self.include_dev {
            register_section(&mut map, &manifest.autoload_dev, &self.root);
        }
        self.register_installed(&mut map, &self.vendor_dir(&manifest))?;

        debug!(
            "Loaded {} PSR-4 prefixes from {:?}",
            map.len(),
            self.root
        );
        Ok(map)
    }

    fn name(&self) -> &str {
        "Composer Prefix Map"
    }
}
