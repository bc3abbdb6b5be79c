use crate::error::{FqcnError, Result};
use crate::project::DEFAULT_EXTENSION;
use crate::provider::composer::read_manifest;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Key under `composer.json` → `extra` holding resolver settings.
pub const EXTRA_KEY: &str = "fqcn";

/// Resolver settings.
///
/// Read from the project's `composer.json`:
///
/// ```json
/// { "extra": { "fqcn": { "extension": "php", "parallel": true, "include-dev": false } } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ResolverConfig {
    /// Source file extension, matched case-insensitively
    pub extension: String,
    /// Scan resolved directories on the rayon pool
    pub parallel: bool,
    /// Include `autoload-dev` prefixes
    pub include_dev: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            parallel: true,
            include_dev: true,
        }
    }
}

impl ResolverConfig {
    /// Settings from `extra.fqcn`, defaults when the key is absent.
    pub fn from_composer(root: &Path) -> Result<Self> {
        let manifest = read_manifest(root)?;
        match manifest.extra.get(EXTRA_KEY) {
            Some(value) => {
                let config: ResolverConfig = serde_json::from_value(value.clone())?;
                config.validate()?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let extension = self.extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(FqcnError::Config("extension must not be empty".to_string()));
        }
        if extension.contains(['/', '\\']) {
            return Err(FqcnError::Config(format!(
                "extension '{}' must not contain path separators",
                self.extension
            )));
        }
        Ok(())
    }
}
