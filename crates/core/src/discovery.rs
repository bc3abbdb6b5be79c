//! Construct discovery: resolve → scan → verify → order → filter.

use crate::error::Result;
use crate::introspect::TypeIntrospector;
use crate::model::{NAMESPACE_SEPARATOR, PrefixMap, Psr4Namespace};
use crate::project::ArtifactScanner;
use crate::resolver::path::resolve_directories;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info};

/// Finds the constructs that exist under a namespace.
#[derive(Debug, Clone, Default)]
pub struct ConstructDiscoverer {
    scanner: ArtifactScanner,
    parallel: bool,
}

impl ConstructDiscoverer {
    pub fn new(scanner: ArtifactScanner) -> Self {
        Self {
            scanner,
            parallel: false,
        }
    }

    /// Scan resolved directories concurrently. Output order is unaffected.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// All constructs under `namespace`, sorted, optionally restricted to
    /// strict subtypes of `supertype`.
    pub fn find_constructs(
        &self,
        namespace: &Psr4Namespace,
        prefixes: &PrefixMap,
        introspector: &dyn TypeIntrospector,
        supertype: Option<&str>,
    ) -> Result<Vec<String>> {
        let directories = resolve_directories(namespace, prefixes)?;
        let mut constructs = self.find_in_directories(&directories, namespace, introspector);

        if let Some(supertype) = supertype {
            let supertype = supertype.trim_start_matches(NAMESPACE_SEPARATOR);
            constructs.retain(|name| {
                name != supertype && introspector.is_subtype_of(name, supertype)
            });
            debug!(
                "{} constructs under {} are subtypes of {}",
                constructs.len(),
                namespace,
                supertype
            );
        }

        info!("Discovered {} constructs under {}", constructs.len(), namespace);
        Ok(constructs)
    }

    /// Scan `directories` (all representing `namespace`) and keep the names
    /// the introspector confirms, sorted.
    pub fn find_in_directories(
        &self,
        directories: &[PathBuf],
        namespace: &Psr4Namespace,
        introspector: &dyn TypeIntrospector,
    ) -> Vec<String> {
        let scanned: Vec<Vec<String>> = if self.parallel {
            directories
                .par_iter()
                .map(|dir| self.scanner.scan(dir, namespace))
                .collect()
        } else {
            directories
                .iter()
                .map(|dir| self.scanner.scan(dir, namespace))
                .collect()
        };

        let candidates: Vec<String> = scanned.into_iter().flatten().collect();
        let candidate_count = candidates.len();

        let mut constructs: Vec<String> = candidates
            .into_iter()
            .filter(|name| introspector.type_exists(name))
            .collect();
        constructs.sort();

        debug!(
            "{} of {} candidates in {} directories exist",
            constructs.len(),
            candidate_count,
            directories.len()
        );
        constructs
    }
}
