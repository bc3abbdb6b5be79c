pub mod path;
pub mod prefix;

pub use path::{PathBuilder, namespace_to_path, resolve_directories};
pub use prefix::find_best_prefix;

use crate::config::ResolverConfig;
use crate::discovery::ConstructDiscoverer;
use crate::error::Result;
use crate::introspect::TypeIntrospector;
use crate::model::{PrefixMap, Psr4Namespace};
use crate::project::ArtifactScanner;
use crate::provider::PrefixMapProvider;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Resolves namespaces against a prefix map provider.
///
/// Holds no per-namespace state: every call takes the namespace explicitly
/// and re-queries the provider, so one instance can be shared freely.
#[derive(Clone)]
pub struct Resolver {
    provider: Arc<dyn PrefixMapProvider>,
    config: ResolverConfig,
    discoverer: ConstructDiscoverer,
}

impl Resolver {
    pub fn new(provider: Arc<dyn PrefixMapProvider>) -> Self {
        Self::with_config(provider, ResolverConfig::default())
    }

    pub fn with_config(provider: Arc<dyn PrefixMapProvider>, config: ResolverConfig) -> Self {
        let discoverer = ConstructDiscoverer::new(ArtifactScanner::new(config.extension.clone()))
            .with_parallel(config.parallel);
        Self {
            provider,
            config,
            discoverer,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn prefix_map(&self) -> Result<PrefixMap> {
        debug!("Querying {}", self.provider.name());
        self.provider.prefix_map()
    }

    /// Existing directories `namespace` maps to, in registration order.
    pub fn resolve_directories(&self, namespace: &Psr4Namespace) -> Result<Vec<PathBuf>> {
        resolve_directories(namespace, &self.prefix_map()?)
    }

    /// Constructs under `namespace`, sorted; restricted to subtypes of
    /// `instance_of` when given.
    pub fn find_constructs(
        &self,
        namespace: &Psr4Namespace,
        introspector: &dyn TypeIntrospector,
        instance_of: Option<&str>,
    ) -> Result<Vec<String>> {
        self.discoverer
            .find_constructs(namespace, &self.prefix_map()?, introspector, instance_of)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspect::FnIntrospector;
    use crate::provider::StaticPrefixMap;
    use std::fs;

    #[test]
    fn test_resolver_uses_config_extension() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("User.src"), "").unwrap();
        fs::write(temp.path().join("Post.php"), "").unwrap();

        let map: PrefixMap = [("App\\", temp.path())].into_iter().collect();
        let config = ResolverConfig {
            extension: "src".to_string(),
            ..Default::default()
        };
        let resolver = Resolver::with_config(Arc::new(StaticPrefixMap::new(map)), config);

        let all = FnIntrospector::new(|_| true, |_, _| false);
        let namespace = Psr4Namespace::new("App").unwrap();
        assert_eq!(
            resolver.find_constructs(&namespace, &all, None).unwrap(),
            vec!["App\\User"]
        );
        assert_eq!(
            resolver.resolve_directories(&namespace).unwrap(),
            vec![temp.path().canonicalize().unwrap()]
        );
    }
}
