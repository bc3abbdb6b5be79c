use crate::config::ResolverConfig;
use crate::error::Result;
use crate::introspect::AutoloadIntrospector;
use crate::provider::{ComposerPrefixMap, PrefixMapProvider};
use crate::resolver::Resolver;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Bootstraps a resolver and a matching source introspector for a Composer
/// project rooted at `root`.
///
/// Settings come from `composer.json` → `extra.fqcn`; both halves share the
/// same Composer prefix map provider.
pub fn build_default_resolver(root: &Path) -> Result<(Resolver, AutoloadIntrospector)> {
    let config = ResolverConfig::from_composer(root)?;
    let provider: Arc<dyn PrefixMapProvider> =
        Arc::new(ComposerPrefixMap::new(root).with_dev(config.include_dev));

    info!(
        "Resolver ready for {:?} (extension: {}, parallel: {})",
        root, config.extension, config.parallel
    );

    let introspector =
        AutoloadIntrospector::new(provider.clone()).with_extension(config.extension.clone());
    Ok((Resolver::with_config(provider, config), introspector))
}
