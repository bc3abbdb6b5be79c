use fqcn_core::{PathBuilder, Psr4Namespace};
use std::path::Path;
use tracing::info;

pub fn run(
    base_dir: &Path,
    base_namespace: &str,
    target: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let builder = PathBuilder::new(base_dir, Psr4Namespace::new(base_namespace)?)?;
    let target = Psr4Namespace::new(target)?;
    let resolved = builder.resolve(&target)?;

    info!(
        "{} relative to {} at {}: {:?}",
        target,
        builder.namespace(),
        builder.base_path().display(),
        resolved
    );

    // A namespace without a directory prints nothing (or `[]`)
    let resolved: Vec<String> = resolved.iter().map(|p| p.display().to_string()).collect();
    crate::print_list(&resolved, json)
}
