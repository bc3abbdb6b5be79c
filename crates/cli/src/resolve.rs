use fqcn_core::Psr4Namespace;
use fqcn_core::runtime::build_default_resolver;
use std::path::Path;
use tracing::info;

pub fn run(namespace: &str, project: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let namespace = Psr4Namespace::new(namespace)?;
    let (resolver, _) = build_default_resolver(project)?;

    let dirs = resolver.resolve_directories(&namespace)?;
    info!("{} resolved to {} directories", namespace, dirs.len());

    let dirs: Vec<String> = dirs.iter().map(|d| d.display().to_string()).collect();
    crate::print_list(&dirs, json)
}
