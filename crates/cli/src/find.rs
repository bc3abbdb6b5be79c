use fqcn_core::Psr4Namespace;
use fqcn_core::runtime::build_default_resolver;
use std::path::Path;
use tracing::info;

pub fn run(
    namespace: &str,
    instance_of: Option<&str>,
    project: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let namespace = Psr4Namespace::new(namespace)?;
    let (resolver, introspector) = build_default_resolver(project)?;

    let constructs = resolver.find_constructs(&namespace, &introspector, instance_of)?;
    info!(
        "Found {} constructs under {} ({} declarations read)",
        constructs.len(),
        namespace,
        introspector.loaded_count()
    );

    crate::print_list(&constructs, json)
}
