use fqcn_core::runtime::build_default_resolver;
use std::path::Path;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct PrefixRow {
    #[tabled(rename = "Prefix")]
    prefix: String,
    #[tabled(rename = "Directory")]
    directory: String,
    #[tabled(rename = "Exists")]
    exists: bool,
}

pub fn run(project: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (resolver, _) = build_default_resolver(project)?;
    let map = resolver.prefix_map()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    let rows: Vec<PrefixRow> = map
        .iter()
        .flat_map(|(prefix, dirs)| {
            dirs.iter().map(move |dir| PrefixRow {
                prefix: prefix.to_string(),
                directory: dir.display().to_string(),
                exists: dir.is_dir(),
            })
        })
        .collect();

    if rows.is_empty() {
        println!("No PSR-4 prefixes registered.");
    } else {
        println!("{}", Table::new(rows));
    }
    Ok(())
}
