use fqcn_core::discovery::ConstructDiscoverer;
use fqcn_core::project::ArtifactScanner;
use fqcn_core::resolver::resolve_directories;
use fqcn_core::{FnIntrospector, FqcnError, PrefixMap, Psr4Namespace};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

fn ns(raw: &str) -> Psr4Namespace {
    Psr4Namespace::new(raw).unwrap()
}

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "<?php\n").unwrap();
}

fn app_project() -> (TempDir, PrefixMap) {
    let temp = TempDir::new().unwrap();
    let map: PrefixMap = [("App\\", temp.path().join("src"))].into_iter().collect();
    (temp, map)
}

#[test]
fn test_finds_existing_construct() {
    let (temp, map) = app_project();
    touch(temp.path(), "src/Models/User.src");

    let discoverer = ConstructDiscoverer::new(ArtifactScanner::new("src"));
    let introspector = FnIntrospector::new(|name| name == "App\\Models\\User", |_, _| false);

    let found = discoverer
        .find_constructs(&ns("App"), &map, &introspector, None)
        .unwrap();
    assert_eq!(found, vec!["App\\Models\\User"]);
}

#[test]
fn test_nonexistent_type_is_dropped() {
    let (temp, map) = app_project();
    touch(temp.path(), "src/Models/User.src");

    let discoverer = ConstructDiscoverer::new(ArtifactScanner::new("src"));
    let introspector = FnIntrospector::new(|_| false, |_, _| false);

    let found = discoverer
        .find_constructs(&ns("App"), &map, &introspector, None)
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_supertype_filter_keeps_sorted_position() {
    let (temp, map) = app_project();
    touch(temp.path(), "src/Admin.php");
    touch(temp.path(), "src/Guest.php");
    touch(temp.path(), "src/Models/Base.php");

    let introspector = FnIntrospector::new(
        |_| true,
        |name, supertype| supertype == "App\\Base" && name == "App\\Guest",
    );
    let found = ConstructDiscoverer::default()
        .find_constructs(&ns("App"), &map, &introspector, Some("App\\Base"))
        .unwrap();
    assert_eq!(found, vec!["App\\Guest"]);
}

#[test]
fn test_sub_namespace_scan() {
    let (temp, map) = app_project();
    touch(temp.path(), "src/Models/User.php");
    touch(temp.path(), "src/Models/Concerns/HasName.php");
    touch(temp.path(), "src/Http/Kernel.php");

    let all = FnIntrospector::new(|_| true, |_, _| false);
    let found = ConstructDiscoverer::default()
        .find_constructs(&ns("\\App\\Models\\"), &map, &all, None)
        .unwrap();
    assert_eq!(
        found,
        vec!["App\\Models\\Concerns\\HasName", "App\\Models\\User"]
    );
}

#[test]
fn test_missing_directory_yields_empty() {
    let (_temp, map) = app_project();
    let all = FnIntrospector::new(|_| true, |_, _| true);

    assert!(resolve_directories(&ns("App\\Madeup"), &map).unwrap().is_empty());
    let found = ConstructDiscoverer::default()
        .find_constructs(&ns("App\\Madeup"), &map, &all, None)
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_unregistered_namespace_names_offender() {
    let (_temp, map) = app_project();
    let err = resolve_directories(&ns("ThisDoesNotExist"), &map).unwrap_err();
    assert!(matches!(err, FqcnError::UnregisteredNamespace(_)));
    assert!(err.to_string().contains("ThisDoesNotExist\\"));
}

#[test]
fn test_scan_matches_manual_enumeration() {
    let (temp, map) = app_project();
    for rel in [
        "src/A.php",
        "src/B/C.php",
        "src/B/D/E.php",
        "src/B/readme.md",
        "src/F.PHP",
    ] {
        touch(temp.path(), rel);
    }

    let dirs = resolve_directories(&ns("App"), &map).unwrap();
    assert_eq!(dirs.len(), 1);
    let root = &dirs[0];

    let scanned: BTreeSet<String> = ArtifactScanner::default()
        .scan(root, &ns("App"))
        .into_iter()
        .collect();

    let manual: BTreeSet<String> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|x| x.to_str())
                .is_some_and(|x| x.eq_ignore_ascii_case("php"))
        })
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().with_extension("");
            let parts: Vec<String> = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect();
            format!("App\\{}", parts.join("\\"))
        })
        .collect();

    assert_eq!(scanned, manual);
    assert_eq!(scanned.len(), 4);
}

#[test]
fn test_invalid_namespaces_rejected() {
    for raw in ["4Something", "", "\\\\\\"] {
        assert!(matches!(
            Psr4Namespace::new(raw),
            Err(FqcnError::InvalidNamespace(_))
        ));
    }
}
