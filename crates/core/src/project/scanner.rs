use crate::model::{NAMESPACE_SEPARATOR, Psr4Namespace};
use std::path::{Component, Path};
use std::time::{Duration, Instant};
use tracing::debug;
use walkdir::WalkDir;

pub const DEFAULT_EXTENSION: &str = "php";

/// Walks a directory tree and turns every source file into the
/// fully-qualified name its PSR-4 location implies.
///
/// `<dir>/Models/User.php` scanned as `App\` yields `App\Models\User`.
#[derive(Debug, Clone)]
pub struct ArtifactScanner {
    extension: String,
}

impl ArtifactScanner {
    /// `extension` is matched case-insensitively, without the leading dot.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Candidate names below `directory`, in filesystem order.
    pub fn scan(&self, directory: &Path, namespace: &Psr4Namespace) -> Vec<String> {
        self.scan_with_stats(directory, namespace).0
    }

    pub fn scan_with_stats(
        &self,
        directory: &Path,
        namespace: &Psr4Namespace,
    ) -> (Vec<String>, ScanStats) {
        let start = Instant::now();
        let mut stats = ScanStats::default();
        let mut candidates = Vec::new();

        for entry in WalkDir::new(directory).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry under {:?}: {}", directory, e);
                    stats.skipped_entries += 1;
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            stats.files_visited += 1;

            let Some(file_name) = entry.file_name().to_str() else {
                stats.skipped_entries += 1;
                continue;
            };
            if !self.is_source_file(file_name) {
                continue;
            }

            match self.qualified_name(directory, entry.path(), namespace) {
                Some(fqcn) => candidates.push(fqcn),
                None => stats.skipped_entries += 1,
            }
        }

        stats.candidates = candidates.len();
        stats.duration = start.elapsed();
        debug!(
            "Scanned {:?} as {}: {} files, {} candidates, {} skipped in {:?}",
            directory,
            namespace,
            stats.files_visited,
            stats.candidates,
            stats.skipped_entries,
            stats.duration
        );

        (candidates, stats)
    }

    /// `^.+\.<ext>$`, case-insensitive.
    pub fn is_source_file(&self, file_name: &str) -> bool {
        let suffix_len = self.extension.len() + 1;
        if file_name.len() <= suffix_len || !file_name.is_char_boundary(file_name.len() - suffix_len)
        {
            return false;
        }
        let (_, suffix) = file_name.split_at(file_name.len() - suffix_len);
        suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(&self.extension)
    }

    fn qualified_name(&self, root: &Path, path: &Path, namespace: &Psr4Namespace) -> Option<String> {
        let relative = path.strip_prefix(root).ok()?;
        let mut parts = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_str()?),
                _ => return None,
            }
        }

        let file_name = parts.pop()?;
        let stem = &file_name[..file_name.len() - self.extension.len() - 1];

        let mut fqcn = namespace.value().to_string();
        for part in parts {
            fqcn.push_str(part);
            fqcn.push(NAMESPACE_SEPARATOR);
        }
        fqcn.push_str(stem);
        Some(fqcn)
    }
}

impl Default for ArtifactScanner {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION)
    }
}

/// Result of a single directory scan
#[derive(Debug, Default, Clone)]
pub struct ScanStats {
    /// Regular files seen, matching or not
    pub files_visited: usize,
    /// Files turned into candidate names
    pub candidates: usize,
    /// Entries that could not be read or named
    pub skipped_entries: usize,
    pub duration: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn ns(raw: &str) -> Psr4Namespace {
        Psr4Namespace::new(raw).unwrap()
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<?php\n").unwrap();
    }

    #[test]
    fn test_is_source_file() {
        let scanner = ArtifactScanner::default();
        assert!(scanner.is_source_file("User.php"));
        assert!(scanner.is_source_file("User.PHP"));
        assert!(scanner.is_source_file("a.php"));
        assert!(!scanner.is_source_file(".php"));
        assert!(!scanner.is_source_file("User.phpx"));
        assert!(!scanner.is_source_file("User_php"));
        assert!(!scanner.is_source_file("README.md"));
    }

    #[test]
    fn test_custom_extension() {
        let scanner = ArtifactScanner::new(".src");
        assert_eq!(scanner.extension(), "src");
        assert!(scanner.is_source_file("User.src"));
        assert!(!scanner.is_source_file("User.php"));
    }

    #[test]
    fn test_scan_recursive() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "Models/User.php");
        touch(temp.path(), "Models/Concerns/HasName.php");
        touch(temp.path(), "Kernel.PHP");
        touch(temp.path(), "notes.txt");

        let scanner = ArtifactScanner::default();
        let (mut names, stats) = scanner.scan_with_stats(temp.path(), &ns("App"));
        names.sort();

        assert_eq!(
            names,
            vec![
                "App\\Kernel",
                "App\\Models\\Concerns\\HasName",
                "App\\Models\\User",
            ]
        );
        assert_eq!(stats.files_visited, 4);
        assert_eq!(stats.candidates, 3);
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp = tempfile::tempdir().unwrap();
        let scanner = ArtifactScanner::default();
        assert!(scanner.scan(temp.path(), &ns("App")).is_empty());
    }

    #[test]
    fn test_scan_missing_directory_does_not_panic() {
        let temp = tempfile::tempdir().unwrap();
        let scanner = ArtifactScanner::default();
        let (names, stats) = scanner.scan_with_stats(&temp.path().join("missing"), &ns("App"));
        assert!(names.is_empty());
        assert_eq!(stats.skipped_entries, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_broken_link_beside_sources() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "User.php");
        std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("Dangling.php"))
            .unwrap();

        let scanner = ArtifactScanner::default();
        let (names, stats) = scanner.scan_with_stats(temp.path(), &ns("App"));
        assert_eq!(names, vec!["App\\User"]);
        assert_eq!(stats.skipped_entries, 1);
    }
}
