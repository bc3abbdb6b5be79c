//! Longest-prefix matching of a namespace against registered PSR-4 prefixes.

use crate::model::Psr4Namespace;
use tracing::debug;

/// Find the best registered prefix for `namespace`.
///
/// A prefix matches when it is a literal string prefix of the canonical
/// namespace; among matches the longest wins. Registered PSR-4 prefixes end
/// with a separator, which keeps matches segment aligned. Equal-length
/// matches keep the first one seen, so the caller's iteration order decides.
pub fn find_best_prefix<'a>(
    namespace: &Psr4Namespace,
    prefixes: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let value = namespace.value();
    let mut best_match: Option<&'a str> = None;

    for prefix in prefixes {
        if prefix.is_empty() || !value.starts_with(prefix) {
            continue;
        }
        match best_match {
            None => best_match = Some(prefix),
            Some(best) if prefix.len() > best.len() => best_match = Some(prefix),
            _ => {}
        }
    }

    debug!("Best prefix for {}: {:?}", namespace, best_match);
    best_match
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns(raw: &str) -> Psr4Namespace {
        Psr4Namespace::new(raw).unwrap()
    }

    #[test]
    fn test_longest_prefix_match() {
        let prefixes = ["App\\", "App\\Models\\", "App\\Models\\Concerns\\", "Vendor\\"];
        assert_eq!(
            find_best_prefix(&ns("App\\Models\\User"), prefixes),
            Some("App\\Models\\")
        );
        assert_eq!(
            find_best_prefix(&ns("App\\Models\\Concerns"), prefixes),
            Some("App\\Models\\Concerns\\")
        );
        assert_eq!(find_best_prefix(&ns("App\\Http"), prefixes), Some("App\\"));
    }

    #[test]
    fn test_order_does_not_matter_for_longest() {
        let forward = ["A\\", "A\\B\\", "A\\B\\C\\"];
        let backward = ["A\\B\\C\\", "A\\B\\", "A\\"];
        let target = ns("A\\B\\C\\D");
        assert_eq!(find_best_prefix(&target, forward), Some("A\\B\\C\\"));
        assert_eq!(find_best_prefix(&target, backward), Some("A\\B\\C\\"));
    }

    #[test]
    fn test_no_match() {
        let prefixes = ["App\\", "Vendor\\"];
        assert_eq!(find_best_prefix(&ns("ThisDoesNotExist"), prefixes), None);
        assert_eq!(find_best_prefix(&ns("App"), std::iter::empty()), None);
    }

    #[test]
    fn test_segment_boundary() {
        // "Something\" must not claim "SomethingElse\..."
        let prefixes = ["Something\\"];
        assert_eq!(find_best_prefix(&ns("SomethingElse\\Foo"), prefixes), None);
    }

    #[test]
    fn test_empty_prefix_never_wins() {
        let prefixes = ["", "App\\"];
        assert_eq!(find_best_prefix(&ns("Other"), prefixes), None);
        assert_eq!(find_best_prefix(&ns("App\\X"), prefixes), Some("App\\"));
    }
}
