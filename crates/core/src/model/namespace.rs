//! PSR-4 namespace value.
//!
//! A `Psr4Namespace` is always stored in canonical form: no leading
//! separator, exactly one trailing separator, single separators between
//! segments. `\Something\To\Do\` and `Something\\To\Do` both canonicalize
//! to `Something\To\Do\`.

use crate::error::{FqcnError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between namespace segments.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// A segment starts with an uppercase ASCII letter followed by word characters.
static SEGMENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9_]*$").expect("segment pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Psr4Namespace(String);

impl Psr4Namespace {
    pub fn new(raw: &str) -> Result<Self> {
        let segments: Vec<&str> = raw
            .split(NAMESPACE_SEPARATOR)
            .filter(|s| !s.is_empty())
            .collect();

        if segments.is_empty() {
            return Err(FqcnError::InvalidNamespace(raw.to_string()));
        }

        if let Some(bad) = segments.iter().find(|s| !SEGMENT_PATTERN.is_match(s)) {
            tracing::debug!("Rejecting namespace '{}': bad segment '{}'", raw, bad);
            return Err(FqcnError::InvalidNamespace(raw.to_string()));
        }

        let mut value = segments.join("\\");
        value.push(NAMESPACE_SEPARATOR);
        Ok(Self(value))
    }

    /// Canonical form, always separator-terminated.
    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Literal prefix test over canonical forms.
    ///
    /// Both values end with a separator, so a match is always segment
    /// aligned: `Something\Haha\` starts with `Something\` but
    /// `SomethingElse\` does not.
    pub fn starts_with(&self, other: &Psr4Namespace) -> bool {
        self.0.starts_with(&other.0)
    }

    /// The part of `self` after `base`, without surrounding separators.
    ///
    /// Returns `None` when `self` is not under `base`, and `Some("")` when
    /// both are equal.
    pub fn relative_to(&self, base: &Psr4Namespace) -> Option<&str> {
        self.0
            .strip_prefix(base.as_str())
            .map(|rest| rest.trim_matches(NAMESPACE_SEPARATOR))
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0
            .trim_end_matches(NAMESPACE_SEPARATOR)
            .split(NAMESPACE_SEPARATOR)
    }

    /// Last segment, e.g. `Models` for `App\Models\`.
    pub fn name(&self) -> &str {
        self.segments().last().unwrap_or_default()
    }

    /// Enclosing namespace, `None` for a single-segment namespace.
    pub fn parent(&self) -> Option<Psr4Namespace> {
        let trimmed = self.0.trim_end_matches(NAMESPACE_SEPARATOR);
        let (parent, _) = trimmed.rsplit_once(NAMESPACE_SEPARATOR)?;
        Some(Self(format!("{}{}", parent, NAMESPACE_SEPARATOR)))
    }

    /// Append one or more segments (`Models` or `Models\Concerns`).
    pub fn join(&self, child: &str) -> Result<Psr4Namespace> {
        Self::new(&format!("{}{}", self.0, child))
    }
}

impl fmt::Display for Psr4Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Psr4Namespace {
    type Err = FqcnError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Psr4Namespace {
    type Error = FqcnError;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Psr4Namespace {
    type Error = FqcnError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(&s)
    }
}

impl From<Psr4Namespace> for String {
    fn from(ns: Psr4Namespace) -> Self {
        ns.0
    }
}

impl AsRef<str> for Psr4Namespace {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_normalizes() {
        let namespace = Psr4Namespace::new("\\Something\\To\\Do\\").unwrap();
        assert_eq!(namespace.value(), "Something\\To\\Do\\");
        assert_eq!(namespace.to_string(), "Something\\To\\Do\\");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let variants = [
            "App\\Models",
            "\\App\\Models",
            "App\\Models\\",
            "\\\\App\\Models\\\\",
            "App\\\\Models",
        ];
        let canonical = Psr4Namespace::new("App\\Models").unwrap();
        for raw in variants {
            let ns = Psr4Namespace::new(raw).unwrap();
            assert_eq!(ns, canonical, "variant {:?}", raw);
            assert_eq!(Psr4Namespace::new(ns.value()).unwrap(), ns);
        }
    }

    #[test]
    fn test_equals() {
        let namespace = Psr4Namespace::new("\\Something\\Haha\\Other\\").unwrap();
        assert_eq!(namespace, Psr4Namespace::new("Something\\Haha\\Other").unwrap());
        assert_ne!(namespace, Psr4Namespace::new("Something\\Haha").unwrap());
    }

    #[test]
    fn test_starts_with() {
        let namespace = Psr4Namespace::new("\\Something\\Haha\\Other\\").unwrap();
        assert!(namespace.starts_with(&Psr4Namespace::new("Something\\").unwrap()));
        assert!(namespace.starts_with(&Psr4Namespace::new("Something\\Haha").unwrap()));
        assert!(namespace.starts_with(&namespace.clone()));
        assert!(!namespace.starts_with(&Psr4Namespace::new("SomethingElse").unwrap()));

        let other = Psr4Namespace::new("SomethingElse\\Haha").unwrap();
        assert!(!other.starts_with(&Psr4Namespace::new("Something").unwrap()));
    }

    #[test]
    fn test_invalid_data() {
        for raw in ["", "something-cool/haha", "4Something", "\\\\\\", "App\\4Models", "App\\my model"] {
            let err = Psr4Namespace::new(raw).unwrap_err();
            assert!(
                matches!(err, FqcnError::InvalidNamespace(ref v) if v == raw),
                "expected InvalidNamespace for {:?}, got {:?}",
                raw,
                err
            );
        }
    }

    #[test]
    fn test_relative_to() {
        let base = Psr4Namespace::new("App").unwrap();
        let ns = Psr4Namespace::new("App\\Models\\Concerns").unwrap();
        assert_eq!(ns.relative_to(&base), Some("Models\\Concerns"));
        assert_eq!(base.relative_to(&base), Some(""));
        assert_eq!(base.relative_to(&ns), None);
    }

    #[test]
    fn test_segments_parent_join() {
        let ns = Psr4Namespace::new("App\\Models\\Concerns").unwrap();
        assert_eq!(ns.segments().collect::<Vec<_>>(), vec!["App", "Models", "Concerns"]);
        assert_eq!(ns.name(), "Concerns");
        assert_eq!(ns.parent().unwrap().value(), "App\\Models\\");
        assert!(Psr4Namespace::new("App").unwrap().parent().is_none());

        let joined = Psr4Namespace::new("App").unwrap().join("Http\\Controllers").unwrap();
        assert_eq!(joined.value(), "App\\Http\\Controllers\\");
        assert!(Psr4Namespace::new("App").unwrap().join("bad").is_err());
    }

    #[test]
    fn test_serde_validates() {
        let ns: Psr4Namespace = serde_json::from_str("\"\\\\App\\\\Models\"").unwrap();
        assert_eq!(ns.value(), "App\\Models\\");
        assert_eq!(serde_json::to_string(&ns).unwrap(), "\"App\\\\Models\\\\\"");
        assert!(serde_json::from_str::<Psr4Namespace>("\"lower\"").is_err());
    }
}
