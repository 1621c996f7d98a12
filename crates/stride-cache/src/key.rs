//! Query key composition and invalidation patterns.

use serde::{Deserialize, Serialize};

/// A key identifying one cached resource.
///
/// Keys are ordered segments, e.g. `["analytics", "fitness-timeline", "90"]`,
/// so that a mutation can invalidate a whole family of resources by prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    /// Create a key from segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Append a segment, returning the extended key.
    pub fn with(mut self, segment: impl Into<String>) -> Self {
        self.0.push(segment.into());
        self
    }

    /// Get the key segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Check whether `prefix` is a segment-wise prefix of this key.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0.iter().zip(&prefix.0).all(|(a, b)| a == b)
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl<const N: usize> From<[&str; N]> for QueryKey {
    fn from(segments: [&str; N]) -> Self {
        Self::new(segments)
    }
}

impl From<&str> for QueryKey {
    fn from(key: &str) -> Self {
        Self::new(key.split('/').filter(|s| !s.is_empty()))
    }
}

/// Selects which cache entries an invalidation applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPattern {
    /// Exactly this key.
    Exact(QueryKey),
    /// Every key starting with these segments.
    Prefix(QueryKey),
    /// Every key in the cache.
    All,
}

impl KeyPattern {
    /// Create an exact-match pattern.
    pub fn exact(key: impl Into<QueryKey>) -> Self {
        Self::Exact(key.into())
    }

    /// Create a prefix pattern.
    pub fn prefix(key: impl Into<QueryKey>) -> Self {
        Self::Prefix(key.into())
    }

    /// Check whether a key matches this pattern.
    pub fn matches(&self, key: &QueryKey) -> bool {
        match self {
            Self::Exact(k) => k == key,
            Self::Prefix(p) => key.starts_with(p),
            Self::All => true,
        }
    }
}

impl From<QueryKey> for KeyPattern {
    fn from(key: QueryKey) -> Self {
        Self::Exact(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        let key = QueryKey::from(["analytics", "form-status"]);
        assert_eq!(key.to_string(), "analytics/form-status");
    }

    #[test]
    fn test_key_from_path_str() {
        let key = QueryKey::from("/coach/zones/");
        assert_eq!(key, QueryKey::from(["coach", "zones"]));
    }

    #[test]
    fn test_key_with_segment() {
        let key = QueryKey::from(["analytics", "fitness-timeline"]).with("90");
        assert_eq!(key.segments().len(), 3);
        assert_eq!(key.segments()[2], "90");
    }

    #[test]
    fn test_prefix_is_segment_wise() {
        let goals = QueryKey::from(["goals"]);
        let primary = QueryKey::from(["goals", "primary"]);
        let goalsx = QueryKey::from(["goalsx"]);

        assert!(primary.starts_with(&goals));
        assert!(goals.starts_with(&goals));
        assert!(!goalsx.starts_with(&goals));
        assert!(!goals.starts_with(&primary));
    }

    #[test]
    fn test_pattern_matching() {
        let key = QueryKey::from(["segments", "prs"]);

        assert!(KeyPattern::exact(["segments", "prs"]).matches(&key));
        assert!(!KeyPattern::exact(["segments"]).matches(&key));
        assert!(KeyPattern::prefix(["segments"]).matches(&key));
        assert!(!KeyPattern::prefix(["goals"]).matches(&key));
        assert!(KeyPattern::All.matches(&key));
    }
}
