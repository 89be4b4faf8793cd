//! Sensitive path filter.
//!
//! Unanchored, case-sensitive substring match: probes for `.env` or `.git`
//! can appear at any depth.

/// Immutable set of sensitive path fragments.
#[derive(Debug, Clone, Default)]
pub struct SensitivePathSet {
    patterns: Vec<String>,
}

impl SensitivePathSet {
    /// Build the set. Empty patterns are dropped.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    /// Returns true if the path contains any sensitive fragment.
    pub fn is_blocked(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| path.contains(p.as_str()))
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathFilterConfig;

    fn default_set() -> SensitivePathSet {
        SensitivePathSet::new(PathFilterConfig::default().sensitive_paths)
    }

    #[test]
    fn test_blocks_at_any_depth() {
        let set = default_set();
        assert!(set.is_blocked("/.env"));
        assert!(set.is_blocked("/app/config/.env.production"));
        assert!(set.is_blocked("/.git/HEAD"));
        assert!(set.is_blocked("/blog/wp-admin/install.php"));
        assert!(set.is_blocked("/wp-login"));
        assert!(set.is_blocked("/index.php"));
    }

    #[test]
    fn test_allows_ordinary_pages() {
        let set = default_set();
        assert!(!set.is_blocked("/"));
        assert!(!set.is_blocked("/magazine/42"));
        assert!(!set.is_blocked("/lawyer/7/blog/first-post"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let set = default_set();
        assert!(!set.is_blocked("/.ENV"));
        assert!(!set.is_blocked("/WP-ADMIN"));
    }
}
