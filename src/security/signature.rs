//! Client signature classifier.
//!
//! Blocks requests whose `User-Agent` contains a known automation
//! fingerprint. This is a denylist: an empty or missing identity is never
//! blocked.

/// Immutable set of case-insensitive identity fragments.
#[derive(Debug, Clone, Default)]
pub struct ClientSignatureSet {
    /// Lowercased patterns, in configuration order.
    patterns: Vec<String>,
}

impl ClientSignatureSet {
    /// Build the set. Empty patterns are dropped.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Returns true if the identity contains any pattern, ignoring case.
    pub fn is_blocked(&self, identity: &str) -> bool {
        if identity.is_empty() {
            return false;
        }
        let identity = identity.to_lowercase();
        self.patterns.iter().any(|p| identity.contains(p.as_str()))
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
