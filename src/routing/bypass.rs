//! Static asset bypass list.
//!
//! Build output, images and fixed icon files never enter the gate; they are
//! forwarded straight to the upstream.

use crate::config::BypassConfig;
use crate::routing::matcher::{AnyMatcher, ExtensionMatcher, Matcher, PathPrefixMatcher};

/// Paths that skip gate evaluation.
#[derive(Debug, Default)]
pub struct BypassList {
    matcher: AnyMatcher,
}

impl BypassList {
    pub fn from_config(config: &BypassConfig) -> Self {
        let mut matcher = AnyMatcher::default();
        for prefix in &config.prefixes {
            matcher.push(Box::new(PathPrefixMatcher::new(prefix.clone())));
        }
        for extension in &config.extensions {
            matcher.push(Box::new(ExtensionMatcher::new(extension)));
        }
        Self { matcher }
    }

    pub fn is_bypassed(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }
}
