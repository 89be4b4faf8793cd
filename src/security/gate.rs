//! Admission pipeline.
//!
//! # State Machine
//! ```text
//! START → CLASSIFY ──blocked──▶ REJECT 403
//!            │
//!            ▼
//!        RATE_CHECK (limited prefixes only) ──over budget──▶ REJECT 429
//!            │
//!            ▼
//!        PATH_CHECK ──blocked──▶ REJECT 404
//!            │
//!            ▼
//!         FORWARD
//! ```
//!
//! Every branch is total: the gate never errors, it either forwards or
//! returns one of three rejections.

use arc_swap::ArcSwap;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::config::{EdgeConfig, UnattributedPolicy};
use crate::routing::{AnyMatcher, BypassList, Matcher};
use crate::security::client_addr::ClientAddress;
use crate::security::clock::Clock;
use crate::security::path_filter::SensitivePathSet;
use crate::security::rate_limit::RequestCounter;
use crate::security::signature::ClientSignatureSet;

/// The request attributes the gate looks at.
#[derive(Debug, Clone)]
pub struct RequestFacts<'a> {
    /// Declared client identity (`User-Agent`); empty when absent.
    pub user_agent: &'a str,
    pub client: ClientAddress,
    pub path: &'a str,
}

/// Terminal rejection states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Automated client signature (403).
    Forbidden,
    /// Over the rate budget (429).
    TooManyRequests,
    /// Sensitive path (404).
    NotFound,
}

impl Rejection {
    pub fn outcome(&self) -> &'static str {
        match self {
            Rejection::Forbidden => "forbidden",
            Rejection::TooManyRequests => "throttled",
            Rejection::NotFound => "not_found",
        }
    }
}

/// Gate decision for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Forward,
    Reject(Rejection),
}

/// Immutable policy data, swapped as a whole on config reload.
#[derive(Debug)]
pub struct GatePolicy {
    pub signatures: ClientSignatureSet,
    pub sensitive_paths: SensitivePathSet,
    pub bypass: BypassList,
    pub rate_limit_enabled: bool,
    pub rate_limited: AnyMatcher,
    pub rate_limited_prefixes: Vec<String>,
    pub rate_limit_message: String,
    pub unattributed: UnattributedPolicy,
}

impl GatePolicy {
    pub fn from_config(config: &EdgeConfig) -> Self {
        let prefixes = config.rate_limit.limited_prefixes.clone();
        Self {
            signatures: ClientSignatureSet::new(&config.classifier.blocked_agents),
            sensitive_paths: SensitivePathSet::new(config.path_filter.sensitive_paths.iter().cloned()),
            bypass: BypassList::from_config(&config.bypass),
            rate_limit_enabled: config.rate_limit.enabled,
            rate_limited: AnyMatcher::prefixes(prefixes.iter().cloned()),
            rate_limited_prefixes: prefixes,
            rate_limit_message: config.rate_limit.message.clone(),
            unattributed: config.rate_limit.unattributed,
        }
    }
}

/// Decision counters since startup.
#[derive(Debug, Default)]
pub struct GateStats {
    forwarded: AtomicU64,
    bypassed: AtomicU64,
    forbidden: AtomicU64,
    throttled: AtomicU64,
    not_found: AtomicU64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GateStatsSnapshot {
    pub forwarded: u64,
    pub bypassed: u64,
    pub forbidden: u64,
    pub throttled: u64,
    pub not_found: u64,
}

impl GateStats {
    fn record(&self, verdict: Verdict) {
        let counter = match verdict {
            Verdict::Forward => &self.forwarded,
            Verdict::Reject(Rejection::Forbidden) => &self.forbidden,
            Verdict::Reject(Rejection::TooManyRequests) => &self.throttled,
            Verdict::Reject(Rejection::NotFound) => &self.not_found,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_bypass(&self) {
        self.bypassed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> GateStatsSnapshot {
        GateStatsSnapshot {
            forwarded: self.forwarded.load(Ordering::Relaxed),
            bypassed: self.bypassed.load(Ordering::Relaxed),
            forbidden: self.forbidden.load(Ordering::Relaxed),
            throttled: self.throttled.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
        }
    }
}

/// The inbound request gate.
pub struct Gate {
    policy: ArcSwap<GatePolicy>,
    counter: Arc<dyn RequestCounter>,
    clock: Arc<dyn Clock>,
    stats: GateStats,
}

impl Gate {
    pub fn new(policy: GatePolicy, counter: Arc<dyn RequestCounter>, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy: ArcSwap::from_pointee(policy),
            counter,
            clock,
            stats: GateStats::default(),
        }
    }

    /// Current policy snapshot.
    pub fn policy(&self) -> Arc<GatePolicy> {
        self.policy.load_full()
    }

    /// Replace the policy. The rate table is left untouched.
    pub fn replace_policy(&self, policy: GatePolicy) {
        self.policy.store(Arc::new(policy));
    }

    pub fn stats(&self) -> &GateStats {
        &self.stats
    }

    /// True if the path is a static asset that skips evaluation.
    pub fn bypasses(&self, path: &str) -> bool {
        self.policy.load().bypass.is_bypassed(path)
    }

    pub fn evaluate(&self, facts: &RequestFacts<'_>) -> Verdict {
        self.evaluate_at(facts, self.clock.now())
    }

    /// Evaluate at an explicit instant.
    pub fn evaluate_at(&self, facts: &RequestFacts<'_>, now: Instant) -> Verdict {
        let verdict = self.decide(facts, now);
        self.stats.record(verdict);
        verdict
    }

    fn decide(&self, facts: &RequestFacts<'_>, now: Instant) -> Verdict {
        let policy = self.policy.load();

        if policy.signatures.is_blocked(facts.user_agent) {
            return Verdict::Reject(Rejection::Forbidden);
        }

        if policy.rate_limit_enabled && policy.rate_limited.matches(facts.path) {
            if !facts.client.is_attributed() && policy.unattributed == UnattributedPolicy::Reject {
                return Verdict::Reject(Rejection::Forbidden);
            }
            if !self.counter.admit(facts.client.as_str(), now) {
                return Verdict::Reject(Rejection::TooManyRequests);
            }
        }

        if policy.sensitive_paths.is_blocked(facts.path) {
            return Verdict::Reject(Rejection::NotFound);
        }

        Verdict::Forward
    }
}
