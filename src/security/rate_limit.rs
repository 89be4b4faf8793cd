//! Fixed-window rate limiting per client address.
//!
//! Each address gets a counter that resets when its window has elapsed.
//! Rejected requests still count, so a client retrying while throttled does
//! not earn a fresh budget. Boundary bursts of up to twice the budget are
//! possible across a window edge.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;

/// Admission decision for a single request from a client address.
///
/// Implementations must make the read-check-increment for one address
/// atomic with respect to concurrent callers.
pub trait RequestCounter: Send + Sync {
    fn admit(&self, address: &str, now: Instant) -> bool;
}

/// Counter state for one client address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateWindowEntry {
    pub count: u32,
    pub window_start: Instant,
}

impl RateWindowEntry {
    fn fresh(now: Instant) -> Self {
        Self {
            count: 1,
            window_start: now,
        }
    }
}

/// Summary of the rate table for the admin API.
#[derive(Debug, Clone, Serialize)]
pub struct RateTableSummary {
    pub tracked_clients: usize,
    pub window_ms: u64,
    pub max_requests: u32,
}

/// In-memory fixed-window counter keyed by client address.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    table: DashMap<String, RateWindowEntry>,
    window: Duration,
    budget: u32,
}

impl FixedWindowLimiter {
    pub fn new(window: Duration, budget: u32) -> Self {
        Self {
            table: DashMap::new(),
            window,
            budget,
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(Duration::from_millis(config.window_ms), config.max_requests)
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Number of addresses currently tracked.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Current entry for an address, if any.
    pub fn entry(&self, address: &str) -> Option<RateWindowEntry> {
        self.table.get(address).map(|e| *e.value())
    }

    /// Remove entries idle for more than two windows. Returns how many were removed.
    pub fn sweep(&self, now: Instant) -> usize {
        let idle_limit = self.window * 2;
        let mut removed = 0;
        self.table.retain(|_, entry| {
            let keep = now.saturating_duration_since(entry.window_start) <= idle_limit;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    pub fn summary(&self) -> RateTableSummary {
        RateTableSummary {
            tracked_clients: self.len(),
            window_ms: self.window.as_millis() as u64,
            max_requests: self.budget,
        }
    }
}

impl RequestCounter for FixedWindowLimiter {
    fn admit(&self, address: &str, now: Instant) -> bool {
        // The entry guard holds the shard write lock for the whole update.
        match self.table.entry(address.to_string()) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if now.saturating_duration_since(entry.window_start) > self.window {
                    *entry = RateWindowEntry::fresh(now);
                    true
                } else {
                    entry.count = entry.count.saturating_add(1);
                    entry.count <= self.budget
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(RateWindowEntry::fresh(now));
                true
            }
        }
    }
}
