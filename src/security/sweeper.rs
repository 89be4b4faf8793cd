//! Periodic reclamation of idle rate table entries.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time;

use crate::observability::metrics;
use crate::security::clock::Clock;
use crate::security::rate_limit::FixedWindowLimiter;

/// Background task that sweeps the rate table once per window.
pub struct RateTableSweeper {
    limiter: Arc<FixedWindowLimiter>,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl RateTableSweeper {
    /// The sweep interval equals the limiter's window.
    pub fn new(limiter: Arc<FixedWindowLimiter>, clock: Arc<dyn Clock>) -> Self {
        let interval = limiter.window();
        Self {
            limiter,
            clock,
            interval,
        }
    }

    /// Run one sweep. Returns the number of entries removed.
    pub fn sweep_once(&self) -> usize {
        let removed = self.limiter.sweep(self.clock.now());
        let remaining = self.limiter.len();

        metrics::record_swept(removed);
        metrics::record_rate_table_size(remaining);
        tracing::debug!(removed, remaining, "Rate table swept");
        removed
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(interval_ms = self.interval.as_millis() as u64, "Rate table sweeper starting");

        let mut ticker = time::interval_at(time::Instant::now() + self.interval, self.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sweep_once();
                }
                _ = shutdown.recv() => {
                    tracing::info!("Rate table sweeper received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
