//! Structured logging.
//!
//! `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Install the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("edge_gate={level},tower_http={level}", level = config.log_level).into()
    });

    let compact = config.log_format == LogFormat::Compact;

    tracing_subscriber::registry()
        .with(filter)
        .with(compact.then(|| fmt::layer().compact()))
        .with((!compact).then(|| fmt::layer()))
        .init();
}
