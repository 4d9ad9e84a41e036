//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Echo verification output to stdout alongside the structured log
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging, written to stderr
//! - JSON format for CI, pretty format for interactive use
//! - Log level configurable via config and `RUST_LOG`

use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Install the global subscriber. `RUST_LOG` overrides `config.log_level`.
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Print a raw query response for the operator and record it in the log.
pub fn query_response(kind: &str, raw: &Value) {
    println!("{}: {}", kind, raw);
    tracing::info!(query = kind, response = %raw, "Query response");
}
