// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Log output for binaries embedding the engine.
//!
//! The library only emits `tracing` events. Hosts that have their own
//! subscriber should not call `init`.

use std::env;

use tracing::metadata::LevelFilter;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Layer, filter, fmt};

use crate::Config;

/// Install a global subscriber printing this crate's events to stderr,
/// filtered by the `LOG_LEVEL` environment variable (default `INFO`).
pub fn init(config: &Config) -> Result<(), SetGlobalDefaultError> {
    if !config.logs {
        return Ok(());
    }

    let level = env::var("LOG_LEVEL")
        .ok()
        .and_then(|s| s.as_str().parse().ok())
        .unwrap_or(LevelFilter::INFO);

    let subscriber = tracing_subscriber::Registry::default().with(
        fmt::Layer::new()
            .with_ansi(config.log_ansi)
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_filter(level)
            .with_filter(filter::filter_fn(|metadata| metadata.target().starts_with("duet"))),
    );

    return tracing::subscriber::set_global_default(subscriber);
}
