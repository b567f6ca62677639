//! Tracing setup for hosts that embed the engine.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! host's call. `init_tracing` wires a stdout subscriber filtered by the
//! engine's configured level, and tolerates a subscriber already being in
//! place.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::EngineConfig;

/// Builds the directive filter from [`EngineConfig::log_level`], falling back
/// to `info` when the directive string does not parse.
pub fn env_filter(config: &EngineConfig) -> EnvFilter {
    EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a stdout subscriber for the whole process. Returns `false` when a
/// global subscriber is already installed, leaving the existing one in place.
pub fn init_tracing(config: &EngineConfig) -> bool {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}
