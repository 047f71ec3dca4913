//! # Logging Setup
//!
//! The library logs through the `log` facade and emits structured `tracing`
//! events from the store comparator. This module wires both to an output for
//! the binary:
//!
//! - [`LogFormat::Text`]: `env_logger`, honouring `RUST_LOG`. Tracing events
//!   arrive as log records.
//! - [`LogFormat::Json`]: a `tracing-subscriber` JSON formatter filtered by
//!   `RUST_LOG`. `log` records are bridged into it.
//!
//! Logs go to stderr so stdout carries only the shopping list.

use crate::config::{LogFormat, LoggingConfig};
use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global logger described by `config`
///
/// Returns `false` when a logger was already installed; the existing one is
/// kept.
pub fn init_logging(config: &LoggingConfig) -> bool {
    match config.format {
        LogFormat::Text => env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(config.level.as_str()),
        )
        .try_init()
        .is_ok(),
        LogFormat::Json => {
            let filter = EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.level))
                .unwrap_or_else(|_| EnvFilter::new("info"));

            let json_layer = fmt::layer()
                .with_target(true)
                .with_writer(io::stderr)
                .json();

            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .try_init()
                .is_ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        let config = LoggingConfig::default();
        let _ = init_logging(&config);
        assert!(!init_logging(&config));
    }
}
