//! Tracing setup: subscriber initialization plus span macros per stage.

pub mod spans;

use confound_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `config.log_level` when set. Returns `false` if a
/// subscriber was already installed, so calling this twice is harmless.
pub fn init(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.is_ok()
}

/// Initialize with a custom filter string (for testing or embedding).
pub fn init_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .with_test_writer()
        .try_init()
        .is_ok()
}
