// File: src/logging.rs
use tracing_subscriber::EnvFilter;

/// Installs a stderr `tracing` subscriber. `RUST_LOG` wins over `default_level`.
///
/// Calling it twice is harmless; the second call keeps the first subscriber.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();

    if result.is_ok() {
        tracing::debug!(default_level, "logging initialized");
    }
}
