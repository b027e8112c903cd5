//! Logging setup

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `simplenotes=debug`)
pub const LOG_ENV: &str = "SIMPLENOTES_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber, writing to stderr so command output stays clean
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
