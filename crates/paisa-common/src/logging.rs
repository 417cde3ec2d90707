use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install the global fmt subscriber, filtered by `RUST_LOG` (defaults to `info`)
///
/// Safe to call more than once, only the first call installs a subscriber
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init();

    if result.is_ok() {
        tracing::debug!("logging initialized");
    }
}
