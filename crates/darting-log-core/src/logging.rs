//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Calling this again after a
/// subscriber is installed does nothing.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok() {
        tracing::info!("{} v{} logging initialized", crate::config::APP_NAME, crate::config::APP_VERSION);
    }
}
