//! Log output for tests.

use tracing_subscriber::{fmt, EnvFilter};

/// Routes `tracing` output through the test harness.
///
/// Honors `RUST_LOG` and defaults to `debug`. Safe to call from every test;
/// only the first call installs a subscriber.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
}
