//! Structured logging setup.
//!
//! The embedding boundary calls [`init`] once at startup; tests that
//! want log output call [`init_test`].
//!
//! # Configuration
//!
//! - `RUST_LOG` - filter directive (default: "info,jansahayak=debug")
//! - `LOG_FORMAT` - "json" for machine-readable output, anything else
//!   for human-readable terminal output

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,jansahayak=debug";

/// Initialize the global tracing subscriber.
///
/// Panics if a subscriber is already installed; call once from the
/// process entry point.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Initialize tracing for tests, capturing output per test.
///
/// Safe to call from every test; only the first call installs the
/// subscriber.
pub fn init_test() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
