//! Diagnostic logging setup.
//!
//! User-facing progress goes through the progress reporter; this only wires
//! `tracing` output for troubleshooting (`RUST_LOG=osv_scan=debug`).

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "osv_scan=warn";

/// Installs a stderr subscriber filtered by `RUST_LOG`.
///
/// Calling it more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
