//! Logging utilities
//!
//! The library only emits through the `log` facade; hosts that have no
//! logger of their own can install this one.

use env_logger::Env;

/// Setup logging, honouring `RUST_LOG` (default `info`)
///
/// Safe to call more than once; only the first call installs a logger.
pub fn setup_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info")).try_init();
}

/// Logger for tests, captured by the test harness
#[cfg(test)]
pub fn setup_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
