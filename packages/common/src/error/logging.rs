//! Structured logging bootstrap
//!
//! Provides env_logger-based logging over the standard `log` facade, plus
//! helpers that keep the wording of conformance log lines uniform across
//! crates.

use log::{debug, error, info, warn};
use std::sync::Once;
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Logging infrastructure using `env_logger`
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at startup)
    ///
    /// Configure logging levels via `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Per-file and per-group details
    /// - `RUST_LOG=info` - Group outcomes
    /// - `RUST_LOG=shavs_conformance=debug,shavs_hashing=warn` - Module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            let _ = env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .try_init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; only the first call installs a logger.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log the start of a conformance group
    pub fn log_group_start(group: &str, vector_count: usize) {
        debug!("Group {group}: starting with {vector_count} vectors");
    }

    /// Log the outcome of a conformance group
    pub fn log_group_outcome(group: &str, checked: usize, failures: usize, elapsed: Duration) {
        if failures == 0 {
            info!("Group {group}: {checked} checks passed in {elapsed:?}");
        } else {
            warn!("Group {group}: {failures} of {checked} checks failed in {elapsed:?}");
        }
    }

    /// Log a single digest mismatch
    pub fn log_mismatch(group: &str, check: &str, index: usize, length_bits: u64) {
        error!("Group {group}: {check} mismatch at vector #{index} (Len = {length_bits})");
    }

    /// Log a group whose setup failed before any verification ran
    pub fn log_setup_failure(group: &str, error: &dyn std::error::Error) {
        error!("Group {group}: setup failed: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_operations() {
        LoggingTransformer::init_test();

        // These should not panic regardless of the active log level
        LoggingTransformer::log_group_start("sha256_short_msg", 65);
        LoggingTransformer::log_group_outcome("sha256_short_msg", 130, 0, Duration::from_millis(3));
        LoggingTransformer::log_group_outcome("sha256_long_msg", 32, 1, Duration::from_millis(9));
        LoggingTransformer::log_mismatch("sha256_long_msg", "one-shot", 4, 4_000);
    }

    #[test]
    fn test_init_is_idempotent() {
        LoggingTransformer::init_test();
        LoggingTransformer::init();
        LoggingTransformer::init();
    }
}
