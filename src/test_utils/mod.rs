//! Test utilities for kujo
//!
//! Helpers shared by the unit tests and the `integration` test target:
//! sample manifest streams and opt-in logging.
//!
//! # Example
//!
//! ```rust,ignore
//! use kujo::test_utils::ManifestFixture;
//!
//! let output = kujo::suffix_jobs(&ManifestFixture::full_config().content).unwrap();
//! assert!(output.contains("name: pi-"));
//! ```

pub mod fixtures;

pub use fixtures::ManifestFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Respects `RUST_LOG` if set, or uses the provided level. Does nothing when
/// neither is given, so test output stays quiet by default.
///
/// ```bash
/// RUST_LOG=kujo=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// Whether `suffix` has the shape of a generated name suffix.
pub fn is_valid_suffix(suffix: &str) -> bool {
    suffix.len() == crate::constants::SUFFIX_LENGTH
        && suffix
            .chars()
            .all(|c| (c.is_ascii_digit() || c.is_ascii_lowercase()) && !"013ae".contains(c))
}
