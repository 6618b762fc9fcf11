//! Integration test suite for kujo
//!
//! Runs the `kujo` binary end to end: manifests in on stdin or `--file`,
//! suffixed manifests out on stdout, diagnostics on stderr.
//!
//! ```bash
//! cargo test --test integration
//! ```

mod errors;
mod suffixing;
