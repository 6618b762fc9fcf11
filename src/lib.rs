//! kujo - content-hash suffixes for Kubernetes Jobs
//!
//! A Job's pod template is immutable once created, so changing a Job or the
//! configuration it consumes usually means deleting it first. kujo avoids
//! that by giving every opted-in Job a name derived from its content: when the
//! Job's spec, or any ConfigMap or Secret it references, changes, the Job gets
//! a new name and is created fresh on the next apply.
//!
//! # Opting in
//!
//! ```yaml
//! apiVersion: batch/v1
//! kind: Job
//! metadata:
//!   name: pi
//!   annotations:
//!     kujo.sphc.io: "true"
//! ```
//!
//! The Job above comes out as `pi-<suffix>`, a 10-character token that never
//! contains `0`, `1`, `3`, `a` or `e`.
//!
//! # Modules
//!
//! - [`resource`] - Generic manifest documents, kind filtering and the YAML/JSON codec
//! - [`hashing`] - SHA-256 helpers, the [`ConfigIndex`](hashing::ConfigIndex) and suffix encoding
//! - [`job`] - Opt-in detection, reference resolution and per-Job digests
//! - [`pipeline`] - The end-to-end run
//! - [`cli`] - Command-line parsing and logging setup
//! - [`core`] - Error types and user-facing error formatting
//!
//! # Example
//!
//! ```rust
//! let input = r#"
//! apiVersion: v1
//! kind: ConfigMap
//! metadata:
//!   name: cfg
//! data:
//!   key: value
//! "#;
//!
//! // Nothing opted in, so the stream passes through
//! let output = kujo::suffix_jobs(input).unwrap();
//! assert!(output.contains("name: cfg"));
//! ```

pub mod cli;
pub mod constants;
pub mod core;
pub mod hashing;
pub mod job;
pub mod pipeline;
pub mod resource;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use pipeline::{SuffixOutcome, suffix_jobs, suffix_resources};
