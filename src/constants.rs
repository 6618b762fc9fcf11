//! Global constants used throughout the kujo codebase.
//!
//! Well-known strings and sizes that several modules agree on. Keeping them
//! here makes it obvious which values are part of the tool's external
//! contract (the annotation key and suffix shape) and must not drift.

/// Annotation that opts a Job into hash suffixing.
///
/// The value must parse as a boolean; only `true` enables renaming.
pub const ANNOTATION_KEY: &str = "kujo.sphc.io";

/// Namespace assumed for resources that don't declare one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Number of characters in a generated name suffix.
///
/// Each hex character carries 4 bits, so the suffix encodes the first
/// 40 bits of the combined digest.
pub const SUFFIX_LENGTH: usize = 10;

/// Separator written between documents in the output stream.
pub const DOCUMENT_SEPARATOR: &str = "---\n";
