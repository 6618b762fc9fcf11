//! Core types for kujo
//!
//! This module holds the error taxonomy shared by every stage of the pipeline
//! and the helpers the CLI uses to present failures.
//!
//! ## `error` - Error Handling
//!
//! - [`KujoError`] - Enumerated error types covering all kujo failure modes
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! # Examples
//!
//! ```rust
//! use kujo::core::{KujoError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn example_operation() -> Result<String> {
//!     Err(KujoError::Decode { reason: "unexpected end of stream".to_string() }.into())
//! }
//!
//! if let Err(e) = example_operation() {
//!     let friendly = user_friendly_error(e);
//!     assert!(friendly.suggestion.is_some());
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, KujoError, user_friendly_error};

/// Result type used by the library half of kujo.
pub type Result<T, E = KujoError> = std::result::Result<T, E>;
