//! Error handling for kujo
//!
//! This module provides the error taxonomy for the hashing pipeline and the
//! user-friendly reporting used by the CLI. The error system follows two rules:
//! 1. **Strongly-typed errors** so callers can tell fatal failures apart
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`KujoError`] - Enumerated error types for every failure in a run
//! - [`ErrorContext`] - Wrapper that adds details and suggestions for display
//!
//! # Fatal vs. recovered errors
//!
//! Only [`KujoError::Decode`], [`KujoError::Serialization`],
//! [`KujoError::Encoding`] and [`KujoError::Io`] reach the process boundary.
//! [`KujoError::AnnotationParse`] is produced by the annotation parser and
//! absorbed by the job extractor, which logs it and leaves the Job untouched.
//! A Job referencing a ConfigMap or Secret that isn't part of the input is not
//! an error at all.
//!
//! # Examples
//!
//! ```rust,no_run
//! use kujo::core::{KujoError, user_friendly_error};
//!
//! let error = KujoError::Decode {
//!     reason: "did not find expected key".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for kujo operations.
#[derive(Error, Debug)]
pub enum KujoError {
    /// The input stream contains malformed YAML or JSON.
    ///
    /// Raised for the first document that fails to decode. The run is aborted
    /// and no partial output is produced.
    #[error("Failed to decode input manifests: {reason}")]
    Decode {
        /// Decoder message, including position where available
        reason: String,
    },

    /// A resource could not be serialized for hashing or output.
    #[error("Failed to serialize {what}: {reason}")]
    Serialization {
        /// What was being serialized (e.g. "Job default/migrate spec")
        what: String,
        /// Underlying serializer message
        reason: String,
    },

    /// A digest was too short to derive a name suffix from.
    #[error("The hex string must contain at least {required} characters, got {actual}")]
    Encoding {
        /// Minimum number of hex characters needed
        required: usize,
        /// Number of hex characters supplied
        actual: usize,
    },

    /// The opt-in annotation is present but isn't a boolean.
    #[error("Invalid value {value:?} for annotation '{key}': expected a boolean")]
    AnnotationParse {
        /// Annotation key
        key: String,
        /// Offending value, rendered as it appeared in the manifest
        value: String,
    },

    /// IO error while reading input or writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl KujoError {
    /// Whether this error aborts a run.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::AnnotationParse { .. })
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` carries a display message plus optional details and a
/// suggestion for resolving the problem. It is what the CLI prints when a run
/// fails.
///
/// # Display Format
///
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use kujo::core::ErrorContext;
///
/// let context = ErrorContext::new("Failed to read input")
///     .with_suggestion("Check that the file exists and is readable")
///     .with_details("kujo reads manifests from stdin unless --file is given");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`KujoError`] and [`std::io::Error`] anywhere in the error chain
/// and tailors the suggestion; anything else is shown with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let message = format_chain(&error);

    if let Some(kujo_error) = error.chain().find_map(|e| e.downcast_ref::<KujoError>()) {
        return create_error_context(kujo_error, message);
    }

    if let Some(io_error) = error.chain().find_map(|e| e.downcast_ref::<std::io::Error>()) {
        return io_error_context(io_error, message);
    }

    ErrorContext::new(message)
}

fn format_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();

    // Skip the root message which is already in to_string()
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

fn create_error_context(error: &KujoError, message: String) -> ErrorContext {
    match error {
        KujoError::Decode { .. } => ErrorContext::new(message)
            .with_suggestion(
                "Check the input for YAML/JSON syntax errors. Separate YAML documents with '---'",
            )
            .with_details("kujo stops at the first document it cannot decode and writes no output"),
        KujoError::Serialization { .. } => ErrorContext::new(message).with_details(
            "A decoded resource could not be re-serialized. This usually points at values YAML \
             allows but JSON does not, such as non-string map keys",
        ),
        KujoError::Encoding { .. } => ErrorContext::new(message)
            .with_details("Name suffixes are derived from the first 10 hex characters of a SHA-256 digest"),
        KujoError::AnnotationParse { key, .. } => ErrorContext::new(message)
            .with_suggestion(format!("Set '{key}' to \"true\" or \"false\"")),
        KujoError::Io(io_error) => io_error_context(io_error, message),
    }
}

fn io_error_context(error: &std::io::Error, message: String) -> ErrorContext {
    match error.kind() {
        std::io::ErrorKind::NotFound => ErrorContext::new(message)
            .with_suggestion("Check that the input file exists and the path is correct"),
        std::io::ErrorKind::PermissionDenied => ErrorContext::new(message)
            .with_suggestion("Check the permissions of the input file"),
        std::io::ErrorKind::InvalidData => ErrorContext::new(message)
            .with_suggestion("kujo expects UTF-8 encoded YAML or JSON input"),
        _ => ErrorContext::new(message),
    }
}
