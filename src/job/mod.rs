//! Job selection, dependency resolution and suffix computation.
//!
//! - [`extractor`] - Which Jobs opted in via the annotation
//! - [`model`] - Typed subset of the Job schema holding config references
//! - [`resolver`] - Ordered hashes of the ConfigMaps/Secrets a Job uses
//! - [`digest`] - Combining spec and dependency hashes into a suffix

pub mod digest;
pub mod extractor;
pub mod model;
pub mod resolver;

pub use digest::{hashed_jobs, job_suffix};
pub use extractor::{EligibleJob, eligible_jobs, opts_in, parse_annotation, parse_bool};
pub use resolver::dependency_hashes;
