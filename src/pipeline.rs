//! End-to-end suffixing of a manifest stream.
//!
//! ```text
//! decode -> filter -> eligible jobs -> (config index, job digests) -> rename -> encode
//! ```
//!
//! When no Job opts in the filtered resources are returned as they are and
//! nothing is hashed.

use crate::core::Result;
use crate::hashing::ConfigIndex;
use crate::job::{EligibleJob, eligible_jobs, hashed_jobs};
use crate::resource::{KindRegistry, ObjectKey, Resource, decode_resources, encode_resources};
use std::collections::BTreeMap;

/// A Job that was given a suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedJob {
    /// `<namespace>/<name>` before renaming
    pub key: ObjectKey,
    /// `<name>-<suffix>`
    pub new_name: String,
    /// The 10-character suffix appended to the name
    pub suffix: String,
}

/// Result of one suffixing run.
#[derive(Debug, Clone, PartialEq)]
pub struct SuffixOutcome {
    /// Filtered resources in input order, eligible Jobs renamed
    pub resources: Vec<Resource>,
    /// Renamed Jobs in input order
    pub renamed: Vec<RenamedJob>,
}

/// Filter `resources` and rename every eligible Job.
pub fn suffix_resources(resources: Vec<Resource>, registry: &KindRegistry) -> Result<SuffixOutcome> {
    let mut resources = registry.filter(resources);
    let jobs = eligible_jobs(&resources)?;

    if jobs.is_empty() {
        tracing::debug!("No Job opted in, passing {} resource(s) through", resources.len());
        return Ok(SuffixOutcome {
            resources,
            renamed: Vec::new(),
        });
    }

    let index = ConfigIndex::build(&resources)?;
    tracing::debug!("Indexed {} config object(s) for {} Job(s)", index.len(), jobs.len());

    let suffixes = hashed_jobs(&jobs, &index)?;
    let renamed = rename_jobs(&mut resources, &jobs, &suffixes);

    Ok(SuffixOutcome { resources, renamed })
}

/// Rewrite the name of each eligible Job to `<name>-<suffix>`.
///
/// Jobs are located by their position in `resources`, so it must be the same
/// list the [`EligibleJob`]s were collected from. Jobs sharing a key all get
/// the suffix stored for that key.
pub fn rename_jobs(
    resources: &mut [Resource],
    jobs: &[EligibleJob],
    suffixes: &BTreeMap<ObjectKey, String>,
) -> Vec<RenamedJob> {
    let mut renamed = Vec::with_capacity(jobs.len());

    for job in jobs {
        let (Some(suffix), Some(resource)) = (suffixes.get(&job.key), resources.get_mut(job.position))
        else {
            continue;
        };

        let new_name = format!("{}-{}", job.key.name, suffix);
        tracing::info!("Renaming Job {} to {}", job.key, new_name);
        resource.set_name(new_name.clone());

        renamed.push(RenamedJob {
            key: job.key.clone(),
            new_name,
            suffix: suffix.clone(),
        });
    }

    renamed
}

/// Suffix every opted-in Job in a YAML or JSON manifest stream.
///
/// Returns the filtered stream as YAML documents joined by `---\n`.
///
/// # Examples
///
/// ```rust
/// let input = r#"
/// apiVersion: batch/v1
/// kind: Job
/// metadata:
///   name: foo
///   annotations:
///     kujo.sphc.io: "true"
/// "#;
///
/// let output = kujo::suffix_jobs(input).unwrap();
/// assert!(output.contains("name: foo-b8m4h2g4g8"));
/// ```
pub fn suffix_jobs(input: &str) -> Result<String> {
    let resources = decode_resources(input)?;
    let outcome = suffix_resources(resources, &KindRegistry::default())?;
    encode_resources(&outcome.resources)
}
