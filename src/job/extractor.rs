//! Selecting the Jobs that opted in to suffixing.
//!
//! A Job is eligible when its [`ANNOTATION_KEY`] annotation is present and
//! parses as boolean `true`. A missing annotation silently excludes the Job.
//! A value that isn't a boolean also excludes it, but is reported with a
//! warning since it is almost certainly a typo in the manifest.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::model::{JobSpec, PodSpec};
use crate::constants::ANNOTATION_KEY;
use crate::core::{KujoError, Result};
use crate::resource::{ObjectKey, Resource, ResourceKind};

/// A Job that will be renamed.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibleJob {
    /// Position of the Job in the filtered resource list
    pub position: usize,
    /// `<namespace>/<name>` of the Job before renaming
    pub key: ObjectKey,
    /// The Job's `spec` exactly as decoded, used for the spec hash
    pub spec: Value,
    /// Typed view of the references in `spec`
    pub job_spec: JobSpec,
}

impl EligibleJob {
    /// The pod spec of the Job's template, if any.
    #[must_use]
    pub fn pod_spec(&self) -> Option<&PodSpec> {
        self.job_spec.pod_spec()
    }
}

/// Parse a boolean the way Kubernetes tooling does.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false
/// counterparts `0`, `f`, `F`, `FALSE`, `false`, `False`.
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Interpret an opt-in annotation value.
///
/// Annotation values are strings in Kubernetes; anything else, or a string
/// that isn't a boolean, is a [`KujoError::AnnotationParse`].
pub fn parse_annotation(value: &Value) -> Result<bool> {
    value.as_str().and_then(parse_bool).ok_or_else(|| KujoError::AnnotationParse {
        key: ANNOTATION_KEY.to_string(),
        value: match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    })
}

/// Whether `resource` is a Job carrying a `true` opt-in annotation.
///
/// Invalid annotation values are logged and treated as `false`.
#[must_use]
pub fn opts_in(resource: &Resource) -> bool {
    if resource.resource_kind() != Some(ResourceKind::Job) {
        return false;
    }

    let Some(value) = resource.annotation(ANNOTATION_KEY) else {
        return false;
    };

    match parse_annotation(value) {
        Ok(enabled) => enabled,
        Err(e) => {
            tracing::warn!("Skipping Job {}: {}", resource.object_key(), e);
            false
        }
    }
}

/// Collect the eligible Jobs from an already filtered resource list, in order.
///
/// Fails with [`KujoError::Decode`] when an eligible Job's pod template has
/// the wrong shape (e.g. `volumes` isn't a list).
pub fn eligible_jobs(resources: &[Resource]) -> Result<Vec<EligibleJob>> {
    let mut jobs = Vec::new();

    for (position, resource) in resources.iter().enumerate() {
        if !opts_in(resource) {
            continue;
        }

        let key = resource.object_key();
        // An absent or null spec is an empty spec.
        let spec = resource
            .field("spec")
            .filter(|spec| !spec.is_null())
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));
        let job_spec = JobSpec::deserialize(&spec).map_err(|e| KujoError::Decode {
            reason: format!("Job {key} has an invalid spec: {e}"),
        })?;

        tracing::debug!("Job {key} opted in to suffixing");
        jobs.push(EligibleJob {
            position,
            key,
            spec,
            job_spec,
        });
    }

    Ok(jobs)
}
