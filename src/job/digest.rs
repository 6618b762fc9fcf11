//! Per-Job suffix computation.
//!
//! The suffix of a Job is
//! `encode(sha256(spec_hash ++ dep_hash_1 ++ ... ++ dep_hash_n))`, where
//! `spec_hash` is the SHA-256 of the Job's canonical `spec` and the
//! dependency hashes come from [`dependency_hashes`] in resolver order.

use std::collections::BTreeMap;

use super::extractor::EligibleJob;
use super::resolver::dependency_hashes;
use crate::core::Result;
use crate::hashing::{ConfigIndex, encode_hash_slice, hash_value};
use crate::resource::ObjectKey;

/// Compute the name suffix for one Job.
///
/// The spec hash covers `spec` as written in the manifest, with an absent
/// spec hashing as `{}`. Tools that hash a fully typed Job spec (defaulted
/// fields such as `template.metadata.creationTimestamp: null` included)
/// produce different suffixes for the same manifest: an empty spec gives
/// `b8m4h2g4g8` here, not `k86kg7tt2c`.
pub fn job_suffix(job: &EligibleJob, index: &ConfigIndex) -> Result<String> {
    let spec_hash = hash_value(&job.spec, || format!("Job {} spec", job.key))?;
    let dependencies = dependency_hashes(job, index);

    let mut hashes = Vec::with_capacity(dependencies.len() + 1);
    hashes.push(spec_hash.as_str());
    hashes.extend(dependencies);

    let suffix = encode_hash_slice(&hashes)?;
    tracing::debug!(
        "Job {} depends on {} config object(s), suffix {}",
        job.key,
        hashes.len() - 1,
        suffix
    );
    Ok(suffix)
}

/// Suffixes for every Job, keyed by `<namespace>/<name>`.
///
/// If two Jobs share a key, the last Job's suffix replaces the earlier one
/// and is applied to all of them.
pub fn hashed_jobs(jobs: &[EligibleJob], index: &ConfigIndex) -> Result<BTreeMap<ObjectKey, String>> {
    let mut suffixes = BTreeMap::new();

    for job in jobs {
        let suffix = job_suffix(job, index)?;
        if suffixes.insert(job.key.clone(), suffix).is_some() {
            tracing::warn!("Job {} is defined more than once; the last definition's suffix is used", job.key);
        }
    }

    Ok(suffixes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::ConfigKey;
    use crate::job::eligible_jobs;
    use crate::resource::Resource;
    use serde_json::{Value, json};

    const CM_HASH: &str = "6b01af86bab978c892006d41097f29c7b040d459e6613fad29293c1d2c624046";
    const SECRET_HASH: &str = "8ebf17fe046d11996943eee66edbe0a487cb0a7b75f34d3d469ab58649530fbd";

    fn index() -> ConfigIndex {
        let mut index = ConfigIndex::new();
        index.insert(ConfigKey::config_map("default", "perl-job-config"), CM_HASH);
        index.insert(ConfigKey::secret("default", "mysecret"), SECRET_HASH);
        index
    }

    fn job(name: &str, spec: Option<Value>) -> EligibleJob {
        let mut value = json!({
            "apiVersion": "batch/v1",
            "kind": "Job",
            "metadata": {"name": name, "annotations": {"kujo.sphc.io": "true"}}
        });
        if let Some(spec) = spec {
            value["spec"] = spec;
        }
        eligible_jobs(&[Resource::from_value(value).unwrap()]).unwrap().remove(0)
    }

    fn volume_spec(volumes: Value) -> Value {
        json!({"template": {"spec": {"volumes": volumes}}})
    }

    fn env_spec(env: Value) -> Value {
        json!({"template": {"spec": {"containers": [{"env": env}]}}})
    }

    #[test]
    fn test_empty_spec() {
        // sha256("{}") = 44136fa3..., hashed again and encoded
        assert_eq!(job_suffix(&job("foo", None), &ConfigIndex::new()).unwrap(), "b8m4h2g4g8");
        assert_eq!(job_suffix(&job("foo", Some(json!({}))), &index()).unwrap(), "b8m4h2g4g8");
    }

    #[test]
    fn test_spec_only_job_ignores_unreferenced_config() {
        let spec = json!({"template": {"spec": {"containers": [{"name": "pi", "image": "perl"}]}}});
        let with_config = job_suffix(&job("foo", Some(spec.clone())), &index()).unwrap();
        let without_config = job_suffix(&job("foo", Some(spec)), &ConfigIndex::new()).unwrap();
        assert_eq!(with_config, without_config);
    }

    #[test]
    fn test_missing_reference_equals_spec_only_hash() {
        let spec = volume_spec(json!([{"name": "config", "configMap": {"name": "perl-job-config"}}]));
        let spec_hash = hash_value(&spec, String::new).unwrap();

        let suffix = job_suffix(&job("foo", Some(spec)), &ConfigIndex::new()).unwrap();
        assert_eq!(suffix, encode_hash_slice(&[spec_hash]).unwrap());
    }

    #[test]
    fn test_known_suffixes() {
        let spec = volume_spec(json!([{"name": "config", "configMap": {"name": "perl-job-config"}}]));
        assert_eq!(job_suffix(&job("foo", Some(spec.clone())), &ConfigIndex::new()).unwrap(), "8hd244t7dd");
        assert_eq!(job_suffix(&job("foo", Some(spec)), &index()).unwrap(), "m47d9ctd64");
    }

    #[test]
    fn test_present_dependency_changes_suffix() {
        let spec = volume_spec(json!([{"name": "config", "configMap": {"name": "perl-job-config"}}]));
        let missing = job_suffix(&job("foo", Some(spec.clone())), &ConfigIndex::new()).unwrap();
        let present = job_suffix(&job("foo", Some(spec)), &index()).unwrap();
        assert_ne!(missing, present);
    }

    #[test]
    fn test_dependency_content_changes_suffix() {
        let spec = env_spec(json!([
            {"name": "PASSWORD", "valueFrom": {"secretKeyRef": {"name": "mysecret", "key": "password"}}}
        ]));
        let job = job("foo", Some(spec));

        let mut rotated = ConfigIndex::new();
        rotated.insert(ConfigKey::secret("default", "mysecret"), "0".repeat(64));

        assert_ne!(job_suffix(&job, &index()).unwrap(), job_suffix(&job, &rotated).unwrap());
    }

    #[test]
    fn test_suffix_is_stable() {
        let spec = env_spec(json!([
            {"name": "CM", "valueFrom": {"configMapKeyRef": {"name": "perl-job-config", "key": "k"}}}
        ]));
        let job = job("foo", Some(spec));
        assert_eq!(job_suffix(&job, &index()).unwrap(), job_suffix(&job, &index()).unwrap());
    }

    #[test]
    fn test_hashed_jobs_last_duplicate_wins() {
        let first = job("foo", None);
        let second = job("foo", Some(json!({"backoffLimit": 1})));
        let other = job("bar", None);

        let suffixes = hashed_jobs(&[first, second.clone(), other], &index()).unwrap();
        assert_eq!(suffixes.len(), 2);
        assert_eq!(
            suffixes.get(&ObjectKey::new("default", "foo")).map(String::as_str),
            Some("28h7hmgctt")
        );
        assert_eq!(
            suffixes.get(&ObjectKey::new("default", "foo")),
            Some(&job_suffix(&second, &index()).unwrap())
        );
        assert!(suffixes.contains_key(&ObjectKey::new("default", "bar")));
    }
}
