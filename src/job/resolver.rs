//! Resolving a Job's configuration dependencies.
//!
//! The dependency hash sequence of a Job is built in a fixed order, and that
//! order is part of the suffix: reordering it would rename every Job.
//!
//! 1. Pod volumes, in declaration order (`configMap`, then `secret`, per volume)
//! 2. Per container, in declaration order:
//!    - `env` entries (`configMapKeyRef`, then `secretKeyRef`, per entry)
//!    - `envFrom` entries (`configMapRef`, then `secretRef`, per entry)
//!
//! All references resolve in the Job's own namespace. A reference to an
//! object that isn't in the [`ConfigIndex`] contributes nothing; it is left out
//! of the sequence rather than represented by a placeholder.

use super::extractor::EligibleJob;
use super::model::{Container, PodSpec};
use crate::hashing::{ConfigIndex, ConfigKey};

/// Looks up references of one Job against the index.
struct Lookup<'a> {
    namespace: &'a str,
    index: &'a ConfigIndex,
    hashes: Vec<&'a str>,
}

impl<'a> Lookup<'a> {
    fn config_map(&mut self, name: Option<&str>) {
        if let Some(name) = name {
            self.push(ConfigKey::config_map(self.namespace, name));
        }
    }

    fn secret(&mut self, name: Option<&str>) {
        if let Some(name) = name {
            self.push(ConfigKey::secret(self.namespace, name));
        }
    }

    fn push(&mut self, key: ConfigKey) {
        match self.index.get(&key) {
            Some(hash) => self.hashes.push(hash),
            None => tracing::debug!("{key} is not part of the input, skipping"),
        }
    }
}

/// Ordered hashes of every indexed ConfigMap and Secret `job` references.
#[must_use]
pub fn dependency_hashes<'a>(job: &'a EligibleJob, index: &'a ConfigIndex) -> Vec<&'a str> {
    let mut lookup = Lookup {
        namespace: &job.key.namespace,
        index,
        hashes: Vec::new(),
    };

    if let Some(pod) = job.pod_spec() {
        volume_hashes(pod, &mut lookup);
        for container in pod.containers() {
            env_hashes(container, &mut lookup);
            env_from_hashes(container, &mut lookup);
        }
    }

    lookup.hashes
}

fn volume_hashes(pod: &PodSpec, lookup: &mut Lookup<'_>) {
    for volume in pod.volumes() {
        if let Some(config_map) = &volume.config_map {
            lookup.config_map(config_map.name.as_deref());
        }
        if let Some(secret) = &volume.secret {
            lookup.secret(secret.secret_name.as_deref());
        }
    }
}

fn env_hashes(container: &Container, lookup: &mut Lookup<'_>) {
    for source in container.env().iter().filter_map(|env| env.value_from.as_ref()) {
        if let Some(selector) = &source.config_map_key_ref {
            lookup.config_map(selector.name.as_deref());
        }
        if let Some(selector) = &source.secret_key_ref {
            lookup.secret(selector.name.as_deref());
        }
    }
}

fn env_from_hashes(container: &Container, lookup: &mut Lookup<'_>) {
    for source in container.env_from() {
        if let Some(reference) = &source.config_map_ref {
            lookup.config_map(reference.name.as_deref());
        }
        if let Some(reference) = &source.secret_ref {
            lookup.secret(reference.name.as_deref());
        }
    }
}
