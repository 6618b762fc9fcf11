//! Subset of the `batch/v1` Job schema.
//!
//! Only the pod-template fields that can reference a ConfigMap or Secret are
//! modelled; everything else in the manifest is ignored here and preserved
//! untouched in the [`Resource`](crate::resource::Resource). Kubernetes
//! treats an explicit `null` like an absent field, so every collection is an
//! `Option` and read through an accessor that yields an empty slice.

use serde::Deserialize;

/// `spec` of a Job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    #[serde(default)]
    pub template: Option<PodTemplateSpec>,
}

impl JobSpec {
    /// The pod spec of the job's template, if there is one.
    #[must_use]
    pub fn pod_spec(&self) -> Option<&PodSpec> {
        self.template.as_ref().and_then(|t| t.spec.as_ref())
    }
}

/// `spec.template` of a Job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodTemplateSpec {
    #[serde(default)]
    pub spec: Option<PodSpec>,
}

/// The pod spec inside a template; the only place references can appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    #[serde(default)]
    pub volumes: Option<Vec<Volume>>,
    #[serde(default)]
    pub containers: Option<Vec<Container>>,
}

impl PodSpec {
    /// Volumes in declaration order.
    #[must_use]
    pub fn volumes(&self) -> &[Volume] {
        self.volumes.as_deref().unwrap_or_default()
    }

    /// Containers in declaration order.
    #[must_use]
    pub fn containers(&self) -> &[Container] {
        self.containers.as_deref().unwrap_or_default()
    }
}

/// A pod volume. At most one of the sources is normally set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default)]
    pub config_map: Option<ConfigMapVolumeSource>,
    #[serde(default)]
    pub secret: Option<SecretVolumeSource>,
}

/// `configMap` volume source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapVolumeSource {
    #[serde(default)]
    pub name: Option<String>,
}

/// Secret volumes name their target `secretName`, unlike every other reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretVolumeSource {
    #[serde(default)]
    pub secret_name: Option<String>,
}

/// A container's environment sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(default)]
    pub env: Option<Vec<EnvVar>>,
    #[serde(default)]
    pub env_from: Option<Vec<EnvFromSource>>,
}

impl Container {
    /// `env` entries in declaration order.
    #[must_use]
    pub fn env(&self) -> &[EnvVar] {
        self.env.as_deref().unwrap_or_default()
    }

    /// `envFrom` entries in declaration order.
    #[must_use]
    pub fn env_from(&self) -> &[EnvFromSource] {
        self.env_from.as_deref().unwrap_or_default()
    }
}

/// One `env` entry; only `valueFrom` can reference another object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    #[serde(default)]
    pub value_from: Option<EnvVarSource>,
}

/// `env[].valueFrom`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarSource {
    #[serde(default)]
    pub config_map_key_ref: Option<LocalObjectReference>,
    #[serde(default)]
    pub secret_key_ref: Option<LocalObjectReference>,
}

/// One `envFrom` entry, importing every key of a ConfigMap or Secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvFromSource {
    #[serde(default)]
    pub config_map_ref: Option<LocalObjectReference>,
    #[serde(default)]
    pub secret_ref: Option<LocalObjectReference>,
}

/// Reference to an object in the Job's own namespace.
///
/// Key selectors (`configMapKeyRef`, `secretKeyRef`) also carry `key` and
/// `optional`; only the object name matters for hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalObjectReference {
    #[serde(default)]
    pub name: Option<String>,
}
