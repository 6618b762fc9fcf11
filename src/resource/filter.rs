//! Recognized kinds and API versions.
//!
//! [`KindRegistry`] is the read-only table of `kind -> accepted apiVersions`
//! the pipeline filters its input against. It is built once per run and passed
//! around by reference.

use std::collections::{BTreeMap, BTreeSet};

use super::{Resource, ResourceKind};

/// Table of accepted API versions per recognized kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindRegistry {
    versions: BTreeMap<ResourceKind, BTreeSet<String>>,
}

impl Default for KindRegistry {
    /// `Job` at `batch/v1`, `Secret` and `ConfigMap` at `v1`.
    fn default() -> Self {
        Self::empty()
            .with_version(ResourceKind::Job, "batch/v1")
            .with_version(ResourceKind::Secret, "v1")
            .with_version(ResourceKind::ConfigMap, "v1")
    }
}

impl KindRegistry {
    /// A registry that accepts nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            versions: BTreeMap::new(),
        }
    }

    /// Accept `api_version` for `kind` in addition to what is already allowed.
    #[must_use]
    pub fn with_version(mut self, kind: ResourceKind, api_version: impl Into<String>) -> Self {
        self.versions.entry(kind).or_default().insert(api_version.into());
        self
    }

    /// The recognized kind of `resource`, or `None` if the kind is unknown or
    /// its `apiVersion` isn't accepted for that kind.
    #[must_use]
    pub fn classify(&self, resource: &Resource) -> Option<ResourceKind> {
        let kind = resource.resource_kind()?;
        let api_version = resource.api_version()?;
        self.versions
            .get(&kind)
            .is_some_and(|accepted| accepted.contains(api_version))
            .then_some(kind)
    }

    /// Whether `resource` survives filtering.
    #[must_use]
    pub fn accepts(&self, resource: &Resource) -> bool {
        self.classify(resource).is_some()
    }

    /// Keep only recognized resources, preserving their order.
    #[must_use]
    pub fn filter(&self, resources: Vec<Resource>) -> Vec<Resource> {
        let total = resources.len();
        let kept: Vec<Resource> = resources.into_iter().filter(|r| self.accepts(r)).collect();

        if kept.len() != total {
            tracing::debug!("Dropped {} unrecognized resource(s) out of {}", total - kept.len(), total);
        }

        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(api_version: &str, kind: &str) -> Resource {
        Resource::from_value(json!({
            "apiVersion": api_version,
            "kind": kind,
            "metadata": {"name": "x"}
        }))
        .unwrap()
    }

    #[test]
    fn test_default_registry_accepts_recognized_kinds() {
        let registry = KindRegistry::default();

        assert_eq!(registry.classify(&resource("batch/v1", "Job")), Some(ResourceKind::Job));
        assert_eq!(registry.classify(&resource("v1", "Secret")), Some(ResourceKind::Secret));
        assert_eq!(registry.classify(&resource("v1", "ConfigMap")), Some(ResourceKind::ConfigMap));
    }

    #[test]
    fn test_default_registry_rejects_wrong_versions_and_kinds() {
        let registry = KindRegistry::default();

        assert!(!registry.accepts(&resource("batch/v1beta1", "Job")));
        assert!(!registry.accepts(&resource("v1", "Job")));
        assert!(!registry.accepts(&resource("apps/v1", "Deployment")));
        assert!(!registry.accepts(&resource("v1", "Service")));

        let no_version = Resource::from_value(json!({"kind": "ConfigMap"})).unwrap();
        assert!(!registry.accepts(&no_version));
    }

    #[test]
    fn test_filter_preserves_order() {
        let registry = KindRegistry::default();
        let input = vec![
            resource("v1", "Secret"),
            resource("apps/v1", "Deployment"),
            resource("batch/v1", "Job"),
            resource("v1", "ConfigMap"),
        ];

        let kinds: Vec<_> =
            registry.filter(input).iter().map(|r| r.kind().unwrap().to_string()).collect();
        assert_eq!(kinds, vec!["Secret", "Job", "ConfigMap"]);
    }

    #[test]
    fn test_custom_registry() {
        let registry = KindRegistry::empty().with_version(ResourceKind::Job, "batch/v1beta1");

        assert!(registry.accepts(&resource("batch/v1beta1", "Job")));
        assert!(!registry.accepts(&resource("batch/v1", "Job")));
        assert!(!registry.accepts(&resource("v1", "ConfigMap")));
    }
}
