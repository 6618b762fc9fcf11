//! Content hashes of configuration objects.
//!
//! The [`ConfigIndex`] maps every ConfigMap and Secret in the input to the
//! SHA-256 of its whole canonical document, not just `data`. Renaming,
//! relabelling or otherwise touching any part of the object produces a new
//! hash, and with it a new suffix for every Job that references it.
//!
//! # Duplicates
//!
//! When the same `(kind, namespace, name)` appears more than once the first
//! occurrence wins and later ones are ignored. [`ConfigIndex::insert`] is the
//! single place this rule lives; it never overwrites.
//!
//! # Keys
//!
//! Keys are kind-qualified ([`ConfigKey`], rendered `<Kind>/<namespace>/<name>`).
//! A ConfigMap and a Secret may share a name within a namespace, and they
//! must not shadow each other.

use std::collections::HashMap;
use std::fmt;

use super::hash_value;
use crate::core::Result;
use crate::resource::{Resource, ResourceKind};

/// The two kinds of object a Job can pull configuration from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigKind {
    /// Referenced via `configMap` volumes, `configMapKeyRef` and `configMapRef`
    ConfigMap,
    /// Referenced via `secret` volumes, `secretKeyRef` and `secretRef`
    Secret,
}

impl ConfigKind {
    /// Configuration kind for a recognized resource kind, if it is one.
    #[must_use]
    pub const fn from_resource_kind(kind: ResourceKind) -> Option<Self> {
        match kind {
            ResourceKind::ConfigMap => Some(Self::ConfigMap),
            ResourceKind::Secret => Some(Self::Secret),
            ResourceKind::Job => None,
        }
    }

    /// The `kind` string as it appears in manifests.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigMap => ResourceKind::ConfigMap.as_str(),
            Self::Secret => ResourceKind::Secret.as_str(),
        }
    }
}

/// Identity of a configuration object, rendered as `<Kind>/<namespace>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey {
    /// ConfigMap or Secret
    pub kind: ConfigKind,
    /// Namespace, already defaulted
    pub namespace: String,
    /// Object name
    pub name: String,
}

impl ConfigKey {
    /// Build a key for a ConfigMap.
    pub fn config_map(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: ConfigKind::ConfigMap,
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Build a key for a Secret.
    pub fn secret(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: ConfigKind::Secret,
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.kind.as_str(), self.namespace, self.name)
    }
}

/// Run-scoped map from configuration object to content hash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigIndex {
    hashes: HashMap<ConfigKey, String>,
}

impl ConfigIndex {
    /// An index with no entries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash every ConfigMap and Secret in `resources`.
    ///
    /// Other kinds are ignored, so the input doesn't need to be pre-filtered
    /// by kind. It should already be filtered by API version: a resource is
    /// indexed purely on its `kind` string.
    pub fn build(resources: &[Resource]) -> Result<Self> {
        let mut index = Self::new();

        for resource in resources {
            let Some(kind) = resource.resource_kind().and_then(ConfigKind::from_resource_kind)
            else {
                continue;
            };

            let key = ConfigKey {
                kind,
                namespace: resource.namespace().to_string(),
                name: resource.name().to_string(),
            };

            if index.contains(&key) {
                tracing::warn!("Ignoring duplicate {key}; the first definition is used for hashing");
                continue;
            }

            let hash = hash_value(resource.as_object(), || key.to_string())?;
            tracing::debug!("Hashed {key}: {hash}");
            index.insert(key, hash);
        }

        Ok(index)
    }

    /// Record `hash` for `key` unless the key is already present.
    ///
    /// Returns `true` if the entry was added. An existing entry is never
    /// replaced.
    pub fn insert(&mut self, key: ConfigKey, hash: impl Into<String>) -> bool {
        if self.hashes.contains_key(&key) {
            return false;
        }
        self.hashes.insert(key, hash.into());
        true
    }

    /// Hash recorded for `key`, if the object was part of the input.
    #[must_use]
    pub fn get(&self, key: &ConfigKey) -> Option<&str> {
        self.hashes.get(key).map(String::as_str)
    }

    /// Whether `key` has been indexed.
    #[must_use]
    pub fn contains(&self, key: &ConfigKey) -> bool {
        self.hashes.contains_key(key)
    }

    /// Number of indexed objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Whether no objects were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
