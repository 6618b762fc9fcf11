//! Generic manifest resources
//!
//! A [`Resource`] is one decoded manifest document. kujo never models the full
//! Kubernetes schema for the documents it passes through; it keeps the decoded
//! JSON tree as-is and only reads the handful of fields it needs (`kind`,
//! `apiVersion`, `metadata.namespace`, `metadata.name`, annotations). The only
//! mutation ever applied is [`Resource::set_name`] on eligible Jobs.
//!
//! # Submodules
//!
//! - [`filter`] - The [`KindRegistry`] of recognized kinds and API versions
//! - [`codec`] - Multi-document YAML/JSON decoding and YAML output encoding

pub mod codec;
pub mod filter;

pub use codec::{decode_resources, encode_resources};
pub use filter::KindRegistry;

use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::constants::DEFAULT_NAMESPACE;

/// Resource kinds kujo understands.
///
/// Anything else is dropped by the [`KindRegistry`] before hashing begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    /// `batch/v1` Job, the only kind that gets renamed
    Job,
    /// `v1` Secret, hashed as a configuration source
    Secret,
    /// `v1` ConfigMap, hashed as a configuration source
    ConfigMap,
}

impl ResourceKind {
    /// The `kind` string as it appears in manifests.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Job => "Job",
            Self::Secret => "Secret",
            Self::ConfigMap => "ConfigMap",
        }
    }

    /// Whether resources of this kind feed the config index.
    #[must_use]
    pub const fn is_config_source(self) -> bool {
        matches!(self, Self::Secret | Self::ConfigMap)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a `kind` string isn't one kujo handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized resource kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for ResourceKind {
    type Err = UnknownKind;

    // Kinds are case-sensitive in Kubernetes, so no normalization here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Job" => Ok(Self::Job),
            "Secret" => Ok(Self::Secret),
            "ConfigMap" => Ok(Self::ConfigMap),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// Namespace-scoped identity of a resource, rendered as `<namespace>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey {
    /// Namespace, already defaulted to `default` when absent
    pub namespace: String,
    /// Object name
    pub name: String,
}

impl ObjectKey {
    /// Build a key, defaulting an empty namespace.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        let namespace = namespace.into();
        Self {
            namespace: if namespace.is_empty() {
                DEFAULT_NAMESPACE.to_string()
            } else {
                namespace
            },
            name: name.into(),
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// One decoded manifest document.
///
/// Always wraps a JSON object; [`Resource::from_value`] refuses anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    object: Map<String, Value>,
}

impl Resource {
    /// Wrap a decoded document, returning `None` for empty or non-mapping
    /// documents.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(object) if !object.is_empty() => Some(Self {
                object,
            }),
            _ => None,
        }
    }

    /// The raw `kind` field, if it is a string.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.object.get("kind").and_then(Value::as_str)
    }

    /// The `kind` field parsed into a [`ResourceKind`].
    #[must_use]
    pub fn resource_kind(&self) -> Option<ResourceKind> {
        self.kind().and_then(|kind| kind.parse().ok())
    }

    /// The raw `apiVersion` field, if it is a string.
    #[must_use]
    pub fn api_version(&self) -> Option<&str> {
        self.object.get("apiVersion").and_then(Value::as_str)
    }

    fn metadata(&self) -> Option<&Map<String, Value>> {
        self.object.get("metadata").and_then(Value::as_object)
    }

    /// `metadata.name`, or the empty string when unset.
    #[must_use]
    pub fn name(&self) -> &str {
        self.metadata().and_then(|m| m.get("name")).and_then(Value::as_str).unwrap_or_default()
    }

    /// `metadata.namespace`, defaulting to `default` when unset or empty.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.metadata()
            .and_then(|m| m.get("namespace"))
            .and_then(Value::as_str)
            .filter(|ns| !ns.is_empty())
            .unwrap_or(DEFAULT_NAMESPACE)
    }

    /// The `<namespace>/<name>` identity of this resource.
    #[must_use]
    pub fn object_key(&self) -> ObjectKey {
        ObjectKey::new(self.namespace(), self.name())
    }

    /// Raw value of `metadata.annotations[key]`.
    #[must_use]
    pub fn annotation(&self, key: &str) -> Option<&Value> {
        self.metadata()
            .and_then(|m| m.get("annotations"))
            .and_then(Value::as_object)
            .and_then(|annotations| annotations.get(key))
    }

    /// A top-level field of the document, e.g. `spec`.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.object.get(key)
    }

    /// Overwrite `metadata.name`, creating `metadata` if needed.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let metadata = self
            .object
            .entry("metadata")
            .or_insert_with(|| Value::Object(Map::new()));
        if !metadata.is_object() {
            *metadata = Value::Object(Map::new());
        }
        if let Value::Object(metadata) = metadata {
            metadata.insert("name".to_string(), Value::String(name.into()));
        }
    }

    /// The whole document as a JSON object.
    #[must_use]
    pub fn as_object(&self) -> &Map<String, Value> {
        &self.object
    }

    /// Consume the resource and return the underlying document.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.object)
    }
}
