//! Content hashing.
//!
//! Everything kujo hashes goes through [`hash_value`]: the value is rendered
//! as compact JSON and fed to SHA-256, and the digest is returned as lowercase
//! hex. `serde_json::Map` keeps keys sorted (the `preserve_order` feature is
//! not enabled anywhere in this crate), so the same logical content always
//! hashes to the same bytes regardless of key order in the input.
//!
//! - [`config_index`] - Hashes of every ConfigMap and Secret in the input
//! - [`suffix`] - Combining hashes and deriving the 10-character name suffix

pub mod config_index;
pub mod suffix;

pub use config_index::{ConfigIndex, ConfigKey};
pub use suffix::{encode_hash, encode_hash_slice};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::core::{KujoError, Result};

/// Lowercase hex SHA-256 of `data`.
#[must_use]
pub fn sha256_hex(data: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_ref());
    hex::encode(hasher.finalize())
}

/// Compact JSON with sorted object keys.
///
/// Only pass JSON trees (`Value`, `Map`); typed structs serialize in field
/// order, not sorted order. `what` names the value in the error message if
/// serialization fails.
pub fn canonical_json<T>(value: &T, what: impl FnOnce() -> String) -> Result<String>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(value).map_err(|e| KujoError::Serialization {
        what: what(),
        reason: e.to_string(),
    })
}

/// SHA-256 of the canonical JSON form of `value`.
pub fn hash_value<T>(value: &T, what: impl FnOnce() -> String) -> Result<String>
where
    T: Serialize + ?Sized,
{
    canonical_json(value, what).map(sha256_hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(sha256_hex("{}"), "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a");
    }

    #[test]
    fn test_canonical_json_sorts_keys() {
        let value = json!({"b": 1, "a": {"d": [3, 2], "c": null}});
        assert_eq!(
            canonical_json(&value, || "test".to_string()).unwrap(),
            r#"{"a":{"c":null,"d":[3,2]},"b":1}"#
        );
    }

    #[test]
    fn test_hash_value_ignores_key_order() {
        let a: Value = serde_json::from_str(r#"{"kind": "ConfigMap", "data": {"x": "1", "y": "2"}}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"data": {"y": "2", "x": "1"}, "kind": "ConfigMap"}"#).unwrap();

        assert_eq!(hash_value(&a, String::new).unwrap(), hash_value(&b, String::new).unwrap());
    }

    #[test]
    fn test_hash_value_sensitive_to_content() {
        let a = json!({"data": {"x": "1"}});
        let b = json!({"data": {"x": "2"}});
        assert_ne!(hash_value(&a, String::new).unwrap(), hash_value(&b, String::new).unwrap());
    }
}
