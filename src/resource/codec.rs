//! Reading and writing manifest streams.
//!
//! Input may be multi-document YAML (documents separated by `---`) or a stream
//! of concatenated JSON objects. Output is always YAML, one document per
//! resource, joined with `---\n`.

use serde::Deserialize;
use serde_json::Value;

use super::Resource;
use crate::constants::DOCUMENT_SEPARATOR;
use crate::core::{KujoError, Result};

/// Decode every document in `input`.
///
/// Empty documents and documents that aren't mappings are skipped. The first
/// document that fails to decode aborts the whole stream.
pub fn decode_resources(input: &str) -> Result<Vec<Resource>> {
    let documents = if looks_like_json(input) {
        decode_json_stream(input)?
    } else {
        decode_yaml_stream(input)?
    };

    let total = documents.len();
    let resources: Vec<Resource> = documents.into_iter().filter_map(Resource::from_value).collect();

    if resources.len() != total {
        tracing::debug!("Skipped {} empty or non-mapping document(s)", total - resources.len());
    }

    Ok(resources)
}

fn looks_like_json(input: &str) -> bool {
    input.trim_start().starts_with('{')
}

fn decode_json_stream(input: &str) -> Result<Vec<Value>> {
    serde_json::Deserializer::from_str(input)
        .into_iter::<Value>()
        .enumerate()
        .map(|(i, document)| {
            document.map_err(|e| KujoError::Decode {
                reason: format!("JSON document {}: {e}", i + 1),
            })
        })
        .collect()
}

fn decode_yaml_stream(input: &str) -> Result<Vec<Value>> {
    serde_yaml::Deserializer::from_str(input)
        .enumerate()
        .map(|(i, document)| {
            decode_yaml_document(document).map_err(|reason| KujoError::Decode {
                reason: format!("YAML document {}: {reason}", i + 1),
            })
        })
        .collect()
}

/// Decode one YAML document, expanding `<<` merge keys.
fn decode_yaml_document(document: serde_yaml::Deserializer<'_>) -> std::result::Result<Value, String> {
    let mut yaml = serde_yaml::Value::deserialize(document).map_err(|e| e.to_string())?;
    yaml.apply_merge().map_err(|e| e.to_string())?;
    serde_json::to_value(yaml).map_err(|e| e.to_string())
}

/// Serialize `resources` as a YAML stream.
///
/// Keys are written in sorted order, so identical resources always produce
/// identical bytes. Returns an empty string for an empty slice.
pub fn encode_resources(resources: &[Resource]) -> Result<String> {
    let mut output = String::new();

    for (i, resource) in resources.iter().enumerate() {
        let document = serde_yaml::to_string(resource.as_object()).map_err(|e| {
            KujoError::Serialization {
                what: format!(
                    "{} {}",
                    resource.kind().unwrap_or("resource"),
                    resource.object_key()
                ),
                reason: e.to_string(),
            }
        })?;

        if i > 0 {
            output.push_str(DOCUMENT_SEPARATOR);
        }
        output.push_str(&document);
    }

    Ok(output)
}
