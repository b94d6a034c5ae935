//! Authoritative pattern definitions as served by a library registry.
//!
//! A `PatternAsset` is the registry's view of a pattern: schema, template
//! body, and version, plus a deterministic content hash used for staleness
//! detection against stored copies.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::Result;

/// Authoritative pattern definition returned by a library registry
///
/// Immutable once returned; a later registry call may return a newer
/// definition for the same identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternAsset {
    /// Stable pattern identifier (e.g. `@library/path/name`)
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// Name of the library this asset belongs to
    pub library: String,

    /// Structured validation schema
    pub schema: serde_json::Value,

    /// Template body
    pub template: String,

    /// Version string as authored upstream
    pub version: String,
}

impl PatternAsset {
    /// Compute the content hash of this asset.
    ///
    /// SHA256 over the canonical JSON serialization of
    /// `[schema, template, version]`, hex-encoded. The hash is the single
    /// source of truth for "this stored copy has drifted from the registry",
    /// so it must be deterministic: same schema+template+version, same hash.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the schema cannot be serialized to JSON.
    pub fn content_hash(&self) -> Result<String> {
        let canonical = serde_json::to_string(&(&self.schema, &self.template, &self.version))?;
        Ok(hash_string(&canonical))
    }
}

/// Hash a string using SHA256.
fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn asset(version: &str) -> PatternAsset {
        PatternAsset {
            id: "@library/molecules/card".to_string(),
            title: "Card".to_string(),
            library: "library".to_string(),
            schema: json!({"type": "object", "properties": {"text": {"type": "string"}}}),
            template: "<div class=\"card\">{{ text }}</div>".to_string(),
            version: version.to_string(),
        }
    }

    #[test]
    fn test_content_hash_deterministic() {
        let a = asset("1.0.0");
        assert_eq!(a.content_hash().unwrap(), a.content_hash().unwrap());
        assert_eq!(a.content_hash().unwrap().len(), 64); // SHA256 hex length
    }

    #[test]
    fn test_content_hash_changes_with_version() {
        assert_ne!(
            asset("1.0.0").content_hash().unwrap(),
            asset("1.0.1").content_hash().unwrap()
        );
    }

    #[test]
    fn test_content_hash_ignores_title() {
        let mut renamed = asset("1.0.0");
        renamed.title = "Renamed Card".to_string();
        assert_eq!(
            asset("1.0.0").content_hash().unwrap(),
            renamed.content_hash().unwrap()
        );
    }

    proptest! {
        #[test]
        fn prop_hash_deterministic_over_template(template in ".*", version in "[0-9]{1,3}\\.[0-9]{1,3}") {
            let mut a = asset("0.0.0");
            a.template = template;
            a.version = version;
            let b = a.clone();
            prop_assert_eq!(a.content_hash().unwrap(), b.content_hash().unwrap());
        }
    }
}
