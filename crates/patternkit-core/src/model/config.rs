use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Plugin identity of a usage site
///
/// Declared at construction time: a component either renders a pattern asset
/// or it belongs to some other plugin this subsystem never touches. The
/// `Pattern` variant carries the asset identifier the usage renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentPlugin {
    /// A patternkit usage rendering the named library asset
    Pattern { asset_id: String },
    /// Any other plugin; never inspected further
    Other { plugin_id: String },
}

impl ComponentPlugin {
    /// The asset identifier this usage renders, if it is a pattern usage
    pub fn asset_id(&self) -> Option<&str> {
        match self {
            ComponentPlugin::Pattern { asset_id } => Some(asset_id),
            ComponentPlugin::Other { .. } => None,
        }
    }
}

/// Configuration mapping carried by a usage site
///
/// Embedded by value in layout components (a snapshot, not a pointer) and
/// stored on `UsageBlock` entities. The three interpreted fields pin the
/// usage to exact revisions: `pattern` pins a Pattern revision,
/// `patternkit_block_rid` pins the usage's own entity revision, and
/// `patternkit_block_id` names the backing entity. Everything else rides
/// along untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UsageConfiguration {
    /// Identifier of the backing UsageBlock entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patternkit_block_id: Option<u64>,

    /// Pinned revision id of the backing UsageBlock entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patternkit_block_rid: Option<u64>,

    /// Pinned Pattern revision id this usage renders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<u64>,

    /// Uninterpreted configuration fields, preserved verbatim
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl UsageConfiguration {
    /// Create a configuration referencing the given UsageBlock entity
    pub fn for_block(block_id: u64) -> Self {
        Self {
            patternkit_block_id: Some(block_id),
            ..Self::default()
        }
    }

    /// Whether `patternkit_block_id` is present and positive
    ///
    /// Zero counts as absent: a usage without a real backing entity id is
    /// skipped, not an error.
    pub fn has_block_id(&self) -> bool {
        matches!(self.patternkit_block_id, Some(id) if id > 0)
    }

    /// Whether `patternkit_block_rid` is present and positive
    pub fn has_block_rid(&self) -> bool {
        matches!(self.patternkit_block_rid, Some(rid) if rid > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_has_block_id_rejects_zero() {
        let mut config = UsageConfiguration::for_block(0);
        assert!(!config.has_block_id());
        config.patternkit_block_id = Some(7);
        assert!(config.has_block_id());
        config.patternkit_block_id = None;
        assert!(!config.has_block_id());
    }

    #[test]
    fn test_extra_fields_round_trip() {
        let mut config = UsageConfiguration::for_block(3);
        config
            .extra
            .insert("label_display".to_string(), json!("visible"));

        let text = serde_json::to_string(&config).unwrap();
        let back: UsageConfiguration = serde_json::from_str(&text).unwrap();
        assert_eq!(back.patternkit_block_id, Some(3));
        assert_eq!(back.extra.get("label_display"), Some(&json!("visible")));
    }

    #[test]
    fn test_plugin_asset_id() {
        let plugin = ComponentPlugin::Pattern {
            asset_id: "@library/atoms/button".to_string(),
        };
        assert_eq!(plugin.asset_id(), Some("@library/atoms/button"));

        let other = ComponentPlugin::Other {
            plugin_id: "system_branding_block".to_string(),
        };
        assert_eq!(other.asset_id(), None);
    }
}
