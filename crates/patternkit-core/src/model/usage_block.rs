use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::{ComponentPlugin, UsageConfiguration};
use crate::store::{RevisionId, Revisioned};

/// Standalone placement of a pattern, independent of any layout
///
/// Created by editors outside this subsystem; the reconciliation engine only
/// ever advances which Pattern revision the embedded configuration points at
/// and refreshes the cached revision id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageBlock {
    /// Stable numeric identifier (shared by every revision)
    pub id: u64,

    /// Administrative label
    pub label: String,

    /// Plugin identity of this placement
    pub plugin: ComponentPlugin,

    /// Embedded configuration snapshot
    pub configuration: UsageConfiguration,

    /// Revision id assigned by the store (0 until first save)
    pub revision_id: RevisionId,

    /// Timestamp when this block was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when this revision was last written
    pub updated_at: DateTime<Utc>,
}

impl UsageBlock {
    /// Create a new usage block rendering the given asset
    pub fn new(id: u64, label: String, asset_id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            label,
            plugin: ComponentPlugin::Pattern { asset_id },
            configuration: UsageConfiguration::for_block(id),
            revision_id: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Revisioned for UsageBlock {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }

    fn revision_id(&self) -> RevisionId {
        self.revision_id
    }

    fn set_revision_id(&mut self, rid: RevisionId) {
        self.revision_id = rid;
    }
}
