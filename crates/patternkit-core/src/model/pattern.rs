use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::asset::PatternAsset;
use crate::errors::Result;
use crate::store::{RevisionId, Revisioned};

/// Stored, revisioned copy of a pattern definition
///
/// A Pattern is materialized from a registry asset the first time a usage
/// references it, and gains a new revision whenever the reconciliation engine
/// detects that the registry's content hash has drifted from the stored one.
/// The `asset_id` is stable across revisions; `revision_id` is assigned by
/// the store on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// Stable pattern identifier (shared by every revision)
    pub asset_id: String,

    /// Human-readable title
    pub title: String,

    /// Name of the library this pattern belongs to
    pub library: String,

    /// Version string of this stored copy
    pub version: String,

    /// Structured validation schema
    pub schema: serde_json::Value,

    /// Template body
    pub template: String,

    /// Content hash of this stored copy (schema+template+version)
    pub hash: String,

    /// Revision id assigned by the store (0 until first save)
    pub revision_id: RevisionId,

    /// Timestamp when this Pattern was first materialized
    pub created_at: DateTime<Utc>,

    /// Timestamp when this revision's content was last written
    pub updated_at: DateTime<Utc>,
}

impl Pattern {
    /// Materialize a Pattern from a registry asset
    ///
    /// Computes the content hash eagerly so staleness comparison is a plain
    /// string equality later.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the asset's content hash cannot be computed.
    pub fn from_asset(asset: &PatternAsset) -> Result<Self> {
        let now = Utc::now();
        Ok(Self {
            asset_id: asset.id.clone(),
            title: asset.title.clone(),
            library: asset.library.clone(),
            version: asset.version.clone(),
            schema: asset.schema.clone(),
            template: asset.template.clone(),
            hash: asset.content_hash()?,
            revision_id: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Copy schema, template, version, and hash from an asset onto this Pattern
    ///
    /// Used when advancing a stale stored copy to the registry's current
    /// content ahead of saving a new revision.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the asset's content hash cannot be computed.
    pub fn apply_asset(&mut self, asset: &PatternAsset) -> Result<()> {
        self.schema = asset.schema.clone();
        self.template = asset.template.clone();
        self.version = asset.version.clone();
        self.hash = asset.content_hash()?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl Revisioned for Pattern {
    type Id = String;

    fn id(&self) -> String {
        self.asset_id.clone()
    }

    fn revision_id(&self) -> RevisionId {
        self.revision_id
    }

    fn set_revision_id(&mut self, rid: RevisionId) {
        self.revision_id = rid;
    }
}
