//! Pattern registry abstraction
//!
//! The registry resolves a pattern identifier to the latest authoritative
//! definition. Read-only from the engine's perspective, and idempotent
//! across calls within one run except for genuine upstream changes.

use std::collections::HashMap;

use crate::errors::Result;
use crate::model::PatternAsset;

/// Resolves pattern identifiers to authoritative library assets
pub trait LibraryRegistry {
    /// Fetch the current definition for an asset id
    ///
    /// An unknown id is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Implementations return an error only when the registry backend itself
    /// fails; the reconciliation engine treats such failures as a recoverable
    /// skip for the usage being processed.
    fn get_asset(&self, asset_id: &str) -> Result<Option<PatternAsset>>;
}

/// In-memory registry backed by a fixed asset map
///
/// Used by tests and by embedders that load their library definitions up
/// front.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    assets: HashMap<String, PatternAsset>,
}

impl StaticRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an asset, keyed by its id
    pub fn insert(&mut self, asset: PatternAsset) {
        self.assets.insert(asset.id.clone(), asset);
    }

    /// Number of registered assets
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether the registry holds no assets
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl LibraryRegistry for StaticRegistry {
    fn get_asset(&self, asset_id: &str) -> Result<Option<PatternAsset>> {
        Ok(self.assets.get(asset_id).cloned())
    }
}
