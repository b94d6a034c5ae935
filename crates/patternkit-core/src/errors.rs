use thiserror::Error;

/// Result type alias using PatternkitError
pub type Result<T> = std::result::Result<T, PatternkitError>;

/// Error taxonomy for pattern reconciliation
///
/// Variants fall into two tiers. Recoverable misses (`RevisionNotFound`,
/// `BlockNotFound`, `AssetNotFound`, `Materialization`)
/// are swallowed at the per-usage boundary: the usage is logged and skipped,
/// never aborting a run. `StoreUnavailable` and `Serialization` are fatal and
/// propagate out of `run_library_update` unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatternkitError {
    /// A specific pinned revision does not exist
    #[error("Revision not found: {revision_id}")]
    RevisionNotFound { revision_id: u64 },

    /// Usage block entity not found in the store
    #[error("Usage block not found: {block_id}")]
    BlockNotFound { block_id: u64 },

    /// The registry has no asset under the given identifier
    #[error("Library asset not found: {asset_id}")]
    AssetNotFound { asset_id: String },

    /// A registry asset could not be materialized into a Pattern
    #[error("Failed to materialize pattern {asset_id}: {reason}")]
    Materialization { asset_id: String, reason: String },

    /// Backing persistence layer is unavailable (fatal, no retry policy here)
    #[error("Entity store unavailable: {store}")]
    StoreUnavailable { store: String },

    /// JSON serialization or deserialization failure
    #[error("Serialization failure: {reason}")]
    Serialization { reason: String },
}

impl From<serde_json::Error> for PatternkitError {
    fn from(err: serde_json::Error) -> Self {
        PatternkitError::Serialization {
            reason: err.to_string(),
        }
    }
}

impl PatternkitError {
    /// Whether this error may be swallowed at the per-usage boundary
    ///
    /// Store unavailability and serialization failures must propagate out of
    /// the run; everything else is a skip-this-usage condition.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            PatternkitError::StoreUnavailable { .. } | PatternkitError::Serialization { .. }
        )
    }
}
