//! Expirable draft store for in-progress layout edits
//!
//! Drafts are serialized container trees keyed by a structured key. The key
//! is explicit fields rather than a delimited string, so deriving the
//! persisted counterpart of a draft never depends on substring parsing.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::Result;
use crate::layout::{ContainerTree, TreeContext};

/// Structured key scoping one draft
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftKey {
    /// Tree-backing storage type the draft belongs to
    pub storage_type: String,

    /// Primary scope: the display the draft edits
    pub scope: String,

    /// Secondary scope: the display's view mode
    pub sub_scope: String,
}

impl DraftKey {
    /// Build a key from its fields
    pub fn new(storage_type: &str, scope: &str, sub_scope: &str) -> Self {
        Self {
            storage_type: storage_type.to_string(),
            scope: scope.to_string(),
            sub_scope: sub_scope.to_string(),
        }
    }

    /// Derive the persisted tree context this draft shadows
    pub fn to_context(&self) -> TreeContext {
        TreeContext::for_type(&self.storage_type, &self.scope, &self.sub_scope)
    }
}

/// One stored draft: a serialized tree plus an optional expiry
#[derive(Debug, Clone)]
struct DraftEntry {
    serialized: String,
    expires_at: Option<DateTime<Utc>>,
}

/// Expirable key-value store of serialized layout drafts
///
/// Enumeration order within a storage type is unspecified; expired entries
/// are skipped on enumeration, not errors. In-memory implementation.
#[derive(Debug, Clone, Default)]
pub struct DraftStore {
    entries: HashMap<DraftKey, DraftEntry>,
}

impl DraftStore {
    /// Create an empty draft store
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize and store a draft tree under the given key
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the tree cannot be serialized to JSON.
    pub fn set(
        &mut self,
        key: DraftKey,
        tree: &ContainerTree,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let serialized = serde_json::to_string(tree)?;
        self.entries.insert(
            key,
            DraftEntry {
                serialized,
                expires_at,
            },
        );
        Ok(())
    }

    /// Deserialize and return the draft under a key, if live
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the stored draft cannot be deserialized.
    pub fn get(&self, key: &DraftKey) -> Result<Option<ContainerTree>> {
        match self.entries.get(key) {
            Some(entry) if !is_expired(entry) => {
                Ok(Some(serde_json::from_str(&entry.serialized)?))
            }
            _ => Ok(None),
        }
    }

    /// Re-store a draft under an existing key, keeping its expiry
    ///
    /// Used by the reconciliation engine to write an updated draft back
    /// without extending or shortening its lifetime.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the tree cannot be serialized to JSON.
    pub fn reset(&mut self, key: DraftKey, tree: &ContainerTree) -> Result<()> {
        let expires_at = self.entries.get(&key).and_then(|entry| entry.expires_at);
        self.set(key, tree, expires_at)
    }

    /// Enumerate all live drafts under one storage type's namespace
    ///
    /// Expired entries are skipped; an entry that fails to deserialize is
    /// logged and skipped rather than failing the enumeration.
    pub fn all(&self, storage_type: &str) -> Vec<(DraftKey, ContainerTree)> {
        let mut drafts = Vec::new();
        for (key, entry) in &self.entries {
            if key.storage_type != storage_type || is_expired(entry) {
                continue;
            }
            match serde_json::from_str(&entry.serialized) {
                Ok(tree) => drafts.push((key.clone(), tree)),
                Err(err) => {
                    error!(scope = %key.scope, %err, "skipping undeserializable draft");
                }
            }
        }
        drafts
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_expired(entry: &DraftEntry) -> bool {
    matches!(entry.expires_at, Some(at) if at <= Utc::now())
}
