use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::errors::{PatternkitError, Result};

/// Store-assigned revision identifier, strictly increasing per store
pub type RevisionId = u64;

/// Entity that can live in a `RevisionStore`
///
/// An entity's `Id` is stable across revisions; the store assigns
/// `revision_id` on save.
pub trait Revisioned: Clone {
    /// Stable identifier type shared by all revisions of one entity
    type Id: Clone + Eq + Hash + Display + Debug;

    /// The stable identifier of this entity
    fn id(&self) -> Self::Id;

    /// The revision id assigned by the store (0 until first save)
    fn revision_id(&self) -> RevisionId;

    /// Set the revision id (called by the store on save)
    fn set_revision_id(&mut self, rid: RevisionId);
}

/// Append-only revision history for one identifier
#[derive(Debug, Clone)]
struct RevisionLog {
    /// Revision ids in creation order
    revision_ids: Vec<RevisionId>,
    /// The revision served by default loads; always a member of `revision_ids`
    default: RevisionId,
}

/// In-memory revisioned entity store
///
/// Each identifier owns an append-only revision log plus a pointer to its
/// current default revision. Revision ids come from a store-wide counter, so
/// a save that requests a new revision always yields a strictly greater id
/// than any revision saved before it. Not thread-safe; the reconciliation
/// run is single-threaded and synchronous.
///
/// Loads of unknown ids or revisions return `Ok(None)`, never an error;
/// `StoreUnavailable` is reserved for the backing layer being down (modeled
/// here with `set_unavailable` for failure-injection in tests).
#[derive(Debug, Clone)]
pub struct RevisionStore<T: Revisioned> {
    name: &'static str,
    next_revision: RevisionId,
    revisions: HashMap<RevisionId, T>,
    logs: HashMap<T::Id, RevisionLog>,
    unavailable: bool,
}

impl<T: Revisioned> RevisionStore<T> {
    /// Create a new empty store; `name` identifies it in errors and logs
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            next_revision: 1,
            revisions: HashMap::new(),
            logs: HashMap::new(),
            unavailable: false,
        }
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(PatternkitError::StoreUnavailable {
                store: self.name.to_string(),
            });
        }
        Ok(())
    }

    /// Load the default revision of an entity
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the backing layer is down. An unknown
    /// id is `Ok(None)`.
    pub fn load(&self, id: &T::Id) -> Result<Option<T>> {
        self.check_available()?;
        Ok(self
            .logs
            .get(id)
            .and_then(|log| self.revisions.get(&log.default))
            .cloned())
    }

    /// Load a specific pinned revision
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the backing layer is down. An unknown
    /// revision id is `Ok(None)`.
    pub fn load_revision(&self, rid: RevisionId) -> Result<Option<T>> {
        self.check_available()?;
        Ok(self.revisions.get(&rid).cloned())
    }

    /// Save an entity, returning the revision id it was stored under
    ///
    /// With `new_revision = true` (or on the first save of an identifier) a
    /// fresh revision is appended and marked default. With `new_revision =
    /// false` the current default revision is overwritten in place.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the backing layer is down.
    pub fn save(&mut self, mut entity: T, new_revision: bool) -> Result<RevisionId> {
        self.check_available()?;
        let id = entity.id();

        if !new_revision {
            if let Some(log) = self.logs.get(&id) {
                let rid = log.default;
                entity.set_revision_id(rid);
                self.revisions.insert(rid, entity);
                return Ok(rid);
            }
        }

        let rid = self.next_revision;
        self.next_revision += 1;
        entity.set_revision_id(rid);
        self.revisions.insert(rid, entity);

        let log = self.logs.entry(id).or_insert(RevisionLog {
            revision_ids: Vec::new(),
            default: rid,
        });
        log.revision_ids.push(rid);
        log.default = rid;
        Ok(rid)
    }

    /// Load the default revision of every entity, ordered by revision id
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the backing layer is down.
    pub fn all(&self) -> Result<Vec<T>> {
        self.check_available()?;
        let mut entities: Vec<T> = self
            .logs
            .values()
            .filter_map(|log| self.revisions.get(&log.default))
            .cloned()
            .collect();
        entities.sort_by_key(Revisioned::revision_id);
        Ok(entities)
    }

    /// The current default revision id for an identifier, if it exists
    pub fn default_revision_id(&self, id: &T::Id) -> Option<RevisionId> {
        self.logs.get(id).map(|log| log.default)
    }

    /// Number of revisions recorded for one identifier
    ///
    /// This is useful for asserting how many revisions a run created.
    pub fn revision_count(&self, id: &T::Id) -> usize {
        self.logs
            .get(id)
            .map_or(0, |log| log.revision_ids.len())
    }

    /// Total number of revisions across all identifiers
    ///
    /// This is useful for idempotence assertions (a second run must create
    /// zero additional revisions).
    pub fn total_revisions(&self) -> usize {
        self.revisions.len()
    }

    /// Mark the backing layer up or down (failure injection for tests)
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }
}
