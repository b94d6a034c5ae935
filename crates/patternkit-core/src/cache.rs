//! Cache invalidation seams
//!
//! The reconciliation run ends by clearing the cached block-plugin and
//! entity-type definitions so newly created pattern variations become
//! visible. Both sinks are injected collaborators; there is no process-wide
//! singleton state.

/// A definition cache that can be cleared fire-and-forget
pub trait DefinitionCache {
    /// Drop all cached definitions; best-effort, never fails
    fn clear_cached_definitions(&mut self);
}

/// Cache sink that ignores invalidations
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDefinitionCache;

impl DefinitionCache for NoopDefinitionCache {
    fn clear_cached_definitions(&mut self) {}
}

/// Cache sink that counts invalidations
///
/// This is useful for asserting that a run cleared its caches exactly once.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountingDefinitionCache {
    /// Number of times the cache has been cleared
    pub clears: usize,
}

impl DefinitionCache for CountingDefinitionCache {
    fn clear_cached_definitions(&mut self) {
        self.clears += 1;
    }
}
