//! Patternkit Engine - pattern library reconciliation
//!
//! Orchestrates a batch run over every live pattern usage: persisted
//! layouts, per-entity overrides, in-flight drafts, and standalone usage
//! blocks. Stale usages (stored content hash differing from the registry's)
//! gain a new Pattern revision and have their configuration re-pinned.

pub mod reconcile;

pub use reconcile::discovery::{discover_trees, DiscoveredTree, TreeSource};
pub use reconcile::run::{run_library_update, UpdateEnvironment, UpdateSummary};
pub use reconcile::update::update_usage_configuration;
