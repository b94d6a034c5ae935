//! Top-level reconciliation run
//!
//! `run_library_update` sweeps every discovered container tree and every
//! standalone usage block, applying the per-usage update decision and
//! writing each tree back to its backing record before moving on. The run
//! is single-threaded, synchronous, and idempotent: a second run with no
//! registry changes performs zero additional writes.

use patternkit_core::cache::DefinitionCache;
use patternkit_core::draft::DraftStore;
use patternkit_core::errors::Result;
use patternkit_core::layout::LayoutRepository;
use patternkit_core::model::{Pattern, UsageBlock};
use patternkit_core::registry::LibraryRegistry;
use patternkit_core::store::RevisionStore;
use tracing::info;

use super::discovery::{discover_trees, TreeSource};
use super::update::update_usage_configuration;

/// Borrowed collaborator bundle for one reconciliation run
pub struct UpdateEnvironment<'a> {
    /// Authoritative pattern registry
    pub registry: &'a dyn LibraryRegistry,

    /// Stored, revisioned pattern copies
    pub patterns: &'a mut RevisionStore<Pattern>,

    /// Standalone usage block entities
    pub blocks: &'a mut RevisionStore<UsageBlock>,

    /// Persisted container-tree backend
    pub layouts: &'a mut LayoutRepository,

    /// In-flight layout drafts
    pub drafts: &'a mut DraftStore,

    /// Block plugin definition cache, cleared at the end of a run
    pub plugin_cache: &'a mut dyn DefinitionCache,

    /// Entity type definition cache, cleared at the end of a run
    pub entity_type_cache: &'a mut dyn DefinitionCache,

    /// Whether container-tree layout support is available
    ///
    /// When false the run only processes standalone usage blocks.
    pub layout_support: bool,
}

/// Aggregate counts reported by a reconciliation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateSummary {
    /// Section passes persisted back to their backing store
    pub trees: usize,

    /// Usage blocks processed (updated components plus standalone blocks)
    pub blocks: usize,
}

/// Update all pattern usages against the authoritative registry
///
/// Discovers every container tree (unless layout support is absent), visits
/// each component, rewrites stale configurations in place, and persists
/// each tree back once per section pass even when nothing changed. Then
/// sweeps standalone usage blocks, clears the injected definition caches,
/// and logs a summary.
///
/// Failure policy: recoverable per-usage failures are logged and skipped
/// inside the update decision; `StoreUnavailable` aborts the run and
/// propagates. Trees saved before the failure stay committed, the failing
/// tree's in-memory mutations are discarded whole, so no half-updated tree
/// is ever persisted.
///
/// # Errors
///
/// Returns `StoreUnavailable` if any backing store goes down mid-run, or
/// `Serialization` if a draft write-back fails to serialize.
pub fn run_library_update(env: &mut UpdateEnvironment<'_>) -> Result<UpdateSummary> {
    let mut summary = UpdateSummary::default();

    if env.layout_support {
        for discovered in discover_trees(env.layouts, env.drafts)? {
            let mut tree = discovered.tree;
            for section_index in 0..tree.sections.len() {
                let usages: Vec<_> = tree.sections[section_index]
                    .components()
                    .map(|c| (c.key.clone(), c.plugin.clone(), c.configuration.clone()))
                    .collect();

                for (key, plugin, configuration) in usages {
                    let Some(updated) = update_usage_configuration(
                        env.registry,
                        env.patterns,
                        env.blocks,
                        &plugin,
                        &configuration,
                        None,
                    )?
                    else {
                        continue;
                    };
                    tree.sections[section_index].set_component_configuration(&key, updated);
                    summary.blocks += 1;
                }

                // One write-back per section pass, even when no component
                // changed: the save is idempotent and keeps drafts and
                // persisted layouts on the same code path.
                match &discovered.source {
                    TreeSource::Persisted => env.layouts.save(&tree)?,
                    TreeSource::Draft(key) => env.drafts.reset(key.clone(), &tree)?,
                }
                summary.trees += 1;
            }
        }
    }

    // Standalone usage blocks: the update decision itself persists any
    // pattern and block advances, so there is no separate write-back here.
    for block in env.blocks.all()? {
        update_usage_configuration(
            env.registry,
            env.patterns,
            env.blocks,
            &block.plugin,
            &block.configuration,
            None,
        )?;
        summary.blocks += 1;
    }

    env.plugin_cache.clear_cached_definitions();
    env.entity_type_cache.clear_cached_definitions();
    info!(
        trees = summary.trees,
        blocks = summary.blocks,
        "completed patternkit library updates"
    );
    Ok(summary)
}
