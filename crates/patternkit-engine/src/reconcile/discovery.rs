//! Container tree discovery
//!
//! Collects every tree instance a reconciliation run must visit: type-scoped
//! layouts for each layout-enabled display × storage type, per-entity
//! overrides, and in-flight drafts together with the persisted trees they
//! shadow. The pass is deduplicated by persisted context, so a draft's
//! persisted counterpart is reconciled exactly once even when the display
//! sweep already collected it.

use std::collections::HashSet;

use patternkit_core::draft::{DraftKey, DraftStore};
use patternkit_core::errors::Result;
use patternkit_core::layout::{ContainerTree, LayoutRepository, TreeContext};
use tracing::debug;

/// Which backing record a discovered tree must be written back to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeSource {
    /// A persisted layout record
    Persisted,
    /// A draft record under the given key
    Draft(DraftKey),
}

/// One tree instance collected by the discovery pass
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredTree {
    /// Transient in-memory copy of the tree
    pub tree: ContainerTree,
    /// Backing record to save the tree back to
    pub source: TreeSource,
}

/// Discover every container tree instance to reconcile
///
/// # Errors
///
/// Returns `StoreUnavailable` if the layout backend is down.
pub fn discover_trees(
    layouts: &LayoutRepository,
    drafts: &DraftStore,
) -> Result<Vec<DiscoveredTree>> {
    let mut discovered = Vec::new();
    let mut seen: HashSet<TreeContext> = HashSet::new();

    // Type-scoped layouts and per-entity overrides, per display and storage
    // type. A missing override is a legitimate miss, not an error.
    for display in layouts.displays() {
        if !display.layout_enabled {
            continue;
        }
        for storage_type in layouts.storage_types() {
            if let Some(tree) = layouts.load_by_type(storage_type, display)? {
                if seen.insert(tree.context.clone()) {
                    discovered.push(DiscoveredTree {
                        tree,
                        source: TreeSource::Persisted,
                    });
                }
            }

            let type_context = TreeContext::for_type(storage_type, &display.id, &display.mode);
            for entity_id in layouts.entity_ids(&display.target_entity_type) {
                let context = type_context.with_entity(entity_id);
                if seen.contains(&context) {
                    continue;
                }
                if let Some(tree) = layouts.find_by_context(&context)? {
                    seen.insert(context);
                    discovered.push(DiscoveredTree {
                        tree,
                        source: TreeSource::Persisted,
                    });
                }
            }
        }
    }

    // Drafts, plus the persisted counterpart each draft shadows.
    for storage_type in layouts.storage_types() {
        for (key, tree) in drafts.all(storage_type) {
            debug!(scope = %key.scope, "collected layout draft");
            discovered.push(DiscoveredTree {
                tree,
                source: TreeSource::Draft(key.clone()),
            });

            let context = key.to_context();
            if seen.contains(&context) {
                continue;
            }
            if let Some(tree) = layouts.find_by_context(&context)? {
                seen.insert(context);
                discovered.push(DiscoveredTree {
                    tree,
                    source: TreeSource::Persisted,
                });
            }
        }
    }

    Ok(discovered)
}
