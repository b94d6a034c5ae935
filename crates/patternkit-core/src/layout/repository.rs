use std::collections::{HashMap, HashSet};

use crate::errors::{PatternkitError, Result};
use crate::layout::tree::{ContainerTree, TreeContext};

/// A view-display configuration that may have layout support enabled
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDisplay {
    /// Display identifier (e.g. `node.article.full`)
    pub id: String,

    /// Entity type this display renders (e.g. `node`)
    pub target_entity_type: String,

    /// View mode (e.g. `full`)
    pub mode: String,

    /// Whether container-tree layout is enabled for this display
    ///
    /// Displays without layout support are never discovered.
    pub layout_enabled: bool,
}

/// Persisted container-tree backend
///
/// Holds the registered storage types, the view displays, the concrete
/// entity ids per entity type, and the persisted trees keyed by context.
/// In-memory implementation; all access is encapsulated here so another
/// backend can replace it without touching the engine.
#[derive(Debug, Clone, Default)]
pub struct LayoutRepository {
    storage_types: Vec<String>,
    displays: Vec<ViewDisplay>,
    entities: HashMap<String, Vec<String>>,
    trees: HashMap<TreeContext, ContainerTree>,
    poisoned: HashSet<TreeContext>,
}

impl LayoutRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tree-backing storage type
    pub fn register_storage_type(&mut self, storage_type: &str) {
        if !self.storage_types.iter().any(|t| t == storage_type) {
            self.storage_types.push(storage_type.to_string());
        }
    }

    /// Register a view display
    pub fn register_display(&mut self, display: ViewDisplay) {
        self.displays.push(display);
    }

    /// Register a concrete entity of the given type
    pub fn register_entity(&mut self, entity_type: &str, entity_id: &str) {
        self.entities
            .entry(entity_type.to_string())
            .or_default()
            .push(entity_id.to_string());
    }

    /// Registered storage types, in registration order
    pub fn storage_types(&self) -> &[String] {
        &self.storage_types
    }

    /// Registered view displays, in registration order
    pub fn displays(&self) -> &[ViewDisplay] {
        &self.displays
    }

    /// Ids of all concrete entities of one type
    pub fn entity_ids(&self, entity_type: &str) -> &[String] {
        self.entities
            .get(entity_type)
            .map_or(&[], Vec::as_slice)
    }

    /// Load the type-scoped tree for a display under one storage type
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the backing layer is down. A display
    /// without a stored layout is `Ok(None)`.
    pub fn load_by_type(
        &self,
        storage_type: &str,
        display: &ViewDisplay,
    ) -> Result<Option<ContainerTree>> {
        let context = TreeContext::for_type(storage_type, &display.id, &display.mode);
        self.find_by_context(&context)
    }

    /// Look up the tree stored for an exact context
    ///
    /// A miss is legitimate (no override exists), not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the backing layer is down.
    pub fn find_by_context(&self, context: &TreeContext) -> Result<Option<ContainerTree>> {
        Ok(self.trees.get(context).cloned())
    }

    /// Persist a tree back to its backing record
    ///
    /// The write is all-or-nothing: a failing save leaves the stored tree
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the backing layer is down for this
    /// tree's context.
    pub fn save(&mut self, tree: &ContainerTree) -> Result<()> {
        if self.poisoned.contains(&tree.context) {
            return Err(PatternkitError::StoreUnavailable {
                store: "layout".to_string(),
            });
        }
        self.trees.insert(tree.context.clone(), tree.clone());
        Ok(())
    }

    /// Make saves for one context fail with `StoreUnavailable`
    ///
    /// This is useful for testing partial-failure behavior.
    pub fn poison(&mut self, context: TreeContext) {
        self.poisoned.insert(context);
    }
}
