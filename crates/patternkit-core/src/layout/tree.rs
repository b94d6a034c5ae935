use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{ComponentPlugin, UsageConfiguration};

/// Context identifying where a persisted container tree is rooted
///
/// A tree is scoped to a storage type and a view display; an `entity_id`
/// narrows it to a per-entity layout override, `None` means the type-scoped
/// default layout for that display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeContext {
    /// Registered tree-backing storage type
    pub storage_type: String,

    /// Identifier of the view display this layout belongs to
    pub display_id: String,

    /// View mode of the display (e.g. `full`, `teaser`)
    pub view_mode: String,

    /// Concrete entity id for a per-entity override, or None for the
    /// type-scoped layout
    pub entity_id: Option<String>,
}

impl TreeContext {
    /// Context for a type-scoped layout
    pub fn for_type(storage_type: &str, display_id: &str, view_mode: &str) -> Self {
        Self {
            storage_type: storage_type.to_string(),
            display_id: display_id.to_string(),
            view_mode: view_mode.to_string(),
            entity_id: None,
        }
    }

    /// The same context narrowed to one concrete entity
    pub fn with_entity(&self, entity_id: &str) -> Self {
        Self {
            entity_id: Some(entity_id.to_string()),
            ..self.clone()
        }
    }
}

/// A positioned usage site inside a section
///
/// The configuration is embedded by value: a snapshot of the usage's state,
/// not a pointer into the entity store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Stable key within the owning section
    pub key: String,

    /// Plugin identity, declared at construction time
    pub plugin: ComponentPlugin,

    /// Embedded configuration snapshot
    pub configuration: UsageConfiguration,
}

impl Component {
    /// Create a pattern-usage component with a generated key
    pub fn pattern_usage(asset_id: &str, configuration: UsageConfiguration) -> Self {
        Self {
            key: Uuid::now_v7().to_string(),
            plugin: ComponentPlugin::Pattern {
                asset_id: asset_id.to_string(),
            },
            configuration,
        }
    }

    /// Create a non-pattern component with a generated key
    pub fn other(plugin_id: &str) -> Self {
        Self {
            key: Uuid::now_v7().to_string(),
            plugin: ComponentPlugin::Other {
                plugin_id: plugin_id.to_string(),
            },
            configuration: UsageConfiguration::default(),
        }
    }
}

/// An ordered, keyed collection of components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Section {
    components: Vec<Component>,
}

impl Section {
    /// Create an empty section
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a component, returning its key
    pub fn append_component(&mut self, component: Component) -> String {
        let key = component.key.clone();
        self.components.push(component);
        key
    }

    /// Iterate components in order
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    /// Look up a component by key
    pub fn component(&self, key: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.key == key)
    }

    /// Replace a component's configuration in place
    ///
    /// Returns false if no component with the key exists.
    pub fn set_component_configuration(
        &mut self,
        key: &str,
        configuration: UsageConfiguration,
    ) -> bool {
        match self.components.iter_mut().find(|c| c.key == key) {
            Some(component) => {
                component.configuration = configuration;
                true
            }
            None => false,
        }
    }

    /// Number of components in this section
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether this section holds no components
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// A layout: an ordered sequence of sections rooted at one context
///
/// A tree instance is owned by exactly one backing record (persisted layout
/// or draft). The engine holds a transient in-memory copy during
/// reconciliation and writes it back before moving on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerTree {
    /// Backing context of this tree
    pub context: TreeContext,

    /// Ordered sections
    pub sections: Vec<Section>,
}

impl ContainerTree {
    /// Create an empty tree rooted at a context
    pub fn new(context: TreeContext) -> Self {
        Self {
            context,
            sections: Vec::new(),
        }
    }
}
