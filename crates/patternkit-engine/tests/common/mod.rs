use patternkit_core::{
    Component, ContainerTree, CountingDefinitionCache, DraftStore, LayoutRepository, Pattern,
    PatternAsset, RevisionId, RevisionStore, Section, StaticRegistry, TreeContext, UsageBlock,
    UsageConfiguration, ViewDisplay,
};
use patternkit_engine::{run_library_update, UpdateEnvironment, UpdateSummary};
use serde_json::json;

/// Collaborator bundle owned by a test
pub struct TestEnv {
    pub registry: StaticRegistry,
    pub patterns: RevisionStore<Pattern>,
    pub blocks: RevisionStore<UsageBlock>,
    pub layouts: LayoutRepository,
    pub drafts: DraftStore,
    pub plugin_cache: CountingDefinitionCache,
    pub entity_type_cache: CountingDefinitionCache,
    pub layout_support: bool,
}

impl TestEnv {
    /// Environment with one registered storage type and layout support on
    #[allow(dead_code)]
    pub fn new() -> Self {
        let mut layouts = LayoutRepository::new();
        layouts.register_storage_type("defaults");
        Self {
            registry: StaticRegistry::new(),
            patterns: RevisionStore::new("patterns"),
            blocks: RevisionStore::new("blocks"),
            layouts,
            drafts: DraftStore::new(),
            plugin_cache: CountingDefinitionCache::default(),
            entity_type_cache: CountingDefinitionCache::default(),
            layout_support: true,
        }
    }

    /// Register a layout-enabled display
    #[allow(dead_code)]
    pub fn register_display(&mut self, id: &str, entity_type: &str, mode: &str) {
        self.layouts.register_display(ViewDisplay {
            id: id.to_string(),
            target_entity_type: entity_type.to_string(),
            mode: mode.to_string(),
            layout_enabled: true,
        });
    }

    /// Materialize and store a Pattern for an asset, returning its revision id
    #[allow(dead_code)]
    pub fn store_pattern(&mut self, asset: &PatternAsset) -> RevisionId {
        let pattern = Pattern::from_asset(asset).unwrap();
        self.patterns.save(pattern, true).unwrap()
    }

    /// Create and save a usage block pinned to the given Pattern revision
    #[allow(dead_code)]
    pub fn store_pinned_block(
        &mut self,
        block_id: u64,
        asset_id: &str,
        pattern_rid: RevisionId,
    ) -> RevisionId {
        let mut block = UsageBlock::new(block_id, format!("Block {block_id}"), asset_id.to_string());
        block.configuration.pattern = Some(pattern_rid);
        self.blocks.save(block, true).unwrap()
    }

    /// Persist a one-section tree holding a single pattern usage
    #[allow(dead_code)]
    pub fn persist_usage_tree(
        &mut self,
        context: TreeContext,
        asset_id: &str,
        configuration: UsageConfiguration,
    ) -> String {
        let mut section = Section::new();
        let key = section.append_component(Component::pattern_usage(asset_id, configuration));
        let mut tree = ContainerTree::new(context);
        tree.sections.push(section);
        self.layouts.save(&tree).unwrap();
        key
    }

    /// Run a library update over this environment
    #[allow(dead_code)]
    pub fn run(&mut self) -> patternkit_core::Result<UpdateSummary> {
        let mut env = UpdateEnvironment {
            registry: &self.registry,
            patterns: &mut self.patterns,
            blocks: &mut self.blocks,
            layouts: &mut self.layouts,
            drafts: &mut self.drafts,
            plugin_cache: &mut self.plugin_cache,
            entity_type_cache: &mut self.entity_type_cache,
            layout_support: self.layout_support,
        };
        run_library_update(&mut env)
    }
}

/// A library asset; the version participates in the content hash, so bumping
/// it makes every stored copy of the pattern stale
#[allow(dead_code)]
pub fn asset(id: &str, library: &str, version: &str) -> PatternAsset {
    PatternAsset {
        id: id.to_string(),
        title: "Test pattern".to_string(),
        library: library.to_string(),
        schema: json!({"type": "object", "properties": {"text": {"type": "string"}}}),
        template: "<div>{{ text }}</div>".to_string(),
        version: version.to_string(),
    }
}

/// Configuration pinning a usage to a block and a Pattern revision
#[allow(dead_code)]
pub fn pinned_config(block_id: u64, pattern_rid: RevisionId) -> UsageConfiguration {
    let mut config = UsageConfiguration::for_block(block_id);
    config.pattern = Some(pattern_rid);
    config
}
