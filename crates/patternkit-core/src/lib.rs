//! Patternkit Core - domain models and store abstractions for pattern
//! library reconciliation
//!
//! This crate provides the collaborators the reconciliation engine runs
//! against:
//! - Pattern, UsageBlock, and configuration models with content hashing
//! - A revisioned entity store (append-only revision log per identifier)
//! - The library registry abstraction for authoritative pattern definitions
//! - Container trees (sections of keyed components) and their persisted
//!   backend
//! - An expirable draft store for in-progress layout edits
//! - Cache-invalidation seams and the logging facility

pub mod cache;
pub mod draft;
pub mod errors;
pub mod layout;
pub mod logging_facility;
pub mod model;
pub mod registry;
pub mod store;

// Re-export commonly used types
pub use cache::{CountingDefinitionCache, DefinitionCache, NoopDefinitionCache};
pub use draft::{DraftKey, DraftStore};
pub use errors::{PatternkitError, Result};
pub use layout::{Component, ContainerTree, LayoutRepository, Section, TreeContext, ViewDisplay};
pub use model::{ComponentPlugin, Pattern, PatternAsset, UsageBlock, UsageConfiguration};
pub use registry::{LibraryRegistry, StaticRegistry};
pub use store::{RevisionId, RevisionStore, Revisioned};
