//! Container trees and their persisted backend
//!
//! A layout is an ordered sequence of sections, each holding an ordered,
//! keyed collection of components. Trees are rooted either in a type-scoped
//! layout, a per-entity override, or a draft record.

pub mod repository;
pub mod tree;

pub use repository::{LayoutRepository, ViewDisplay};
pub use tree::{Component, ContainerTree, Section, TreeContext};
