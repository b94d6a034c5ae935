//! Domain models: registry assets, stored patterns, usage blocks, and the
//! configuration mapping carried by usage sites.

pub mod asset;
pub mod config;
pub mod pattern;
pub mod usage_block;

pub use asset::PatternAsset;
pub use config::{ComponentPlugin, UsageConfiguration};
pub use pattern::Pattern;
pub use usage_block::UsageBlock;
