//! Reconciliation engine: discovery, per-usage update decision, and the
//! top-level run orchestration.

pub mod discovery;
pub mod run;
pub mod update;
