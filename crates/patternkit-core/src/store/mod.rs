//! Revisioned entity persistence
//!
//! A small explicit versioned-record abstraction: an append-only revision
//! log per identifier plus a pointer to the current default revision. The
//! storage backend is in-memory; all access is encapsulated behind the
//! `RevisionStore` API so a file or SQL backend can replace it without
//! touching callers.

pub mod revision_store;

pub use revision_store::{RevisionId, RevisionStore, Revisioned};
