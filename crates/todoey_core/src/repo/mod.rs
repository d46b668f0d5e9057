//! Persistent store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Define the fetch/stage/commit contract consumed by list services.
//! - Isolate SQL details from service orchestration.
//!
//! # Invariants
//! - Staged changes become durable only through `commit()`.
//! - Fetches observe committed state only.

pub mod sqlite_store;
pub mod store;
