//! To-do domain model.
//!
//! # Responsibility
//! - Define categories, checklist items and their colour tags.
//! - Keep identity explicit (`CategoryId`, `ItemId`) instead of title matching.
//!
//! # Invariants
//! - Every domain object is identified by a stable UUID.
//! - A category colour is assigned once at creation and never changes.

pub mod category;
pub mod color;
pub mod item;
