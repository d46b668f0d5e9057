//! List services backing the category and item screens.
//!
//! # Responsibility
//! - Keep the in-memory list each screen renders from.
//! - Orchestrate store fetch/stage/commit calls per user action.
//! - Report list changes and store errors to the presentation layer.
//!
//! # Invariants
//! - A service's list is mutated only by that service's own methods.
//! - Store errors never escape a service; they reach `ListObserver::on_error`.

pub mod category_service;
pub mod item_service;
pub mod observer;
