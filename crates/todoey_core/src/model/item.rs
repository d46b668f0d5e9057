//! Checklist item domain model.
//!
//! # Responsibility
//! - Define the checklist entry and its two-state done flag.
//!
//! # Invariants
//! - New items start pending (`is_done = false`).
//! - Toggling flips `is_done` and touches no other field.
//! - Items created through a category carry that category's reference.

use crate::model::category::{Category, CategoryRef};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a checklist item.
pub type ItemId = Uuid;

/// Done/pending state of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    Pending,
    Done,
}

impl ItemState {
    pub fn toggle(self) -> Self {
        match self {
            Self::Pending => Self::Done,
            Self::Done => Self::Pending,
        }
    }

    pub fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl From<bool> for ItemState {
    fn from(is_done: bool) -> Self {
        if is_done {
            Self::Done
        } else {
            Self::Pending
        }
    }
}

/// Single checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub is_done: bool,
    /// `None` once the owning category has been deleted under the orphan policy.
    pub category: Option<CategoryRef>,
}

impl Item {
    /// Creates a pending item owned by `category`.
    pub fn new(title: impl Into<String>, category: &Category) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            is_done: false,
            category: Some(category.to_ref()),
        }
    }

    pub fn state(&self) -> ItemState {
        ItemState::from(self.is_done)
    }

    /// Flips the done flag and returns the new state.
    pub fn toggle_done(&mut self) -> ItemState {
        let next = self.state().toggle();
        self.is_done = next.is_done();
        next
    }
}
