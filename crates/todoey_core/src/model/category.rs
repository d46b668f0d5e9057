//! Category domain model.
//!
//! # Responsibility
//! - Define the named, colour-tagged grouping that owns checklist items.
//!
//! # Invariants
//! - `id` is stable and never reused for another category.
//! - `title` is not guaranteed unique; identity is `id`.
//! - `color` is set once by the constructor and has no setter.

use crate::model::color::HexColor;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a category.
pub type CategoryId = Uuid;

/// Named grouping of checklist items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    /// Hex colour picked from the flat palette at creation time.
    pub color: HexColor,
}

impl Category {
    /// Creates a category with a generated stable ID.
    pub fn new(title: impl Into<String>, color: HexColor) -> Self {
        Self::with_id(Uuid::new_v4(), title, color)
    }

    /// Creates a category with a caller-provided ID.
    ///
    /// Used when rebuilding rows read from the store.
    pub fn with_id(id: CategoryId, title: impl Into<String>, color: HexColor) -> Self {
        Self {
            id,
            title: title.into(),
            color,
        }
    }

    /// Back-reference handed to items owned by this category.
    pub fn to_ref(&self) -> CategoryRef {
        CategoryRef {
            id: self.id,
            title: self.title.clone(),
        }
    }
}

/// Owning-category link carried by an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub title: String,
}

/// Normalizes user-entered titles.
///
/// Returns `None` for absent, empty or whitespace-only input. Anything else
/// is kept exactly as typed.
pub fn normalize_title(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_title;

    #[test]
    fn normalize_title_rejects_blank_input() {
        assert_eq!(normalize_title(None), None);
        assert_eq!(normalize_title(Some("")), None);
        assert_eq!(normalize_title(Some("   \t")), None);
    }

    #[test]
    fn normalize_title_keeps_title_as_typed() {
        assert_eq!(normalize_title(Some("  Home ")).as_deref(), Some("  Home "));
    }
}
