//! Core behaviour configuration.
//!
//! # Responsibility
//! - Hold the switches that pick between fixed and legacy list behaviour.
//! - Parse configuration handed over by the presentation shell as JSON.
//!
//! # Invariants
//! - Missing fields fall back to `TodoeyConfig::default()`.
//! - Unknown enum values are rejected instead of silently defaulted.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// How an item list is tied to its owning category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemScopeMatching {
    /// Match on the owning category ID.
    #[default]
    ById,
    /// Match on the owning category title; same-titled categories share items.
    ByTitle,
}

/// What happens to owned items when a category is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryDeletePolicy {
    /// Owned items are deleted in the same commit.
    #[default]
    Cascade,
    /// Owned items stay in the store without a category.
    Orphan,
}

/// Configuration for list services and the FFI shell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoeyConfig {
    pub item_scope: ItemScopeMatching,
    pub category_delete: CategoryDeletePolicy,
    /// Overrides `default_log_level()` when set.
    pub log_level: Option<String>,
}

impl TodoeyConfig {
    /// Parses a JSON configuration document.
    ///
    /// An empty or whitespace-only document yields the defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(ConfigError::Parse)
    }
}

/// Configuration parsing error.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
        }
    }
}
