//! Store contract shared by category and item services.
//!
//! # Responsibility
//! - Describe fetch requests (predicate + sort order) per entity kind.
//! - Describe staged mutations applied atomically on commit.
//! - Define the single `StoreError` kind surfaced to services.

use crate::db::DbError;
use crate::model::category::{Category, CategoryId};
use crate::model::item::{Item, ItemId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for every fetch and commit failure.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted row cannot be converted into a domain value.
    InvalidData(String),
    /// Failure injected by a non-SQLite store implementation.
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store connection not initialized: expected schema version {expected_version}, found {actual_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Result ordering for fetch requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchOrder {
    /// Store default order (insertion order for SQLite).
    #[default]
    Insertion,
    TitleAscending,
}

/// Fetch request for categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFetch {
    /// Case/diacritic-insensitive "title contains" predicate.
    pub title_contains: Option<String>,
    pub order: FetchOrder,
}

/// How item fetches are constrained to an owning category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemScope {
    /// Items whose owning category has this ID.
    CategoryId(CategoryId),
    /// Items whose owning category has exactly this title, whichever
    /// category that is.
    ///
    /// Titles are compared with plain equality, never as patterns, so a
    /// title such as `C++` only matches itself.
    CategoryTitle(String),
}

/// Fetch request for items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFetch {
    pub scope: ItemScope,
    /// ANDed with `scope` when present.
    pub title_contains: Option<String>,
    pub order: FetchOrder,
}

/// Mutation buffered until the next commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedChange {
    InsertCategory(Category),
    DeleteCategory(CategoryId),
    InsertItem(Item),
    SetItemDone { id: ItemId, is_done: bool },
    DeleteItem(ItemId),
    DeleteItemsOfCategory(CategoryId),
}

/// Persistent store consumed by list services.
pub trait TodoStore {
    fn fetch_categories(&self, fetch: &CategoryFetch) -> StoreResult<Vec<Category>>;
    fn fetch_items(&self, fetch: &ItemFetch) -> StoreResult<Vec<Item>>;
    /// Buffers a change; nothing is written until [`TodoStore::commit`].
    fn stage(&self, change: StagedChange);
    /// Number of changes waiting for commit.
    fn staged_len(&self) -> usize;
    /// Durably applies every staged change in one unit.
    ///
    /// The staged buffer is empty afterwards whether or not the commit
    /// succeeded.
    fn commit(&self) -> StoreResult<()>;
}

/// Normalizes a user-entered search filter.
///
/// Only the empty string means "no filter"; whitespace is a real substring.
pub fn normalize_filter(filter: Option<&str>) -> Option<String> {
    match filter {
        Some(value) if !value.is_empty() => Some(value.to_string()),
        _ => None,
    }
}

impl<T: TodoStore + ?Sized> TodoStore for &T {
    fn fetch_categories(&self, fetch: &CategoryFetch) -> StoreResult<Vec<Category>> {
        (**self).fetch_categories(fetch)
    }

    fn fetch_items(&self, fetch: &ItemFetch) -> StoreResult<Vec<Item>> {
        (**self).fetch_items(fetch)
    }

    fn stage(&self, change: StagedChange) {
        (**self).stage(change);
    }

    fn staged_len(&self) -> usize {
        (**self).staged_len()
    }

    fn commit(&self) -> StoreResult<()> {
        (**self).commit()
    }
}
