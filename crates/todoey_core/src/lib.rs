//! Core domain logic for Todoey.
//! This crate owns categories, checklist items and their SQLite store.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{CategoryDeletePolicy, ConfigError, ItemScopeMatching, TodoeyConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryId, CategoryRef};
pub use model::color::{
    FixedPalettePicker, HexColor, PalettePicker, RandomPalettePicker, Rgb, FLAT_PALETTE,
};
pub use model::item::{Item, ItemId, ItemState};
pub use repo::sqlite_store::SqliteTodoStore;
pub use repo::store::{
    CategoryFetch, FetchOrder, ItemFetch, ItemScope, StagedChange, StoreError, StoreResult,
    TodoStore,
};
pub use service::category_service::CategoryService;
pub use service::item_service::ItemService;
pub use service::observer::{ListObserver, NoopObserver, RecordingObserver};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
