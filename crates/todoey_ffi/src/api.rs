//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose category and item list use-cases to Dart via FRB.
//! - Turn service callbacks into plain response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every list response carries the list the screen should render next.

use log::{info, warn};
use std::path::PathBuf;
use std::sync::OnceLock;
use todoey_core::db::open_db;
use todoey_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Category, CategoryId, CategoryService, Item, ItemService, RecordingObserver, SqliteTodoStore,
    TodoeyConfig,
};
use uuid::Uuid;

const DB_FILE_NAME: &str = "todoey.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static CONFIG: OnceLock<TodoeyConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Installs list behaviour configuration from a JSON document.
///
/// # FFI contract
/// - Must be called before the first list call to take effect.
/// - Repeating the same configuration is accepted; a different one is
///   rejected once a configuration is active.
/// - Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn configure(config_json: String) -> String {
    let requested = match TodoeyConfig::from_json_str(config_json.as_str()) {
        Ok(config) => config,
        Err(err) => return err.to_string(),
    };
    let active = CONFIG.get_or_init(|| requested.clone());
    if *active == requested {
        info!(
            "event=ffi_configure module=ffi status=ok item_scope={:?} category_delete={:?}",
            active.item_scope, active.category_delete
        );
        String::new()
    } else {
        warn!("event=ffi_configure module=ffi status=error error_code=config_conflict");
        "configuration already active; restart to change it".to_string()
    }
}

/// Category row ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub id: String,
    pub title: String,
    /// Stored hex colour.
    pub color: String,
    /// Contrast text colour, `None` when `color` cannot be parsed.
    pub text_color: Option<String>,
}

/// Item row ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub id: String,
    pub title: String,
    pub is_done: bool,
    /// Category colour darkened by row position; `None` when unparsable.
    pub color: Option<String>,
    pub text_color: Option<String>,
}

/// Category list envelope returned by every category call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListResponse {
    /// `false` when any store operation failed during the call.
    pub ok: bool,
    pub items: Vec<CategoryView>,
    pub message: String,
}

/// Item list envelope returned by every item call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemListResponse {
    pub ok: bool,
    pub items: Vec<ItemView>,
    pub message: String,
}

/// Lists categories, optionally filtered by title substring.
#[flutter_rust_bridge::frb(sync)]
pub fn category_list(filter: Option<String>) -> CategoryListResponse {
    with_category_service(|service| {
        let count = service.list(filter.as_deref()).len();
        format!("{count} categories.")
    })
}

/// Creates a category; blank titles leave the list unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn category_create(title: Option<String>) -> CategoryListResponse {
    with_category_service(|service| {
        service.load();
        match service.create(title.as_deref().unwrap_or_default()) {
            Some(_) => "Category created.".to_string(),
            None => "Category title is empty.".to_string(),
        }
    })
}

/// Deletes a category by ID.
#[flutter_rust_bridge::frb(sync)]
pub fn category_delete(category_id: String) -> CategoryListResponse {
    let id = match parse_id(category_id.as_str()) {
        Ok(id) => id,
        Err(message) => return CategoryListResponse::failure(message),
    };
    with_category_service(|service| {
        service.load();
        match service.delete(id) {
            Some(_) => "Category deleted.".to_string(),
            None => format!("category not found: {id}"),
        }
    })
}

/// Lists items of one category, optionally filtered by title substring.
#[flutter_rust_bridge::frb(sync)]
pub fn item_list(category_id: String, filter: Option<String>) -> ItemListResponse {
    with_item_service(category_id.as_str(), |service| {
        let count = service.list(filter.as_deref()).len();
        format!("{count} items.")
    })
}

/// Creates a pending item in one category.
#[flutter_rust_bridge::frb(sync)]
pub fn item_create(category_id: String, title: Option<String>) -> ItemListResponse {
    with_item_service(category_id.as_str(), |service| {
        service.load();
        match service.create(title.as_deref().unwrap_or_default()) {
            Some(_) => "Item created.".to_string(),
            None => "Item title is empty.".to_string(),
        }
    })
}

/// Flips the done flag of one item.
#[flutter_rust_bridge::frb(sync)]
pub fn item_toggle_done(category_id: String, item_id: String) -> ItemListResponse {
    let id = match parse_id(item_id.as_str()) {
        Ok(id) => id,
        Err(message) => return ItemListResponse::failure(message),
    };
    with_item_service(category_id.as_str(), |service| {
        service.load();
        match service.toggle_done(id) {
            Some(true) => "Item done.".to_string(),
            Some(false) => "Item pending.".to_string(),
            None => format!("item not found: {id}"),
        }
    })
}

/// Deletes one item.
#[flutter_rust_bridge::frb(sync)]
pub fn item_delete(category_id: String, item_id: String) -> ItemListResponse {
    let id = match parse_id(item_id.as_str()) {
        Ok(id) => id,
        Err(message) => return ItemListResponse::failure(message),
    };
    with_item_service(category_id.as_str(), |service| {
        service.load();
        match service.delete(id) {
            Some(_) => "Item deleted.".to_string(),
            None => format!("item not found: {id}"),
        }
    })
}

impl CategoryListResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message: message.into(),
        }
    }
}

impl ItemListResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message: message.into(),
        }
    }
}

type FfiCategoryService<'conn> =
    CategoryService<SqliteTodoStore<'conn>, RecordingObserver<Category>>;
type FfiItemService<'conn> = ItemService<SqliteTodoStore<'conn>, RecordingObserver<Item>>;

fn with_category_service(
    f: impl FnOnce(&mut FfiCategoryService<'_>) -> String,
) -> CategoryListResponse {
    let conn = match open_db(resolve_db_path()) {
        Ok(conn) => conn,
        Err(err) => return CategoryListResponse::failure(format!("DB open failed: {err}")),
    };
    let store = match SqliteTodoStore::try_new(&conn) {
        Ok(store) => store,
        Err(err) => return CategoryListResponse::failure(format!("store init failed: {err}")),
    };

    let mut service = CategoryService::new(store, RecordingObserver::new(), active_config());
    let message = f(&mut service);
    let errors = service.observer_mut().take_errors();
    CategoryListResponse {
        ok: errors.is_empty(),
        items: service.categories().iter().map(to_category_view).collect(),
        message: merge_message(message, errors),
    }
}

fn with_item_service(
    category_id: &str,
    f: impl FnOnce(&mut FfiItemService<'_>) -> String,
) -> ItemListResponse {
    let category_id = match parse_id(category_id) {
        Ok(id) => id,
        Err(message) => return ItemListResponse::failure(message),
    };
    let conn = match open_db(resolve_db_path()) {
        Ok(conn) => conn,
        Err(err) => return ItemListResponse::failure(format!("DB open failed: {err}")),
    };
    let category = match find_category(&conn, category_id) {
        Ok(category) => category,
        Err(message) => return ItemListResponse::failure(message),
    };
    let store = match SqliteTodoStore::try_new(&conn) {
        Ok(store) => store,
        Err(err) => return ItemListResponse::failure(format!("store init failed: {err}")),
    };

    let mut service = ItemService::new(store, RecordingObserver::new(), category, active_config());
    let message = f(&mut service);
    let errors = service.observer_mut().take_errors();
    ItemListResponse {
        ok: errors.is_empty(),
        items: item_views(service.category(), service.items()),
        message: merge_message(message, errors),
    }
}

fn find_category(conn: &rusqlite::Connection, id: CategoryId) -> Result<Category, String> {
    let store =
        SqliteTodoStore::try_new(conn).map_err(|err| format!("store init failed: {err}"))?;
    let mut service = CategoryService::new(store, RecordingObserver::new(), active_config());
    service.load();
    if let Some(err) = service.observer_mut().take_errors().into_iter().next() {
        return Err(err);
    }
    service
        .categories()
        .iter()
        .find(|category| category.id == id)
        .cloned()
        .ok_or_else(|| format!("category not found: {id}"))
}

fn merge_message(message: String, errors: Vec<String>) -> String {
    if errors.is_empty() {
        message
    } else {
        errors.join("; ")
    }
}

fn parse_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid id `{raw}`"))
}

fn active_config() -> &'static TodoeyConfig {
    CONFIG.get_or_init(TodoeyConfig::default)
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("TODOEY_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn to_category_view(category: &Category) -> CategoryView {
    CategoryView {
        id: category.id.to_string(),
        title: category.title.clone(),
        color: category.color.to_string(),
        text_color: category
            .color
            .parse_rgb()
            .map(|rgb| rgb.contrast_text().to_hex().to_string()),
    }
}

fn item_views(category: &Category, items: &[Item]) -> Vec<ItemView> {
    let base = category.color.parse_rgb();
    items
        .iter()
        .enumerate()
        .map(|(row, item)| {
            let shade = base.map(|rgb| rgb.darken(row as f32 / items.len() as f32));
            ItemView {
                id: item.id.to_string(),
                title: item.title.clone(),
                is_done: item.is_done,
                color: shade.map(|rgb| rgb.to_hex().to_string()),
                text_color: shade.map(|rgb| rgb.contrast_text().to_hex().to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        category_create, category_delete, category_list, configure, core_version, init_logging,
        item_create, item_delete, item_list, item_toggle_done, ping,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn configure_rejects_malformed_json() {
        let error = configure("{not json".to_string());
        assert!(error.contains("invalid configuration"));
    }

    #[test]
    fn configure_accepts_default_document() {
        assert_eq!(configure("{}".to_string()), "");
    }

    #[test]
    fn category_create_and_search_round_trip() {
        let token = unique_token("errands");
        let created = category_create(Some(format!("Café {token}")));
        assert!(created.ok, "{}", created.message);
        let view = created
            .items
            .iter()
            .find(|category| category.title.ends_with(&token))
            .expect("created category should be listed")
            .clone();
        assert!(view.text_color.is_some());

        let found = category_list(Some(format!("cafe {}", token.to_uppercase())));
        assert!(found.ok, "{}", found.message);
        assert_eq!(found.items, vec![view.clone()]);

        let deleted = category_delete(view.id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert!(deleted.items.iter().all(|category| category.id != view.id));
    }

    #[test]
    fn blank_category_title_is_reported_without_failure() {
        let response = category_create(None);
        assert!(response.ok);
        assert_eq!(response.message, "Category title is empty.");
    }

    #[test]
    fn item_flow_creates_toggles_and_deletes() {
        let token = unique_token("items");
        let created = category_create(Some(token.clone()));
        let category_id = created
            .items
            .iter()
            .find(|category| category.title == token)
            .expect("category should exist")
            .id
            .clone();

        let with_item = item_create(category_id.clone(), Some("Buy milk".to_string()));
        assert!(with_item.ok, "{}", with_item.message);
        assert_eq!(with_item.items.len(), 1);
        let item_id = with_item.items[0].id.clone();
        assert!(!with_item.items[0].is_done);
        let owner_color = created
            .items
            .iter()
            .find(|category| category.id == category_id)
            .map(|category| category.color.clone());
        assert_eq!(with_item.items[0].color, owner_color);
        assert!(with_item.items[0].text_color.is_some());

        let toggled = item_toggle_done(category_id.clone(), item_id.clone());
        assert!(toggled.items[0].is_done);
        assert_eq!(toggled.message, "Item done.");

        let listed = item_list(category_id.clone(), Some("MILK".to_string()));
        assert_eq!(listed.items.len(), 1);
        assert!(listed.items[0].is_done);

        let deleted = item_delete(category_id, item_id);
        assert!(deleted.ok, "{}", deleted.message);
        assert!(deleted.items.is_empty());
    }

    #[test]
    fn item_calls_reject_unknown_category() {
        let response = item_list(uuid::Uuid::new_v4().to_string(), None);
        assert!(!response.ok);
        assert!(response.message.contains("category not found"));

        let invalid = item_list("not-a-uuid".to_string(), None);
        assert!(invalid.message.contains("invalid id"));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
