//! SQLite-backed store with staged commits.
//!
//! # Responsibility
//! - Translate fetch requests into parameterized SQL.
//! - Buffer staged changes and apply them in one transaction on commit.
//!
//! # Invariants
//! - Constructed only over migrated connections (`try_new` checks schema).
//! - Title predicates use `fold_text` so matching is case and diacritic
//!   insensitive.
//! - A failed commit rolls back every change of that commit.

use crate::db::migrations::latest_version;
use crate::model::category::{Category, CategoryRef};
use crate::model::color::HexColor;
use crate::model::item::Item;
use crate::repo::store::{
    CategoryFetch, FetchOrder, ItemFetch, ItemScope, StagedChange, StoreError, StoreResult,
    TodoStore,
};
use log::{debug, error, info, warn};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction};
use std::cell::RefCell;
use std::time::Instant;
use uuid::Uuid;

const CATEGORY_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    color
FROM categories";

const ITEM_SELECT_SQL: &str = "SELECT
    items.uuid AS uuid,
    items.title AS title,
    items.is_done AS is_done,
    categories.uuid AS category_uuid,
    categories.title AS category_title
FROM items
LEFT JOIN categories ON categories.uuid = items.category_uuid";

/// SQLite implementation of [`TodoStore`].
pub struct SqliteTodoStore<'conn> {
    conn: &'conn Connection,
    staged: RefCell<Vec<StagedChange>>,
}

impl<'conn> SqliteTodoStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_store_connection_ready(conn)?;
        Ok(Self {
            conn,
            staged: RefCell::new(Vec::new()),
        })
    }
}

impl TodoStore for SqliteTodoStore<'_> {
    fn fetch_categories(&self, fetch: &CategoryFetch) -> StoreResult<Vec<Category>> {
        let mut sql = format!("{CATEGORY_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(needle) = fetch.title_contains.as_ref() {
            sql.push_str(" AND instr(fold_text(title), fold_text(?)) > 0");
            bind_values.push(Value::Text(needle.clone()));
        }

        match fetch.order {
            FetchOrder::Insertion => sql.push_str(" ORDER BY rowid ASC"),
            FetchOrder::TitleAscending => sql.push_str(" ORDER BY title ASC, rowid ASC"),
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }

        debug!(
            "event=store_fetch module=store entity=category status=ok filtered={} count={}",
            fetch.title_contains.is_some(),
            categories.len()
        );
        Ok(categories)
    }

    fn fetch_items(&self, fetch: &ItemFetch) -> StoreResult<Vec<Item>> {
        let mut sql = format!("{ITEM_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        match &fetch.scope {
            ItemScope::CategoryId(id) => {
                sql.push_str(" AND items.category_uuid = ?");
                bind_values.push(Value::Text(id.to_string()));
            }
            ItemScope::CategoryTitle(title) => {
                sql.push_str(" AND categories.title = ?");
                bind_values.push(Value::Text(title.clone()));
            }
        }

        if let Some(needle) = fetch.title_contains.as_ref() {
            sql.push_str(" AND instr(fold_text(items.title), fold_text(?)) > 0");
            bind_values.push(Value::Text(needle.clone()));
        }

        match fetch.order {
            FetchOrder::Insertion => sql.push_str(" ORDER BY items.rowid ASC"),
            FetchOrder::TitleAscending => {
                sql.push_str(" ORDER BY items.title ASC, items.rowid ASC")
            }
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        debug!(
            "event=store_fetch module=store entity=item status=ok filtered={} count={}",
            fetch.title_contains.is_some(),
            items.len()
        );
        Ok(items)
    }

    fn stage(&self, change: StagedChange) {
        self.staged.borrow_mut().push(change);
    }

    fn staged_len(&self) -> usize {
        self.staged.borrow().len()
    }

    fn commit(&self) -> StoreResult<()> {
        let changes = self.staged.take();
        if changes.is_empty() {
            return Ok(());
        }

        let started_at = Instant::now();
        match apply_changes(self.conn, &changes) {
            Ok(()) => {
                info!(
                    "event=store_commit module=store status=ok changes={} duration_ms={}",
                    changes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_commit module=store status=error changes={} duration_ms={} error={}",
                    changes.len(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn apply_changes(conn: &Connection, changes: &[StagedChange]) -> StoreResult<()> {
    let tx = conn.unchecked_transaction()?;
    for change in changes {
        apply_change(&tx, change)?;
    }
    tx.commit()?;
    Ok(())
}

fn apply_change(tx: &Transaction<'_>, change: &StagedChange) -> StoreResult<()> {
    match change {
        StagedChange::InsertCategory(category) => {
            tx.execute(
                "INSERT INTO categories (uuid, title, color) VALUES (?1, ?2, ?3);",
                params![
                    category.id.to_string(),
                    category.title.as_str(),
                    category.color.as_str()
                ],
            )?;
        }
        StagedChange::DeleteCategory(id) => {
            let changed = tx.execute("DELETE FROM categories WHERE uuid = ?1;", [id.to_string()])?;
            if changed == 0 {
                warn!("event=store_commit module=store status=skip reason=category_missing id={id}");
            }
        }
        StagedChange::InsertItem(item) => {
            tx.execute(
                "INSERT INTO items (uuid, title, is_done, category_uuid)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    item.id.to_string(),
                    item.title.as_str(),
                    bool_to_int(item.is_done),
                    item.category.as_ref().map(|owner| owner.id.to_string()),
                ],
            )?;
        }
        StagedChange::SetItemDone { id, is_done } => {
            let changed = tx.execute(
                "UPDATE items SET is_done = ?1 WHERE uuid = ?2;",
                params![bool_to_int(*is_done), id.to_string()],
            )?;
            if changed == 0 {
                warn!("event=store_commit module=store status=skip reason=item_missing id={id}");
            }
        }
        StagedChange::DeleteItem(id) => {
            let changed = tx.execute("DELETE FROM items WHERE uuid = ?1;", [id.to_string()])?;
            if changed == 0 {
                warn!("event=store_commit module=store status=skip reason=item_missing id={id}");
            }
        }
        StagedChange::DeleteItemsOfCategory(id) => {
            tx.execute(
                "DELETE FROM items WHERE category_uuid = ?1;",
                [id.to_string()],
            )?;
        }
    }
    Ok(())
}

fn parse_category_row(row: &Row<'_>) -> StoreResult<Category> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "categories.uuid")?;
    let color: String = row.get("color")?;
    Ok(Category::with_id(
        id,
        row.get::<_, String>("title")?,
        HexColor::new(color),
    ))
}

fn parse_item_row(row: &Row<'_>) -> StoreResult<Item> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "items.uuid")?;

    let is_done = match row.get::<_, i64>("is_done")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid is_done value `{other}` in items.is_done"
            )));
        }
    };

    let category = match row.get::<_, Option<String>>("category_uuid")? {
        Some(value) => Some(CategoryRef {
            id: parse_uuid(&value, "items.category_uuid")?,
            title: row.get("category_title")?,
        }),
        None => None,
    };

    Ok(Item {
        id,
        title: row.get("title")?,
        is_done,
        category,
    })
}

fn parse_uuid(value: &str, column: &'static str) -> StoreResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn ensure_store_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let required: [(&'static str, &[&'static str]); 2] = [
        ("categories", &["uuid", "title", "color"]),
        ("items", &["uuid", "title", "is_done", "category_uuid"]),
    ];
    for (table, columns) in required {
        if !table_exists(conn, table)? {
            return Err(StoreError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(StoreError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
