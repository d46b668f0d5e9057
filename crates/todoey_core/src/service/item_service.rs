//! Item list use-cases scoped to one category.
//!
//! # Responsibility
//! - List, search, create, toggle and delete checklist items of a category.
//!
//! # Invariants
//! - Every fetch is constrained to the current category; a title filter is
//!   ANDed with that constraint.
//! - New items start pending and reference the current category.
//! - Re-scoping to another category reloads immediately.

use crate::config::{ItemScopeMatching, TodoeyConfig};
use crate::model::category::{normalize_title, Category};
use crate::model::item::{Item, ItemId};
use crate::repo::store::{
    normalize_filter, FetchOrder, ItemFetch, ItemScope, StagedChange, StoreError, TodoStore,
};
use crate::service::observer::ListObserver;
use log::{error, info};

/// Stateful item list for one category over a [`TodoStore`].
pub struct ItemService<S: TodoStore, O: ListObserver<Item>> {
    store: S,
    observer: O,
    scope_matching: ItemScopeMatching,
    category: Category,
    items: Vec<Item>,
}

impl<S: TodoStore, O: ListObserver<Item>> ItemService<S, O> {
    /// Creates a service scoped to `category`; call [`Self::load`] to populate it.
    pub fn new(store: S, observer: O, category: Category, config: &TodoeyConfig) -> Self {
        Self {
            store,
            observer,
            scope_matching: config.item_scope,
            category,
            items: Vec::new(),
        }
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Current in-memory list.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Re-scopes the service and reloads.
    pub fn set_category(&mut self, category: Category) -> &[Item] {
        self.category = category;
        self.load()
    }

    /// Reloads every item of the current category in store order.
    pub fn load(&mut self) -> &[Item] {
        self.list(None)
    }

    /// Reloads the list, optionally narrowed to titles containing `filter`.
    ///
    /// An empty filter behaves like `None`. On fetch failure the previous list
    /// is kept and the error is reported.
    pub fn list(&mut self, filter: Option<&str>) -> &[Item] {
        let title_contains = normalize_filter(filter);
        let order = if title_contains.is_some() {
            FetchOrder::TitleAscending
        } else {
            FetchOrder::Insertion
        };
        let fetch = ItemFetch {
            scope: self.scope(),
            title_contains,
            order,
        };

        match self.store.fetch_items(&fetch) {
            Ok(items) => self.items = items,
            Err(err) => self.report_error("item_list", &err),
        }
        self.observer.on_list_changed(&self.items);
        &self.items
    }

    /// Creates a pending item in the current category and commits it.
    ///
    /// Returns `None` without touching the store when `title` is blank.
    pub fn create(&mut self, title: &str) -> Option<Item> {
        let title = normalize_title(Some(title))?;
        let item = Item::new(title, &self.category);

        self.store.stage(StagedChange::InsertItem(item.clone()));
        self.items.push(item.clone());
        info!(
            "event=item_create module=service status=staged id={} category_id={}",
            item.id, self.category.id
        );
        self.save("item_create");
        Some(item)
    }

    /// Flips the done flag of `id` and commits.
    ///
    /// Returns the new flag, or `None` when `id` is not in the current list.
    pub fn toggle_done(&mut self, id: ItemId) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        let is_done = item.toggle_done().is_done();

        self.store.stage(StagedChange::SetItemDone { id, is_done });
        info!("event=item_toggle module=service status=staged id={id} is_done={is_done}");
        self.save("item_toggle");
        Some(is_done)
    }

    /// Deletes the item with `id`, if it is in the current list.
    pub fn delete(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        self.delete_at(index)
    }

    /// Deletes the item at `index` of the current list.
    pub fn delete_at(&mut self, index: usize) -> Option<Item> {
        if index >= self.items.len() {
            return None;
        }

        let removed = self.items.remove(index);
        self.store.stage(StagedChange::DeleteItem(removed.id));
        info!(
            "event=item_delete module=service status=staged id={}",
            removed.id
        );
        self.save("item_delete");
        Some(removed)
    }

    fn scope(&self) -> ItemScope {
        match self.scope_matching {
            ItemScopeMatching::ById => ItemScope::CategoryId(self.category.id),
            ItemScopeMatching::ByTitle => ItemScope::CategoryTitle(self.category.title.clone()),
        }
    }

    fn save(&mut self, operation: &'static str) {
        if let Err(err) = self.store.commit() {
            self.report_error(operation, &err);
        }
        self.observer.on_list_changed(&self.items);
    }

    fn report_error(&mut self, operation: &'static str, err: &StoreError) {
        error!("event={operation} module=service status=error error={err}");
        self.observer.on_error(&err.to_string());
    }
}
