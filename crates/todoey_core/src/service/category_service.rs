//! Category list use-cases.
//!
//! # Responsibility
//! - List, search, create and delete categories.
//! - Assign each new category a palette colour.
//!
//! # Invariants
//! - The in-memory list is replaced wholesale on every fetch.
//! - Filtered lists are sorted by title ascending; unfiltered lists keep
//!   store order.
//! - Blank titles never reach the store.
//! - A failed fetch keeps the previous list.

use crate::config::{CategoryDeletePolicy, TodoeyConfig};
use crate::model::category::{normalize_title, Category, CategoryId};
use crate::model::color::{PalettePicker, RandomPalettePicker};
use crate::repo::store::{
    normalize_filter, CategoryFetch, FetchOrder, StagedChange, StoreError, TodoStore,
};
use crate::service::observer::ListObserver;
use log::{error, info};

/// Stateful category list over a [`TodoStore`].
pub struct CategoryService<S: TodoStore, O: ListObserver<Category>> {
    store: S,
    observer: O,
    picker: Box<dyn PalettePicker>,
    delete_policy: CategoryDeletePolicy,
    categories: Vec<Category>,
}

impl<S: TodoStore, O: ListObserver<Category>> CategoryService<S, O> {
    /// Creates a service with an empty list; call [`Self::load`] to populate it.
    pub fn new(store: S, observer: O, config: &TodoeyConfig) -> Self {
        Self {
            store,
            observer,
            picker: Box::new(RandomPalettePicker),
            delete_policy: config.category_delete,
            categories: Vec::new(),
        }
    }

    /// Replaces the colour source for new categories.
    pub fn with_picker(mut self, picker: impl PalettePicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    /// Current in-memory list.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Reloads every category in store order.
    pub fn load(&mut self) -> &[Category] {
        self.list(None)
    }

    /// Reloads the list, optionally narrowed to titles containing `filter`.
    ///
    /// An empty filter behaves like `None`. On fetch failure the previous list
    /// is kept and the error is reported.
    pub fn list(&mut self, filter: Option<&str>) -> &[Category] {
        let title_contains = normalize_filter(filter);
        let order = if title_contains.is_some() {
            FetchOrder::TitleAscending
        } else {
            FetchOrder::Insertion
        };
        let fetch = CategoryFetch {
            title_contains,
            order,
        };

        match self.store.fetch_categories(&fetch) {
            Ok(categories) => self.categories = categories,
            Err(err) => self.report_error("category_list", &err),
        }
        self.observer.on_list_changed(&self.categories);
        &self.categories
    }

    /// Creates a category with a palette colour and commits it.
    ///
    /// Returns `None` without touching the store when `title` is blank.
    pub fn create(&mut self, title: &str) -> Option<Category> {
        let title = normalize_title(Some(title))?;
        let category = Category::new(title, self.picker.pick_color());

        self.store
            .stage(StagedChange::InsertCategory(category.clone()));
        self.categories.push(category.clone());
        info!(
            "event=category_create module=service status=staged id={}",
            category.id
        );
        self.save("category_create");
        Some(category)
    }

    /// Deletes the category with `id`, if it is in the current list.
    pub fn delete(&mut self, id: CategoryId) -> Option<Category> {
        let index = self
            .categories
            .iter()
            .position(|category| category.id == id)?;
        self.delete_at(index)
    }

    /// Deletes the category at `index` of the current list.
    ///
    /// Owned items are deleted too under [`CategoryDeletePolicy::Cascade`].
    pub fn delete_at(&mut self, index: usize) -> Option<Category> {
        if index >= self.categories.len() {
            return None;
        }

        let removed = self.categories.remove(index);
        if self.delete_policy == CategoryDeletePolicy::Cascade {
            self.store
                .stage(StagedChange::DeleteItemsOfCategory(removed.id));
        }
        self.store.stage(StagedChange::DeleteCategory(removed.id));
        info!(
            "event=category_delete module=service status=staged id={} policy={:?}",
            removed.id, self.delete_policy
        );
        self.save("category_delete");
        Some(removed)
    }

    fn save(&mut self, operation: &'static str) {
        if let Err(err) = self.store.commit() {
            self.report_error(operation, &err);
        }
        self.observer.on_list_changed(&self.categories);
    }

    fn report_error(&mut self, operation: &'static str, err: &StoreError) {
        error!("event={operation} module=service status=error error={err}");
        self.observer.on_error(&err.to_string());
    }
}
