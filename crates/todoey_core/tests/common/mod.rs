#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use todoey_core::{
    Category, CategoryFetch, Item, ItemFetch, SqliteTodoStore, StagedChange, StoreError,
    StoreResult, TodoStore,
};

/// Store double that can fail fetches or commits on demand.
pub struct FlakyStore<'conn> {
    inner: SqliteTodoStore<'conn>,
    staged: RefCell<Vec<StagedChange>>,
    pub fail_fetch: Cell<bool>,
    pub fail_commit: Cell<bool>,
    pub fetch_calls: Cell<usize>,
    pub commit_calls: Cell<usize>,
}

impl<'conn> FlakyStore<'conn> {
    pub fn new(inner: SqliteTodoStore<'conn>) -> Self {
        Self {
            inner,
            staged: RefCell::new(Vec::new()),
            fail_fetch: Cell::new(false),
            fail_commit: Cell::new(false),
            fetch_calls: Cell::new(0),
            commit_calls: Cell::new(0),
        }
    }

    fn check_fetch(&self) -> StoreResult<()> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        if self.fail_fetch.get() {
            return Err(StoreError::Unavailable("fetch failed".to_string()));
        }
        Ok(())
    }
}

impl TodoStore for FlakyStore<'_> {
    fn fetch_categories(&self, fetch: &CategoryFetch) -> StoreResult<Vec<Category>> {
        self.check_fetch()?;
        self.inner.fetch_categories(fetch)
    }

    fn fetch_items(&self, fetch: &ItemFetch) -> StoreResult<Vec<Item>> {
        self.check_fetch()?;
        self.inner.fetch_items(fetch)
    }

    fn stage(&self, change: StagedChange) {
        self.staged.borrow_mut().push(change);
    }

    fn staged_len(&self) -> usize {
        self.staged.borrow().len()
    }

    fn commit(&self) -> StoreResult<()> {
        self.commit_calls.set(self.commit_calls.get() + 1);
        let changes = self.staged.take();
        if self.fail_commit.get() {
            return Err(StoreError::Unavailable("commit failed".to_string()));
        }
        for change in changes {
            self.inner.stage(change);
        }
        self.inner.commit()
    }
}
