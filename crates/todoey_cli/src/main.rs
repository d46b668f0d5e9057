//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `todoey_core` linkage without the mobile shell.
//! - Run one category/item round trip on an in-memory store.
//! - Keep output deterministic for quick local sanity checks.

use std::error::Error;
use todoey_core::db::open_db_in_memory;
use todoey_core::{
    CategoryService, FixedPalettePicker, ItemService, NoopObserver, SqliteTodoStore, TodoeyConfig,
};

fn main() -> Result<(), Box<dyn Error>> {
    println!("todoey_core ping={}", todoey_core::ping());
    println!("todoey_core version={}", todoey_core::core_version());

    let conn = open_db_in_memory()?;
    let store = SqliteTodoStore::try_new(&conn)?;
    let config = TodoeyConfig::default();

    let mut categories = CategoryService::new(&store, NoopObserver, &config)
        .with_picker(FixedPalettePicker::default());
    let category = categories
        .create("Smoke")
        .ok_or("smoke category was not created")?;

    let mut items = ItemService::new(&store, NoopObserver, category.clone(), &config);
    let item = items.create("Check linkage").ok_or("smoke item was not created")?;
    let is_done = items.toggle_done(item.id).unwrap_or(false);

    println!(
        "todoey_core smoke categories={} items={} color={} done={}",
        categories.load().len(),
        items.load().len(),
        category.color,
        is_done
    );
    Ok(())
}
