mod common;

use common::FlakyStore;
use todoey_core::db::open_db_in_memory;
use todoey_core::{
    Category, CategoryDeletePolicy, CategoryService, FixedPalettePicker, ItemService,
    RecordingObserver, SqliteTodoStore, TodoeyConfig, FLAT_PALETTE,
};

fn titles(categories: &[Category]) -> Vec<&str> {
    categories
        .iter()
        .map(|category| category.title.as_str())
        .collect()
}

#[test]
fn create_adds_exactly_one_visible_category() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTodoStore::try_new(&conn).unwrap();
    let mut service =
        CategoryService::new(store, RecordingObserver::new(), &TodoeyConfig::default());
    service.load();
    service.create("Home").unwrap();
    let before = service.load().len();

    let created = service.create("Home").unwrap();

    let listed = service.load();
    assert_eq!(listed.len(), before + 1);
    assert_eq!(
        listed.iter().filter(|category| category.id == created.id).count(),
        1
    );
}

#[test]
fn create_assigns_palette_color() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTodoStore::try_new(&conn).unwrap();
    let mut service =
        CategoryService::new(store, RecordingObserver::new(), &TodoeyConfig::default())
            .with_picker(FixedPalettePicker::starting_at(4));

    let created = service.create("Work").unwrap();
    assert_eq!(created.color.as_str(), FLAT_PALETTE[4]);

    let random = CategoryService::new(
        SqliteTodoStore::try_new(&conn).unwrap(),
        RecordingObserver::new(),
        &TodoeyConfig::default(),
    )
    .create("Gym")
    .unwrap();
    assert!(FLAT_PALETTE.contains(&random.color.as_str()));
    assert!(random.color.parse_rgb().is_some());
}

#[test]
fn filter_matches_substring_case_insensitively_sorted_by_title() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTodoStore::try_new(&conn).unwrap();
    let mut service =
        CategoryService::new(store, RecordingObserver::new(), &TodoeyConfig::default());
    for title in ["Shopping", "Home", "SHOP floor", "Workshop", "Élan"] {
        service.create(title).unwrap();
    }

    assert_eq!(
        titles(service.list(Some("shop"))),
        vec!["SHOP floor", "Shopping", "Workshop"]
    );
    assert_eq!(titles(service.list(Some("elan"))), vec!["Élan"]);
    assert!(service.list(Some("garden")).is_empty());
}

#[test]
fn empty_filter_is_same_as_no_filter() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTodoStore::try_new(&conn).unwrap();
    let mut service =
        CategoryService::new(store, RecordingObserver::new(), &TodoeyConfig::default());
    for title in ["b", "a", "c"] {
        service.create(title).unwrap();
    }

    let unfiltered = service.list(None).to_vec();
    let empty = service.list(Some("")).to_vec();
    assert_eq!(unfiltered, empty);
    assert_eq!(titles(&unfiltered), vec!["b", "a", "c"]);
}

#[test]
fn whitespace_filter_matches_titles_containing_whitespace() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTodoStore::try_new(&conn).unwrap();
    let mut service =
        CategoryService::new(store, RecordingObserver::new(), &TodoeyConfig::default());
    service.create("Work stuff").unwrap();
    service.create("Home").unwrap();
    service.create("At home").unwrap();

    assert_eq!(titles(service.list(Some(" "))), vec!["At home", "Work stuff"]);
    assert!(service.list(Some("\t")).is_empty());
}

#[test]
fn create_keeps_title_exactly_as_typed() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTodoStore::try_new(&conn).unwrap();
    let mut service =
        CategoryService::new(store, RecordingObserver::new(), &TodoeyConfig::default());

    let created = service.create("  Milk ").unwrap();

    assert_eq!(created.title, "  Milk ");
    assert_eq!(titles(service.load()), vec!["  Milk "]);
}

#[test]
fn delete_removes_exactly_one() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTodoStore::try_new(&conn).unwrap();
    let mut service =
        CategoryService::new(store, RecordingObserver::new(), &TodoeyConfig::default());
    service.create("One").unwrap();
    let doomed = service.create("Two").unwrap();
    service.create("Three").unwrap();
    let before = service.load().len();

    let removed = service.delete(doomed.id).unwrap();
    assert_eq!(removed.id, doomed.id);

    let listed = service.load();
    assert_eq!(listed.len(), before - 1);
    assert!(listed.iter().all(|category| category.id != doomed.id));
    assert!(service.delete(doomed.id).is_none());
    assert!(service.delete_at(99).is_none());
}

#[test]
fn blank_title_create_is_a_no_op_without_commit() {
    let conn = open_db_in_memory().unwrap();
    let store = FlakyStore::new(SqliteTodoStore::try_new(&conn).unwrap());
    let mut service =
        CategoryService::new(&store, RecordingObserver::new(), &TodoeyConfig::default());
    service.create("Keep").unwrap();
    let before = service.load().to_vec();
    let commits = store.commit_calls.get();

    assert!(service.create("").is_none());
    assert!(service.create("   ").is_none());

    assert_eq!(store.commit_calls.get(), commits);
    assert_eq!(service.load(), before.as_slice());
}

#[test]
fn fetch_failure_keeps_previous_snapshot_and_reports_once() {
    let conn = open_db_in_memory().unwrap();
    let store = FlakyStore::new(SqliteTodoStore::try_new(&conn).unwrap());
    let mut service =
        CategoryService::new(&store, RecordingObserver::new(), &TodoeyConfig::default());
    service.create("Errands").unwrap();
    service.create("Garden").unwrap();
    let snapshot = service.load().to_vec();
    assert!(service.observer().errors.is_empty());

    store.fail_fetch.set(true);
    let listed = service.list(Some("err")).to_vec();

    assert_eq!(listed, snapshot);
    assert_eq!(service.observer().errors.len(), 1);
    assert!(service.observer().errors[0].contains("fetch failed"));
    assert_eq!(service.observer().last_snapshot(), Some(snapshot.as_slice()));
}

#[test]
fn commit_failure_reports_error_and_still_rerenders_in_memory_list() {
    let conn = open_db_in_memory().unwrap();
    let store = FlakyStore::new(SqliteTodoStore::try_new(&conn).unwrap());
    let mut service =
        CategoryService::new(&store, RecordingObserver::new(), &TodoeyConfig::default());

    store.fail_commit.set(true);
    let created = service.create("Unsaved").unwrap();

    assert_eq!(service.categories(), &[created.clone()]);
    assert_eq!(service.observer().errors.len(), 1);
    assert_eq!(
        service.observer().last_snapshot(),
        Some(&[created][..])
    );

    store.fail_commit.set(false);
    assert!(service.load().is_empty());
}

#[test]
fn cascade_delete_removes_owned_items() {
    let conn = open_db_in_memory().unwrap();
    let config = TodoeyConfig::default();
    let store = SqliteTodoStore::try_new(&conn).unwrap();
    let mut categories = CategoryService::new(&store, RecordingObserver::new(), &config);
    let owner = categories.create("Move house").unwrap();
    let mut items = ItemService::new(&store, RecordingObserver::new(), owner.clone(), &config);
    items.create("Boxes").unwrap();
    items.create("Tape").unwrap();

    categories.delete(owner.id).unwrap();

    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM items;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 0);
}

#[test]
fn orphan_delete_keeps_items_but_hides_them_from_same_titled_category() {
    let conn = open_db_in_memory().unwrap();
    let config = TodoeyConfig {
        category_delete: CategoryDeletePolicy::Orphan,
        ..TodoeyConfig::default()
    };
    let store = SqliteTodoStore::try_new(&conn).unwrap();
    let mut categories = CategoryService::new(&store, RecordingObserver::new(), &config);
    let owner = categories.create("Trip").unwrap();
    let mut items = ItemService::new(&store, RecordingObserver::new(), owner.clone(), &config);
    items.create("Passport").unwrap();

    categories.delete(owner.id).unwrap();
    let replacement = categories.create("Trip").unwrap();

    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM items;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 1);
    assert!(items.set_category(replacement).is_empty());
}

#[test]
fn observer_sees_every_list_change() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTodoStore::try_new(&conn).unwrap();
    let mut observer = RecordingObserver::<Category>::new();
    {
        let mut service = CategoryService::new(&store, &mut observer, &TodoeyConfig::default());
        service.load();
        let created = service.create("Books").unwrap();
        service.list(Some("bo"));
        service.delete(created.id).unwrap();
    }

    assert_eq!(observer.snapshots.len(), 4);
    assert_eq!(observer.snapshots[1].len(), 1);
    assert!(observer.snapshots[3].is_empty());
    assert!(observer.errors.is_empty());
}
