use todoey_core::{Category, HexColor, Item, ItemState};
use uuid::Uuid;

#[test]
fn item_new_sets_defaults() {
    let owner = Category::new("Home", HexColor::new("#E67E22"));
    let item = Item::new("Water plants", &owner);

    assert!(!item.id.is_nil());
    assert_eq!(item.title, "Water plants");
    assert!(!item.is_done);
    assert_eq!(item.state(), ItemState::Pending);
    let back_ref = item.category.expect("item should reference its category");
    assert_eq!(back_ref.id, owner.id);
    assert_eq!(back_ref.title, "Home");
}

#[test]
fn toggle_flips_only_done_flag() {
    let owner = Category::new("Home", HexColor::new("#E67E22"));
    let original = Item::new("Water plants", &owner);
    let mut item = original.clone();

    assert_eq!(item.toggle_done(), ItemState::Done);
    assert!(item.is_done);
    assert_eq!(item.id, original.id);
    assert_eq!(item.title, original.title);
    assert_eq!(item.category, original.category);

    assert_eq!(item.toggle_done(), ItemState::Pending);
    assert_eq!(item, original);
}

#[test]
fn item_state_has_two_symmetric_states() {
    assert_eq!(ItemState::Pending.toggle(), ItemState::Done);
    assert_eq!(ItemState::Done.toggle(), ItemState::Pending);
    assert_eq!(ItemState::from(true), ItemState::Done);
    assert!(!ItemState::Pending.is_done());
}

#[test]
fn category_serialization_uses_plain_color_string() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let category = Category::with_id(id, "Errands", HexColor::new("#9B59B6"));

    let json = serde_json::to_value(&category).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["title"], "Errands");
    assert_eq!(json["color"], "#9B59B6");

    let decoded: Category = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, category);
}

#[test]
fn invalid_color_skips_styling_instead_of_failing() {
    let category = Category::new("Legacy", HexColor::new("chartreuse"));
    assert!(category.color.parse_rgb().is_none());
}
