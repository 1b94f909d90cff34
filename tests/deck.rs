use std::time::Duration;

use flipdeck::animation;
use flipdeck::prelude::*;

fn cards(ids: &[&str]) -> Vec<Flashcard> {
    ids.iter()
        .map(|id| Flashcard::new(*id, format!("front {id}"), format!("back {id}")))
        .collect()
}

fn preview(ids: &[&str]) -> FlashCardsPreview {
    FlashCardsPreview::new(
        &StructureComponent::new(cards(ids)),
        PresentationConfig::new(IdentityText),
    )
    .expect("non-empty collection")
}

fn settle() {
    for _ in 0..400 {
        animation::tick(Duration::from_millis(16));
    }
}

fn ids(preview: &FlashCardsPreview) -> Vec<&str> {
    preview.cards().iter().map(FlipCard::id).collect()
}

#[test]
fn test_one_card_per_entry_in_order() {
    let preview = preview(&["b", "a", "c"]);
    assert_eq!(preview.len(), 3);
    assert_eq!(ids(&preview), vec!["b", "a", "c"]);
    assert!(preview
        .cards()
        .iter()
        .all(|card| card.state() == FlipState::RestingFront));
}

#[test]
fn test_empty_or_missing_collection_renders_nothing() {
    let config = PresentationConfig::default();
    assert!(FlashCardsPreview::new(&StructureComponent::new(Vec::new()), config.clone()).is_none());
    assert!(FlashCardsPreview::new(&StructureComponent::default(), config.clone()).is_none());

    let parsed = StructureComponent::from_json(r#"{"props": {}}"#).unwrap();
    assert!(FlashCardsPreview::new(&parsed, config).is_none());
}

#[test]
fn test_update_reuses_cards_by_id() {
    let mut preview = preview(&["1", "2"]);
    preview.card("2").unwrap().toggle();
    settle();

    preview.update(&[
        Flashcard::new("3", "new", "card"),
        Flashcard::new("2", "front 2", "back 2"),
    ]);
    assert_eq!(ids(&preview), vec!["3", "2"]);
    assert_eq!(preview.card("2").unwrap().state(), FlipState::RestingBack);
    assert_eq!(preview.card("3").unwrap().state(), FlipState::RestingFront);
}

#[test]
fn test_removed_cards_stop_animating() {
    let mut preview = preview(&["1", "2"]);
    let removed = preview.card("1").unwrap();
    removed.toggle();
    let flip = removed.flip_value().id();
    let slide = removed.hint().slide().id();
    assert!(animation::is_driving(flip));

    preview.update(&cards(&["2"]));
    assert!(!animation::is_driving(flip));
    assert!(!animation::is_driving(slide));
    assert!(animation::is_driving(preview.card("2").unwrap().hint().slide().id()));
}

#[test]
fn test_duplicate_ids_each_get_a_card() {
    let mut preview = preview(&["1", "1"]);
    assert_eq!(preview.len(), 2);

    preview.cards()[0].toggle();
    settle();
    preview.update(&cards(&["1", "1"]));
    assert_eq!(preview.len(), 2);
    // Reused in order
    assert_eq!(preview.cards()[0].state(), FlipState::RestingBack);
    assert_eq!(preview.cards()[1].state(), FlipState::RestingFront);
}

#[test]
fn test_tap_flips_through_surface() {
    let mut surface = Surface::new(preview(&["1", "2"]), 390.0, 844.0);
    surface.frame(Duration::from_millis(16));
    assert_eq!(surface.display_list().texts(), vec!["front 1", "front 2"]);

    // First card spans y 20..365
    surface.dispatch(&Event::PointerDown { x: 195.0, y: 100.0 });
    surface.dispatch(&Event::PointerUp { x: 195.0, y: 100.0 });
    for _ in 0..400 {
        surface.frame(Duration::from_millis(16));
    }
    assert_eq!(
        surface.display_list().texts(),
        vec!["front 1", "back 1", "front 2"]
    );
}

#[test]
fn test_wheel_scroll_through_surface() {
    let mut surface = Surface::new(preview(&["1", "2", "3"]), 390.0, 400.0);
    surface.frame(Duration::ZERO);

    let response = surface.dispatch(&Event::Scroll {
        x: 195.0,
        y: 200.0,
        delta_y: 1.0,
        source: ScrollSource::Wheel,
    });
    assert_eq!(response, EventResponse::Handled);
    surface.frame(Duration::ZERO);
    // One wheel line moves the first card up by 40
    let rects = surface.display_list().rounded_rects();
    assert!(rects.iter().any(|item| item.command.rect().y == -20.0));
}
