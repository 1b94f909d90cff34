use std::time::Duration;

use flipdeck::animation;
use flipdeck::prelude::*;
use flipdeck::renderer::PaintItem;
use flipdeck::widgets::ImageSource;

fn settle() {
    for _ in 0..400 {
        animation::tick(Duration::from_millis(16));
    }
}

fn mounted(flashcard: Flashcard, config: &PresentationConfig) -> FlipCard {
    let mut card = FlipCard::new(flashcard, config);
    card.layout(Constraints::loose(Size::new(400.0, 800.0)));
    card.set_origin(0.0, 0.0);
    card
}

fn paint(card: &FlipCard) -> DisplayList {
    let mut ctx = PaintContext::new();
    card.paint(&mut ctx);
    ctx.finish()
}

fn tap(card: &mut FlipCard) {
    let (x, y) = card.bounds().center();
    card.event(&Event::PointerDown { x, y });
    card.event(&Event::PointerUp { x, y });
}

fn text_item<'a>(list: &'a DisplayList, label: &str) -> Option<&'a PaintItem> {
    list.items().iter().find(|item| {
        matches!(&item.command, DrawCommand::Text { text, .. } if text == label)
    })
}

#[test]
fn test_hello_world_flip() {
    let config = PresentationConfig::new(IdentityText);
    let mut card = mounted(Flashcard::new("1", "Hello", "World"), &config);

    assert_eq!(card.state(), FlipState::RestingFront);
    assert_eq!(paint(&card).texts(), vec!["Hello"]);

    tap(&mut card);
    settle();
    assert_eq!(card.state(), FlipState::RestingBack);
    assert_eq!(paint(&card).texts(), vec!["Hello", "World"]);
}

#[test]
fn test_two_taps_return_to_front() {
    let config = PresentationConfig::new(IdentityText);
    let mut card = mounted(Flashcard::new("1", "Hello", "World"), &config);

    tap(&mut card);
    settle();
    tap(&mut card);
    settle();

    assert_eq!(card.state(), FlipState::RestingFront);
    assert_eq!(card.visible_face(), Face::Front);
    assert_eq!(paint(&card).texts(), vec!["Hello"]);
}

#[test]
fn test_rotations_half_a_turn_apart() {
    let card = FlipCard::new(
        Flashcard::new("1", "Hello", "World"),
        &PresentationConfig::default(),
    );
    card.flip_value().set_value(60.0);
    assert_eq!(card.front_rotation(), 60.0);
    assert_eq!(card.back_rotation(), 240.0);
    assert_eq!(card.visible_face(), Face::Front);

    card.flip_value().set_value(120.0);
    assert_eq!(card.visible_face(), Face::Back);
}

#[test]
fn test_text_metrics_follow_accessibility_scale() {
    let config = PresentationConfig::new(IdentityText).with_a11y_scale(1.5);
    let mut card = mounted(Flashcard::new("1", "Hello", "World"), &config);
    tap(&mut card);
    settle();

    let list = paint(&card);
    let metrics = |label: &str| match text_item(&list, label).map(|item| &item.command) {
        Some(DrawCommand::Text {
            font_size,
            line_height,
            ..
        }) => (*font_size, *line_height),
        other => panic!("no text {label:?}: {other:?}"),
    };
    assert_eq!(metrics("Hello"), (30.0, 45.0));
    assert_eq!(metrics("World"), (24.0, 36.0));
}

#[test]
fn test_front_image_only_when_present() {
    let config = PresentationConfig::default();

    let plain = mounted(Flashcard::new("1", "Hello", "World"), &config);
    let list = paint(&plain);
    // Only the hint icon
    assert_eq!(list.images().len(), 1);

    let pictured = mounted(
        Flashcard::new("2", "Cat", "Gato").with_front_image("https://example.com/cat.png"),
        &config,
    );
    let list = paint(&pictured);
    let uris: Vec<&str> = list
        .images()
        .iter()
        .filter_map(|item| match &item.command {
            DrawCommand::Image {
                source: ImageSource::Uri(uri),
                ..
            } => Some(uri.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(uris, vec!["https://example.com/cat.png"]);
}

#[test]
fn test_text_accessor_and_palette_apply() {
    let config = PresentationConfig::new(|key: &str| key.to_uppercase()).with_colors(
        serde_json::json!({"brand": {"primary": {"main": {"text": "#ff0000"}}}}),
    );
    let card = mounted(Flashcard::new("1", "Hello", "World"), &config);

    let list = paint(&card);
    match text_item(&list, "HELLO").map(|item| &item.command) {
        Some(DrawCommand::Text { color, .. }) => assert_eq!(*color, Color::rgb(1.0, 0.0, 0.0)),
        other => panic!("unexpected {other:?}"),
    }
}
