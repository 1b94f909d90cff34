//! Home screen with two sample flashcards.
//!
//! Run with `RUST_LOG=debug` to see every frame. Pass a JSON file holding a
//! structure wrapper (`{"props": {"flashcards": [...]}}`) to preview your own
//! cards.

use std::time::Duration;

use flipdeck::prelude::*;
use serde_json::json;

fn sample_structure() -> StructureComponent {
    StructureComponent::new(vec![
        Flashcard::new("1", "Hello", "World"),
        Flashcard::new("2", "React", "Native"),
    ])
}

fn load_structure() -> StructureComponent {
    let Some(path) = std::env::args().nth(1) else {
        return sample_structure();
    };
    let parsed = std::fs::read_to_string(&path)
        .map_err(|err| err.to_string())
        .and_then(|json| StructureComponent::from_json(&json).map_err(|err| err.to_string()));
    match parsed {
        Ok(structure) => {
            log::info!("loaded {} flashcards from {path}", structure.flashcards().len());
            structure
        }
        Err(err) => {
            log::warn!("could not load {path}: {err}; using the sample cards");
            sample_structure()
        }
    }
}

/// Centre of the first text item reading `label`, in surface coordinates.
fn text_center(list: &DisplayList, label: &str) -> Option<(f32, f32)> {
    list.items().iter().find_map(|item| match &item.command {
        DrawCommand::Text { text, rect, .. } if text == label => Some(rect.center()),
        _ => None,
    })
}

fn tap(surface: &mut Surface, label: &str) {
    let Some((x, y)) = text_center(surface.display_list(), label) else {
        log::warn!("no card showing {label:?}");
        return;
    };
    log::info!("tap {label:?} at ({x:.0}, {y:.0})");
    surface.dispatch(&Event::PointerDown { x, y });
    surface.dispatch(&Event::PointerUp { x, y });
}

fn main() {
    env_logger::init();

    let structure = load_structure();
    let config = PresentationConfig::new(IdentityText)
        .with_colors(json!({
            "brand": {
                "primary": {
                    "main": { "text": "#000", "stroke": "#dedede" }
                }
            }
        }))
        .with_a11y_scale(1.0);
    let labels: Vec<String> = structure
        .flashcards()
        .iter()
        .map(|card| card.front.clone())
        .collect();

    let preview = FlashCardsPreview::new(&structure, config);
    if preview.is_none() {
        log::warn!("nothing to preview");
    }

    let home = container()
        .layout(Column::new())
        .padding([24.0, 0.0])
        .child(
            text("FlashCard")
                .font_size(28.0)
                .font_weight(FontWeight::BOLD)
                .margin(Padding::default().bottom(4.0)),
        )
        .child(
            text("iClasser RN FlashCard Preview")
                .font_size(16.0)
                .color(Color::from_hex(0x666666)),
        )
        .maybe_child(preview);

    // Tap each card in turn, then the first one again to flip it back
    let mut script: Vec<(Duration, String)> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| (Duration::from_millis(1_500 * (i as u64 + 1)), label.clone()))
        .collect();
    if let Some(first) = labels.first() {
        script.push((Duration::from_millis(1_500 * (labels.len() as u64 + 1)), first.clone()));
    }

    let surface = App::new()
        .width(390.0)
        .height(844.0)
        .background_color(Color::WHITE)
        .run_for(Duration::from_millis(1_500 * (script.len() as u64 + 1)))
        .on_update(move |surface, elapsed| {
            while script.first().is_some_and(|(at, _)| *at <= elapsed) {
                let (_, label) = script.remove(0);
                tap(surface, &label);
            }
        })
        .run(home);

    for text in surface.display_list().texts() {
        println!("{text}");
    }
}
