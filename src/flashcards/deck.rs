//! The scrolling list of flip cards.

use std::collections::{HashMap, HashSet, VecDeque};

use super::flip_card::FlipCard;
use super::model::{Flashcard, StructureComponent};
use super::style::LIST_PADDING;
use super::theme::PresentationConfig;
use crate::layout::{Constraints, Size};
use crate::reactive::{WidgetId, request_frame};
use crate::renderer::PaintContext;
use crate::widgets::{Event, EventResponse, Rect, ScrollState, Widget};

/// Vertically scrolling column of [`FlipCard`]s, one per flashcard, keyed by
/// flashcard id.
pub struct FlashCardsPreview {
    widget_id: WidgetId,
    config: PresentationConfig,
    cards: Vec<FlipCard>,
    /// Card origins relative to the unscrolled content top-left
    card_offsets: Vec<(f32, f32)>,
    scroll: ScrollState,
    bounds: Rect,
}

impl FlashCardsPreview {
    /// Build the list, or `None` when there is nothing to show.
    pub fn new(structure: &StructureComponent, config: PresentationConfig) -> Option<Self> {
        let flashcards = structure.flashcards();
        if flashcards.is_empty() {
            log::debug!("no flashcards to preview");
            return None;
        }

        let mut preview = Self {
            widget_id: WidgetId::next(),
            config,
            cards: Vec::new(),
            card_offsets: Vec::new(),
            scroll: ScrollState::default(),
            bounds: Rect::default(),
        };
        preview.update(flashcards);
        Some(preview)
    }

    pub fn config(&self) -> &PresentationConfig {
        &self.config
    }

    pub fn cards(&self) -> &[FlipCard] {
        &self.cards
    }

    pub fn card(&self, id: &str) -> Option<&FlipCard> {
        self.cards.iter().find(|card| card.id() == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Show a new collection. Cards whose id is still present keep their
    /// flip and hint state; the rest are unmounted.
    pub fn update(&mut self, flashcards: &[Flashcard]) {
        let mut seen = HashSet::new();
        for flashcard in flashcards {
            if !seen.insert(flashcard.id.as_str()) {
                log::warn!("duplicate flashcard id {:?}", flashcard.id);
            }
        }

        let mut existing: HashMap<String, VecDeque<FlipCard>> = HashMap::new();
        for card in self.cards.drain(..) {
            existing
                .entry(card.id().to_string())
                .or_default()
                .push_back(card);
        }

        let mut reused = 0;
        let mut cards = Vec::with_capacity(flashcards.len());
        for flashcard in flashcards {
            let card = match existing.get_mut(&flashcard.id).and_then(VecDeque::pop_front) {
                Some(mut card) => {
                    reused += 1;
                    card.set_flashcard(flashcard.clone(), &self.config);
                    card
                }
                None => FlipCard::new(flashcard.clone(), &self.config),
            };
            cards.push(card);
        }
        self.cards = cards;

        let removed: usize = existing.values().map(VecDeque::len).sum();
        log::debug!(
            "flashcards updated: {} shown, {} reused, {} removed",
            self.cards.len(),
            reused,
            removed
        );
        // Dropping the leftovers unmounts them
        drop(existing);
        request_frame();
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    pub fn max_scroll_offset(&self) -> f32 {
        self.scroll.max_offset()
    }

    pub fn scroll_to(&mut self, offset: f32) {
        if self.scroll.scroll_to(offset) {
            self.reposition();
            request_frame();
        }
    }

    fn cancel_presses(&mut self) {
        for card in self.cards.iter_mut() {
            card.event(&Event::PointerLeave);
        }
    }

    fn reposition(&mut self) {
        let x = self.bounds.x;
        let y = self.bounds.y - self.scroll.offset();
        for (card, (dx, dy)) in self.cards.iter_mut().zip(&self.card_offsets) {
            card.set_origin(x + dx, y + dy);
        }
    }
}

impl Widget for FlashCardsPreview {
    fn id(&self) -> WidgetId {
        self.widget_id
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        let inner = constraints.deflate(LIST_PADDING * 2.0, 0.0);
        let child_constraints = Constraints::new(0.0, 0.0, inner.max_width, f32::INFINITY);

        self.card_offsets.clear();
        let mut cursor = LIST_PADDING;
        let mut widest = 0.0f32;
        let mut sizes = Vec::with_capacity(self.cards.len());
        for card in self.cards.iter_mut() {
            let size = card.layout(child_constraints);
            widest = widest.max(size.width);
            sizes.push(size);
        }

        let content_width = if constraints.max_width.is_finite() {
            constraints.max_width
        } else {
            widest + LIST_PADDING * 2.0
        };
        for (card, size) in self.cards.iter().zip(&sizes) {
            let margin = card.margin();
            let x = (content_width - size.width) / 2.0;
            self.card_offsets.push((x, cursor + margin.top));
            cursor += margin.vertical() + size.height;
        }
        let content_height = cursor + LIST_PADDING;

        let size = constraints.constrain(Size::new(content_width, content_height));
        self.bounds.width = size.width;
        self.bounds.height = size.height;
        self.scroll.set_extents(content_height, size.height);
        size
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
        self.reposition();
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn paint(&self, ctx: &mut PaintContext) {
        ctx.push_clip(self.bounds);
        for card in &self.cards {
            if card.bounds().intersects(&self.bounds) {
                card.paint(ctx);
            }
        }
        ctx.pop_clip();
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        if let Event::Scroll {
            x,
            y,
            delta_y,
            source,
        } = event
        {
            if !self.bounds.contains(*x, *y) {
                return EventResponse::Ignored;
            }
            if self.scroll.scroll_by(*delta_y, *source) {
                self.reposition();
                request_frame();
            }
            return EventResponse::Handled;
        }

        let outside = event
            .coords()
            .is_some_and(|(x, y)| !self.bounds.contains(x, y));
        // Input outside the viewport lands on no visible card, but it still
        // disarms presses so a later release can't click a card by accident
        if outside || matches!(event, Event::PointerLeave) {
            self.cancel_presses();
            return EventResponse::Ignored;
        }
        for card in self.cards.iter_mut() {
            if card.event(event) == EventResponse::Handled {
                return EventResponse::Handled;
            }
        }
        EventResponse::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::IdentityText;
    use crate::widgets::ScrollSource;

    fn deck(ids: &[&str]) -> FlashCardsPreview {
        let cards = ids
            .iter()
            .map(|id| Flashcard::new(*id, format!("front {id}"), format!("back {id}")))
            .collect();
        FlashCardsPreview::new(
            &StructureComponent::new(cards),
            PresentationConfig::new(IdentityText),
        )
        .unwrap()
    }

    #[test]
    fn test_cards_stack_with_padding() {
        let mut preview = deck(&["a", "b", "c"]);
        let size = preview.layout(Constraints::tight(Size::new(400.0, 800.0)));
        preview.set_origin(0.0, 0.0);

        assert_eq!(size, Size::new(400.0, 800.0));
        let tops: Vec<f32> = preview.cards().iter().map(|c| c.bounds().y).collect();
        assert_eq!(tops, vec![20.0, 385.0, 750.0]);
        assert_eq!(preview.cards()[0].bounds().x, 27.5);
        // 20 + 3 * (345 + 20) + 20
        assert_eq!(preview.max_scroll_offset(), 1135.0 - 800.0);
    }

    #[test]
    fn test_scroll_moves_cards_and_clamps() {
        let mut preview = deck(&["a", "b", "c"]);
        preview.layout(Constraints::tight(Size::new(400.0, 800.0)));
        preview.set_origin(0.0, 0.0);

        let scroll = Event::Scroll {
            x: 200.0,
            y: 400.0,
            delta_y: 100.0,
            source: ScrollSource::Finger,
        };
        assert_eq!(preview.event(&scroll), EventResponse::Handled);
        assert_eq!(preview.scroll_offset(), 100.0);
        assert_eq!(preview.cards()[0].bounds().y, -80.0);

        preview.scroll_to(10_000.0);
        assert_eq!(preview.scroll_offset(), 335.0);
        preview.scroll_to(-5.0);
        assert_eq!(preview.scroll_offset(), 0.0);
    }

    #[test]
    fn test_offscreen_cards_not_painted() {
        let mut preview = deck(&["a", "b", "c"]);
        preview.layout(Constraints::tight(Size::new(400.0, 300.0)));
        preview.set_origin(0.0, 0.0);

        let mut ctx = PaintContext::new();
        preview.paint(&mut ctx);
        let list = ctx.finish();
        assert_eq!(list.texts(), vec!["front a"]);
        assert!(list.items().iter().all(|item| item.clip.is_some()));
    }

    #[test]
    fn test_tap_outside_viewport_ignored() {
        let mut preview = deck(&["a"]);
        preview.layout(Constraints::tight(Size::new(400.0, 300.0)));
        preview.set_origin(0.0, 0.0);

        // Card extends below the viewport; a press there must not flip it
        preview.event(&Event::PointerDown { x: 200.0, y: 340.0 });
        preview.event(&Event::PointerUp { x: 200.0, y: 340.0 });
        assert!(!preview.cards()[0].is_flipped());

        preview.event(&Event::PointerDown { x: 200.0, y: 100.0 });
        preview.event(&Event::PointerUp { x: 200.0, y: 100.0 });
        assert!(preview.cards()[0].is_flipped());
    }

    #[test]
    fn test_release_outside_viewport_disarms_card() {
        let mut preview = deck(&["a"]);
        preview.layout(Constraints::tight(Size::new(400.0, 300.0)));
        preview.set_origin(0.0, 0.0);

        // Pressed on the card, released below the viewport
        preview.event(&Event::PointerDown { x: 200.0, y: 100.0 });
        preview.event(&Event::PointerUp { x: 200.0, y: 340.0 });

        // Press on the list padding, release on the card
        assert_eq!(
            preview.event(&Event::PointerDown { x: 5.0, y: 100.0 }),
            EventResponse::Ignored
        );
        preview.event(&Event::PointerUp { x: 200.0, y: 100.0 });
        assert!(!preview.cards()[0].is_flipped());
    }
}
