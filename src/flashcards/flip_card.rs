//! One flashcard drawn as two back-to-back faces that turn around the
//! vertical axis when tapped.

use super::assets::{flip_back_icon, flip_icon};
use super::hint::HintAnimation;
use super::model::Flashcard;
use super::style::{self, TextMetrics};
use super::theme::{CardPalette, PresentationConfig};
use crate::animation::{self, AnimatedValue, Animation, Interpolated, Interpolation, SpringConfig};
use crate::layout::{Column, Constraints, Overlay, Size};
use crate::reactive::{
    Effect, OwnerId, Signal, WidgetId, create_effect, dispose_owner, on_cleanup, with_owner,
};
use crate::renderer::PaintContext;
use crate::transform::Transform;
use crate::widgets::{
    Anchor, Container, ContentFit, Event, EventResponse, Image, ImageSource, Padding, Rect, Text,
    TextAlign, Widget, container, image, text,
};

/// Rotation of the front face when flipped
pub const FLIPPED_ANGLE: f32 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipState {
    RestingFront,
    RestingBack,
    /// A spring is moving the card
    Transitioning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
}

/// Reactive state shared between the card and the closures of its widgets.
#[derive(Clone)]
struct CardState {
    flipped: Signal<bool>,
    flip: AnimatedValue,
    front_rotation: Interpolated,
    back_rotation: Interpolated,
    hint: HintAnimation,
}

impl CardState {
    fn new() -> Self {
        let flip = AnimatedValue::new(0.0);
        Self {
            flipped: Signal::new(false),
            front_rotation: flip
                .interpolate(Interpolation::linear([0.0, FLIPPED_ANGLE], [0.0, 180.0])),
            back_rotation: flip
                .interpolate(Interpolation::linear([0.0, FLIPPED_ANGLE], [180.0, 360.0])),
            flip,
            hint: HintAnimation::new(),
        }
    }

    /// Flip to the other side. A spring already in flight is replaced and
    /// the new one carries on from the live angle and velocity.
    fn toggle(&self) {
        let flipped = !self.flipped.get_untracked();
        let target = if flipped { FLIPPED_ANGLE } else { 0.0 };
        animation::start(Animation::spring(&self.flip, target, SpringConfig::FLIP));
        self.flipped.set(flipped);
    }

    fn stop_all(&self) {
        animation::stop_driving(&[self.flip.id()]);
        self.hint.stop();
    }
}

pub struct FlipCard {
    flashcard: Flashcard,
    state: CardState,
    body: Container,
    /// Logs flips; disposed with the owner scope
    _flip_log: Effect,
    owner: OwnerId,
}

impl FlipCard {
    /// Mount a card: builds its faces and starts the hint animation.
    pub fn new(flashcard: Flashcard, config: &PresentationConfig) -> Self {
        let ((state, body, flip_log), owner) = with_owner(|| {
            let state = CardState::new();
            state.hint.start();

            let cleanup = state.clone();
            on_cleanup(move || cleanup.stop_all());

            let id = flashcard.id.clone();
            let flipped = state.flipped.clone();
            let flip_log = create_effect(move || {
                let flipped = flipped.get();
                log::debug!("card {id} flipped: {flipped}");
            });

            let body = build_body(&state, &flashcard, config);
            (state, body, flip_log)
        });

        log::trace!("mounted card {}", flashcard.id);
        Self {
            flashcard,
            state,
            body,
            _flip_log: flip_log,
            owner,
        }
    }

    pub fn id(&self) -> &str {
        &self.flashcard.id
    }

    pub fn flashcard(&self) -> &Flashcard {
        &self.flashcard
    }

    /// Replace the card's content, keeping its flip and hint state.
    pub fn set_flashcard(&mut self, flashcard: Flashcard, config: &PresentationConfig) {
        if flashcard != self.flashcard {
            self.body = build_body(&self.state, &flashcard, config);
            self.flashcard = flashcard;
        }
    }

    pub fn toggle(&self) {
        self.state.toggle();
    }

    pub fn is_flipped(&self) -> bool {
        self.state.flipped.get_untracked()
    }

    pub fn state(&self) -> FlipState {
        if animation::is_driving(self.state.flip.id()) {
            FlipState::Transitioning
        } else if self.is_flipped() {
            FlipState::RestingBack
        } else {
            FlipState::RestingFront
        }
    }

    /// Raw flip progress in degrees, nominally within `0..=180`.
    pub fn flip_progress(&self) -> f32 {
        self.state.flip.get_untracked()
    }

    pub fn flip_value(&self) -> &AnimatedValue {
        &self.state.flip
    }

    pub fn front_rotation(&self) -> f32 {
        self.state.front_rotation.get_untracked()
    }

    pub fn back_rotation(&self) -> f32 {
        self.state.back_rotation.get_untracked()
    }

    pub fn hint(&self) -> &HintAnimation {
        &self.state.hint
    }

    /// The face turned toward the viewer at the current angle.
    pub fn visible_face(&self) -> Face {
        let (w, h) = (style::CARD_SIZE, style::CARD_SIZE);
        let front = face_transform(self.front_rotation()).about(w / 2.0, h / 2.0);
        if front.is_back_facing(0.0, 0.0, w, h) {
            Face::Back
        } else {
            Face::Front
        }
    }
}

impl Drop for FlipCard {
    fn drop(&mut self) {
        log::trace!("unmounting card {}", self.flashcard.id);
        dispose_owner(self.owner);
    }
}

impl Widget for FlipCard {
    fn id(&self) -> WidgetId {
        self.body.id()
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        Widget::layout(&mut self.body, constraints)
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.body.set_origin(x, y)
    }

    fn bounds(&self) -> Rect {
        self.body.bounds()
    }

    fn margin(&self) -> Padding {
        Widget::margin(&self.body)
    }

    fn paint(&self, ctx: &mut PaintContext) {
        self.body.paint(ctx)
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        self.body.event(event)
    }
}

fn face_transform(angle: f32) -> Transform {
    Transform::perspective(style::FACE_PERSPECTIVE).then(&Transform::rotate_y_degrees(angle))
}

fn build_body(state: &CardState, flashcard: &Flashcard, config: &PresentationConfig) -> Container {
    let palette = config.palette();
    let scale = config.scale();

    let front_image = flashcard
        .front_image
        .as_ref()
        .filter(|uri| !uri.is_empty())
        .map(|uri| {
            image(ImageSource::Uri(uri.clone()))
                .size(style::IMAGE_SIZE, style::IMAGE_SIZE)
                .content_fit(ContentFit::Contain)
        });
    let front = face(&palette, state.front_rotation.clone())
        .maybe_child(front_image)
        .child(title(config.text(&flashcard.front), &palette, scale))
        .overlay(hint_icon(flip_icon(), &state.hint), hint_anchor());

    // The back repeats the prompt above the answer
    let caption = (!flashcard.front.is_empty())
        .then(|| title(config.text(&flashcard.front), &palette, scale));
    let back = face(&palette, state.back_rotation.clone())
        .maybe_child(caption)
        .child(body_text(config.text(&flashcard.back), &palette, scale))
        .overlay(hint_icon(flip_back_icon(), &state.hint), hint_anchor());

    let tapped = state.clone();
    container()
        .size(style::CARD_SIZE, style::CARD_SIZE)
        .margin(Padding::default().bottom(style::CARD_MARGIN_BOTTOM))
        .layout(Overlay::new())
        .child(front)
        .child(back)
        .on_click(move || tapped.toggle())
}

fn face(palette: &CardPalette, rotation: Interpolated) -> Container {
    container()
        .layout(Column::centered())
        .padding(style::FACE_PADDING)
        .background(palette.fill)
        .border(style::FACE_BORDER_WIDTH, palette.stroke)
        .corner_radius(style::FACE_CORNER_RADIUS)
        .shadow(style::face_shadow())
        .transform(move || face_transform(rotation.get()))
        .backface_hidden(true)
}

fn styled_text(content: String, metrics: TextMetrics, palette: &CardPalette) -> Text {
    text(content)
        .font_size(metrics.font_size)
        .line_height(metrics.line_height)
        .color(palette.text)
        .align(TextAlign::Center)
}

fn title(content: String, palette: &CardPalette, scale: f32) -> Text {
    styled_text(content, style::title_metrics(scale), palette)
        .font_weight(style::TITLE_WEIGHT)
        .margin(Padding::default().top(style::TITLE_MARGIN_TOP))
}

fn body_text(content: String, palette: &CardPalette, scale: f32) -> Text {
    styled_text(content, style::body_metrics(scale), palette)
}

fn hint_icon(source: ImageSource, hint: &HintAnimation) -> Image {
    let hint = hint.clone();
    image(source)
        .size(style::ICON_SIZE, style::ICON_SIZE)
        .corner_radius(style::ICON_CORNER_RADIUS)
        .content_fit(ContentFit::Contain)
        .transform(move || hint.transform())
}

fn hint_anchor() -> Anchor {
    Anchor::BottomCenter {
        inset: style::ICON_BOTTOM_INSET,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::flashcards::IdentityText;

    fn settle() {
        for _ in 0..400 {
            animation::tick(Duration::from_millis(16));
        }
    }

    fn card() -> FlipCard {
        FlipCard::new(
            Flashcard::new("1", "Hello", "World"),
            &PresentationConfig::new(IdentityText),
        )
    }

    #[test]
    fn test_starts_resting_front() {
        let card = card();
        assert_eq!(card.state(), FlipState::RestingFront);
        assert_eq!(card.visible_face(), Face::Front);
        assert_eq!(card.front_rotation(), 0.0);
        assert_eq!(card.back_rotation(), 180.0);
    }

    #[test]
    fn test_toggle_settles_on_back() {
        let card = card();
        card.toggle();
        assert!(card.is_flipped());
        assert_eq!(card.state(), FlipState::Transitioning);

        settle();
        assert_eq!(card.state(), FlipState::RestingBack);
        assert_eq!(card.flip_progress(), FLIPPED_ANGLE);
        assert_eq!(card.visible_face(), Face::Back);
    }

    #[test]
    fn test_flip_comes_to_rest_on_both_sides() {
        let card = card();
        card.toggle();
        let mut frames = 0;
        while card.state() == FlipState::Transitioning {
            animation::tick(Duration::from_millis(16));
            frames += 1;
            assert!(frames < 400, "still moving at {}", card.flip_progress());
        }
        assert_eq!(card.state(), FlipState::RestingBack);
        assert_eq!(card.flip_progress(), FLIPPED_ANGLE);

        card.toggle();
        settle();
        assert_eq!(card.state(), FlipState::RestingFront);
        assert_eq!(card.flip_progress(), 0.0);
    }

    #[test]
    fn test_empty_front_image_is_absent() {
        let mut card = FlipCard::new(
            Flashcard::new("1", "Hello", "World").with_front_image(""),
            &PresentationConfig::new(IdentityText),
        );
        Widget::layout(&mut card, Constraints::unbounded());
        card.set_origin(0.0, 0.0);

        let mut ctx = PaintContext::new();
        card.paint(&mut ctx);
        // Only the hint icon
        assert_eq!(ctx.finish().images().len(), 1);
    }

    #[test]
    fn test_faces_stay_antipodal() {
        let card = card();
        card.toggle();
        for _ in 0..30 {
            animation::tick(Duration::from_millis(16));
            let diff = card.back_rotation() - card.front_rotation();
            assert!((diff - 180.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_interrupted_flip_continues_from_live_angle() {
        let card = card();
        card.toggle();
        for _ in 0..20 {
            animation::tick(Duration::from_millis(16));
        }
        let angle = card.flip_progress();
        let velocity = card.flip_value().velocity();
        assert!(angle > 0.0 && angle < FLIPPED_ANGLE);
        assert!(velocity > 0.0);

        card.toggle();
        assert!(!card.is_flipped());
        animation::tick(Duration::from_millis(1));
        // Still heading up for a moment: momentum carried over
        assert!(card.flip_progress() >= angle);

        settle();
        assert_eq!(card.state(), FlipState::RestingFront);
        assert_eq!(card.flip_progress(), 0.0);
    }

    #[test]
    fn test_drop_stops_animations() {
        let card = card();
        card.toggle();
        let flip_id = card.flip_value().id();
        let slide_id = card.hint().slide().id();
        assert!(animation::is_driving(flip_id));
        assert!(animation::is_driving(slide_id));

        drop(card);
        assert!(!animation::is_driving(flip_id));
        assert!(!animation::is_driving(slide_id));
    }

    #[test]
    fn test_set_flashcard_keeps_flip_state() {
        let config = PresentationConfig::new(IdentityText);
        let mut card = FlipCard::new(Flashcard::new("1", "Hello", "World"), &config);
        card.toggle();
        settle();

        card.set_flashcard(Flashcard::new("1", "Hola", "Mundo"), &config);
        assert_eq!(card.flashcard().front, "Hola");
        assert_eq!(card.state(), FlipState::RestingBack);
    }
}
