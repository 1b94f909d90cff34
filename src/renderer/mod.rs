//! Headless painting: widgets record draw commands into a [`DisplayList`]
//! that carries the composed transform and clip of every item.

pub mod commands;
pub mod text_measurer;

pub use commands::{Border, DrawCommand, Shadow};
pub use text_measurer::{TextMeasurer, TextStyle, measure_text};

use crate::transform::Transform;
use crate::widgets::font::{FontFamily, FontWeight};
use crate::widgets::image::{ContentFit, ImageSource};
use crate::widgets::text::TextAlign;
use crate::widgets::{Color, Rect};

/// One recorded draw operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintItem {
    pub command: DrawCommand,
    /// Composed transform of every ancestor at the time of drawing
    pub transform: Transform,
    /// Intersection of all active clips, in surface coordinates
    pub clip: Option<Rect>,
}

impl PaintItem {
    /// Whether any part of the item can land inside its clip.
    pub fn is_visible(&self) -> bool {
        match self.clip {
            Some(clip) => clip.width > 0.0 && clip.height > 0.0,
            None => true,
        }
    }
}

/// The ordered output of one paint pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    items: Vec<PaintItem>,
}

impl DisplayList {
    pub fn items(&self) -> &[PaintItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Text of every text item, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match &item.command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn images(&self) -> Vec<&PaintItem> {
        self.items
            .iter()
            .filter(|item| matches!(item.command, DrawCommand::Image { .. }))
            .collect()
    }

    pub fn rounded_rects(&self) -> Vec<&PaintItem> {
        self.items
            .iter()
            .filter(|item| matches!(item.command, DrawCommand::RoundedRect { .. }))
            .collect()
    }
}

pub struct PaintContext {
    items: Vec<PaintItem>,
    /// Composed parent-to-child transforms
    transform_stack: Vec<Transform>,
    /// Each entry is already intersected with the one below it
    clip_stack: Vec<Rect>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(32),
            transform_stack: Vec::with_capacity(4),
            clip_stack: Vec::with_capacity(2),
        }
    }

    fn record(&mut self, command: DrawCommand) {
        let item = PaintItem {
            command,
            transform: self.current_transform(),
            clip: self.clip_stack.last().copied(),
        };
        self.items.push(item);
    }

    pub fn draw_rounded_rect(&mut self, rect: Rect, color: Color, radius: f32) {
        self.draw_shape(rect, color, radius, None, None);
    }

    pub fn draw_shape(
        &mut self,
        rect: Rect,
        color: Color,
        radius: f32,
        border: Option<Border>,
        shadow: Option<Shadow>,
    ) {
        self.record(DrawCommand::RoundedRect {
            rect,
            color,
            radius,
            border,
            shadow,
        });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        text: &str,
        rect: Rect,
        color: Color,
        font_size: f32,
        line_height: f32,
        font_family: FontFamily,
        font_weight: FontWeight,
        align: TextAlign,
    ) {
        self.record(DrawCommand::Text {
            text: text.to_string(),
            rect,
            color,
            font_size,
            line_height,
            font_family,
            font_weight,
            align,
        });
    }

    pub fn draw_image(
        &mut self,
        source: ImageSource,
        rect: Rect,
        content_rect: Rect,
        content_fit: ContentFit,
        radius: f32,
    ) {
        self.record(DrawCommand::Image {
            source,
            rect,
            content_rect,
            content_fit,
            radius,
        });
    }

    /// Push a transform onto the stack, composed with the current one
    pub fn push_transform(&mut self, transform: Transform) {
        let composed = self.current_transform().then(&transform);
        self.transform_stack.push(composed);
    }

    pub fn pop_transform(&mut self) {
        self.transform_stack.pop();
    }

    pub fn current_transform(&self) -> Transform {
        self.transform_stack
            .last()
            .copied()
            .unwrap_or(Transform::IDENTITY)
    }

    /// Push a clip region; everything drawn until the matching `pop_clip`
    /// is limited to the intersection of all pushed regions.
    pub fn push_clip(&mut self, rect: Rect) {
        let clip = match self.clip_stack.last() {
            Some(outer) => outer.intersection(&rect),
            None => rect,
        };
        self.clip_stack.push(clip);
    }

    pub fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }

    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    pub fn finish(self) -> DisplayList {
        DisplayList { items: self.items }
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transforms_compose_and_pop() {
        let mut ctx = PaintContext::new();
        ctx.push_transform(Transform::translate(10.0, 0.0));
        ctx.push_transform(Transform::translate(0.0, 5.0));
        ctx.draw_rounded_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE, 0.0);
        ctx.pop_transform();
        ctx.draw_rounded_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE, 0.0);
        ctx.pop_transform();
        ctx.draw_rounded_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE, 0.0);

        let list = ctx.finish();
        assert_eq!(list.items()[0].transform.transform_point(0.0, 0.0), (10.0, 5.0));
        assert_eq!(list.items()[1].transform.transform_point(0.0, 0.0), (10.0, 0.0));
        assert!(list.items()[2].transform.is_identity());
    }

    #[test]
    fn test_nested_clips_intersect() {
        let mut ctx = PaintContext::new();
        ctx.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        ctx.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        ctx.draw_rounded_rect(Rect::new(60.0, 60.0, 10.0, 10.0), Color::BLACK, 0.0);
        ctx.pop_clip();
        ctx.pop_clip();
        ctx.draw_rounded_rect(Rect::new(60.0, 60.0, 10.0, 10.0), Color::BLACK, 0.0);

        let list = ctx.finish();
        assert_eq!(list.items()[0].clip, Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
        assert_eq!(list.items()[1].clip, None);
    }

    #[test]
    fn test_texts_in_paint_order() {
        let mut ctx = PaintContext::new();
        for text in ["Hello", "World"] {
            ctx.draw_text(
                text,
                Rect::default(),
                Color::BLACK,
                16.0,
                24.0,
                FontFamily::default(),
                FontWeight::NORMAL,
                TextAlign::Center,
            );
        }
        let list = ctx.finish();
        assert_eq!(list.texts(), vec!["Hello", "World"]);
        assert!(list.images().is_empty());
    }
}
