//! Draw command definitions for the display list.

use crate::widgets::font::{FontFamily, FontWeight};
use crate::widgets::image::{ContentFit, ImageSource};
use crate::widgets::text::TextAlign;
use crate::widgets::{Color, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    /// Border width in logical pixels
    pub width: f32,
    pub color: Color,
}

impl Border {
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// Drop shadow cast by a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    /// Shadow offset in logical pixels (x, y)
    pub offset: (f32, f32),
    /// Blur radius in logical pixels
    pub blur: f32,
    pub color: Color,
}

impl Shadow {
    pub fn new(offset: (f32, f32), blur: f32, color: Color) -> Self {
        Self {
            offset,
            blur,
            color,
        }
    }
}

/// A single draw operation in surface coordinates, before the item's
/// transform is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    RoundedRect {
        rect: Rect,
        color: Color,
        radius: f32,
        border: Option<Border>,
        shadow: Option<Shadow>,
    },

    Text {
        text: String,
        /// The bounding rectangle the text was laid out in
        rect: Rect,
        color: Color,
        font_size: f32,
        line_height: f32,
        font_family: FontFamily,
        font_weight: FontWeight,
        align: TextAlign,
    },

    Image {
        source: ImageSource,
        /// Box the image was given by layout
        rect: Rect,
        /// Where the pixels land once `content_fit` is applied; equal to
        /// `rect` when the intrinsic size is unknown
        content_rect: Rect,
        content_fit: ContentFit,
        radius: f32,
    },
}

impl DrawCommand {
    pub fn rect(&self) -> Rect {
        match self {
            DrawCommand::RoundedRect { rect, .. }
            | DrawCommand::Text { rect, .. }
            | DrawCommand::Image { rect, .. } => *rect,
        }
    }
}
