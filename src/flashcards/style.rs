//! Fixed card geometry and type scale.

use crate::renderer::Shadow;
use crate::widgets::{Color, FontWeight};

pub const LIST_PADDING: f32 = 20.0;

pub const CARD_SIZE: f32 = 345.0;
pub const CARD_MARGIN_BOTTOM: f32 = 20.0;

pub const FACE_BORDER_WIDTH: f32 = 1.0;
pub const FACE_CORNER_RADIUS: f32 = 10.0;
pub const FACE_PADDING: f32 = 10.0;
pub const FACE_PERSPECTIVE: f32 = 1000.0;

pub const IMAGE_SIZE: f32 = 150.0;

pub const ICON_SIZE: f32 = 25.0;
pub const ICON_CORNER_RADIUS: f32 = 4.0;
pub const ICON_BOTTOM_INSET: f32 = 12.0;

pub const TITLE_WEIGHT: FontWeight = FontWeight::BOLD;
pub const TITLE_MARGIN_TOP: f32 = 10.0;

/// Degrees the hint icon turns at the peak of its slide
pub const HINT_MAX_ROTATION: f32 = 30.0;

pub fn face_shadow() -> Shadow {
    Shadow::new((0.0, 15.0), 30.0, Color::BLACK.with_alpha(0.1))
}

/// Font size and line height for one text role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub font_size: f32,
    pub line_height: f32,
}

impl TextMetrics {
    const fn scaled(font_size: f32, line_height: f32, scale: f32) -> Self {
        Self {
            font_size: font_size * scale,
            line_height: line_height * scale,
        }
    }
}

pub fn title_metrics(scale: f32) -> TextMetrics {
    TextMetrics::scaled(20.0, 30.0, scale)
}

pub fn body_metrics(scale: f32) -> TextMetrics {
    TextMetrics::scaled(16.0, 24.0, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_scale_linearly() {
        assert_eq!(
            title_metrics(1.5),
            TextMetrics {
                font_size: 30.0,
                line_height: 45.0
            }
        );
        assert_eq!(
            body_metrics(2.0),
            TextMetrics {
                font_size: 32.0,
                line_height: 48.0
            }
        );
    }
}
