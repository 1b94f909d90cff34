use crate::layout::Size;
use crate::widgets::font::{FontFamily, FontWeight};
use cosmic_text::{Attrs, Buffer, FontSystem, Metrics, Shaping};
use std::cell::RefCell;

/// Everything that affects how a run of text is shaped.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub line_height: f32,
    pub family: FontFamily,
    pub weight: FontWeight,
}

impl TextStyle {
    pub fn new(font_size: f32, line_height: f32) -> Self {
        Self {
            font_size,
            line_height,
            family: FontFamily::default(),
            weight: FontWeight::NORMAL,
        }
    }
}

pub struct TextMeasurer {
    font_system: FontSystem,
}

impl TextMeasurer {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
        }
    }

    /// Shape `text` and return the size of its laid-out lines. Text wraps
    /// at `max_width` when one is given.
    pub fn measure(&mut self, text: &str, style: &TextStyle, max_width: Option<f32>) -> Size {
        let metrics = Metrics::new(style.font_size, style.line_height);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        buffer.set_size(&mut self.font_system, max_width, None);
        buffer.set_text(
            &mut self.font_system,
            text,
            &Attrs::new()
                .family(style.family.to_cosmic())
                .weight(style.weight.to_cosmic()),
            Shaping::Advanced,
            None,
        );
        buffer.shape_until_scroll(&mut self.font_system, true);

        let mut width = 0.0f32;
        let mut height = 0.0f32;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
            height += run.line_height;
        }

        // Empty text still occupies one line
        if height == 0.0 {
            height = style.line_height;
        }

        Size::new(width, height)
    }
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static TEXT_MEASURER: RefCell<TextMeasurer> = RefCell::new(TextMeasurer::new());
}

/// Measure text dimensions using the shared font system
pub fn measure_text(text: &str, style: &TextStyle, max_width: Option<f32>) -> Size {
    let max_width = max_width.filter(|w| w.is_finite());
    TEXT_MEASURER.with_borrow_mut(|m| m.measure(text, style, max_width))
}
