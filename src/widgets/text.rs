use crate::layout::{Constraints, Size};
use crate::reactive::{IntoMaybeDyn, MaybeDyn, WidgetId};
use crate::renderer::{PaintContext, TextStyle, measure_text};

use super::font::{FontFamily, FontWeight};
use super::widget::{Color, Padding, Rect, Widget};

/// Horizontal alignment of each line inside the text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

pub struct Text {
    widget_id: WidgetId,
    content: MaybeDyn<String>,
    color: MaybeDyn<Color>,
    font_size: f32,
    line_height: Option<f32>,
    font_family: FontFamily,
    font_weight: FontWeight,
    align: TextAlign,
    margin: Padding,
    cached_text: String,
    bounds: Rect,
}

impl Text {
    pub fn new(content: impl IntoMaybeDyn<String>) -> Self {
        let content = content.into_maybe_dyn();
        let cached_text = content.get();
        Self {
            widget_id: WidgetId::next(),
            content,
            color: MaybeDyn::Static(Color::BLACK),
            font_size: 14.0,
            line_height: None,
            font_family: FontFamily::default(),
            font_weight: FontWeight::NORMAL,
            align: TextAlign::Start,
            margin: Padding::default(),
            cached_text,
            bounds: Rect::default(),
        }
    }

    pub fn color(mut self, color: impl IntoMaybeDyn<Color>) -> Self {
        self.color = color.into_maybe_dyn();
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Distance between baselines. Defaults to 1.2 times the font size.
    pub fn line_height(mut self, height: f32) -> Self {
        self.line_height = Some(height);
        self
    }

    pub fn font_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    pub fn font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn margin(mut self, margin: impl Into<Padding>) -> Self {
        self.margin = margin.into();
        self
    }

    /// The string produced by the last layout pass.
    pub fn content(&self) -> &str {
        &self.cached_text
    }

    fn style(&self) -> TextStyle {
        TextStyle {
            font_size: self.font_size,
            line_height: self.line_height.unwrap_or(self.font_size * 1.2),
            family: self.font_family.clone(),
            weight: self.font_weight,
        }
    }
}

impl Widget for Text {
    fn id(&self) -> WidgetId {
        self.widget_id
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        self.cached_text = self.content.get();

        let measured = measure_text(
            &self.cached_text,
            &self.style(),
            Some(constraints.max_width),
        );
        let size = constraints.constrain(measured);

        self.bounds.width = size.width;
        self.bounds.height = size.height;
        size
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn margin(&self) -> Padding {
        self.margin
    }

    fn paint(&self, ctx: &mut PaintContext) {
        let style = self.style();
        ctx.draw_text(
            &self.cached_text,
            self.bounds,
            self.color.get(),
            style.font_size,
            style.line_height,
            style.family,
            style.weight,
            self.align,
        );
    }
}

/// Create a text widget
///
/// Accepts static strings, closures, or signals:
/// ```ignore
/// text("Hello")
/// text(move || format!("Card {}", index.get()))
/// ```
pub fn text(content: impl IntoMaybeDyn<String>) -> Text {
    Text::new(content)
}
