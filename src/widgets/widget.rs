use crate::error::{Error, Result};
use crate::layout::{Constraints, Size};
use crate::reactive::WidgetId;
use crate::renderer::PaintContext;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse a CSS hex color: `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    pub fn parse_hex(input: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(input.to_string());
        let digits = input.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        let (r, g, b, a) = match digits.len() {
            3 | 4 => {
                let mut out = [255u8; 4];
                for (slot, i) in out.iter_mut().zip(0..digits.len()) {
                    let nibble = channel(&digits[i..=i])?;
                    *slot = nibble * 17;
                }
                (out[0], out[1], out[2], out[3])
            }
            6 | 8 => {
                let a = if digits.len() == 8 {
                    channel(&digits[6..8])?
                } else {
                    255
                };
                (
                    channel(&digits[0..2])?,
                    channel(&digits[2..4])?,
                    channel(&digits[4..6])?,
                    a,
                )
            }
            _ => return Err(invalid()),
        };

        Ok(Self::rgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        ))
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Overlapping area of two rects; empty when they don't touch.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        Rect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn top(mut self, v: f32) -> Self {
        self.top = v;
        self
    }

    pub fn bottom(mut self, v: f32) -> Self {
        self.bottom = v;
        self
    }
}

impl From<f32> for Padding {
    fn from(v: f32) -> Self {
        Padding::all(v)
    }
}

/// `[vertical, horizontal]`
impl From<[f32; 2]> for Padding {
    fn from(v: [f32; 2]) -> Self {
        Padding::symmetric(v[1], v[0])
    }
}

/// Scroll source - discrete (mouse wheel) or smooth (touch)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollSource {
    /// Mouse wheel, deltas are in lines
    Wheel,
    /// Touch or touchpad, deltas are in pixels
    Finger,
}

/// Pointer input delivered to the widget tree, in surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    /// The pointer left the surface; any press in progress is abandoned
    PointerLeave,
    Scroll {
        x: f32,
        y: f32,
        /// Vertical delta (positive = content moves up)
        delta_y: f32,
        source: ScrollSource,
    },
}

impl Event {
    pub fn coords(&self) -> Option<(f32, f32)> {
        match self {
            Event::PointerDown { x, y }
            | Event::PointerUp { x, y }
            | Event::Scroll { x, y, .. } => Some((*x, *y)),
            Event::PointerLeave => None,
        }
    }

    /// Same event moved by `(dx, dy)`.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        match self {
            Event::PointerDown { x, y } => Event::PointerDown {
                x: x + dx,
                y: y + dy,
            },
            Event::PointerUp { x, y } => Event::PointerUp {
                x: x + dx,
                y: y + dy,
            },
            Event::Scroll {
                x,
                y,
                delta_y,
                source,
            } => Event::Scroll {
                x: x + dx,
                y: y + dy,
                delta_y: *delta_y,
                source: *source,
            },
            Event::PointerLeave => Event::PointerLeave,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Ignored,
    Handled,
}

pub trait Widget {
    fn id(&self) -> WidgetId;

    /// Measure against `constraints` and remember the resulting size.
    fn layout(&mut self, constraints: Constraints) -> Size;

    /// Place the widget (and its children) at an absolute position.
    fn set_origin(&mut self, x: f32, y: f32);

    fn bounds(&self) -> Rect;

    /// Outer spacing a parent layout keeps around this widget.
    fn margin(&self) -> Padding {
        Padding::default()
    }

    fn paint(&self, ctx: &mut PaintContext);

    fn event(&mut self, event: &Event) -> EventResponse {
        let _ = event;
        EventResponse::Ignored
    }
}

impl Widget for Box<dyn Widget> {
    fn id(&self) -> WidgetId {
        (**self).id()
    }
    fn layout(&mut self, constraints: Constraints) -> Size {
        (**self).layout(constraints)
    }
    fn set_origin(&mut self, x: f32, y: f32) {
        (**self).set_origin(x, y)
    }
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
    fn margin(&self) -> Padding {
        (**self).margin()
    }
    fn paint(&self, ctx: &mut PaintContext) {
        (**self).paint(ctx)
    }
    fn event(&mut self, event: &Event) -> EventResponse {
        (**self).event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let color = Color::from_hex(0xFF0000);
        assert_eq!(color, Color::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse_hex("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::parse_hex("#000000").unwrap(), Color::BLACK);
        assert_eq!(Color::parse_hex("#0000").unwrap(), Color::TRANSPARENT);

        let c = Color::parse_hex("#3366CC80").unwrap();
        assert_eq!(c.r, 0x33 as f32 / 255.0);
        assert_eq!(c.b, 0xCC as f32 / 255.0);
        assert_eq!(c.a, 0x80 as f32 / 255.0);
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        for input in ["", "fff", "#ff", "#12345", "#gggggg", "red", "#1234567890"] {
            assert!(
                matches!(Color::parse_hex(input), Err(Error::InvalidColor(_))),
                "{input}"
            );
        }
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(rect.contains(50.0, 40.0));
        assert!(rect.contains(10.0, 20.0));
        assert!(!rect.contains(110.0, 70.0));
        assert!(!rect.contains(5.0, 40.0));
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 80.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), Rect::new(50.0, 80.0, 50.0, 20.0));
        assert_eq!(
            a.intersection(&Rect::new(200.0, 0.0, 10.0, 10.0)).width,
            0.0
        );
    }

    #[test]
    fn test_padding_shorthands() {
        assert_eq!(Padding::from(10.0), Padding::all(10.0));
        let p = Padding::from([8.0, 16.0]);
        assert_eq!((p.top, p.right, p.bottom, p.left), (8.0, 16.0, 8.0, 16.0));
        assert_eq!(Padding::all(8.0).top(20.0).vertical(), 28.0);
    }

    #[test]
    fn test_event_translated() {
        let e = Event::PointerDown { x: 10.0, y: 10.0 }.translated(0.0, 25.0);
        assert_eq!(e.coords(), Some((10.0, 35.0)));
        assert_eq!(Event::PointerLeave.translated(1.0, 1.0).coords(), None);
    }
}
