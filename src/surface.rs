//! Headless surface: owns a widget tree and turns input and elapsed time
//! into display lists.
//!
//! ```ignore
//! let mut surface = Surface::new(preview, 390.0, 844.0);
//! surface.dispatch(&Event::PointerDown { x: 200.0, y: 200.0 });
//! surface.dispatch(&Event::PointerUp { x: 200.0, y: 200.0 });
//! let list = surface.frame(Duration::from_millis(16));
//! ```

use std::time::Duration;

use crate::animation;
use crate::layout::{Constraints, Size};
use crate::reactive::{ChangeFlags, take_frame_request};
use crate::renderer::{DisplayList, PaintContext};
use crate::widgets::{Color, Event, EventResponse, Rect, Widget};

pub struct Surface {
    root: Box<dyn Widget>,
    size: Size,
    background_color: Color,
    dirty: ChangeFlags,
    display_list: DisplayList,
    frames: u64,
}

impl Surface {
    pub fn new(root: impl Widget + 'static, width: f32, height: f32) -> Self {
        Self {
            root: Box::new(root),
            size: Size::new(width, height),
            background_color: Color::TRANSPARENT,
            dirty: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            display_list: DisplayList::default(),
            frames: 0,
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn root(&self) -> &dyn Widget {
        self.root.as_ref()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        let size = Size::new(width, height);
        if size != self.size {
            log::debug!("surface resized to {width}x{height}");
            self.size = size;
            self.dirty |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
        }
    }

    /// Deliver an input event to the widget tree.
    pub fn dispatch(&mut self, event: &Event) -> EventResponse {
        // Hit testing uses the positions from the last layout
        if self.dirty.contains(ChangeFlags::NEEDS_LAYOUT) {
            self.layout();
        }
        let response = self.root.event(event);
        log::trace!("dispatched {event:?}: {response:?}");
        response
    }

    /// Whether another frame would differ from the last one.
    pub fn needs_frame(&self) -> bool {
        !self.dirty.is_empty() || animation::active_count() > 0
    }

    /// Advance animations by `dt` and repaint if anything changed.
    pub fn frame(&mut self, dt: Duration) -> &DisplayList {
        animation::tick(dt);
        if take_frame_request() {
            self.dirty |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
        }
        if self.dirty.contains(ChangeFlags::NEEDS_LAYOUT) {
            self.layout();
        }
        if self.dirty.contains(ChangeFlags::NEEDS_PAINT) {
            self.paint();
        }
        self.frames += 1;
        &self.display_list
    }

    /// Lay out and paint unconditionally.
    pub fn render(&mut self) -> &DisplayList {
        take_frame_request();
        self.layout();
        self.paint();
        &self.display_list
    }

    pub fn display_list(&self) -> &DisplayList {
        &self.display_list
    }

    fn layout(&mut self) {
        self.root.layout(Constraints::tight(self.size));
        self.root.set_origin(0.0, 0.0);
        self.dirty.remove(ChangeFlags::NEEDS_LAYOUT);
        self.dirty |= ChangeFlags::NEEDS_PAINT;
    }

    fn paint(&mut self) {
        let mut ctx = PaintContext::new();
        if self.background_color.a > 0.0 {
            ctx.draw_rounded_rect(Rect::from_size(self.size), self.background_color, 0.0);
        }
        self.root.paint(&mut ctx);
        self.display_list = ctx.finish();
        self.dirty.remove(ChangeFlags::NEEDS_PAINT);
    }
}
