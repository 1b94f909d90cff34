use std::rc::Rc;

use crate::layout::{Arrangement, Column, Constraints, Layout, Size};
use crate::reactive::{IntoMaybeDyn, MaybeDyn, WidgetId};
use crate::renderer::{Border, PaintContext, Shadow};
use crate::transform::Transform;

use super::widget::{Color, Event, EventResponse, Padding, Rect, Widget};

/// Callback for click events
pub type ClickCallback = Rc<dyn Fn()>;

/// Where an overlay child sits inside its container. Overlays are laid out
/// after the regular children and don't take part in their flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    TopLeft,
    /// Horizontally centered, `inset` pixels above the bottom edge
    BottomCenter { inset: f32 },
}

pub struct Container {
    widget_id: WidgetId,
    layout: Box<dyn Layout>,
    children: Vec<Box<dyn Widget>>,
    child_offsets: Vec<(f32, f32)>,
    overlays: Vec<(Box<dyn Widget>, Anchor)>,
    overlay_offsets: Vec<(f32, f32)>,
    width: Option<f32>,
    height: Option<f32>,
    padding: Padding,
    margin: Padding,
    background: MaybeDyn<Color>,
    border: Option<Border>,
    corner_radius: f32,
    shadow: Option<Shadow>,
    /// Applied about the container center
    transform: Option<MaybeDyn<Transform>>,
    backface_hidden: bool,
    on_click: Option<ClickCallback>,
    pressed: bool,
    bounds: Rect,
}

impl Container {
    pub fn new() -> Self {
        Self {
            widget_id: WidgetId::next(),
            layout: Box::new(Column::new()),
            children: Vec::new(),
            child_offsets: Vec::new(),
            overlays: Vec::new(),
            overlay_offsets: Vec::new(),
            width: None,
            height: None,
            padding: Padding::default(),
            margin: Padding::default(),
            background: MaybeDyn::Static(Color::TRANSPARENT),
            border: None,
            corner_radius: 0.0,
            shadow: None,
            transform: None,
            backface_hidden: false,
            on_click: None,
            pressed: false,
            bounds: Rect::default(),
        }
    }

    pub fn layout(mut self, layout: impl Layout + 'static) -> Self {
        self.layout = Box::new(layout);
        self
    }

    pub fn child(mut self, widget: impl Widget + 'static) -> Self {
        self.children.push(Box::new(widget));
        self
    }

    pub fn maybe_child(self, widget: Option<impl Widget + 'static>) -> Self {
        match widget {
            Some(widget) => self.child(widget),
            None => self,
        }
    }

    pub fn overlay(mut self, widget: impl Widget + 'static, anchor: Anchor) -> Self {
        self.overlays.push((Box::new(widget), anchor));
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn size(self, width: f32, height: f32) -> Self {
        self.width(width).height(height)
    }

    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    pub fn margin(mut self, margin: impl Into<Padding>) -> Self {
        self.margin = margin.into();
        self
    }

    pub fn background(mut self, color: impl IntoMaybeDyn<Color>) -> Self {
        self.background = color.into_maybe_dyn();
        self
    }

    pub fn border(mut self, width: f32, color: Color) -> Self {
        self.border = Some(Border::new(width, color));
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn transform(mut self, transform: impl IntoMaybeDyn<Transform>) -> Self {
        self.transform = Some(transform.into_maybe_dyn());
        self
    }

    /// Skip painting while the container's front side faces away.
    pub fn backface_hidden(mut self, hidden: bool) -> Self {
        self.backface_hidden = hidden;
        self
    }

    pub fn on_click(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(callback));
        self
    }

    pub fn children(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    pub fn overlays(&self) -> impl Iterator<Item = &dyn Widget> {
        self.overlays.iter().map(|(w, _)| w.as_ref())
    }

    /// Current transform in surface coordinates, pivoting on the center.
    pub fn current_transform(&self) -> Transform {
        let (cx, cy) = self.bounds.center();
        self.transform
            .as_ref()
            .map(|t| t.get().about(cx, cy))
            .unwrap_or(Transform::IDENTITY)
    }

    fn content_constraints(&self, constraints: Constraints) -> Constraints {
        let fixed_w = self.width.map(|w| w.clamp(constraints.min_width, constraints.max_width));
        let fixed_h = self
            .height
            .map(|h| h.clamp(constraints.min_height, constraints.max_height));

        let outer = Constraints {
            min_width: fixed_w.unwrap_or(constraints.min_width),
            max_width: fixed_w.unwrap_or(constraints.max_width),
            min_height: fixed_h.unwrap_or(constraints.min_height),
            max_height: fixed_h.unwrap_or(constraints.max_height),
        };
        outer.deflate(self.padding.horizontal(), self.padding.vertical())
    }

    fn place_overlays(&mut self) {
        let inner_w = self.bounds.width;
        let inner_h = self.bounds.height;
        self.overlay_offsets.clear();
        for (overlay, anchor) in self.overlays.iter_mut() {
            let size = overlay.layout(Constraints::loose(Size::new(inner_w, inner_h)));
            let offset = match anchor {
                Anchor::TopLeft => (0.0, 0.0),
                Anchor::BottomCenter { inset } => (
                    (inner_w - size.width) / 2.0,
                    inner_h - *inset - size.height,
                ),
            };
            self.overlay_offsets.push(offset);
        }
    }

    fn paints_surface(&self, background: Color) -> bool {
        background.a > 0.0 || self.border.is_some() || self.shadow.is_some()
    }

    fn handle_press(&mut self, event: &Event) -> EventResponse {
        if self.on_click.is_none() {
            return EventResponse::Ignored;
        }
        match event {
            Event::PointerDown { x, y } => {
                // A press elsewhere drops any press left over from before
                self.pressed = self.bounds.contains(*x, *y);
                if self.pressed {
                    EventResponse::Handled
                } else {
                    EventResponse::Ignored
                }
            }
            Event::PointerUp { x, y } if self.pressed => {
                self.pressed = false;
                if !self.bounds.contains(*x, *y) {
                    return EventResponse::Ignored;
                }
                if let Some(callback) = self.on_click.clone() {
                    callback();
                }
                EventResponse::Handled
            }
            Event::PointerLeave => {
                self.pressed = false;
                EventResponse::Ignored
            }
            _ => EventResponse::Ignored,
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Container {
    fn id(&self) -> WidgetId {
        self.widget_id
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        let content = self.content_constraints(constraints);
        let Arrangement { size, offsets } = self.layout.arrange(&mut self.children, content);
        self.child_offsets = offsets;

        let natural = Size::new(
            self.width.unwrap_or(size.width + self.padding.horizontal()),
            self.height.unwrap_or(size.height + self.padding.vertical()),
        );
        let size = constraints.constrain(natural);
        self.bounds.width = size.width;
        self.bounds.height = size.height;

        self.place_overlays();
        size
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;

        let content_x = x + self.padding.left;
        let content_y = y + self.padding.top;
        for (child, (dx, dy)) in self.children.iter_mut().zip(&self.child_offsets) {
            child.set_origin(content_x + dx, content_y + dy);
        }
        for ((overlay, _), (dx, dy)) in self.overlays.iter_mut().zip(&self.overlay_offsets) {
            overlay.set_origin(x + dx, y + dy);
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn margin(&self) -> Padding {
        self.margin
    }

    fn paint(&self, ctx: &mut PaintContext) {
        let transform = self.current_transform();
        let transformed = !transform.is_identity();
        if transformed {
            ctx.push_transform(transform);
        }

        let b = self.bounds;
        let hidden = self.backface_hidden
            && ctx
                .current_transform()
                .is_back_facing(b.x, b.y, b.width, b.height);

        if !hidden {
            let background = self.background.get();
            if self.paints_surface(background) {
                ctx.draw_shape(b, background, self.corner_radius, self.border, self.shadow);
            }
            for child in &self.children {
                child.paint(ctx);
            }
            for (overlay, _) in &self.overlays {
                overlay.paint(ctx);
            }
        }

        if transformed {
            ctx.pop_transform();
        }
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        for child in self.children.iter_mut().rev() {
            if child.event(event) == EventResponse::Handled {
                return EventResponse::Handled;
            }
        }
        self.handle_press(event)
    }
}

/// Create a container with a top-aligned column layout.
pub fn container() -> Container {
    Container::new()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::layout::{Column, Overlay};

    #[test]
    fn test_fixed_size_and_padding() {
        let mut outer = container()
            .size(345.0, 345.0)
            .padding(10.0)
            .layout(Column::centered())
            .child(container().size(100.0, 50.0));
        let size = Widget::layout(&mut outer, Constraints::unbounded());
        outer.set_origin(20.0, 20.0);

        assert_eq!(size, Size::new(345.0, 345.0));
        let child = outer.children()[0].bounds();
        assert_eq!(child, Rect::new(142.5, 167.5, 100.0, 50.0));
    }

    #[test]
    fn test_bottom_center_overlay() {
        let mut card = container()
            .size(345.0, 345.0)
            .layout(Overlay::new())
            .overlay(container().size(25.0, 25.0), Anchor::BottomCenter { inset: 12.0 });
        Widget::layout(&mut card, Constraints::unbounded());
        card.set_origin(0.0, 100.0);

        let icon = card.overlays().next().map(|w| w.bounds());
        assert_eq!(icon, Some(Rect::new(160.0, 408.0, 25.0, 25.0)));
    }

    #[test]
    fn test_click_needs_press_and_release_inside() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let mut button = container()
            .size(100.0, 100.0)
            .on_click(move || counter.set(counter.get() + 1));
        Widget::layout(&mut button, Constraints::unbounded());
        button.set_origin(0.0, 0.0);

        button.event(&Event::PointerDown { x: 10.0, y: 10.0 });
        button.event(&Event::PointerUp { x: 20.0, y: 20.0 });
        assert_eq!(clicks.get(), 1);

        // Released outside
        button.event(&Event::PointerDown { x: 10.0, y: 10.0 });
        button.event(&Event::PointerUp { x: 200.0, y: 20.0 });
        assert_eq!(clicks.get(), 1);

        // A press elsewhere clears a press that never saw its release
        button.event(&Event::PointerDown { x: 10.0, y: 10.0 });
        assert_eq!(
            button.event(&Event::PointerDown { x: 300.0, y: 10.0 }),
            EventResponse::Ignored
        );
        button.event(&Event::PointerUp { x: 20.0, y: 20.0 });
        assert_eq!(clicks.get(), 1);

        // Release without press
        button.event(&Event::PointerUp { x: 20.0, y: 20.0 });
        assert_eq!(clicks.get(), 1);

        // Leaving the surface cancels the press
        button.event(&Event::PointerDown { x: 10.0, y: 10.0 });
        button.event(&Event::PointerLeave);
        button.event(&Event::PointerUp { x: 20.0, y: 20.0 });
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_backface_hidden_skips_paint() {
        let mut face = container()
            .size(100.0, 100.0)
            .background(Color::WHITE)
            .transform(Transform::perspective(1000.0).then(&Transform::rotate_y_degrees(180.0)))
            .backface_hidden(true);
        Widget::layout(&mut face, Constraints::unbounded());
        face.set_origin(0.0, 0.0);

        let mut ctx = PaintContext::new();
        face.paint(&mut ctx);
        assert!(ctx.finish().is_empty());
    }

    #[test]
    fn test_transparent_container_draws_nothing_itself() {
        let mut plain = container().size(10.0, 10.0);
        Widget::layout(&mut plain, Constraints::unbounded());
        let mut ctx = PaintContext::new();
        plain.paint(&mut ctx);
        assert!(ctx.finish().is_empty());
    }
}
