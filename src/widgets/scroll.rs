//! Vertical scroll bookkeeping for viewports taller content is laid into.

use super::widget::ScrollSource;

/// Pixels moved per wheel notch
pub const WHEEL_LINE_HEIGHT: f32 = 40.0;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScrollState {
    /// Distance the content is moved up, always within `0..=max_offset()`
    offset: f32,
    content_height: f32,
    viewport_height: f32,
}

impl ScrollState {
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    pub fn overflows(&self) -> bool {
        self.content_height > self.viewport_height
    }

    /// Record the latest layout extents and pull the offset back in range.
    pub fn set_extents(&mut self, content_height: f32, viewport_height: f32) {
        self.content_height = content_height.max(0.0);
        self.viewport_height = viewport_height.max(0.0);
        self.clamp_offset();
    }

    pub fn scroll_to(&mut self, offset: f32) -> bool {
        let before = self.offset;
        self.offset = offset;
        self.clamp_offset();
        self.offset != before
    }

    /// Apply a scroll delta. Returns whether the offset moved.
    pub fn scroll_by(&mut self, delta_y: f32, source: ScrollSource) -> bool {
        let pixels = match source {
            ScrollSource::Wheel => delta_y * WHEEL_LINE_HEIGHT,
            ScrollSource::Finger => delta_y,
        };
        self.scroll_to(self.offset + pixels)
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_clamps_to_content() {
        let mut state = ScrollState::default();
        state.set_extents(1000.0, 400.0);
        assert_eq!(state.max_offset(), 600.0);

        assert!(state.scroll_by(250.0, ScrollSource::Finger));
        assert_eq!(state.offset(), 250.0);
        assert!(state.scroll_by(10_000.0, ScrollSource::Finger));
        assert_eq!(state.offset(), 600.0);
        assert!(!state.scroll_by(1.0, ScrollSource::Finger));
        assert!(state.scroll_by(-10_000.0, ScrollSource::Finger));
        assert_eq!(state.offset(), 0.0);
    }

    #[test]
    fn test_wheel_moves_in_lines() {
        let mut state = ScrollState::default();
        state.set_extents(1000.0, 400.0);
        state.scroll_by(2.0, ScrollSource::Wheel);
        assert_eq!(state.offset(), 2.0 * WHEEL_LINE_HEIGHT);
    }

    #[test]
    fn test_content_shrinking_pulls_offset_back() {
        let mut state = ScrollState::default();
        state.set_extents(1000.0, 400.0);
        state.scroll_to(600.0);
        state.set_extents(500.0, 400.0);
        assert_eq!(state.offset(), 100.0);

        state.set_extents(300.0, 400.0);
        assert!(!state.overflows());
        assert_eq!(state.offset(), 0.0);
    }
}
