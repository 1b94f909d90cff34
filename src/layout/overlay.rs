//! Overlay layout that stacks children on top of each other.

use super::{Arrangement, Constraints, Layout, Size};
use crate::widgets::Widget;

/// Overlay layout that places all children at the same position,
/// stacking them on top of each other. Later children appear on top.
///
/// The size of the overlay is determined by the largest child.
pub struct Overlay;

impl Overlay {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout for Overlay {
    fn arrange(
        &mut self,
        children: &mut [Box<dyn Widget>],
        constraints: Constraints,
    ) -> Arrangement {
        let mut max_width: f32 = 0.0;
        let mut max_height: f32 = 0.0;

        for child in children.iter_mut() {
            let size = child.layout(constraints);
            max_width = max_width.max(size.width);
            max_height = max_height.max(size.height);
        }

        Arrangement {
            size: constraints.constrain(Size::new(max_width, max_height)),
            offsets: vec![(0.0, 0.0); children.len()],
        }
    }
}
