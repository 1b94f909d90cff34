pub mod column;
pub mod flex;
pub mod overlay;

pub use column::Column;
pub use flex::{Constraints, Size};
pub use overlay::Overlay;

use crate::widgets::Widget;

/// Alignment along the direction children are stacked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainAxisAlignment {
    #[default]
    Start,
    Center,
    End,
}

/// Alignment across the stacking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossAxisAlignment {
    Start,
    #[default]
    Center,
    End,
    /// Children take the full cross extent
    Stretch,
}

/// Result of laying out a set of children: the space they occupy and each
/// child's offset from the content origin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arrangement {
    pub size: Size,
    pub offsets: Vec<(f32, f32)>,
}

/// Trait for layout strategies that position multiple children
pub trait Layout {
    fn arrange(&mut self, children: &mut [Box<dyn Widget>], constraints: Constraints)
    -> Arrangement;
}
