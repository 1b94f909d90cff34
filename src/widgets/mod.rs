pub mod container;
pub mod font;
pub mod image;
pub mod scroll;
pub mod text;
pub mod widget;

pub use container::{Anchor, ClickCallback, Container, container};
pub use font::{FontFamily, FontWeight};
pub use image::{ContentFit, Image, ImageSource, image};
pub use scroll::ScrollState;
pub use text::{Text, TextAlign, text};
pub use widget::{Color, Event, EventResponse, Padding, Rect, ScrollSource, Widget};

// IntoMaybeDyn implementations for widget types
use crate::reactive::{IntoMaybeDyn, MaybeDyn};
use crate::transform::Transform;

impl IntoMaybeDyn<Color> for Color {
    fn into_maybe_dyn(self) -> MaybeDyn<Color> {
        MaybeDyn::Static(self)
    }
}

impl IntoMaybeDyn<Transform> for Transform {
    fn into_maybe_dyn(self) -> MaybeDyn<Transform> {
        MaybeDyn::Static(self)
    }
}
