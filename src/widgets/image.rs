//! Image widget for remote, raster and SVG sources.
//!
//! Layout never fetches anything: remote sources are laid out at their
//! explicit size and handed to the display list untouched.

use std::path::PathBuf;
use std::sync::Arc;

use crate::layout::{Constraints, Size};
use crate::reactive::{IntoMaybeDyn, MaybeDyn, WidgetId};
use crate::renderer::PaintContext;
use crate::transform::Transform;

use super::widget::{Padding, Rect, Widget};

#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Remote image addressed by URI
    Uri(String),
    /// Raster image from a file path (PNG, JPEG, GIF, WebP)
    Path(PathBuf),
    /// Raster image from in-memory bytes
    Bytes(Arc<[u8]>),
    /// SVG from in-memory bytes
    SvgBytes(Arc<[u8]>),
}

impl ImageSource {
    pub fn is_svg(&self) -> bool {
        matches!(self, ImageSource::SvgBytes(_))
    }

    pub fn uri(&self) -> Option<&str> {
        match self {
            ImageSource::Uri(uri) => Some(uri),
            _ => None,
        }
    }
}

impl From<&str> for ImageSource {
    fn from(value: &str) -> Self {
        if value.contains("://") {
            ImageSource::Uri(value.to_string())
        } else {
            ImageSource::Path(PathBuf::from(value))
        }
    }
}

impl From<String> for ImageSource {
    fn from(value: String) -> Self {
        ImageSource::from(value.as_str())
    }
}

impl IntoMaybeDyn<ImageSource> for ImageSource {
    fn into_maybe_dyn(self) -> MaybeDyn<ImageSource> {
        MaybeDyn::Static(self)
    }
}

impl IntoMaybeDyn<ImageSource> for &str {
    fn into_maybe_dyn(self) -> MaybeDyn<ImageSource> {
        MaybeDyn::Static(ImageSource::from(self))
    }
}

impl IntoMaybeDyn<ImageSource> for String {
    fn into_maybe_dyn(self) -> MaybeDyn<ImageSource> {
        MaybeDyn::Static(ImageSource::from(self))
    }
}

/// How the image content should fit within its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ContentFit {
    /// Scale to fit within bounds while preserving aspect ratio.
    #[default]
    Contain,
    /// Scale to cover bounds while preserving aspect ratio.
    Cover,
    /// Stretch to exactly fill bounds, ignoring aspect ratio.
    Fill,
}

impl ContentFit {
    /// Where content of the given intrinsic size lands inside `bounds`.
    pub fn place(self, intrinsic: Option<(u32, u32)>, bounds: Rect) -> Rect {
        let Some((w, h)) = intrinsic.filter(|(w, h)| *w > 0 && *h > 0) else {
            return bounds;
        };
        let (w, h) = (w as f32, h as f32);
        let scale = match self {
            ContentFit::Fill => return bounds,
            ContentFit::Contain => (bounds.width / w).min(bounds.height / h),
            ContentFit::Cover => (bounds.width / w).max(bounds.height / h),
        };
        let (cw, ch) = (w * scale, h * scale);
        Rect::new(
            bounds.x + (bounds.width - cw) / 2.0,
            bounds.y + (bounds.height - ch) / 2.0,
            cw,
            ch,
        )
    }
}

pub struct Image {
    widget_id: WidgetId,
    source: MaybeDyn<ImageSource>,
    width: Option<f32>,
    height: Option<f32>,
    content_fit: ContentFit,
    corner_radius: f32,
    margin: Padding,
    /// Applied about the image center
    transform: Option<MaybeDyn<Transform>>,
    bounds: Rect,
    intrinsic_size: Option<(u32, u32)>,
    cached_source: Option<ImageSource>,
}

impl Image {
    pub fn new(source: impl IntoMaybeDyn<ImageSource>) -> Self {
        Self {
            widget_id: WidgetId::next(),
            source: source.into_maybe_dyn(),
            width: None,
            height: None,
            content_fit: ContentFit::default(),
            corner_radius: 0.0,
            margin: Padding::default(),
            transform: None,
            bounds: Rect::default(),
            intrinsic_size: None,
            cached_source: None,
        }
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

    pub fn content_fit(mut self, fit: ContentFit) -> Self {
        self.content_fit = fit;
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn margin(mut self, margin: impl Into<Padding>) -> Self {
        self.margin = margin.into();
        self
    }

    pub fn transform(mut self, transform: impl IntoMaybeDyn<Transform>) -> Self {
        self.transform = Some(transform.into_maybe_dyn());
        self
    }

    pub fn intrinsic_size(&self) -> Option<(u32, u32)> {
        self.intrinsic_size
    }

    /// Current transform in surface coordinates, pivoting on the center.
    pub fn current_transform(&self) -> Transform {
        let (cx, cy) = self.bounds.center();
        self.transform
            .as_ref()
            .map(|t| t.get().about(cx, cy))
            .unwrap_or(Transform::IDENTITY)
    }

    fn calculate_size(&self, constraints: &Constraints) -> Size {
        let intrinsic = self
            .intrinsic_size
            .map(|(w, h)| (w as f32, h as f32))
            .filter(|(w, h)| *w > 0.0 && *h > 0.0);

        let size = match (self.width, self.height, intrinsic) {
            (Some(w), Some(h), _) => Size::new(w, h),
            (Some(w), None, Some((iw, ih))) => Size::new(w, w * ih / iw),
            (None, Some(h), Some((iw, ih))) => Size::new(h * iw / ih, h),
            (None, None, Some((iw, ih))) => Size::new(iw, ih),
            // Unknown aspect ratio: square on whatever side is known
            (Some(w), None, None) => Size::new(w, w),
            (None, Some(h), None) => Size::new(h, h),
            (None, None, None) => Size::zero(),
        };
        constraints.constrain(size)
    }
}

impl Widget for Image {
    fn id(&self) -> WidgetId {
        self.widget_id
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        let current_source = self.source.get();
        if self.cached_source.as_ref() != Some(&current_source) {
            self.intrinsic_size = crate::image_metadata::get_intrinsic_size(&current_source);
            self.cached_source = Some(current_source);
        }

        let size = self.calculate_size(&constraints);
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
        let Some(source) = self.cached_source.clone() else {
            return;
        };
        let content_rect = self.content_fit.place(self.intrinsic_size, self.bounds);

        let transform = self.current_transform();
        let transformed = !transform.is_identity();
        if transformed {
            ctx.push_transform(transform);
        }
        ctx.draw_image(
            source,
            self.bounds,
            content_rect,
            self.content_fit,
            self.corner_radius,
        );
        if transformed {
            ctx.pop_transform();
        }
    }
}

/// Create an image widget from a source.
///
/// ```ignore
/// image("https://example.com/photo.png").size(150.0, 150.0)
/// image(ImageSource::SvgBytes(FLIP_ICON.into())).size(25.0, 25.0)
/// ```
pub fn image(source: impl IntoMaybeDyn<ImageSource>) -> Image {
    Image::new(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE_SVG: &[u8] =
        br#"<svg xmlns="http://www.w3.org/2000/svg" width="50" height="25"></svg>"#;

    #[test]
    fn test_uri_detection() {
        assert_eq!(
            ImageSource::from("https://example.com/a.png").uri(),
            Some("https://example.com/a.png")
        );
        assert_eq!(ImageSource::from("local/a.png").uri(), None);
    }

    #[test]
    fn test_remote_image_uses_explicit_size() {
        let mut widget = image("https://example.com/a.png").size(150.0, 150.0);
        let size = widget.layout(Constraints::unbounded());
        assert_eq!(size, Size::new(150.0, 150.0));
        assert_eq!(widget.intrinsic_size(), None);
    }

    #[test]
    fn test_svg_aspect_ratio_from_width() {
        let mut widget = image(ImageSource::SvgBytes(SQUARE_SVG.into())).width(100.0);
        let size = widget.layout(Constraints::unbounded());
        assert_eq!(widget.intrinsic_size(), Some((50, 25)));
        assert_eq!(size, Size::new(100.0, 50.0));
    }

    #[test]
    fn test_contain_letterboxes() {
        let bounds = Rect::new(0.0, 0.0, 150.0, 150.0);
        let placed = ContentFit::Contain.place(Some((300, 150)), bounds);
        assert_eq!(placed, Rect::new(0.0, 37.5, 150.0, 75.0));
        assert_eq!(ContentFit::Contain.place(None, bounds), bounds);
    }

    #[test]
    fn test_transform_pivots_on_center() {
        let mut widget = image(ImageSource::SvgBytes(SQUARE_SVG.into()))
            .size(25.0, 25.0)
            .transform(Transform::scale(2.0));
        widget.layout(Constraints::unbounded());
        widget.set_origin(100.0, 100.0);

        let (x, y) = widget.current_transform().transform_point(112.5, 112.5);
        assert_eq!((x, y), (112.5, 112.5));
        assert_eq!(
            widget.current_transform().transform_point(100.0, 100.0),
            (87.5, 87.5)
        );
    }
}
