//! Intrinsic image dimensions, read without decoding pixel data where the
//! format allows it.

use image::GenericImageView;

use crate::widgets::image::ImageSource;

/// Natural `(width, height)` of an image source.
///
/// Remote sources are never fetched and yield `None`, as does anything
/// that can't be read or parsed.
pub fn get_intrinsic_size(source: &ImageSource) -> Option<(u32, u32)> {
    let size = match source {
        ImageSource::Uri(_) => None,
        ImageSource::Path(path) => image::image_dimensions(path).ok(),
        ImageSource::Bytes(bytes) => image::load_from_memory(bytes)
            .ok()
            .map(|img| img.dimensions()),
        ImageSource::SvgBytes(bytes) => get_svg_size(bytes),
    };
    if size.is_none() && !matches!(source, ImageSource::Uri(_)) {
        log::debug!("could not determine intrinsic size of {source:?}");
    }
    size
}

fn get_svg_size(bytes: &[u8]) -> Option<(u32, u32)> {
    let tree = resvg::usvg::Tree::from_data(bytes, &resvg::usvg::Options::default()).ok()?;
    let size = tree.size();
    Some((size.width() as u32, size.height() as u32))
}
