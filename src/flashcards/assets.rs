//! Icons bundled into the binary.

use crate::widgets::ImageSource;

/// Hint shown on the front face
pub const FLIP_ICON: &[u8] = include_bytes!("../../assets/flip.svg");
/// Hint shown on the back face
pub const FLIP_BACK_ICON: &[u8] = include_bytes!("../../assets/flip-back.svg");

pub fn flip_icon() -> ImageSource {
    ImageSource::SvgBytes(FLIP_ICON.into())
}

pub fn flip_back_icon() -> ImageSource {
    ImageSource::SvgBytes(FLIP_BACK_ICON.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_metadata::get_intrinsic_size;

    #[test]
    fn test_bundled_icons_parse() {
        assert_eq!(get_intrinsic_size(&flip_icon()), Some((50, 50)));
        assert_eq!(get_intrinsic_size(&flip_back_icon()), Some((50, 50)));
        assert_ne!(flip_icon(), flip_back_icon());
    }
}
