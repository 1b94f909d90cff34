//! Font family and weight types for text styling.

use cosmic_text::{Family, Weight};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    /// Default system sans-serif
    #[default]
    SansSerif,
    Serif,
    Monospace,
    /// Custom font by name
    Name(String),
}

impl FontFamily {
    /// Convert to cosmic-text Family type for measuring.
    pub fn to_cosmic(&self) -> Family<'_> {
        match self {
            FontFamily::SansSerif => Family::SansSerif,
            FontFamily::Serif => Family::Serif,
            FontFamily::Monospace => Family::Monospace,
            FontFamily::Name(name) => Family::Name(name),
        }
    }
}

/// Font weight on a 100-900 scale, matching CSS font-weight values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: Self = Self(400);
    pub const MEDIUM: Self = Self(500);
    pub const BOLD: Self = Self(700);

    pub fn to_cosmic(self) -> Weight {
        Weight(self.0)
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}
