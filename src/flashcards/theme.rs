//! Presentation inputs shared by every card: text lookup, color tokens and
//! the accessibility scale.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::widgets::Color;

/// Resolves a card's raw strings to display text.
pub trait TextSource {
    fn get_text(&self, key: &str) -> String;
}

impl<F> TextSource for F
where
    F: Fn(&str) -> String,
{
    fn get_text(&self, key: &str) -> String {
        self(key)
    }
}

/// Displays every string as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityText;

impl TextSource for IdentityText {
    fn get_text(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Nested design-token tree, e.g. `{"brand": {"primary": {"main": {...}}}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTokens(Value);

impl ColorTokens {
    pub fn new(tree: Value) -> Self {
        Self(tree)
    }

    pub fn tree(&self) -> &Value {
        &self.0
    }

    /// String at a dot-separated path, if every segment exists.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        path.split('.')
            .try_fold(&self.0, |node, segment| node.get(segment))
            .and_then(Value::as_str)
    }

    /// Color at `path`. Missing and unparseable values both yield `None`.
    pub fn color(&self, path: &str) -> Option<Color> {
        let raw = self.lookup(path)?;
        match Color::parse_hex(raw) {
            Ok(color) => Some(color),
            Err(err) => {
                log::debug!("ignoring color token {path}: {err}");
                None
            }
        }
    }
}

impl From<Value> for ColorTokens {
    fn from(tree: Value) -> Self {
        Self(tree)
    }
}

/// Where in the token tree each card color lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPaths {
    pub fill: String,
    pub stroke: String,
    pub text: String,
}

impl Default for TokenPaths {
    fn default() -> Self {
        Self {
            fill: "brand.primary.main.color".to_string(),
            stroke: "brand.primary.main.stroke".to_string(),
            text: "brand.primary.main.text".to_string(),
        }
    }
}

/// Resolved card colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPalette {
    pub fill: Color,
    pub stroke: Color,
    pub text: Color,
}

impl CardPalette {
    pub const FALLBACK: CardPalette = CardPalette {
        fill: Color::WHITE,
        stroke: Color::WHITE,
        text: Color::BLACK,
    };

    pub fn resolve(tokens: &ColorTokens, paths: &TokenPaths) -> Self {
        Self {
            fill: tokens.color(&paths.fill).unwrap_or(Self::FALLBACK.fill),
            stroke: tokens.color(&paths.stroke).unwrap_or(Self::FALLBACK.stroke),
            text: tokens.color(&paths.text).unwrap_or(Self::FALLBACK.text),
        }
    }
}

impl Default for CardPalette {
    fn default() -> Self {
        Self::FALLBACK
    }
}

#[derive(Clone)]
pub struct PresentationConfig {
    pub text: Rc<dyn TextSource>,
    pub colors: ColorTokens,
    pub token_paths: TokenPaths,
    pub a11y_scale: Option<f32>,
}

impl PresentationConfig {
    pub fn new(text: impl TextSource + 'static) -> Self {
        Self {
            text: Rc::new(text),
            colors: ColorTokens::default(),
            token_paths: TokenPaths::default(),
            a11y_scale: None,
        }
    }

    pub fn with_colors(mut self, colors: impl Into<ColorTokens>) -> Self {
        self.colors = colors.into();
        self
    }

    pub fn with_token_paths(mut self, paths: TokenPaths) -> Self {
        self.token_paths = paths;
        self
    }

    pub fn with_a11y_scale(mut self, scale: f32) -> Self {
        self.a11y_scale = Some(scale);
        self
    }

    /// Multiplier for text metrics; anything unusable counts as 1.
    pub fn scale(&self) -> f32 {
        match self.a11y_scale {
            Some(s) if s.is_finite() && s > 0.0 => s,
            _ => 1.0,
        }
    }

    pub fn palette(&self) -> CardPalette {
        CardPalette::resolve(&self.colors, &self.token_paths)
    }

    pub fn text(&self, key: &str) -> String {
        self.text.get_text(key)
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self::new(IdentityText)
    }
}

impl fmt::Debug for PresentationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationConfig")
            .field("colors", &self.colors)
            .field("token_paths", &self.token_paths)
            .field("a11y_scale", &self.a11y_scale)
            .finish_non_exhaustive()
    }
}
