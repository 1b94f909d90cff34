//! Flip-card flashcard preview.
//!
//! ```ignore
//! let structure = StructureComponent::from_json(json)?;
//! let config = PresentationConfig::new(IdentityText).with_a11y_scale(1.25);
//! if let Some(preview) = FlashCardsPreview::new(&structure, config) {
//!     App::new().run(preview);
//! }
//! ```

pub mod assets;
pub mod deck;
pub mod flip_card;
pub mod hint;
pub mod model;
pub mod style;
pub mod theme;

pub use deck::FlashCardsPreview;
pub use flip_card::{Face, FlipCard, FlipState};
pub use hint::HintAnimation;
pub use model::{Flashcard, StructureComponent, StructureProps};
pub use theme::{CardPalette, ColorTokens, IdentityText, PresentationConfig, TextSource, TokenPaths};
