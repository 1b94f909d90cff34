//! Flip-animated flashcards on a small headless widget toolkit.
//!
//! ```ignore
//! use flipdeck::prelude::*;
//!
//! let structure = StructureComponent::new(vec![Flashcard::new("1", "Hello", "World")]);
//! let preview = FlashCardsPreview::new(&structure, PresentationConfig::new(IdentityText));
//!
//! let surface = App::new()
//!     .on_update(|surface, elapsed| { /* feed input */ })
//!     .run(container().maybe_child(preview));
//! ```

pub mod animation;
pub mod error;
pub mod flashcards;
pub mod image_metadata;
pub mod layout;
pub mod reactive;
pub mod renderer;
pub mod surface;
pub mod transform;
pub mod widgets;

use std::time::Duration;

use surface::Surface;
use widgets::{Color, Widget};

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::animation::{AnimatedValue, Animation, Interpolation, SpringConfig};
    pub use crate::flashcards::{
        ColorTokens, Face, FlashCardsPreview, Flashcard, FlipCard, FlipState, IdentityText,
        PresentationConfig, StructureComponent, TextSource, TokenPaths,
    };
    pub use crate::layout::{
        Column, Constraints, CrossAxisAlignment, MainAxisAlignment, Overlay, Size,
    };
    pub use crate::reactive::{
        batch, create_effect, create_signal, Effect, IntoMaybeDyn, MaybeDyn, ReadSignal, Signal,
        WriteSignal,
    };
    pub use crate::renderer::{DisplayList, DrawCommand, PaintContext};
    pub use crate::surface::Surface;
    pub use crate::transform::Transform;
    pub use crate::widgets::{
        container, image, text, Color, Container, Event, EventResponse, FontWeight, Image,
        Padding, Rect, ScrollSource, Text, TextAlign, Widget,
    };
    pub use crate::{App, AppConfig};
}

pub struct AppConfig {
    pub width: f32,
    pub height: f32,
    pub background_color: Color,
    /// Simulated time between frames
    pub frame_interval: Duration,
    /// Total simulated time `run` covers
    pub run_for: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
            background_color: Color::WHITE,
            frame_interval: Duration::from_millis(16),
            run_for: Duration::from_secs(5),
        }
    }
}

/// A callback that gets called each frame before rendering, with the
/// simulated time elapsed since `run` started.
/// Use this to feed input events and update signals.
pub type UpdateCallback = Box<dyn FnMut(&mut Surface, Duration)>;

pub struct App {
    config: AppConfig,
    on_update: Option<UpdateCallback>,
}

impl App {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            on_update: None,
        }
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            on_update: None,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.config.width = width;
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.config.height = height;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.config.background_color = color;
        self
    }

    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.config.frame_interval = interval;
        self
    }

    pub fn run_for(mut self, duration: Duration) -> Self {
        self.config.run_for = duration;
        self
    }

    /// Set a callback that gets called each frame before rendering.
    ///
    /// # Example
    /// ```ignore
    /// App::new()
    ///     .on_update(|surface, elapsed| {
    ///         if elapsed == Duration::from_millis(480) {
    ///             surface.dispatch(&Event::PointerDown { x: 200.0, y: 200.0 });
    ///             surface.dispatch(&Event::PointerUp { x: 200.0, y: 200.0 });
    ///         }
    ///     })
    ///     .run(view);
    /// ```
    pub fn on_update<F: FnMut(&mut Surface, Duration) + 'static>(mut self, callback: F) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    /// Drive `root` for the configured simulated duration and hand back the
    /// surface holding the last frame.
    pub fn run<W: Widget + 'static>(mut self, root: W) -> Surface {
        if env_logger::try_init().is_err() {
            log::debug!("logger already initialized");
        }

        let AppConfig {
            width,
            height,
            background_color,
            frame_interval,
            run_for,
        } = self.config;
        log::info!(
            "Creating surface: {}x{}, frame interval {:?}, running for {:?}",
            width,
            height,
            frame_interval,
            run_for
        );

        let mut surface = Surface::new(root, width, height).with_background(background_color);
        surface.render();

        // A zero interval would never advance time
        let frame_interval = frame_interval.max(Duration::from_millis(1));
        let mut elapsed = Duration::ZERO;
        while elapsed < run_for {
            if let Some(on_update) = self.on_update.as_mut() {
                on_update(&mut surface, elapsed);
            }

            let repaint = surface.needs_frame();
            let items = surface.frame(frame_interval).len();
            if repaint {
                log::debug!("frame {} at {:?}: {} items", surface.frames(), elapsed, items);
            }
            elapsed += frame_interval;
        }

        log::info!(
            "Finished after {} frames, {} items in the last display list",
            surface.frames(),
            surface.display_list().len()
        );
        surface
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
