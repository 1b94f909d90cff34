//! Animated values and the machinery that moves them.
//!
//! ```ignore
//! let flip = AnimatedValue::new(0.0);
//! let back = flip.interpolate(Interpolation::linear([0.0, 180.0], [180.0, 360.0]));
//!
//! animation::start(Animation::spring(&flip, 180.0, SpringConfig::FLIP));
//! animation::tick(Duration::from_millis(16));
//! ```

mod composite;
pub mod driver;
mod interpolate;
mod spring;
mod timing;
mod value;

pub use composite::Animation;
pub use driver::{
    AnimationHandle, active_count, is_driving, is_running, start, start_with_callback, stop,
    stop_driving, tick,
};
pub use interpolate::{Extrapolate, Interpolation};
pub use spring::{SpringConfig, SpringState};
pub use timing::TimingFunction;
pub use value::{AnimatedValue, Interpolated, ListenerId, ValueId};
