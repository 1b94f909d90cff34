//! The little flip icon that pops in once and then nudges sideways every
//! second or so, hinting that the card can be turned.

use std::time::Duration;

use super::style::HINT_MAX_ROTATION;
use crate::animation::{self, AnimatedValue, Animation, AnimationHandle, Interpolated, Interpolation};
use crate::transform::Transform;

const POP_IN: Duration = Duration::from_millis(100);
const REST_BETWEEN_NUDGES: Duration = Duration::from_millis(1000);
const NUDGE: Duration = Duration::from_millis(100);

#[derive(Clone)]
pub struct HintAnimation {
    pop_in: AnimatedValue,
    slide: AnimatedValue,
    translate_x: Interpolated,
    rotation: Interpolated,
}

impl HintAnimation {
    pub fn new() -> Self {
        let slide = AnimatedValue::new(0.0);
        Self {
            pop_in: AnimatedValue::new(0.5),
            translate_x: slide.interpolate(Interpolation::linear([0.0, 1.0], [0.0, 1.0])),
            rotation: slide.interpolate(Interpolation::linear([0.0, 1.0], [0.0, HINT_MAX_ROTATION])),
            slide,
        }
    }

    /// Pop-in followed by the endless nudge loop, as one animation.
    pub fn animation(&self) -> Animation {
        let nudge = Animation::sequence([
            Animation::delay(REST_BETWEEN_NUDGES),
            Animation::timing(&self.slide, 1.0, NUDGE),
            Animation::timing(&self.slide, 0.0, NUDGE),
        ])
        .looped();
        Animation::sequence([Animation::timing(&self.pop_in, 1.0, POP_IN), nudge])
    }

    pub fn start(&self) -> AnimationHandle {
        animation::start(self.animation())
    }

    pub fn stop(&self) {
        animation::stop_driving(&[self.pop_in.id(), self.slide.id()]);
    }

    pub fn pop_in(&self) -> &AnimatedValue {
        &self.pop_in
    }

    pub fn slide(&self) -> &AnimatedValue {
        &self.slide
    }

    pub fn translate_x(&self) -> f32 {
        self.translate_x.get()
    }

    /// Rotation in degrees.
    pub fn rotation(&self) -> f32 {
        self.rotation.get()
    }

    /// Icon transform about its own center: scale, then translate, then
    /// rotate, composed in that order.
    pub fn transform(&self) -> Transform {
        Transform::scale(self.pop_in.get())
            .then(&Transform::translate(self.translate_x(), 0.0))
            .then(&Transform::rotate_degrees(self.rotation()))
    }
}

impl Default for HintAnimation {
    fn default() -> Self {
        Self::new()
    }
}
