//! Timing functions (easing curves) for duration-based animations.
//!
//! - [`TimingFunction::Linear`] - Constant speed
//! - [`TimingFunction::EaseIn`] / [`TimingFunction::EaseOut`] /
//!   [`TimingFunction::EaseInOut`] - Quadratic curves
//! - [`TimingFunction::Standard`] - The platform default: the `ease` curve
//!   mirrored around the midpoint
//! - [`TimingFunction::CubicBezier`] - CSS-style cubic bezier curve
//! - [`TimingFunction::Custom`] - User-defined function

use std::sync::Arc;

/// Timing function that controls the animation curve
#[derive(Clone, Default)]
pub enum TimingFunction {
    /// Linear interpolation (constant speed)
    Linear,
    /// Starts slow, ends fast
    EaseIn,
    /// Starts fast, ends slow
    EaseOut,
    /// Starts slow, speeds up, then slows down
    EaseInOut,
    /// `ease` (cubic-bezier 0.42, 0, 1, 1) applied symmetrically in and out
    #[default]
    Standard,
    /// CSS cubic-bezier curve (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
    /// Custom timing function
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl TimingFunction {
    /// Evaluate the timing function at time t (0.0 to 1.0)
    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            TimingFunction::Linear => t,
            TimingFunction::EaseIn => ease_in(t),
            TimingFunction::EaseOut => ease_out(t),
            TimingFunction::EaseInOut => ease_in_out(t),
            TimingFunction::Standard => standard(t),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
            TimingFunction::Custom(f) => f(t),
        }
    }

    /// Create a custom timing function from a closure
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        TimingFunction::Custom(Arc::new(f))
    }
}

impl std::fmt::Debug for TimingFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingFunction::Linear => write!(f, "Linear"),
            TimingFunction::EaseIn => write!(f, "EaseIn"),
            TimingFunction::EaseOut => write!(f, "EaseOut"),
            TimingFunction::EaseInOut => write!(f, "EaseInOut"),
            TimingFunction::Standard => write!(f, "Standard"),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "CubicBezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
            TimingFunction::Custom(_) => write!(f, "Custom"),
        }
    }
}

fn ease_in(t: f32) -> f32 {
    t * t
}

fn ease_out(t: f32) -> f32 {
    t * (2.0 - t)
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

fn ease(t: f32) -> f32 {
    cubic_bezier(t, 0.42, 0.0, 1.0, 1.0)
}

fn standard(t: f32) -> f32 {
    if t < 0.5 {
        ease(t * 2.0) / 2.0
    } else {
        1.0 - ease((1.0 - t) * 2.0) / 2.0
    }
}

/// Cubic bezier evaluation, assuming x1 and x2 lie in [0, 1].
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    // Newton-Raphson for the curve parameter whose x equals t
    let mut current_t = t;
    for _ in 0..8 {
        let current_x = cubic_bezier_x(current_t, x1, x2);
        let current_slope = cubic_bezier_slope(current_t, x1, x2);
        if current_slope.abs() < 1e-6 {
            break;
        }
        current_t -= (current_x - t) / current_slope;
    }
    cubic_bezier_y(current_t.clamp(0.0, 1.0), y1, y2)
}

fn cubic_bezier_x(t: f32, x1: f32, x2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * x1 + 3.0 * mt * t * t * x2 + t * t * t
}

fn cubic_bezier_y(t: f32, y1: f32, y2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * y1 + 3.0 * mt * t * t * y2 + t * t * t
}

fn cubic_bezier_slope(t: f32, x1: f32, x2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * x1 + 6.0 * mt * t * (x2 - x1) + 3.0 * t * t * (1.0 - x2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        assert_eq!(TimingFunction::Linear.evaluate(0.0), 0.0);
        assert_eq!(TimingFunction::Linear.evaluate(0.5), 0.5);
        assert_eq!(TimingFunction::Linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_standard_endpoints_and_midpoint() {
        let standard = TimingFunction::default();
        assert_eq!(standard.evaluate(0.0), 0.0);
        assert_eq!(standard.evaluate(1.0), 1.0);
        assert!((standard.evaluate(0.5) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_standard_is_slow_at_the_start() {
        let standard = TimingFunction::Standard;
        assert!(standard.evaluate(0.1) < 0.1);
        assert!(standard.evaluate(0.9) > 0.9);
    }

    #[test]
    fn test_custom() {
        let step = TimingFunction::custom(|t| if t < 1.0 { 0.0 } else { 1.0 });
        assert_eq!(step.evaluate(0.99), 0.0);
        assert_eq!(step.evaluate(1.0), 1.0);
    }
}
