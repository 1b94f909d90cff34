//! Piecewise-linear mapping from an animated value to a derived one.
//!
//! ```ignore
//! // progress in degrees -> back face rotation
//! let back = Interpolation::linear([0.0, 180.0], [180.0, 360.0]);
//! assert_eq!(back.map(60.0), 240.0);
//! ```

use crate::error::{Error, Result};

/// What happens to inputs outside the input range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolate {
    /// Continue the nearest segment's slope
    #[default]
    Extend,
    /// Pin to the nearest output bound
    Clamp,
    /// Return the input unchanged
    Identity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    input: Vec<f32>,
    output: Vec<f32>,
    extrapolate_left: Extrapolate,
    extrapolate_right: Extrapolate,
}

impl Interpolation {
    /// Map one segment onto another.
    pub fn linear(input: [f32; 2], output: [f32; 2]) -> Self {
        Self {
            input: input.to_vec(),
            output: output.to_vec(),
            extrapolate_left: Extrapolate::Extend,
            extrapolate_right: Extrapolate::Extend,
        }
    }

    /// Build a multi-segment mapping.
    ///
    /// Ranges need the same length (at least two points) and a
    /// non-decreasing input.
    pub fn new(input: Vec<f32>, output: Vec<f32>) -> Result<Self> {
        if input.len() < 2 {
            return Err(Error::InvalidInterpolation(
                "input range needs at least two points".into(),
            ));
        }
        if input.len() != output.len() {
            return Err(Error::InvalidInterpolation(format!(
                "input has {} points but output has {}",
                input.len(),
                output.len()
            )));
        }
        if input.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(Error::InvalidInterpolation(
                "input range must be non-decreasing".into(),
            ));
        }
        Ok(Self {
            input,
            output,
            extrapolate_left: Extrapolate::Extend,
            extrapolate_right: Extrapolate::Extend,
        })
    }

    pub fn extrapolate(mut self, mode: Extrapolate) -> Self {
        self.extrapolate_left = mode;
        self.extrapolate_right = mode;
        self
    }

    pub fn extrapolate_left(mut self, mode: Extrapolate) -> Self {
        self.extrapolate_left = mode;
        self
    }

    pub fn extrapolate_right(mut self, mode: Extrapolate) -> Self {
        self.extrapolate_right = mode;
        self
    }

    pub fn map(&self, value: f32) -> f32 {
        let i = self.segment(value);
        self.map_segment(value, i)
    }

    fn segment(&self, value: f32) -> usize {
        let last = self.input.len() - 1;
        (1..last)
            .find(|&i| self.input[i] >= value)
            .unwrap_or(last)
            - 1
    }

    fn map_segment(&self, value: f32, i: usize) -> f32 {
        let (in_min, in_max) = (self.input[i], self.input[i + 1]);
        let (out_min, out_max) = (self.output[i], self.output[i + 1]);

        let mut x = value;
        if x < in_min {
            match self.extrapolate_left {
                Extrapolate::Identity => return x,
                Extrapolate::Clamp => x = in_min,
                Extrapolate::Extend => {}
            }
        }
        if x > in_max {
            match self.extrapolate_right {
                Extrapolate::Identity => return x,
                Extrapolate::Clamp => x = in_max,
                Extrapolate::Extend => {}
            }
        }

        if out_min == out_max {
            return out_min;
        }
        if in_min == in_max {
            return if x <= in_min { out_min } else { out_max };
        }

        let ratio = (x - in_min) / (in_max - in_min);
        out_min + ratio * (out_max - out_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_maps_segment() {
        let back = Interpolation::linear([0.0, 180.0], [180.0, 360.0]);
        assert_eq!(back.map(0.0), 180.0);
        assert_eq!(back.map(60.0), 240.0);
        assert_eq!(back.map(180.0), 360.0);
    }

    #[test]
    fn test_extend_follows_overshoot() {
        let front = Interpolation::linear([0.0, 180.0], [0.0, 180.0]);
        assert_eq!(front.map(190.0), 190.0);
        assert_eq!(front.map(-5.0), -5.0);
    }

    #[test]
    fn test_clamp() {
        let tilt = Interpolation::linear([0.0, 1.0], [0.0, 30.0]).extrapolate(Extrapolate::Clamp);
        assert_eq!(tilt.map(2.0), 30.0);
        assert_eq!(tilt.map(-1.0), 0.0);
    }

    #[test]
    fn test_identity_passes_through_outside_range() {
        let mapping = Interpolation::linear([0.0, 1.0], [10.0, 20.0])
            .extrapolate_right(Extrapolate::Identity);
        assert_eq!(mapping.map(5.0), 5.0);
        assert_eq!(mapping.map(0.5), 15.0);
    }

    #[test]
    fn test_multi_segment() {
        let mapping = Interpolation::new(vec![0.0, 0.5, 1.0], vec![0.0, 100.0, 0.0]).unwrap();
        assert_eq!(mapping.map(0.25), 50.0);
        assert_eq!(mapping.map(0.75), 50.0);
    }

    #[test]
    fn test_rejects_bad_ranges() {
        assert!(Interpolation::new(vec![0.0], vec![0.0]).is_err());
        assert!(Interpolation::new(vec![0.0, 1.0], vec![0.0]).is_err());
        assert!(Interpolation::new(vec![1.0, 0.0], vec![0.0, 1.0]).is_err());
    }
}
