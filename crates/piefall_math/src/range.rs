//! Uniform sampling intervals

use rand::Rng;
use serde::{Serialize, Deserialize};

/// A half-open interval `[min, max)` sampled uniformly.
///
/// A degenerate range (`min == max`) always yields `min`, which is how a
/// fixed spawn height is expressed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UniformRange {
    pub min: f32,
    pub max: f32,
}

impl UniformRange {
    /// Create a new range
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A range that always samples to `value`
    pub const fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }

    /// Symmetric range `[-half_width, half_width)`
    pub const fn symmetric(half_width: f32) -> Self {
        Self { min: -half_width, max: half_width }
    }

    /// Width of the interval
    #[inline]
    pub fn width(&self) -> f32 {
        self.max - self.min
    }

    /// True if both bounds and the width are finite and `min <= max`
    ///
    /// Sampling a range whose width overflows to infinity panics, so such a
    /// range is invalid even though both bounds are finite.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max && self.width().is_finite()
    }

    /// True if `value` lies in `[min, max)`, or equals `min` for a fixed range
    pub fn contains(&self, value: f32) -> bool {
        if self.max > self.min {
            value >= self.min && value < self.max
        } else {
            value == self.min
        }
    }

    /// Draw one value uniformly from the range
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }
}
