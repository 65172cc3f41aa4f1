pub mod convert;
pub mod gradient;

use std::ops::{Add, Sub};

use ndarray::Array2;
use num_traits::Zero;

use crate::error::{Result, SeamError};

/// One-channel intensity image, values normalized to [0.0, 1.0].
/// Shape = (height, width).
pub type ScalarField = Array2<f32>;

/// Per-pixel gradient vectors, same shape as the field they came from.
pub type VectorField = Array2<Gradient>;

/// A 2-component gradient sample: `x` along columns, `y` along rows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Gradient {
    pub x: f32,
    pub y: f32,
}

impl Gradient {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn norm_squared(&self) -> f64 {
        let x = self.x as f64;
        let y = self.y as f64;
        x * x + y * y
    }
}

impl Add for Gradient {
    type Output = Gradient;

    fn add(self, rhs: Gradient) -> Gradient {
        Gradient::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Gradient {
    type Output = Gradient;

    fn sub(self, rhs: Gradient) -> Gradient {
        Gradient::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Zero for Gradient {
    fn zero() -> Self {
        Gradient::default()
    }

    fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Element type a seam can be cut through.
///
/// `seam_distance` is the per-sample dissimilarity the cost model sums:
/// absolute difference for intensities, squared Euclidean distance for
/// gradient vectors.
pub trait SeamElement: Copy + Zero {
    fn seam_distance(&self, other: &Self) -> f64;
}

impl SeamElement for f32 {
    fn seam_distance(&self, other: &f32) -> f64 {
        (*self as f64 - *other as f64).abs()
    }
}

impl SeamElement for Gradient {
    fn seam_distance(&self, other: &Gradient) -> f64 {
        (*self - *other).norm_squared()
    }
}

/// Reject empty fields. `ndarray` already guarantees equal row lengths.
pub fn ensure_non_empty<T>(field: &Array2<T>) -> Result<()> {
    let (height, width) = field.dim();
    if width == 0 || height == 0 {
        return Err(SeamError::InvalidDimensions { width, height });
    }
    Ok(())
}
