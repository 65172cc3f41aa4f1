//! Seam finding and composition across the overlap of two images.

pub mod cost;
pub mod reconstruct;
pub mod stitch;

pub use cost::{GradientCost, IntensityCost, OverlapCost};
pub use reconstruct::reconstruct;
pub use stitch::{find_seam, find_seam_with, stitch_fields};

use ndarray::Array2;

use crate::consts::{MASK_SINK_VALUE, MASK_SOURCE_VALUE, OPAQUE_ALPHA};
use crate::cut::Label;
use crate::error::{Result, SeamError};
use crate::field::ensure_non_empty;
use crate::raster::{required_len, RgbaBuffer};

/// Check that the rightmost `margin` columns of `image1` can overlap the
/// leftmost `margin` columns of `image2`.
pub fn validate_overlap<T>(image1: &Array2<T>, image2: &Array2<T>, margin: usize) -> Result<()> {
    ensure_non_empty(image1)?;
    ensure_non_empty(image2)?;

    let (height1, width1) = image1.dim();
    let (height2, width2) = image2.dim();
    if height1 != height2 {
        return Err(SeamError::HeightMismatch { height1, height2 });
    }
    if margin == 0 || margin > width1 || margin > width2 {
        return Err(SeamError::InvalidMargin {
            margin,
            width1,
            width2,
        });
    }
    Ok(())
}

/// Per-cell cut labels of the overlap band, shape `(height, margin)`.
#[derive(Clone, Debug)]
pub struct SeamLabels {
    labels: Array2<Label>,
    cut_cost: f64,
}

impl SeamLabels {
    pub fn new(labels: Array2<Label>, cut_cost: f64) -> Self {
        Self { labels, cut_cost }
    }

    /// `(height, margin)`.
    pub fn dim(&self) -> (usize, usize) {
        self.labels.dim()
    }

    pub fn label(&self, row: usize, col: usize) -> Label {
        self.labels[[row, col]]
    }

    /// Total weight of the severed edges (the max-flow value).
    pub fn cut_cost(&self) -> f64 {
        self.cut_cost
    }

    pub fn source_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l == Label::Source).count()
    }

    /// For each row, the column of the first sink-side cell, or `margin`
    /// when the whole row stays with image 1.
    pub fn seam_columns(&self) -> Vec<usize> {
        let margin = self.labels.ncols();
        self.labels
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .position(|&l| l == Label::Sink)
                    .unwrap_or(margin)
            })
            .collect()
    }

    /// Grayscale mask of the band: white where image 1 is kept, black
    /// where image 2 is taken.
    pub fn mask_buffer(&self) -> RgbaBuffer {
        let (h, w) = self.labels.dim();
        let mut pixels = Vec::with_capacity(required_len(w, h));
        for &label in self.labels.iter() {
            let v = match label {
                Label::Source => MASK_SOURCE_VALUE,
                Label::Sink => MASK_SINK_VALUE,
            };
            pixels.extend_from_slice(&[v, v, v, OPAQUE_ALPHA]);
        }
        RgbaBuffer {
            pixels,
            width: w,
            height: h,
        }
    }
}
