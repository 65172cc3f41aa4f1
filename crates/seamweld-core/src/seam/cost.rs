use ndarray::Array2;

use crate::consts::INFINITE_COST_SCALE;
use crate::cut::{Direction, EdgeCost, GridCell};
use crate::error::Result;
use crate::field::{Gradient, SeamElement};

use super::validate_overlap;

/// Cost of cutting each edge of the overlap grid.
///
/// Holds read-only views of both images plus the overlap width. Grid cell
/// `(row, col)` corresponds to `image1[row][width1 - margin + col]` and
/// `image2[row][col]`. Cutting an edge costs the dissimilarity of the two
/// images across it, evaluated both ways:
///
/// `d(a1(p), a2(q)) + d(a1(q), a2(p))`
///
/// where `p` is the cell, `q` its neighbor and `d` is
/// [`SeamElement::seam_distance`]. Vertical edges in the first and last
/// overlap columns cost [`OverlapCost::boundary_cost`].
pub struct OverlapCost<'a, T> {
    image1: &'a Array2<T>,
    image2: &'a Array2<T>,
    margin: usize,
    image1_offset: usize,
    boundary_cost: f64,
}

/// Intensity variant: sum of absolute differences.
pub type IntensityCost<'a> = OverlapCost<'a, f32>;

/// Gradient variant: sum of squared vector distances.
pub type GradientCost<'a> = OverlapCost<'a, Gradient>;

impl<'a, T: SeamElement> OverlapCost<'a, T> {
    /// Bind the two images, rejecting overlaps that do not fit them.
    pub fn new(image1: &'a Array2<T>, image2: &'a Array2<T>, margin: usize) -> Result<Self> {
        validate_overlap(image1, image2, margin)?;
        let height = image1.nrows();
        Ok(Self {
            image1,
            image2,
            margin,
            image1_offset: image1.ncols() - margin,
            boundary_cost: boundary_cost(height, margin),
        })
    }

    /// The "infinite" weight put on vertical edges of the outer overlap columns.
    pub fn boundary_cost(&self) -> f64 {
        self.boundary_cost
    }

    fn is_boundary(&self, col: usize, dir: Direction) -> bool {
        dir.is_vertical() && (col == 0 || col + 1 == self.margin)
    }
}

impl<T: SeamElement> EdgeCost for OverlapCost<'_, T> {
    fn cost(&self, row: usize, col: usize, dir: Direction) -> f64 {
        if self.is_boundary(col, dir) {
            return self.boundary_cost;
        }

        let height = self.image1.nrows();
        let Some(next) = GridCell::new(row, col).neighbor(dir, height, self.margin) else {
            // Edges leaving the overlap grid do not exist.
            return 0.0;
        };

        let off = self.image1_offset;
        let a = self.image1[[row, off + col]].seam_distance(&self.image2[[next.row, next.col]]);
        let b = self.image1[[next.row, off + next.col]].seam_distance(&self.image2[[row, col]]);
        a + b
    }
}

/// `INFINITE_COST_SCALE * grid_width * grid_height`.
pub fn boundary_cost(height: usize, margin: usize) -> f64 {
    INFINITE_COST_SCALE * margin as f64 * height as f64
}
