use ndarray::Array2;

use crate::consts::OPAQUE_ALPHA;
use crate::raster::{required_len, RgbaBuffer};

use super::convert::quantize;
use super::{Gradient, ScalarField, VectorField};

/// Central-difference gradient with replicated borders.
///
/// `x[r][c] = (f[r][min(c+1, W-1)] - f[r][max(c-1, 0)]) / 2`, and the same
/// along rows for `y`. The result has the shape of the input.
pub fn gradient(field: &ScalarField) -> VectorField {
    let (h, w) = field.dim();
    let mut result = Array2::<Gradient>::zeros((h, w));
    if h == 0 || w == 0 {
        return result;
    }

    for row in 0..h {
        let up = row.saturating_sub(1);
        let down = (row + 1).min(h - 1);
        for col in 0..w {
            let left = col.saturating_sub(1);
            let right = (col + 1).min(w - 1);
            let gx = (field[[row, right]] - field[[row, left]]) / 2.0;
            let gy = (field[[down, col]] - field[[up, col]]) / 2.0;
            result[[row, col]] = Gradient::new(gx, gy);
        }
    }

    result
}

/// Visualize a gradient field: positive `x` goes to R, positive `y` to G,
/// B is zero. Negative components are clamped to zero, so the sign is lost.
pub fn gradient_to_buffer(field: &VectorField) -> RgbaBuffer {
    let (h, w) = field.dim();
    let mut pixels = Vec::with_capacity(required_len(w, h));
    for row in 0..h {
        for col in 0..w {
            let g = field[[row, col]];
            pixels.extend_from_slice(&[
                quantize(g.x.max(0.0)),
                quantize(g.y.max(0.0)),
                0,
                OPAQUE_ALPHA,
            ]);
        }
    }
    RgbaBuffer {
        pixels,
        width: w,
        height: h,
    }
}
