use ndarray::{s, Array2};
use num_traits::Zero;

use crate::cut::Label;
use crate::error::{Result, SeamError};

use super::{validate_overlap, SeamLabels};

/// Compose two images across a solved seam.
///
/// Output is `width1 + width2 - margin` wide and as tall as the inputs:
/// image 1's columns left of the overlap, then the overlap band taking
/// image 1 on source-side cells and image 2 on sink-side cells, then
/// image 2's columns right of the overlap. There is no blending at the seam.
pub fn reconstruct<T: Copy + Zero>(
    image1: &Array2<T>,
    image2: &Array2<T>,
    margin: usize,
    seam: &SeamLabels,
) -> Result<Array2<T>> {
    validate_overlap(image1, image2, margin)?;
    let (h, w1) = image1.dim();
    let w2 = image2.ncols();
    if seam.dim() != (h, margin) {
        return Err(SeamError::LabelShape {
            expected: (h, margin),
            actual: seam.dim(),
        });
    }

    let offset = w1 - margin;
    let out_w = w1 + w2 - margin;
    let mut output = Array2::<T>::zeros((h, out_w));

    output
        .slice_mut(s![.., ..offset])
        .assign(&image1.slice(s![.., ..offset]));

    for row in 0..h {
        for col in 0..margin {
            output[[row, offset + col]] = match seam.label(row, col) {
                Label::Source => image1[[row, offset + col]],
                Label::Sink => image2[[row, col]],
            };
        }
    }

    output
        .slice_mut(s![.., w1..])
        .assign(&image2.slice(s![.., margin..]));

    Ok(output)
}
