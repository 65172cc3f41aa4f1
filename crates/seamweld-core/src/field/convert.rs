use ndarray::Array2;

use crate::consts::{MAX_CHANNEL_VALUE, OPAQUE_ALPHA, RGBA_CHANNELS};
use crate::error::{Result, SeamError};
use crate::raster::{required_len, RgbaBuffer};

use super::ScalarField;

/// Read the red channel of an interleaved RGBA8 buffer into a scalar field
/// normalized to [0.0, 1.0].
///
/// Fails with `BufferTooShort` when `pixels` holds fewer than
/// `4 * width * height` bytes.
pub fn to_scalar_field(pixels: &[u8], width: usize, height: usize) -> Result<ScalarField> {
    if width == 0 || height == 0 {
        return Err(SeamError::InvalidDimensions { width, height });
    }
    let expected = required_len(width, height);
    if pixels.len() < expected {
        return Err(SeamError::BufferTooShort {
            expected,
            actual: pixels.len(),
        });
    }

    let mut field = Array2::<f32>::zeros((height, width));
    for row in 0..height {
        for col in 0..width {
            let i = RGBA_CHANNELS * (row * width + col);
            field[[row, col]] = pixels[i] as f32 / MAX_CHANNEL_VALUE;
        }
    }
    Ok(field)
}

/// Same as [`to_scalar_field`], reading dimensions from the buffer.
pub fn buffer_to_scalar_field(buffer: &RgbaBuffer) -> Result<ScalarField> {
    to_scalar_field(&buffer.pixels, buffer.width, buffer.height)
}

/// Write a scalar field out as an opaque grayscale RGBA8 buffer.
///
/// The value is copied into R, G and B. Scaling back to 8 bits truncates
/// toward zero, so this is not an exact inverse of [`to_scalar_field`].
pub fn to_buffer(field: &ScalarField) -> RgbaBuffer {
    let (h, w) = field.dim();
    let mut pixels = Vec::with_capacity(required_len(w, h));
    for row in 0..h {
        for col in 0..w {
            let v = quantize(field[[row, col]]);
            pixels.extend_from_slice(&[v, v, v, OPAQUE_ALPHA]);
        }
    }
    RgbaBuffer {
        pixels,
        width: w,
        height: h,
    }
}

/// Scale a normalized value to 8 bits, truncating. Out-of-range values
/// saturate at 0 and 255.
pub(crate) fn quantize(value: f32) -> u8 {
    (value * MAX_CHANNEL_VALUE) as u8
}
