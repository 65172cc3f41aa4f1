use crate::consts::RGBA_CHANNELS;
use crate::error::{Result, SeamError};

/// Interleaved 8-bit RGBA pixel data as produced and consumed by the codec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaBuffer {
    /// Pixel bytes, row-major, 4 bytes per pixel (R, G, B, A).
    pub pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl RgbaBuffer {
    /// Wrap raw bytes, checking that they cover `width * height` pixels.
    pub fn new(pixels: Vec<u8>, width: usize, height: usize) -> Result<Self> {
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
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// RGBA bytes of the pixel at `(row, col)`.
    pub fn pixel(&self, row: usize, col: usize) -> [u8; 4] {
        let i = (row * self.width + col) * RGBA_CHANNELS;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

/// Number of bytes an RGBA8 buffer of the given size must hold.
pub fn required_len(width: usize, height: usize) -> usize {
    RGBA_CHANNELS * width * height
}
