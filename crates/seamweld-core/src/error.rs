use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeamError {
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Pixel buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Image heights differ: {height1} vs {height2}")]
    HeightMismatch { height1: usize, height2: usize },

    #[error("Invalid stitch margin {margin} for image widths {width1} and {width2}")]
    InvalidMargin {
        margin: usize,
        width1: usize,
        width2: usize,
    },

    #[error("Label grid is {actual:?}, expected {expected:?}")]
    LabelShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Failed to encode {path}: {reason}")]
    Encode { path: PathBuf, reason: String },

    #[error("Unknown stitch mode {0} (expected 0, 1 or 2)")]
    InvalidMode(u8),

    #[error("Config error: {0}")]
    Config(String),
}

/// Coarse failure class, one per stage that can abort a stitch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Decode,
    Validation,
    Solver,
    Encode,
}

impl SeamError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode { .. } | Self::BufferTooShort { .. } => ErrorKind::Decode,
            Self::InvalidDimensions { .. }
            | Self::HeightMismatch { .. }
            | Self::InvalidMargin { .. }
            | Self::LabelShape { .. }
            | Self::InvalidMode(_)
            | Self::Config(_) => ErrorKind::Validation,
            Self::Solver(_) => ErrorKind::Solver,
            Self::Encode { .. } => ErrorKind::Encode,
        }
    }
}

pub type Result<T> = std::result::Result<T, SeamError>;
