use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MARGIN, DEFAULT_OUTPUT, DEFAULT_SOURCE_1, DEFAULT_SOURCE_2};
use crate::error::{Result, SeamError};

/// What the pipeline produces from its inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StitchMode {
    /// Min-cut stitch on intensities, written as grayscale.
    #[default]
    Direct,
    /// Gradient of image 1 only, no cut.
    GradientVisualization,
    /// Min-cut stitch on gradient vectors, written as a gradient visualization.
    GradientDomain,
}

impl StitchMode {
    /// Integer code used on the command line.
    pub fn code(self) -> u8 {
        match self {
            Self::Direct => 0,
            Self::GradientVisualization => 1,
            Self::GradientDomain => 2,
        }
    }

    /// Whether this mode reads the second image and runs a cut.
    pub fn needs_second_image(self) -> bool {
        !matches!(self, Self::GradientVisualization)
    }
}

impl TryFrom<u8> for StitchMode {
    type Error = SeamError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Direct),
            1 => Ok(Self::GradientVisualization),
            2 => Ok(Self::GradientDomain),
            other => Err(SeamError::InvalidMode(other)),
        }
    }
}

impl fmt::Display for StitchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "Direct stitch"),
            Self::GradientVisualization => write!(f, "Gradient visualization"),
            Self::GradientDomain => write!(f, "Gradient-domain stitch"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StitchConfig {
    /// Left image; its rightmost `margin` columns form the overlap.
    #[serde(default = "default_source1")]
    pub source1: PathBuf,
    /// Right image; its leftmost `margin` columns form the overlap.
    #[serde(default = "default_source2")]
    pub source2: PathBuf,
    /// Overlap width in pixels.
    #[serde(default = "default_margin")]
    pub margin: usize,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub mode: StitchMode,
    /// Optional path for a black/white image of the cut labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seam_mask: Option<PathBuf>,
}

fn default_source1() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE_1)
}
fn default_source2() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE_2)
}
fn default_margin() -> usize {
    DEFAULT_MARGIN
}
fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            source1: default_source1(),
            source2: default_source2(),
            margin: DEFAULT_MARGIN,
            output: default_output(),
            mode: StitchMode::default(),
            seam_mask: None,
        }
    }
}

impl StitchConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| SeamError::Config(e.to_string()))
    }

    /// Read a TOML config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SeamError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SeamError::Config(e.to_string()))
    }
}
