use crate::raster::RgbaBuffer;
use crate::seam::SeamLabels;

use super::config::StitchMode;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Opening,
    Converting,
    Stitching,
    Reconstructing,
    Saving,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Opening => write!(f, "Opening images"),
            Self::Converting => write!(f, "Converting pixels"),
            Self::Stitching => write!(f, "Stitching images"),
            Self::Reconstructing => write!(f, "Composing result"),
            Self::Saving => write!(f, "Saving result"),
        }
    }
}

/// Progress reporting for the pipeline.
///
/// Implementors can use this to drive spinners, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter {
    /// A new pipeline stage has started.
    fn begin_stage(&self, _stage: PipelineStage) {}

    /// The current stage is finished.
    fn finish_stage(&self, _stage: PipelineStage) {}
}

/// No-op progress reporter, used when `run_pipeline` delegates.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// In-memory result of one pipeline run, before encoding.
#[derive(Clone, Debug)]
pub struct Composite {
    pub mode: StitchMode,
    pub buffer: RgbaBuffer,
    /// Cut labels; `None` in gradient visualization mode.
    pub seam: Option<SeamLabels>,
}

/// Summary of a completed pipeline run.
#[derive(Clone, Debug)]
pub struct StitchReport {
    pub mode: StitchMode,
    pub width: usize,
    pub height: usize,
    pub cut_cost: Option<f64>,
    pub seam_columns: Option<Vec<usize>>,
}

impl From<&Composite> for StitchReport {
    fn from(c: &Composite) -> Self {
        Self {
            mode: c.mode,
            width: c.buffer.width,
            height: c.buffer.height,
            cut_cost: c.seam.as_ref().map(SeamLabels::cut_cost),
            seam_columns: c.seam.as_ref().map(SeamLabels::seam_columns),
        }
    }
}
