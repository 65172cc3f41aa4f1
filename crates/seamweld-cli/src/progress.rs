use std::cell::Cell;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use seamweld_core::pipeline::{PipelineStage, ProgressReporter};

/// Prints one status line per stage and keeps a spinner running while it works.
pub struct SpinnerReporter {
    bar: ProgressBar,
    current: Cell<Option<PipelineStage>>,
}

impl SpinnerReporter {
    pub fn new() -> Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
        bar.enable_steady_tick(Duration::from_millis(100));
        Ok(Self {
            bar,
            current: Cell::new(None),
        })
    }

    /// Stage that was running when the pipeline stopped, if any.
    pub fn failed_stage(&self) -> Option<PipelineStage> {
        self.current.get()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressReporter for SpinnerReporter {
    fn begin_stage(&self, stage: PipelineStage) {
        self.current.set(Some(stage));
        self.bar.println(format!("{stage}..."));
        self.bar.set_message(stage.to_string());
    }

    fn finish_stage(&self, stage: PipelineStage) {
        self.current.set(None);
        if stage == PipelineStage::Stitching {
            self.bar.println("Stitching complete!");
        }
    }
}

/// Phrase for a "Failed to ..." status line.
pub fn stage_verb(stage: PipelineStage) -> &'static str {
    match stage {
        PipelineStage::Opening => "open image files",
        PipelineStage::Converting => "convert pixel data",
        PipelineStage::Stitching => "stitch images",
        PipelineStage::Reconstructing => "compose result",
        PipelineStage::Saving => "save result",
    }
}
