#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use ndarray::Array2;

use seamweld_core::field::convert::to_buffer;
use seamweld_core::io::image_io::encode;
use seamweld_core::pipeline::{PipelineStage, ProgressReporter};

/// Field of the given shape filled with `value`.
pub fn uniform(height: usize, width: usize, value: f32) -> Array2<f32> {
    Array2::from_elem((height, width), value)
}

/// Field whose value depends on position, for tests that need distinct samples.
pub fn pattern(height: usize, width: usize) -> Array2<f32> {
    Array2::from_shape_fn((height, width), |(r, c)| ((r * 7 + c * 3) % 11) as f32 / 10.0)
}

/// Write a scalar field as a grayscale PNG under `dir` and return its path.
pub fn write_png(dir: &Path, name: &str, field: &Array2<f32>) -> PathBuf {
    let path = dir.join(name);
    encode(&path, &to_buffer(field)).expect("write test PNG");
    path
}

/// Reporter that remembers every stage it was told about.
#[derive(Default)]
pub struct RecordingReporter {
    pub begun: RefCell<Vec<PipelineStage>>,
    pub finished: RefCell<Vec<PipelineStage>>,
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: PipelineStage) {
        self.begun.borrow_mut().push(stage);
    }

    fn finish_stage(&self, stage: PipelineStage) {
        self.finished.borrow_mut().push(stage);
    }
}

impl RecordingReporter {
    pub fn saw(&self, stage: PipelineStage) -> bool {
        self.begun.borrow().contains(&stage)
    }
}
