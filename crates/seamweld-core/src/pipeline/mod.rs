pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{compose, run_pipeline, run_pipeline_reported};
pub use types::{Composite, NoOpReporter, PipelineStage, ProgressReporter, StitchReport};
