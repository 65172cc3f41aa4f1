use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use seamweld_core::pipeline::config::{StitchConfig, StitchMode};
use seamweld_core::pipeline::{run_pipeline_reported, PipelineStage};
use tracing::debug;

use crate::progress::{stage_verb, SpinnerReporter};
use crate::summary::{print_report, print_stitch_summary};

#[derive(Args)]
pub struct StitchArgs {
    /// Left input image [default: goat2.png]
    pub source1: Option<PathBuf>,

    /// Right input image [default: cat.png]
    pub source2: Option<PathBuf>,

    /// Overlap width in pixels [default: 100]
    pub margin: Option<usize>,

    /// Output image path [default: result.png]
    pub output: Option<PathBuf>,

    /// 0 = direct stitch, 1 = gradient visualization, 2 = gradient-domain stitch [default: 0]
    pub mode: Option<u8>,

    /// Stitch config file (TOML); positional arguments override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Also save the cut labels as a black/white mask image
    #[arg(long)]
    pub seam_mask: Option<PathBuf>,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    pub dump_config: bool,
}

pub fn run(args: &StitchArgs) -> Result<()> {
    let config = match build_config(args) {
        Ok(config) => config,
        Err(e) => {
            println!("{}", failure_line(None));
            return Err(e);
        }
    };
    debug!(?config, "Effective stitch config");

    if args.dump_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    print_stitch_summary(&config);

    let reporter = SpinnerReporter::new()?;
    let result = run_pipeline_reported(&config, &reporter);
    reporter.finish();

    match result {
        Ok(report) => {
            println!("Success!");
            print_report(&report, &config);
            Ok(())
        }
        Err(e) => {
            println!("{}", failure_line(reporter.failed_stage()));
            Err(e.into())
        }
    }
}

/// Status line for a failed run. No stage means the arguments or config
/// were rejected before the pipeline started.
fn failure_line(stage: Option<PipelineStage>) -> String {
    match stage {
        Some(stage) => format!("Failed to {}!", stage_verb(stage)),
        None => "Failed to validate arguments!".to_string(),
    }
}

fn build_config(args: &StitchArgs) -> Result<StitchConfig> {
    let mut config = match args.config {
        Some(ref path) => StitchConfig::load(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => StitchConfig::default(),
    };

    if let Some(ref p) = args.source1 {
        config.source1 = p.clone();
    }
    if let Some(ref p) = args.source2 {
        config.source2 = p.clone();
    }
    if let Some(margin) = args.margin {
        config.margin = margin;
    }
    if let Some(ref p) = args.output {
        config.output = p.clone();
    }
    if let Some(code) = args.mode {
        config.mode = StitchMode::try_from(code).context("Invalid mode argument")?;
    }
    if let Some(ref p) = args.seam_mask {
        config.seam_mask = Some(p.clone());
    }

    Ok(config)
}
