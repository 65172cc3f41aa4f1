use ndarray::Array2;
use tracing::info;

use crate::error::{Result, SeamError};
use crate::field::convert::{buffer_to_scalar_field, to_buffer};
use crate::field::gradient::{gradient, gradient_to_buffer};
use crate::field::SeamElement;
use crate::io::image_io::{decode, encode_all};
use crate::raster::RgbaBuffer;
use crate::seam::{find_seam, reconstruct, SeamLabels};

use super::config::{StitchConfig, StitchMode};
use super::types::{Composite, NoOpReporter, PipelineStage, ProgressReporter, StitchReport};

/// Run the configured mode end to end: decode, compose, encode.
pub fn run_pipeline(config: &StitchConfig) -> Result<StitchReport> {
    run_pipeline_reported(config, &NoOpReporter)
}

/// Run the pipeline, reporting each stage to `reporter`.
///
/// Every input is decoded before any conversion or stitching starts, and
/// nothing is written unless the composite was produced. The result and
/// the optional seam mask are committed together or not at all.
pub fn run_pipeline_reported(
    config: &StitchConfig,
    reporter: &dyn ProgressReporter,
) -> Result<StitchReport> {
    reporter.begin_stage(PipelineStage::Opening);
    let image1 = decode(&config.source1)?;
    let image2 = if config.mode.needs_second_image() {
        Some(decode(&config.source2)?)
    } else {
        None
    };
    info!(
        width1 = image1.width,
        height1 = image1.height,
        width2 = ?image2.as_ref().map(|b| b.width),
        height2 = ?image2.as_ref().map(|b| b.height),
        "Opened images"
    );
    reporter.finish_stage(PipelineStage::Opening);

    let composite = compose(
        config.mode,
        &image1,
        image2.as_ref(),
        config.margin,
        reporter,
    )?;

    reporter.begin_stage(PipelineStage::Saving);
    let mask = match (&config.seam_mask, &composite.seam) {
        (Some(path), Some(seam)) => Some((path, seam.mask_buffer())),
        _ => None,
    };
    let mut outputs = vec![(config.output.as_path(), &composite.buffer)];
    if let Some((path, buffer)) = &mask {
        outputs.push((path.as_path(), buffer));
    }
    encode_all(&outputs)?;
    if let Some((path, _)) = &mask {
        info!(path = %path.display(), "Saved seam mask");
    }
    info!(
        path = %config.output.display(),
        width = composite.buffer.width,
        height = composite.buffer.height,
        "Saved result"
    );
    reporter.finish_stage(PipelineStage::Saving);

    Ok(StitchReport::from(&composite))
}

/// Produce the output buffer for `mode` from already decoded images.
///
/// `image2` is required by every mode except gradient visualization.
pub fn compose(
    mode: StitchMode,
    image1: &RgbaBuffer,
    image2: Option<&RgbaBuffer>,
    margin: usize,
    reporter: &dyn ProgressReporter,
) -> Result<Composite> {
    let second = || {
        image2.ok_or_else(|| SeamError::Config(format!("{mode} needs a second image")))
    };

    match mode {
        StitchMode::GradientVisualization => {
            reporter.begin_stage(PipelineStage::Converting);
            let field = buffer_to_scalar_field(image1)?;
            let buffer = gradient_to_buffer(&gradient(&field));
            reporter.finish_stage(PipelineStage::Converting);
            Ok(Composite {
                mode,
                buffer,
                seam: None,
            })
        }
        StitchMode::Direct => {
            let image2 = second()?;
            reporter.begin_stage(PipelineStage::Converting);
            let field1 = buffer_to_scalar_field(image1)?;
            let field2 = buffer_to_scalar_field(image2)?;
            reporter.finish_stage(PipelineStage::Converting);

            let (output, seam) = stitch_and_compose(&field1, &field2, margin, reporter)?;
            Ok(Composite {
                mode,
                buffer: to_buffer(&output),
                seam: Some(seam),
            })
        }
        StitchMode::GradientDomain => {
            let image2 = second()?;
            reporter.begin_stage(PipelineStage::Converting);
            let grad1 = gradient(&buffer_to_scalar_field(image1)?);
            let grad2 = gradient(&buffer_to_scalar_field(image2)?);
            reporter.finish_stage(PipelineStage::Converting);

            let (output, seam) = stitch_and_compose(&grad1, &grad2, margin, reporter)?;
            Ok(Composite {
                mode,
                buffer: gradient_to_buffer(&output),
                seam: Some(seam),
            })
        }
    }
}

fn stitch_and_compose<T: SeamElement>(
    field1: &Array2<T>,
    field2: &Array2<T>,
    margin: usize,
    reporter: &dyn ProgressReporter,
) -> Result<(Array2<T>, SeamLabels)> {
    reporter.begin_stage(PipelineStage::Stitching);
    let seam = find_seam(field1, field2, margin)?;
    reporter.finish_stage(PipelineStage::Stitching);

    reporter.begin_stage(PipelineStage::Reconstructing);
    let output = reconstruct(field1, field2, margin, &seam)?;
    reporter.finish_stage(PipelineStage::Reconstructing);

    Ok((output, seam))
}
