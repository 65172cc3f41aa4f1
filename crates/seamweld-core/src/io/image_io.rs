use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use tracing::{debug, warn};

use crate::error::{Result, SeamError};
use crate::raster::RgbaBuffer;

/// Decode an image file into an interleaved RGBA8 buffer.
pub fn decode(path: &Path) -> Result<RgbaBuffer> {
    let img = image::open(path).map_err(|e| SeamError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    debug!(path = %path.display(), width = w, height = h, "Decoded image");
    RgbaBuffer::new(rgba.into_raw(), w as usize, h as usize)
}

/// Encode an RGBA8 buffer, choosing the format from the file extension.
///
/// The image is written to a hidden sibling file first and renamed onto
/// `path` once complete, so a failed encode never leaves a partial file.
pub fn encode(path: &Path, buffer: &RgbaBuffer) -> Result<()> {
    encode_all(&[(path, buffer)])
}

/// Encode several images as one unit: either every target is written or none is.
///
/// All images are encoded to hidden partial files before any of them is
/// renamed into place. If a rename fails, targets already renamed by this
/// call are removed again.
pub fn encode_all(images: &[(&Path, &RgbaBuffer)]) -> Result<()> {
    let mut staged: Vec<Staged> = Vec::with_capacity(images.len());
    for &(path, buffer) in images {
        match stage(path, buffer) {
            Ok(s) => staged.push(s),
            Err(e) => {
                for s in &staged {
                    remove_quietly(&s.partial, "partial output");
                }
                return Err(e);
            }
        }
    }

    for (i, s) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(&s.partial, &s.target) {
            for done in &staged[..i] {
                remove_quietly(&done.target, "output");
            }
            for pending in &staged[i..] {
                remove_quietly(&pending.partial, "partial output");
            }
            return Err(SeamError::Encode {
                path: s.target.clone(),
                reason: e.to_string(),
            });
        }
    }

    for (path, buffer) in images {
        debug!(path = %path.display(), width = buffer.width, height = buffer.height, "Encoded image");
    }
    Ok(())
}

/// A fully encoded image waiting to be renamed onto its target.
struct Staged {
    partial: PathBuf,
    target: PathBuf,
}

fn stage(path: &Path, buffer: &RgbaBuffer) -> Result<Staged> {
    let encode_err = |reason: String| SeamError::Encode {
        path: path.to_path_buf(),
        reason,
    };

    let format = ImageFormat::from_path(path).map_err(|e| encode_err(e.to_string()))?;
    let img = RgbaImage::from_raw(
        buffer.width as u32,
        buffer.height as u32,
        buffer.pixels.clone(),
    )
    .ok_or_else(|| encode_err("pixel buffer does not match dimensions".into()))?;

    let partial = partial_path(path);
    if let Err(e) = img.save_with_format(&partial, format) {
        remove_quietly(&partial, "partial output");
        return Err(encode_err(e.to_string()));
    }
    Ok(Staged {
        partial,
        target: path.to_path_buf(),
    })
}

fn remove_quietly(path: &Path, what: &str) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "Could not remove {}", what);
        }
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.partial"))
}
