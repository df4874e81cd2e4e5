//! Directory scanning, sampling and decoding of timelapse frames.

use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbImage;

use crate::foundation::core::Canvas;
use crate::foundation::error::{SlitScanError, SlitScanResult};
use crate::frames::set::FrameSet;

/// File extensions (lowercase, without the dot) recognized as photos.
pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Options for [`load_ordered_frames`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoadOpts {
    /// Resize frames whose dimensions differ from the first frame instead of failing.
    pub resize_mismatched: bool,
}

/// List photo files in `dir`, sorted by case-insensitive file name.
pub fn collect_images(dir: &Path) -> SlitScanResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(SlitScanError::input(format!(
            "'{}' does not exist or is not a directory",
            dir.display()
        )));
    }

    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read directory '{}'", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in '{}'", dir.display()))?;
        let path = entry.path();
        if path.is_file() && has_photo_extension(&path) {
            files.push(path);
        }
    }

    files.sort_by_cached_key(|p| {
        let name = p
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        (name.to_lowercase(), name)
    });
    tracing::debug!(dir = %dir.display(), count = files.len(), "collected images");
    Ok(files)
}

fn has_photo_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            PHOTO_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// Pick `total` files at stride `max(interval, 1)`, starting from the first.
pub fn select_frames(
    files: &[PathBuf],
    total: usize,
    interval: usize,
) -> SlitScanResult<Vec<PathBuf>> {
    if files.is_empty() {
        return Err(SlitScanError::input("no JPG/PNG images found"));
    }
    if total == 0 {
        return Err(SlitScanError::config("total frame count must be >= 1"));
    }

    let step = interval.max(1);
    let out: Vec<PathBuf> = files.iter().step_by(step).take(total).cloned().collect();
    if out.len() < total {
        return Err(SlitScanError::config(format!(
            "requested {total} frames at interval {step}, but only {} of {} files are reachable",
            out.len(),
            files.len()
        )));
    }
    Ok(out)
}

/// Decode one image file as RGB8.
pub fn load_frame(path: &Path) -> SlitScanResult<RgbImage> {
    let img = image::open(path).with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(img.to_rgb8())
}

/// Scan `dir`, sample `total` frames at `interval` and decode them in time order.
#[tracing::instrument(skip(opts), fields(dir = %dir.display()))]
pub fn load_ordered_frames(
    dir: &Path,
    total: usize,
    interval: usize,
    opts: &LoadOpts,
) -> SlitScanResult<FrameSet> {
    let files = collect_images(dir)?;
    let selected = select_frames(&files, total, interval)?;

    let mut frames: Vec<RgbImage> = Vec::with_capacity(selected.len());
    let mut canvas: Option<Canvas> = None;
    for (i, path) in selected.iter().enumerate() {
        let mut img = load_frame(path)?;
        let dims = Canvas::of_image(&img);
        match canvas {
            None => canvas = Some(dims),
            Some(want) if want != dims => {
                if !opts.resize_mismatched {
                    return Err(SlitScanError::input(format!(
                        "'{}' is {dims} but the first frame is {want}",
                        path.display()
                    )));
                }
                tracing::warn!(
                    path = %path.display(),
                    from = %dims,
                    to = %want,
                    "resizing mismatched frame"
                );
                img = image::imageops::resize(
                    &img,
                    want.width,
                    want.height,
                    image::imageops::FilterType::Triangle,
                );
            }
            Some(_) => {}
        }
        tracing::trace!(index = i, path = %path.display(), "loaded frame");
        frames.push(img);
    }

    let set = FrameSet::new(frames)?;
    tracing::info!(frames = set.len(), canvas = %set.canvas(), "loaded frame set");
    Ok(set)
}

#[cfg(test)]
#[path = "../../tests/unit/frames/source.rs"]
mod tests;
