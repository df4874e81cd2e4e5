use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageFormat, ImageResult, RgbImage};

use crate::foundation::error::{SlitScanError, SlitScanResult};

/// JPEG quality used for `.jpg`/`.jpeg` outputs.
pub const JPEG_QUALITY: u8 = 95;

/// What [`write_canvas`] actually wrote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteReport {
    /// Destination path, exactly as requested.
    pub path: PathBuf,
    /// Encoding used for the file contents.
    pub format: ImageFormat,
    /// True when the requested extension could not be honored and PNG was written instead.
    pub fallback: bool,
}

/// Encode `canvas` to `path`, picking the format from the extension.
///
/// The image is encoded in memory before the file is created, so a failed encode never leaves a
/// file behind. Unknown extensions, and formats other than JPEG/PNG whose encoder rejects the
/// canvas (pixel layout, size limits), fall back to PNG bytes under the same file name.
#[tracing::instrument(skip(canvas), fields(path = %path.display()))]
pub fn write_canvas(canvas: &RgbImage, path: &Path) -> SlitScanResult<WriteReport> {
    let requested = ImageFormat::from_path(path)
        .ok()
        .filter(|f| f.writing_enabled());

    let (format, bytes, fallback) = match requested {
        Some(format) => match encode_to_vec(canvas, format) {
            Ok(bytes) => (format, bytes, false),
            Err(e) if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png) => {
                tracing::warn!(
                    ?format,
                    error = %e,
                    "encoder rejected the canvas; writing PNG instead"
                );
                (ImageFormat::Png, encode_png(canvas, path)?, true)
            }
            Err(e) => {
                return Err(SlitScanError::encode(format!(
                    "encode {format:?} '{}': {e}",
                    path.display()
                )));
            }
        },
        None => {
            tracing::warn!("unrecognized output extension; writing PNG under the requested name");
            (ImageFormat::Png, encode_png(canvas, path)?, true)
        }
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, &bytes).with_context(|| format!("write '{}'", path.display()))?;

    tracing::debug!(?format, fallback, bytes = bytes.len(), "wrote canvas");
    Ok(WriteReport {
        path: path.to_path_buf(),
        format,
        fallback,
    })
}

fn encode_png(canvas: &RgbImage, path: &Path) -> SlitScanResult<Vec<u8>> {
    encode_to_vec(canvas, ImageFormat::Png)
        .map_err(|e| SlitScanError::encode(format!("encode png '{}': {e}", path.display())))
}

fn encode_to_vec(canvas: &RgbImage, format: ImageFormat) -> ImageResult<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    encode(canvas, format, &mut cursor)?;
    Ok(cursor.into_inner())
}

fn encode<W: Write + Seek>(canvas: &RgbImage, format: ImageFormat, w: &mut W) -> ImageResult<()> {
    match format {
        ImageFormat::Jpeg => {
            canvas.write_with_encoder(JpegEncoder::new_with_quality(w, JPEG_QUALITY))
        }
        ImageFormat::Png => canvas.write_with_encoder(PngEncoder::new_with_quality(
            w,
            CompressionType::Best,
            FilterType::Adaptive,
        )),
        other => canvas.write_to(w, other),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/writer.rs"]
mod tests;
