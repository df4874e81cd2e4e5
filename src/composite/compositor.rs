use image::RgbImage;
use rayon::prelude::*;

use crate::foundation::error::{SlitScanError, SlitScanResult};
use crate::frames::set::FrameSet;
use crate::geometry::direction::{Axis, Direction};
use crate::geometry::partition::{AxisPlan, BandPlan, ProjectedPlan, partition};

const CHANNELS: usize = 3;

/// Threading controls for filling the output canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompositeOpts {
    /// Fill scan lines on a dedicated rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count (parallel mode only).
    pub threads: Option<usize>,
}

/// A finished slit-scan image together with the partition that produced it.
#[derive(Clone, Debug)]
pub struct Composite {
    /// Output pixels, sized to [`BandPlan::output`].
    pub image: RgbImage,
    /// The band partition used.
    pub plan: BandPlan,
}

/// Partition the frame set's canvas along `direction` and composite one band per frame.
#[tracing::instrument(skip(frames, opts), fields(frames = frames.len(), degrees = direction.degrees()))]
pub fn compose(
    frames: &FrameSet,
    direction: &Direction,
    opts: &CompositeOpts,
) -> SlitScanResult<Composite> {
    let plan = partition(frames.canvas(), direction, frames.len())?;
    let image = composite(frames, &plan, opts)?;
    Ok(Composite { image, plan })
}

/// Build the output image: every pixel is copied from the same coordinate of the frame that
/// owns its band.
pub fn composite(
    frames: &FrameSet,
    plan: &BandPlan,
    opts: &CompositeOpts,
) -> SlitScanResult<RgbImage> {
    if plan.band_count() != frames.len() {
        return Err(SlitScanError::config(format!(
            "plan has {} bands but the frame set has {} frames",
            plan.band_count(),
            frames.len()
        )));
    }
    if plan.source() != frames.canvas() {
        return Err(SlitScanError::config(format!(
            "plan was built for {} frames but the frame set is {}",
            plan.source(),
            frames.canvas()
        )));
    }

    let out = plan.output();
    let row_len = out.width as usize * CHANNELS;
    let mut buf = vec![0u8; row_len * out.height as usize];

    let fill = |(y, row): (usize, &mut [u8])| fill_row(plan, frames, y as u32, row);
    if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| buf.par_chunks_mut(row_len).enumerate().for_each(fill));
    } else {
        buf.chunks_mut(row_len).enumerate().for_each(fill);
    }

    tracing::debug!(output = %out, parallel = opts.parallel, "composited canvas");
    RgbImage::from_raw(out.width, out.height, buf)
        .ok_or_else(|| SlitScanError::config("internal error: output buffer size mismatch"))
}

fn fill_row(plan: &BandPlan, frames: &FrameSet, y: u32, row: &mut [u8]) {
    match plan {
        BandPlan::Axis(p) => fill_axis_row(p, frames, y, row),
        BandPlan::Projected(p) => fill_projected_row(p, frames, y, row),
    }
}

fn fill_axis_row(plan: &AxisPlan, frames: &FrameSet, y: u32, row: &mut [u8]) {
    match plan.axis() {
        Axis::Columns => {
            for (k, frame) in frames.frames().iter().enumerate() {
                let r = plan.band_range(k);
                let (a, b) = (r.start as usize * CHANNELS, r.end as usize * CHANNELS);
                row[a..b].copy_from_slice(&source_row(frame, y)[a..b]);
            }
        }
        Axis::Rows => {
            let frame = &frames.frames()[plan.band_of_offset(y)];
            let len = row.len();
            row.copy_from_slice(&source_row(frame, y)[..len]);
        }
    }
}

fn fill_projected_row(plan: &ProjectedPlan, frames: &FrameSet, y: u32, row: &mut [u8]) {
    let frames = frames.frames();
    for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
        let k = plan.band_at(x as u32, y);
        let src = source_row(&frames[k], y);
        let at = x * CHANNELS;
        px.copy_from_slice(&src[at..at + CHANNELS]);
    }
}

fn source_row(frame: &RgbImage, y: u32) -> &[u8] {
    let stride = frame.width() as usize * CHANNELS;
    let start = y as usize * stride;
    &frame.as_raw()[start..start + stride]
}

fn build_thread_pool(threads: Option<usize>) -> SlitScanResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SlitScanError::config(
            "composite threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SlitScanError::config(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/composite/compositor.rs"]
mod tests;
