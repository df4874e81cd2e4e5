use std::path::PathBuf;

use crate::composite::compositor::{CompositeOpts, compose};
use crate::encode::writer::{WriteReport, write_canvas};
use crate::foundation::core::Canvas;
use crate::foundation::error::{SlitScanError, SlitScanResult};
use crate::frames::source::{LoadOpts, load_ordered_frames};
use crate::geometry::direction::Direction;
use crate::geometry::partition::{BandPlan, partition};

/// Everything one mosaic run needs. Passed explicitly; nothing is read from ambient state.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunConfig {
    /// Directory holding the timelapse frames.
    pub input_dir: PathBuf,
    /// Number of frames (and therefore bands) in the mosaic.
    pub total: usize,
    /// Sampling stride over the sorted files; 0 and 1 both take every file.
    pub interval: usize,
    /// Slicing direction in degrees (90 = left to right).
    pub angle_deg: f64,
    /// Output image path; its extension selects the encoding.
    pub output: PathBuf,
    /// Frame loading options.
    #[serde(default)]
    pub load: LoadOpts,
    /// Canvas fill threading.
    #[serde(default)]
    pub composite: CompositeOpts,
}

impl RunConfig {
    /// Check everything that can be checked without touching the filesystem.
    pub fn validate(&self) -> SlitScanResult<Direction> {
        if self.total == 0 {
            return Err(SlitScanError::config("total frame count must be >= 1"));
        }
        Direction::from_degrees(self.angle_deg)
    }
}

/// Summary of a completed run.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Number of frames composited.
    pub frames: usize,
    /// The partition that was applied.
    pub plan: BandPlan,
    /// Where and how the output was written.
    pub written: WriteReport,
}

/// Load frames, composite them and write the result.
///
/// Any failure aborts before the output file is created.
#[tracing::instrument(skip(cfg), fields(dir = %cfg.input_dir.display(), total = cfg.total))]
pub fn run(cfg: &RunConfig) -> SlitScanResult<RunReport> {
    let direction = cfg.validate()?;
    let frames = load_ordered_frames(&cfg.input_dir, cfg.total, cfg.interval, &cfg.load)?;
    let out = compose(&frames, &direction, &cfg.composite)?;
    if out.plan.is_trimmed() {
        tracing::info!(
            from = %out.plan.source(),
            to = %out.plan.output(),
            "trimmed canvas to a whole number of bands"
        );
    }
    let written = write_canvas(&out.image, &cfg.output)?;
    tracing::info!(path = %written.path.display(), format = ?written.format, "wrote mosaic");
    Ok(RunReport {
        frames: frames.len(),
        plan: out.plan,
        written,
    })
}

/// Partition a `width` x `height` canvas without loading any frames.
pub fn plan_for_dimensions(
    width: u32,
    height: u32,
    angle_deg: f64,
    total: usize,
) -> SlitScanResult<BandPlan> {
    let canvas = Canvas::new(width, height)?;
    let direction = Direction::from_degrees(angle_deg)?;
    partition(canvas, &direction, total)
}
