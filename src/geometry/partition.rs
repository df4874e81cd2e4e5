use std::ops::Range;

use crate::foundation::core::Canvas;
use crate::foundation::error::{SlitScanError, SlitScanResult};
use crate::geometry::direction::{Axis, Cardinal, Direction};

/// Assignment of every output pixel to exactly one frame index.
///
/// Cardinal directions produce an [`AxisPlan`] (integer strips, possibly trimming the canvas);
/// every other angle produces a [`ProjectedPlan`] (real-valued bands over the full canvas).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BandPlan {
    /// Exact column/row strips.
    Axis(AxisPlan),
    /// Diagonal bands along a projection vector.
    Projected(ProjectedPlan),
}

impl BandPlan {
    /// Number of bands, equal to the number of frames.
    pub fn band_count(&self) -> usize {
        match self {
            Self::Axis(p) => p.band_count(),
            Self::Projected(p) => p.band_count(),
        }
    }

    /// Dimensions of the source frames.
    pub fn source(&self) -> Canvas {
        match self {
            Self::Axis(p) => p.source(),
            Self::Projected(p) => p.canvas(),
        }
    }

    /// Dimensions of the composited output.
    pub fn output(&self) -> Canvas {
        match self {
            Self::Axis(p) => p.output(),
            Self::Projected(p) => p.canvas(),
        }
    }

    /// Whether the output is smaller than the source frames.
    pub fn is_trimmed(&self) -> bool {
        self.output() != self.source()
    }

    /// Band (frame index) owning output pixel `(x, y)`.
    ///
    /// `(x, y)` must lie inside [`BandPlan::output`]; the result is always `< band_count()`.
    pub fn band_at(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            self.output().contains(x, y),
            "pixel ({x},{y}) outside output {}",
            self.output()
        );
        match self {
            Self::Axis(p) => p.band_at(x, y),
            Self::Projected(p) => p.band_at(x, y),
        }
    }
}

/// Integer strip partition for 0, 90, 180 and 270 degrees.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AxisPlan {
    cardinal: Cardinal,
    bands: u32,
    band_width: u32,
    source: Canvas,
    output: Canvas,
}

impl AxisPlan {
    /// Split the cardinal axis into `bands` equal strips, dropping the remainder.
    pub fn new(source: Canvas, cardinal: Cardinal, bands: usize) -> SlitScanResult<Self> {
        let bands = band_count_u32(bands)?;
        let axis_len = match cardinal.axis() {
            Axis::Columns => source.width,
            Axis::Rows => source.height,
        };
        let band_width = axis_len / bands;
        if band_width == 0 {
            let what = match cardinal.axis() {
                Axis::Columns => "columns",
                Axis::Rows => "rows",
            };
            return Err(SlitScanError::config(format!(
                "cannot give {bands} frames at least one pixel each: canvas has only {axis_len} {what}"
            )));
        }

        let used = band_width * bands;
        let output = match cardinal.axis() {
            Axis::Columns => Canvas {
                width: used,
                height: source.height,
            },
            Axis::Rows => Canvas {
                width: source.width,
                height: used,
            },
        };
        if used < axis_len {
            tracing::debug!(
                axis_len,
                used,
                dropped = axis_len - used,
                "trimming canvas remainder"
            );
        }

        Ok(Self {
            cardinal,
            bands,
            band_width,
            source,
            output,
        })
    }

    /// The cardinal direction this plan slices along.
    pub fn cardinal(&self) -> Cardinal {
        self.cardinal
    }

    /// Axis the strips are cut along.
    pub fn axis(&self) -> Axis {
        self.cardinal.axis()
    }

    /// Number of strips.
    pub fn band_count(&self) -> usize {
        self.bands as usize
    }

    /// Width of each strip in pixels along the slicing axis.
    pub fn band_width(&self) -> u32 {
        self.band_width
    }

    /// Source frame dimensions.
    pub fn source(&self) -> Canvas {
        self.source
    }

    /// Trimmed output dimensions.
    pub fn output(&self) -> Canvas {
        self.output
    }

    /// Number of pixels along the slicing axis that belong to some strip.
    pub fn used_len(&self) -> u32 {
        self.band_width * self.bands
    }

    /// Pixel range of strip `k` along the slicing axis.
    pub fn band_range(&self, k: usize) -> Range<u32> {
        debug_assert!(k < self.band_count());
        let k = k as u32;
        let w = self.band_width;
        if self.cardinal.is_reversed() {
            let used = self.used_len();
            (used - (k + 1) * w)..(used - k * w)
        } else {
            (k * w)..((k + 1) * w)
        }
    }

    /// Strip owning position `offset` along the slicing axis.
    pub fn band_of_offset(&self, offset: u32) -> usize {
        let used = self.used_len();
        debug_assert!(offset < used);
        let forward = if self.cardinal.is_reversed() {
            used - 1 - offset
        } else {
            offset
        };
        (forward / self.band_width) as usize
    }

    /// Strip owning output pixel `(x, y)`.
    pub fn band_at(&self, x: u32, y: u32) -> usize {
        match self.axis() {
            Axis::Columns => self.band_of_offset(x),
            Axis::Rows => self.band_of_offset(y),
        }
    }
}

/// Real-valued band partition along a projection vector.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ProjectedPlan {
    direction: Direction,
    canvas: Canvas,
    s_min: f64,
    s_max: f64,
    delta: f64,
    /// `lo_0, lo_1, ..., lo_{N-1}, s_max`.
    boundaries: Vec<f64>,
}

impl ProjectedPlan {
    /// Divide the projected extent of `canvas` into `bands` equal intervals.
    pub fn new(canvas: Canvas, direction: Direction, bands: usize) -> SlitScanResult<Self> {
        let n = band_count_u32(bands)?;

        let mut s_min = f64::INFINITY;
        let mut s_max = f64::NEG_INFINITY;
        for (x, y) in canvas.corner_pixels() {
            let s = direction.project(x, y);
            s_min = s_min.min(s);
            s_max = s_max.max(s);
        }

        let mut delta = (s_max - s_min) / f64::from(n);
        if delta == 0.0 {
            // Single-pixel canvas: everything lands in band 0.
            delta = 1.0;
        }

        let mut boundaries = Vec::with_capacity(bands + 1);
        for k in 0..n {
            boundaries.push(s_min + f64::from(k) * delta);
        }
        boundaries.push(if s_max > s_min {
            s_max
        } else {
            s_min + f64::from(n) * delta
        });

        Ok(Self {
            direction,
            canvas,
            s_min,
            s_max,
            delta,
            boundaries,
        })
    }

    /// Canvas dimensions (never trimmed).
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Number of bands.
    pub fn band_count(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Smallest projection over the canvas.
    pub fn s_min(&self) -> f64 {
        self.s_min
    }

    /// Largest projection over the canvas.
    pub fn s_max(&self) -> f64 {
        self.s_max
    }

    /// Sorted band boundaries `lo_0..lo_{N-1}` followed by the closing end point.
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Interval `[lo_k, hi_k)` of band `k`.
    pub fn interval(&self, k: usize) -> (f64, f64) {
        (self.boundaries[k], self.boundaries[k + 1])
    }

    /// Projection of pixel `(x, y)`.
    pub fn projection(&self, x: u32, y: u32) -> f64 {
        self.direction.project(x, y)
    }

    /// Band containing scalar `s`. Ties go to the higher band; values outside the projected
    /// extent are clamped to the first or last band.
    pub fn band_of(&self, s: f64) -> usize {
        let interior = &self.boundaries[1..self.band_count()];
        let k = interior.partition_point(|&b| b <= s);
        if s > self.s_max || s < self.s_min {
            tracing::trace!(s, s_min = self.s_min, s_max = self.s_max, k, "clamped projection");
        }
        k
    }

    /// Band owning pixel `(x, y)`.
    pub fn band_at(&self, x: u32, y: u32) -> usize {
        self.band_of(self.projection(x, y))
    }
}

/// Partition `canvas` into `frames` bands along `direction`.
#[tracing::instrument(level = "debug", skip(direction), fields(degrees = direction.degrees()))]
pub fn partition(canvas: Canvas, direction: &Direction, frames: usize) -> SlitScanResult<BandPlan> {
    let plan = match direction.cardinal() {
        Some(cardinal) => BandPlan::Axis(AxisPlan::new(canvas, cardinal, frames)?),
        None => BandPlan::Projected(ProjectedPlan::new(canvas, *direction, frames)?),
    };
    tracing::debug!(
        bands = plan.band_count(),
        output = %plan.output(),
        trimmed = plan.is_trimmed(),
        "partitioned canvas"
    );
    Ok(plan)
}

fn band_count_u32(bands: usize) -> SlitScanResult<u32> {
    if bands == 0 {
        return Err(SlitScanError::config("frame count must be >= 1"));
    }
    u32::try_from(bands)
        .map_err(|_| SlitScanError::config(format!("frame count {bands} is too large")))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/partition.rs"]
mod tests;
