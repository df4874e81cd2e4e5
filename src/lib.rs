//! slitscan turns a timelapse into a single slit-scan image.
//!
//! Each of the N selected frames contributes one band of the output canvas, and the bands are
//! ordered along a chosen direction so that position in the image encodes time.
//!
//! # Pipeline overview
//!
//! 1. **Load**: [`load_ordered_frames`] scans a directory, samples frames and decodes them into
//!    a [`FrameSet`].
//! 2. **Partition**: [`partition`] turns a [`Direction`] and the frame count into a [`BandPlan`].
//! 3. **Composite**: [`composite`] copies each output pixel from the same coordinate of the frame
//!    owning its band.
//! 4. **Write**: [`write_canvas`] encodes the result according to the output extension.
//!
//! [`run`] performs all four steps from a [`RunConfig`].
//!
//! Frames are never rotated or resampled. Only the selection mask follows the angle. Cardinal
//! angles (0, 90, 180, 270) use exact integer strips and may trim the canvas remainder; every
//! other angle partitions the full canvas into real-valued bands.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod composite;
mod encode;
mod foundation;
mod frames;
mod geometry;
mod pipeline;

pub use composite::compositor::{Composite, CompositeOpts, compose, composite};
pub use encode::writer::{JPEG_QUALITY, WriteReport, write_canvas};
pub use foundation::core::{Canvas, Vec2};
pub use foundation::error::{SlitScanError, SlitScanResult};
pub use frames::set::FrameSet;
pub use frames::source::{
    LoadOpts, PHOTO_EXTENSIONS, collect_images, load_frame, load_ordered_frames, select_frames,
};
pub use geometry::direction::{Axis, Cardinal, Direction, normalize_degrees};
pub use geometry::partition::{AxisPlan, BandPlan, ProjectedPlan, partition};
pub use pipeline::{RunConfig, RunReport, plan_for_dimensions, run};
