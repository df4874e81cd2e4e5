use image::RgbImage;

use crate::foundation::core::Canvas;
use crate::foundation::error::{SlitScanError, SlitScanResult};

/// Time-ordered source frames sharing one set of dimensions. Index 0 is the earliest.
#[derive(Clone, Debug)]
pub struct FrameSet {
    frames: Vec<RgbImage>,
    canvas: Canvas,
}

impl FrameSet {
    /// Wrap already-decoded frames. The first frame fixes the canvas; all others must match it.
    pub fn new(frames: Vec<RgbImage>) -> SlitScanResult<Self> {
        let Some(first) = frames.first() else {
            return Err(SlitScanError::input("a frame set needs at least one frame"));
        };
        let canvas = Canvas::of_image(first);
        if canvas.width == 0 || canvas.height == 0 {
            return Err(SlitScanError::input(format!(
                "frame 0 has empty dimensions {canvas}"
            )));
        }
        for (i, f) in frames.iter().enumerate().skip(1) {
            let dims = Canvas::of_image(f);
            if dims != canvas {
                return Err(SlitScanError::input(format!(
                    "frame {i} is {dims} but frame 0 is {canvas}"
                )));
            }
        }
        Ok(Self { frames, canvas })
    }

    /// Shared frame dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; a frame set is never empty.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// All frames in time order.
    pub fn frames(&self) -> &[RgbImage] {
        &self.frames
    }

    /// The same frames with time running backwards.
    pub fn into_reversed(mut self) -> Self {
        self.frames.reverse();
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/set.rs"]
mod tests;
