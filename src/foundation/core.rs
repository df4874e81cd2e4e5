use crate::foundation::error::{SlitScanError, SlitScanResult};

pub use kurbo::Vec2;

/// Pixel dimensions of a frame or of the output canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, rejecting empty dimensions.
    pub fn new(width: u32, height: u32) -> SlitScanResult<Self> {
        if width == 0 || height == 0 {
            return Err(SlitScanError::config(format!(
                "canvas dimensions must be non-zero (got {width}x{height})"
            )));
        }
        Ok(Self { width, height })
    }

    /// Dimensions of an RGB8 image.
    pub fn of_image(img: &image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self { width, height }
    }

    /// Total number of pixels.
    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Whether `(x, y)` lies inside the canvas.
    pub fn contains(self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// The four extreme pixel positions: (0,0), (W-1,0), (0,H-1), (W-1,H-1).
    pub fn corner_pixels(self) -> [(u32, u32); 4] {
        let xr = self.width.saturating_sub(1);
        let yb = self.height.saturating_sub(1);
        [(0, 0), (xr, 0), (0, yb), (xr, yb)]
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
