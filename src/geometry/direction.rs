//! Direction angles and their projection vectors.
//!
//! Angles follow the photographer's convention: 90 slices left to right, 270 right to left,
//! 180 top to bottom and 0 bottom to top. In image coordinates (x right, y down) that is the
//! projection vector `(sin θ, -cos θ)`.

use crate::foundation::core::Vec2;
use crate::foundation::error::{SlitScanError, SlitScanResult};

/// Whether a cardinal direction slices the canvas into columns or rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Bands are vertical strips; the slicing coordinate is x.
    Columns,
    /// Bands are horizontal strips; the slicing coordinate is y.
    Rows,
}

/// The four axis-aligned directions, which admit an exact integer partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinal {
    /// 0 degrees: frame 0 at the bottom.
    BottomToTop,
    /// 90 degrees: frame 0 at the left.
    LeftToRight,
    /// 180 degrees: frame 0 at the top.
    TopToBottom,
    /// 270 degrees: frame 0 at the right.
    RightToLeft,
}

impl Cardinal {
    fn from_normalized(deg: f64) -> Option<Self> {
        if deg == 0.0 {
            Some(Self::BottomToTop)
        } else if deg == 90.0 {
            Some(Self::LeftToRight)
        } else if deg == 180.0 {
            Some(Self::TopToBottom)
        } else if deg == 270.0 {
            Some(Self::RightToLeft)
        } else {
            None
        }
    }

    /// Axis the bands are cut along.
    pub fn axis(self) -> Axis {
        match self {
            Self::LeftToRight | Self::RightToLeft => Axis::Columns,
            Self::TopToBottom | Self::BottomToTop => Axis::Rows,
        }
    }

    /// True when frame 0 sits at the high end of the axis (right or bottom).
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::BottomToTop | Self::RightToLeft)
    }

    /// Exact unit projection vector.
    pub fn vector(self) -> Vec2 {
        match self {
            Self::BottomToTop => Vec2::new(0.0, -1.0),
            Self::LeftToRight => Vec2::new(1.0, 0.0),
            Self::TopToBottom => Vec2::new(0.0, 1.0),
            Self::RightToLeft => Vec2::new(-1.0, 0.0),
        }
    }

    /// The direction pointing the opposite way.
    pub fn opposite(self) -> Self {
        match self {
            Self::BottomToTop => Self::TopToBottom,
            Self::LeftToRight => Self::RightToLeft,
            Self::TopToBottom => Self::BottomToTop,
            Self::RightToLeft => Self::LeftToRight,
        }
    }
}

/// A validated slicing direction.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Direction {
    degrees: f64,
    vector: Vec2,
    cardinal: Option<Cardinal>,
}

impl Direction {
    /// Build a direction from signed degrees. Any finite value is accepted and taken mod 360.
    pub fn from_degrees(degrees: f64) -> SlitScanResult<Self> {
        if !degrees.is_finite() {
            return Err(SlitScanError::config(format!(
                "direction angle must be finite (got {degrees})"
            )));
        }
        let degrees = normalize_degrees(degrees);
        let cardinal = Cardinal::from_normalized(degrees);
        let vector = match cardinal {
            Some(c) => c.vector(),
            None => unit_vector(degrees),
        };
        Ok(Self {
            degrees,
            vector,
            cardinal,
        })
    }

    /// Angle normalized into `[0, 360)`.
    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    /// Unit projection vector in image coordinates.
    pub fn vector(&self) -> Vec2 {
        self.vector
    }

    /// The cardinal classification, if any.
    pub fn cardinal(&self) -> Option<Cardinal> {
        self.cardinal
    }

    /// Whether this is one of 0, 90, 180 or 270 degrees.
    pub fn is_cardinal(&self) -> bool {
        self.cardinal.is_some()
    }

    /// Scalar position of pixel `(x, y)` along the slicing direction.
    pub fn project(&self, x: u32, y: u32) -> f64 {
        f64::from(x) * self.vector.x + f64::from(y) * self.vector.y
    }

    /// The direction rotated by 180 degrees, with an exactly negated vector.
    pub fn reversed(&self) -> Self {
        Self {
            degrees: normalize_degrees(self.degrees + 180.0),
            vector: -self.vector,
            cardinal: self.cardinal.map(Cardinal::opposite),
        }
    }
}

/// Reduce a finite angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    // rem_euclid of a tiny negative value can round up to exactly 360.
    if d >= 360.0 { 0.0 } else { d }
}

// Angles in the lower half-turn are computed directly; the upper half-turn negates them so
// that θ and θ+180 project to exactly opposite values.
fn unit_vector(degrees: f64) -> Vec2 {
    if degrees >= 180.0 {
        -half_turn_vector(degrees - 180.0)
    } else {
        half_turn_vector(degrees)
    }
}

fn half_turn_vector(degrees: f64) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(sin, -cos)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/direction.rs"]
mod tests;
