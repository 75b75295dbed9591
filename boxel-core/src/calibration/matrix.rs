//! Affine calibration matrix

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Scale of the sensor input expected by `transform`
///
/// Inputs are raw readings × 1024, which keeps the filter's fractional
/// bits through the mapping without storing pre-scaled coefficients.
pub const INPUT_SCALE: f32 = 1024.0;

/// Two independent affine maps, one per screen axis
///
/// ```text
/// X = kx1 * px / 1024 + kx2 * py / 1024 + kx3
/// Y = ky1 * px / 1024 + ky2 * py / 1024 + ky3
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationMatrix {
    pub kx1: f32,
    pub kx2: f32,
    pub kx3: f32,
    pub ky1: f32,
    pub ky2: f32,
    pub ky3: f32,
}

impl Default for CalibrationMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CalibrationMatrix {
    /// Maps raw × 1024 back to raw
    pub const IDENTITY: Self = Self {
        kx1: 1.0,
        kx2: 0.0,
        kx3: 0.0,
        ky1: 0.0,
        ky2: 1.0,
        ky3: 0.0,
    };

    /// Map a sensor point (raw × 1024) to screen coordinates
    ///
    /// Both outputs are computed from the same input point and rounded to
    /// the nearest integer, halves rounding up.
    pub fn transform(&self, point: Point) -> Point {
        let px = point.x as f32 / INPUT_SCALE;
        let py = point.y as f32 / INPUT_SCALE;

        let x = self.kx1 * px + self.kx2 * py + self.kx3;
        let y = self.ky1 * px + self.ky2 * py + self.ky3;

        Point::new(round(x), round(y))
    }
}

/// Round to nearest; saturates outside the `i32` range
fn round(value: f32) -> i32 {
    libm::floorf(value + 0.5) as i32
}
