//! Sensor to screen coordinate mapping

use crate::geometry::Point;
use crate::touch::TouchSample;

use super::matrix::CalibrationMatrix;
use super::solver::{solve, CalibrationError};

/// Applies the active calibration to live touch samples
///
/// The matrix is read-only between calibrations; recalibrating swaps it
/// as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoordinateMapper {
    matrix: CalibrationMatrix,
}

impl CoordinateMapper {
    /// Create a mapper from an existing matrix
    pub const fn new(matrix: CalibrationMatrix) -> Self {
        Self { matrix }
    }

    /// Fit a new matrix and build a mapper from it
    pub fn from_points(reference: &[Point], samples: &[Point]) -> Result<Self, CalibrationError> {
        solve(reference, samples).map(|cal| Self::new(cal.matrix))
    }

    /// Active matrix
    pub fn matrix(&self) -> &CalibrationMatrix {
        &self.matrix
    }

    /// Swap in a new matrix, returning the old one
    pub fn replace(&mut self, matrix: CalibrationMatrix) -> CalibrationMatrix {
        core::mem::replace(&mut self.matrix, matrix)
    }

    /// Map a sensor point in raw × 1024 units
    pub fn map(&self, point: Point) -> Point {
        self.matrix.transform(point)
    }

    /// Map a filtered touch sample to screen coordinates
    pub fn map_sample(&self, sample: &TouchSample) -> Point {
        self.map(sample.calibration_input())
    }
}
