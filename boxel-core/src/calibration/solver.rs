//! Least-squares calibration solver
//!
//! Three point pairs give an exact solution. With more pairs the normal
//! equations are folded into three weighted pseudo-points in one pass,
//! so the same closed-form 3-point solution applies and nothing needs to
//! be allocated:
//!
//! ```text
//! pseudo 0   weights sx      (Σ sx·v / Σ sx)
//! pseudo 1   weights sy      (Σ sy·v / Σ sy)
//! pseudo 2   plain mean      (Σ v / n)
//! ```
//!
//! Sample points are in raw sensor units; the resulting matrix expects
//! raw × 1024 at transform time.

use crate::geometry::Point;

use super::matrix::CalibrationMatrix;

#[cfg(feature = "defmt")]
use defmt::{info, warn};

/// Fewest point pairs that determine both affine maps
pub const MIN_POINTS: usize = 3;

/// Magnitude below which a sum or determinant counts as zero
pub const DEGENERACY_EPSILON: f32 = 1e-9;

/// Calibration failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// Fewer than `MIN_POINTS` pairs
    TooFewPoints,
    /// A sample coordinate sums to zero across all points
    DegenerateSamples,
    /// Sample points are collinear or identical
    Singular,
    /// Reference and sample slices differ in length
    MismatchedPoints,
}

impl CalibrationError {
    /// Negative status code
    pub const fn code(self) -> i8 {
        match self {
            CalibrationError::TooFewPoints => -1,
            CalibrationError::DegenerateSamples => -2,
            CalibrationError::Singular => -3,
            CalibrationError::MismatchedPoints => -4,
        }
    }
}

/// Successful calibration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    /// Fitted coefficients
    pub matrix: CalibrationMatrix,
    /// Number of point pairs the fit used
    pub points_used: usize,
}

/// Three points per channel: sample x, sample y, reference x, reference y
struct System {
    sx: [f32; 3],
    sy: [f32; 3],
    rx: [f32; 3],
    ry: [f32; 3],
}

impl System {
    fn exact(reference: &[Point], samples: &[Point]) -> Self {
        let mut system = Self {
            sx: [0.0; 3],
            sy: [0.0; 3],
            rx: [0.0; 3],
            ry: [0.0; 3],
        };
        for (i, (r, s)) in reference.iter().zip(samples).enumerate().take(3) {
            system.sx[i] = s.x as f32;
            system.sy[i] = s.y as f32;
            system.rx[i] = r.x as f32;
            system.ry[i] = r.y as f32;
        }
        system
    }

    fn pseudo_points(reference: &[Point], samples: &[Point]) -> Result<Self, CalibrationError> {
        let mut sum_sx = 0.0f32;
        let mut sum_sy = 0.0f32;
        let mut sum_rx = 0.0f32;
        let mut sum_ry = 0.0f32;
        let mut sxx = 0.0f32;
        let mut sxy = 0.0f32;
        let mut syy = 0.0f32;
        let mut sx_rx = 0.0f32;
        let mut sy_rx = 0.0f32;
        let mut sx_ry = 0.0f32;
        let mut sy_ry = 0.0f32;

        for (r, s) in reference.iter().zip(samples) {
            let (x, y) = (s.x as f32, s.y as f32);
            let (rx, ry) = (r.x as f32, r.y as f32);

            sum_sx += x;
            sum_sy += y;
            sum_rx += rx;
            sum_ry += ry;
            sxx += x * x;
            sxy += x * y;
            syy += y * y;
            sx_rx += x * rx;
            sy_rx += y * rx;
            sx_ry += x * ry;
            sy_ry += y * ry;
        }

        if libm::fabsf(sum_sx) < DEGENERACY_EPSILON || libm::fabsf(sum_sy) < DEGENERACY_EPSILON {
            return Err(CalibrationError::DegenerateSamples);
        }

        let n = samples.len() as f32;
        Ok(Self {
            sx: [sxx / sum_sx, sxy / sum_sy, sum_sx / n],
            sy: [sxy / sum_sx, syy / sum_sy, sum_sy / n],
            rx: [sx_rx / sum_sx, sy_rx / sum_sy, sum_rx / n],
            ry: [sx_ry / sum_sx, sy_ry / sum_sy, sum_ry / n],
        })
    }

    /// Cramer's rule on the three points, one axis at a time
    fn solve(&self) -> Result<CalibrationMatrix, CalibrationError> {
        let [a0, a1, a2] = self.sx;
        let [b0, b1, b2] = self.sy;

        let k = (a0 - a2) * (b1 - b2) - (a1 - a2) * (b0 - b2);
        if libm::fabsf(k) < DEGENERACY_EPSILON {
            return Err(CalibrationError::Singular);
        }

        let axis = |[c0, c1, c2]: [f32; 3]| -> (f32, f32, f32) {
            let k1 = ((c0 - c2) * (b1 - b2) - (c1 - c2) * (b0 - b2)) / k;
            let k2 = ((c1 - c2) * (a0 - a2) - (c0 - c2) * (a1 - a2)) / k;
            let k3 = (b0 * (a2 * c1 - a1 * c2) + b1 * (a0 * c2 - a2 * c0) + b2 * (a1 * c0 - a0 * c1))
                / k;
            (k1, k2, k3)
        };

        let (kx1, kx2, kx3) = axis(self.rx);
        let (ky1, ky2, ky3) = axis(self.ry);
        Ok(CalibrationMatrix {
            kx1,
            kx2,
            kx3,
            ky1,
            ky2,
            ky3,
        })
    }
}

/// Fit a calibration matrix to paired reference and sample points
///
/// `reference[i]` is the known screen position of the target whose raw
/// reading was `samples[i]`.
pub fn solve(reference: &[Point], samples: &[Point]) -> Result<Calibration, CalibrationError> {
    let result = fit(reference, samples);

    #[cfg(feature = "defmt")]
    {
        match &result {
            Ok(cal) => info!("calibration fitted from {} points", cal.points_used),
            Err(err) => warn!("calibration failed: {}", err),
        }
    }

    result
}

fn fit(reference: &[Point], samples: &[Point]) -> Result<Calibration, CalibrationError> {
    if reference.len() != samples.len() {
        return Err(CalibrationError::MismatchedPoints);
    }

    let n = samples.len();
    if n < MIN_POINTS {
        return Err(CalibrationError::TooFewPoints);
    }

    let system = if n == MIN_POINTS {
        System::exact(reference, samples)
    } else {
        System::pseudo_points(reference, samples)?
    };

    Ok(Calibration {
        matrix: system.solve()?,
        points_used: n,
    })
}
