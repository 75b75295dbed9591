//! Touch calibration
//!
//! Fits an affine map from raw sensor readings to screen coordinates and
//! applies it to live samples.

pub mod mapper;
pub mod matrix;
pub mod solver;

pub use mapper::CoordinateMapper;
pub use matrix::CalibrationMatrix;
pub use solver::{solve, Calibration, CalibrationError, DEGENERACY_EPSILON, MIN_POINTS};
