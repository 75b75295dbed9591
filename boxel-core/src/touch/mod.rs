//! Touch input pipeline
//!
//! Debounce state machine plus exponential position filter. The sampler
//! only produces filtered raw coordinates; mapping them to screen space is
//! the job of `calibration::CoordinateMapper`.

pub mod filter;
pub mod sampler;

pub use filter::{ExpFilter, FILTER_SCALE_BITS, MAX_BETA_SHIFT};
pub use sampler::{TouchError, TouchPhase, TouchSample, TouchSampler, TouchStatus};
