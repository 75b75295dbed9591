//! Hardware abstraction traits
//!
//! These traits define the interface between the canvas/touch logic
//! and device-specific implementations in `boxel-drivers`.

pub mod touch;
pub mod transport;

pub use touch::{RawPoint, TouchInput};
pub use transport::DisplayTransport;
