//! Board-agnostic core of the Boxel display and touch stack
//!
//! This crate contains everything that does not depend on a specific
//! display controller or touch chip:
//!
//! - Attribute canvas: a 1bpp pixel plane plus one ink/paper/dirty
//!   attribute per 8x8 block, with drawing primitives
//! - Selective update scheduler that flushes dirty blocks on a budget
//! - Touch sampler with debounce and a fixed-point exponential filter
//! - Least-squares touch calibration and coordinate mapping
//! - Transport and touch-input traits implemented by `boxel-drivers`
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod calibration;
pub mod canvas;
pub mod config;
pub mod geometry;
pub mod touch;
pub mod traits;

pub use geometry::Point;
