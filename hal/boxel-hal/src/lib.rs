//! Boxel Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware capabilities the display
//! and touch pipeline needs. Chip-specific code (or the `embedded-hal`
//! adapters in `boxel-drivers`) implements them, which keeps the core
//! testable on synthetic inputs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application control loop               │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  boxel-core (canvas, touch, calibration)│
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ boxel-drivers │       │ boxel-hal     │
//! │ ILI9341,      │──────▶│ (this crate)  │
//! │ MSP2807       │       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`spi::SpiBus`] - Blocking SPI bus operations
//! - [`time::Monotonic`] - Microsecond monotonic time source
//! - [`delay::DelayNs`] - Busy-wait settling delays

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod spi;
pub mod time;

// Re-export key traits at crate root for convenience
pub use delay::DelayNs;
pub use gpio::{InputPin, OutputPin};
pub use spi::SpiBus;
pub use time::Monotonic;
