//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in boxel-core for the MSP2807 module:
//!
//! - Display: ILI9341 240x320 TFT controller over SPI
//! - Touch: resistive touch controller on the second SPI bus
//! - `embedded-hal` 1.0 adapters for the boxel-hal traits

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod eh;
pub mod touch;
