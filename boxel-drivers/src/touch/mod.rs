//! Touch controller drivers

pub mod msp2807;

pub use msp2807::{Msp2807, Msp2807Error};
