//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::canvas::Color;
use crate::touch::filter::MAX_BETA_SHIFT;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Filter beta shift is zero or larger than the filter can represent
    InvalidBeta(u8),
    /// Minimum flick interval is not shorter than the long-press interval
    InvertedThresholds,
    /// Palette index outside `0..8`
    InvalidColor(u8),
}

/// Touch sampler timing and filter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchConfig {
    /// Minimum time between accepted samples of one contact (µs)
    ///
    /// Samples closer together than this are grouped and filtered.
    pub min_flick_us: u32,
    /// Gap after which a press counts as a new contact (µs)
    ///
    /// A new contact snaps the filter to the raw reading instead of
    /// smoothing towards it.
    pub long_press_us: u32,
    /// Exponential filter time constant as a right shift
    ///
    /// Larger values are smoother and slower. Valid range is
    /// `1..=MAX_BETA_SHIFT`.
    pub beta_shift: u8,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            min_flick_us: 1_000,   // 1 ms
            long_press_us: 50_000, // 50 ms
            beta_shift: 5,
        }
    }
}

impl TouchConfig {
    /// Check that the configuration can be used by the sampler
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.beta_shift == 0 || self.beta_shift > MAX_BETA_SHIFT {
            return Err(ConfigError::InvalidBeta(self.beta_shift));
        }
        if self.min_flick_us >= self.long_press_us {
            return Err(ConfigError::InvertedThresholds);
        }
        Ok(())
    }
}

/// Default canvas colours
///
/// Used by `clear_default` and for the band freed by a vertical scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CanvasConfig {
    /// Background colour for clear pixels
    pub paper: Color,
    /// Foreground colour for set pixels
    pub ink: Color,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            paper: Color::Black,
            ink: Color::White,
        }
    }
}
