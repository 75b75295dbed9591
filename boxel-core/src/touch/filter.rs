//! Fixed-point exponential position filter
//!
//! Single-pole IIR low-pass on one axis, kept in Q.14 so the hot path
//! needs no floating point. With `beta` as the shift, each update moves
//! the state `1 / 2^beta` of the way towards the new sample.

/// Fractional bits of the filter state
pub const FILTER_SCALE_BITS: u32 = 14;

/// Largest accepted filter shift
pub const MAX_BETA_SHIFT: u8 = 14;

/// One-axis exponential filter
///
/// Raw samples are at most 16 bits wide, so `raw << 14` always fits an
/// `i32` and the update never overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExpFilter {
    /// Filtered value × 2^14
    value: i32,
    /// Shift controlling the time constant
    beta: u8,
}

impl ExpFilter {
    /// Create a filter at zero
    ///
    /// `beta` is clamped to `1..=MAX_BETA_SHIFT`; callers validate it first
    /// through `TouchConfig::validate`.
    pub const fn new(beta: u8) -> Self {
        let beta = if beta == 0 {
            1
        } else if beta > MAX_BETA_SHIFT {
            MAX_BETA_SHIFT
        } else {
            beta
        };
        Self { value: 0, beta }
    }

    /// Scale a raw sample into filter units
    #[inline]
    pub const fn scale(raw: u16) -> i32 {
        (raw as i32) << FILTER_SCALE_BITS
    }

    /// Jump straight to `raw` without smoothing
    pub fn snap(&mut self, raw: u16) {
        self.value = Self::scale(raw);
    }

    /// Move towards `raw` by one filter step, rounding to nearest
    pub fn update(&mut self, raw: u16) {
        let half = 1i32 << (self.beta - 1);
        self.value += (Self::scale(raw) - self.value + half) >> self.beta;
    }

    /// Current state in filter units (× 2^14)
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// Configured shift
    pub const fn beta(&self) -> u8 {
        self.beta
    }
}
