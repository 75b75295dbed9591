//! Touch input trait

/// Raw ADC coordinates as read from the touch controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawPoint {
    /// X channel reading
    pub x: u16,
    /// Y channel reading
    pub y: u16,
}

impl RawPoint {
    /// Create a new raw reading
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Resistive touch controller access
///
/// Combines the press-detect line and the X/Y conversion registers. The
/// sampler polls `is_pressed` every tick and only reads the registers when
/// its debounce timing allows it.
pub trait TouchInput {
    /// Error type for register reads
    type Error;

    /// Check the press-detect line
    fn is_pressed(&mut self) -> bool;

    /// Read one X/Y conversion pair
    fn read_raw(&mut self) -> Result<RawPoint, Self::Error>;
}
