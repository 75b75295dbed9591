//! Eight-colour palette

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// RGB565 values for each palette index
///
/// Sent big-endian on the wire.
pub const PALETTE: [u16; 8] = [
    0x0000, // Black
    0x001F, // Blue
    0xF800, // Red
    0xF81F, // Magenta
    0x07E0, // Green
    0x07FF, // Cyan
    0xFFE0, // Yellow
    0xFFFF, // White
];

/// Palette colour index (3 bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Color {
    #[default]
    Black = 0,
    Blue = 1,
    Red = 2,
    Magenta = 3,
    Green = 4,
    Cyan = 5,
    Yellow = 6,
    White = 7,
}

impl Color {
    /// All colours in palette order
    pub const ALL: [Color; 8] = [
        Color::Black,
        Color::Blue,
        Color::Red,
        Color::Magenta,
        Color::Green,
        Color::Cyan,
        Color::Yellow,
        Color::White,
    ];

    /// Palette index of this colour
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Colour from the low three bits of `bits`
    ///
    /// Higher bits are ignored, so any integer maps to a colour.
    pub const fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0b111) as usize]
    }

    /// RGB565 value of this colour
    pub const fn rgb565(self) -> u16 {
        PALETTE[self as usize]
    }
}

impl TryFrom<u8> for Color {
    type Error = ConfigError;

    /// Strict conversion for configuration input
    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or(ConfigError::InvalidColor(index))
    }
}
