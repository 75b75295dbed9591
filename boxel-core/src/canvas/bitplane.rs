//! 1bpp pixel plane
//!
//! Row-major bit storage, most significant bit leftmost. With a width
//! that is a multiple of 8, each attribute block row is exactly one byte,
//! which keeps glyph blits and block renders byte-aligned.

use super::{HEIGHT, TEXT_COLS, WIDTH};

/// Bytes per pixel row
pub const STRIDE: usize = WIDTH / 8;

/// Total size of the plane in bytes
pub const PLANE_BYTES: usize = STRIDE * HEIGHT;

/// Fixed-size monochrome bitmap
///
/// All coordinate checks happen here; callers get `None`/`false` for
/// anything outside the plane instead of touching neighbouring rows.
#[derive(Clone, PartialEq, Eq)]
pub struct BitPlane {
    bytes: [u8; PLANE_BYTES],
}

impl Default for BitPlane {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for BitPlane {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let set = self.bytes.iter().map(|b| b.count_ones() as usize).sum::<usize>();
        f.debug_struct("BitPlane")
            .field("width", &WIDTH)
            .field("height", &HEIGHT)
            .field("set_pixels", &set)
            .finish()
    }
}

impl BitPlane {
    /// Create a blank plane
    pub const fn new() -> Self {
        Self {
            bytes: [0; PLANE_BYTES],
        }
    }

    /// Byte offset and bit mask of a pixel
    fn locate(x: usize, y: usize) -> Option<(usize, u8)> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        Some((y * STRIDE + x / 8, 0x80 >> (x % 8)))
    }

    /// Read a pixel; out-of-range pixels read as paper
    pub fn get(&self, x: usize, y: usize) -> bool {
        match Self::locate(x, y) {
            Some((offset, mask)) => self.bytes[offset] & mask != 0,
            None => false,
        }
    }

    /// Write a pixel
    ///
    /// Returns `false` (and writes nothing) if the pixel is outside the plane.
    pub fn set(&mut self, x: usize, y: usize, ink: bool) -> bool {
        let Some((offset, mask)) = Self::locate(x, y) else {
            return false;
        };
        if ink {
            self.bytes[offset] |= mask;
        } else {
            self.bytes[offset] &= !mask;
        }
        true
    }

    /// The 8 pixels of block column `col` on pixel row `y`
    pub fn block_row(&self, col: usize, y: usize) -> u8 {
        if col >= TEXT_COLS || y >= HEIGHT {
            return 0;
        }
        self.bytes[y * STRIDE + col]
    }

    /// Overwrite the 8 pixels of block column `col` on pixel row `y`
    pub fn set_block_row(&mut self, col: usize, y: usize, bits: u8) {
        if col < TEXT_COLS && y < HEIGHT {
            self.bytes[y * STRIDE + col] = bits;
        }
    }

    /// One full pixel row, `STRIDE` bytes
    pub fn row(&self, y: usize) -> &[u8] {
        let y = y.min(HEIGHT - 1);
        &self.bytes[y * STRIDE..(y + 1) * STRIDE]
    }

    /// Set every pixel to paper
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Clear pixel rows `[top, bottom)`
    pub fn clear_rows(&mut self, top: usize, bottom: usize) {
        let bottom = bottom.min(HEIGHT);
        if top < bottom {
            self.bytes[top * STRIDE..bottom * STRIDE].fill(0);
        }
    }

    /// Shift pixel rows `[top, bottom)` up by `by` rows
    ///
    /// The top `by` rows of the band are discarded and the bottom `by`
    /// rows are cleared. Rows outside the band are untouched.
    pub fn scroll_up(&mut self, top: usize, bottom: usize, by: usize) {
        let bottom = bottom.min(HEIGHT);
        if top >= bottom {
            return;
        }
        let by = by.min(bottom - top);
        self.bytes
            .copy_within((top + by) * STRIDE..bottom * STRIDE, top * STRIDE);
        self.clear_rows(bottom - by, bottom);
    }

    /// Raw plane contents, row-major
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
