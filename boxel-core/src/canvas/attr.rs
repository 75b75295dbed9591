//! Per-block colour attribute
//!
//! One attribute covers an 8x8 pixel block. The dirty flag is private:
//! the only ways to change colours also raise it, and only the flush
//! scheduler may lower it again.

use super::color::Color;

/// Ink/paper colours and change flag of one 8x8 block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlockAttr {
    ink: Color,
    paper: Color,
    dirty: bool,
}

impl BlockAttr {
    /// Create a freshly painted attribute (dirty)
    pub const fn new(paper: Color, ink: Color) -> Self {
        Self {
            ink,
            paper,
            dirty: true,
        }
    }

    /// Foreground colour for set pixels
    pub const fn ink(&self) -> Color {
        self.ink
    }

    /// Background colour for clear pixels
    pub const fn paper(&self) -> Color {
        self.paper
    }

    /// Whether the block changed since it was last flushed
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Displayed colour for a pixel bit
    pub const fn color_for(&self, ink_bit: bool) -> Color {
        if ink_bit {
            self.ink
        } else {
            self.paper
        }
    }

    /// Replace both colours and mark the block dirty
    pub fn recolor(&mut self, paper: Color, ink: Color) {
        self.paper = paper;
        self.ink = ink;
        self.dirty = true;
    }

    /// Mark the block dirty without touching its colours
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clear the dirty flag after the block reached the display
    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl Default for BlockAttr {
    fn default() -> Self {
        Self::new(Color::Black, Color::White)
    }
}
