//! Attribute-mapped canvas
//!
//! The screen is stored as two planes:
//!
//! ```text
//! pixel plane      240 x 320 bits, 1 = ink, 0 = paper      9600 bytes
//! attribute plane  30 x 40 blocks, ink/paper/dirty each   1200 entries
//! ```
//!
//! Every 8x8 block shares one ink and one paper colour, in the style of
//! the ZX Spectrum screen layout. The per-block dirty flag drives the
//! selective flush, so redrawing a few characters only costs a few
//! 128-byte transfers instead of a full 150 KiB frame.

pub mod attr;
pub mod bitplane;
pub mod color;
pub mod flush;
pub mod font;
pub mod framebuffer;

pub use attr::BlockAttr;
pub use bitplane::BitPlane;
pub use color::{Color, PALETTE};
pub use flush::{FlushReport, FlushStats, FlushStatus, UpdateScheduler};
pub use framebuffer::{Cursor, FrameBuffer};

/// Pixel width of the canvas
pub const WIDTH: usize = 240;

/// Pixel height of the canvas
pub const HEIGHT: usize = 320;

/// Edge length of an attribute block in pixels
pub const BLOCK_SIZE: usize = 8;

/// Number of block columns (text columns)
pub const TEXT_COLS: usize = WIDTH / BLOCK_SIZE;

/// Number of block rows (text rows)
pub const TEXT_ROWS: usize = HEIGHT / BLOCK_SIZE;

/// Total number of attribute blocks
pub const BLOCK_COUNT: usize = TEXT_COLS * TEXT_ROWS;
