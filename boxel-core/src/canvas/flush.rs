//! Selective update scheduler
//!
//! Turns dirty blocks into bounded transport writes. Each block is one
//! 8x8 window of 64 big-endian RGB565 pixels (128 bytes), so the cost of
//! a flush is proportional to what changed rather than to the screen size.

use super::attr::BlockAttr;
use super::framebuffer::FrameBuffer;
use super::{BLOCK_COUNT, BLOCK_SIZE, HEIGHT, TEXT_COLS, WIDTH};
use crate::traits::DisplayTransport;

#[cfg(feature = "defmt")]
use defmt::debug;

/// Bytes per rendered block
pub const BLOCK_BYTES: usize = BLOCK_SIZE * BLOCK_SIZE * 2;

/// Bytes per rendered pixel row
pub const LINE_BYTES: usize = WIDTH * 2;

/// Outcome of a selective flush
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlushStatus {
    /// No dirty block remains
    Complete,
    /// The budget ran out with dirty blocks left
    Pending,
}

/// Result of one selective flush call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlushReport {
    /// Whether more work remains
    pub status: FlushStatus,
    /// Blocks written by this call
    pub blocks_written: usize,
}

impl FlushReport {
    /// Whether the canvas is fully on screen
    pub fn is_complete(&self) -> bool {
        self.status == FlushStatus::Complete
    }
}

/// Running totals across flush calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlushStats {
    /// Number of full-screen flushes
    pub full_flushes: u32,
    /// Number of individual block writes
    pub blocks_written: u32,
}

/// Writes frame buffer content to a display transport
///
/// Holds no reference to the frame buffer or transport between calls, so
/// the control loop can draw and poll touch input between flushes.
#[derive(Debug, Default)]
pub struct UpdateScheduler {
    stats: FlushStats,
}

impl UpdateScheduler {
    /// Create a scheduler with zeroed statistics
    pub const fn new() -> Self {
        Self {
            stats: FlushStats {
                full_flushes: 0,
                blocks_written: 0,
            },
        }
    }

    /// Running totals
    pub fn stats(&self) -> FlushStats {
        self.stats
    }

    /// Write the whole canvas, ignoring dirty flags
    ///
    /// Used for the initial paint. Every block is clean afterwards. On a
    /// transport error the dirty flags are left as they were.
    pub fn full_flush<T: DisplayTransport>(
        &mut self,
        fb: &mut FrameBuffer,
        transport: &mut T,
    ) -> Result<(), T::Error> {
        transport.set_window(0, (WIDTH - 1) as u16, 0, (HEIGHT - 1) as u16)?;

        let mut line = [0u8; LINE_BYTES];
        for y in 0..HEIGHT {
            let attrs = &fb.attrs()[(y / BLOCK_SIZE) * TEXT_COLS..][..TEXT_COLS];
            let bits = fb.pixels().row(y);
            for (col, (attr, chunk)) in attrs
                .iter()
                .zip(line.chunks_exact_mut(BLOCK_SIZE * 2))
                .enumerate()
            {
                render_byte(attr, bits[col], chunk);
            }
            transport.write_block(&line)?;
        }

        fb.mark_all_clean();
        self.stats.full_flushes = self.stats.full_flushes.wrapping_add(1);
        Ok(())
    }

    /// Write up to `max_blocks` dirty blocks in row-major order
    ///
    /// Returns `Pending` as soon as the budget is spent and another dirty
    /// block exists, `Complete` once the scan reaches the end. A zero
    /// budget writes nothing and only reports whether work remains. If the
    /// transport fails, the failing block stays dirty and the error is
    /// returned.
    pub fn selective_flush<T: DisplayTransport>(
        &mut self,
        fb: &mut FrameBuffer,
        transport: &mut T,
        max_blocks: usize,
    ) -> Result<FlushReport, T::Error> {
        let mut written = 0;

        for index in 0..BLOCK_COUNT {
            if !fb.attrs()[index].is_dirty() {
                continue;
            }
            if written == max_blocks {
                #[cfg(feature = "defmt")]
                debug!("flush budget of {} blocks spent", max_blocks);
                return Ok(FlushReport {
                    status: FlushStatus::Pending,
                    blocks_written: written,
                });
            }

            self.write_block(fb, transport, index % TEXT_COLS, index / TEXT_COLS)?;
            written += 1;
        }

        Ok(FlushReport {
            status: FlushStatus::Complete,
            blocks_written: written,
        })
    }

    /// Write one block regardless of its dirty flag, then mark it clean
    ///
    /// Out-of-range blocks are ignored.
    pub fn flush_block<T: DisplayTransport>(
        &mut self,
        fb: &mut FrameBuffer,
        transport: &mut T,
        col: usize,
        row: usize,
    ) -> Result<(), T::Error> {
        if fb.attr(col, row).is_none() {
            return Ok(());
        }
        self.write_block(fb, transport, col, row)
    }

    fn write_block<T: DisplayTransport>(
        &mut self,
        fb: &mut FrameBuffer,
        transport: &mut T,
        col: usize,
        row: usize,
    ) -> Result<(), T::Error> {
        let index = row * TEXT_COLS + col;
        let attr = fb.attrs()[index];

        let mut buf = [0u8; BLOCK_BYTES];
        for (line, chunk) in buf.chunks_exact_mut(BLOCK_SIZE * 2).enumerate() {
            let bits = fb.pixels().block_row(col, row * BLOCK_SIZE + line);
            render_byte(&attr, bits, chunk);
        }

        let x0 = (col * BLOCK_SIZE) as u16;
        let y0 = (row * BLOCK_SIZE) as u16;
        let last = (BLOCK_SIZE - 1) as u16;
        transport.set_window(x0, x0 + last, y0, y0 + last)?;
        transport.write_block(&buf)?;

        fb.mark_clean(index);
        self.stats.blocks_written = self.stats.blocks_written.wrapping_add(1);
        Ok(())
    }
}

/// Expand 8 pixel bits into 16 bytes of big-endian RGB565
fn render_byte(attr: &BlockAttr, bits: u8, out: &mut [u8]) {
    for (i, pixel) in out.chunks_exact_mut(2).enumerate() {
        let color = attr.color_for(bits & (0x80 >> i) != 0);
        pixel.copy_from_slice(&color.rgb565().to_be_bytes());
    }
}
