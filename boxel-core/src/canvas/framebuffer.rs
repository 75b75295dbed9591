//! Frame buffer and drawing primitives
//!
//! Owns the pixel plane and the attribute array. Every primitive either
//! completes and raises the dirty flag of each block it touched, or does
//! nothing at all: coordinates outside the canvas are silently clipped,
//! never reported.

use core::fmt::{self, Write};

use heapless::String;

use super::attr::BlockAttr;
use super::bitplane::BitPlane;
use super::color::Color;
use super::font;
use super::{BLOCK_COUNT, BLOCK_SIZE, HEIGHT, TEXT_COLS, TEXT_ROWS, WIDTH};
use crate::config::CanvasConfig;

/// Upper bound on Bresenham iterations for one line
///
/// The longest line that fits the canvas needs `HEIGHT` steps, so this only
/// guards against corrupted state; lines are not guaranteed to be drawn past
/// this many pixels.
pub const MAX_LINE_STEPS: usize = 1000;

/// Characters formatted by one `print` call (two text rows)
pub const PRINT_BUFFER_LEN: usize = TEXT_COLS * 2;

/// Text cursor in block units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    /// Text column (0-based)
    pub col: usize,
    /// Text row (0-based)
    pub row: usize,
}

/// Two-plane compressed canvas
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    /// 1bpp ink/paper bits
    pixels: BitPlane,
    /// One attribute per 8x8 block, row-major
    attrs: [BlockAttr; BLOCK_COUNT],
    /// Text cursor used by `put_string`
    cursor: Cursor,
    /// Default colours
    canvas: CanvasConfig,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("pixels", &self.pixels)
            .field("dirty_blocks", &self.dirty_count())
            .field("cursor", &self.cursor)
            .field("canvas", &self.canvas)
            .finish()
    }
}

impl FrameBuffer {
    /// Create a blank canvas in the default colours, fully dirty
    pub fn new(canvas: CanvasConfig) -> Self {
        Self {
            pixels: BitPlane::new(),
            attrs: [BlockAttr::new(canvas.paper, canvas.ink); BLOCK_COUNT],
            cursor: Cursor::default(),
            canvas,
        }
    }

    /// Index of a block in the attribute array
    fn block_index(col: usize, row: usize) -> Option<usize> {
        (col < TEXT_COLS && row < TEXT_ROWS).then_some(row * TEXT_COLS + col)
    }

    /// Convert signed pixel coordinates, rejecting anything off-canvas
    fn clip(x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < WIDTH && y < HEIGHT).then_some((x, y))
    }

    /// Set a pixel to ink and flag its block, keeping the block colours
    fn plot(&mut self, x: usize, y: usize) {
        if self.pixels.set(x, y, true) {
            if let Some(index) = Self::block_index(x / BLOCK_SIZE, y / BLOCK_SIZE) {
                self.attrs[index].mark_dirty();
            }
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Default canvas colours
    pub fn canvas(&self) -> CanvasConfig {
        self.canvas
    }

    /// Current text cursor
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Read one pixel (`true` = ink); off-canvas reads as paper
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        Self::clip(x, y).is_some_and(|(x, y)| self.pixels.get(x, y))
    }

    /// Attribute of block (`col`, `row`)
    pub fn attr(&self, col: usize, row: usize) -> Option<BlockAttr> {
        Self::block_index(col, row).map(|index| self.attrs[index])
    }

    /// Whether block (`col`, `row`) awaits a flush
    pub fn is_dirty(&self, col: usize, row: usize) -> bool {
        self.attr(col, row).is_some_and(|attr| attr.is_dirty())
    }

    /// Number of blocks awaiting a flush
    pub fn dirty_count(&self) -> usize {
        self.attrs.iter().filter(|attr| attr.is_dirty()).count()
    }

    /// Pixel plane
    pub fn pixels(&self) -> &BitPlane {
        &self.pixels
    }

    /// Attribute array, row-major
    pub fn attrs(&self) -> &[BlockAttr] {
        &self.attrs
    }

    /// Clear the dirty flag of the block at `index` after a successful write
    pub(crate) fn mark_clean(&mut self, index: usize) {
        if let Some(attr) = self.attrs.get_mut(index) {
            attr.mark_clean();
        }
    }

    /// Clear every dirty flag after a full-screen write
    pub(crate) fn mark_all_clean(&mut self) {
        for attr in &mut self.attrs {
            attr.mark_clean();
        }
    }

    // ------------------------------------------------------------------
    // Whole-screen and text operations
    // ------------------------------------------------------------------

    /// Blank the pixel plane, paint every block and home the cursor
    pub fn clear(&mut self, paper: Color, ink: Color) {
        self.pixels.clear();
        self.attrs.fill(BlockAttr::new(paper, ink));
        self.cursor = Cursor::default();
    }

    /// `clear` using the configured canvas colours
    pub fn clear_default(&mut self) {
        let CanvasConfig { paper, ink } = self.canvas;
        self.clear(paper, ink);
    }

    /// Move the text cursor
    pub fn set_cursor(&mut self, col: usize, row: usize) {
        self.cursor = Cursor { col, row };
    }

    /// Change the colours of one block and mark it dirty
    pub fn put_color_attr(&mut self, col: usize, row: usize, paper: Color, ink: Color) {
        if let Some(index) = Self::block_index(col, row) {
            self.attrs[index].recolor(paper, ink);
        }
    }

    /// Draw a character into text cell (`col`, `row`)
    ///
    /// The glyph replaces all 64 pixels of the cell and the cell takes the
    /// given colours. Non-printable characters and off-canvas cells are
    /// ignored.
    pub fn put_char(&mut self, col: usize, row: usize, paper: Color, ink: Color, ch: char) {
        let Some(glyph) = font::glyph(ch) else {
            return;
        };
        let Some(index) = Self::block_index(col, row) else {
            return;
        };

        for (line, bits) in glyph.iter().enumerate() {
            self.pixels.set_block_row(col, row * BLOCK_SIZE + line, *bits);
        }
        self.attrs[index].recolor(paper, ink);
    }

    /// Write text at the cursor with wrapping and scrolling
    ///
    /// Text wraps at the right edge. `'\n'` and `'\r'` both start a new
    /// line. Whenever the cursor reaches `bottom_row`, the band
    /// `[top_row, bottom_row)` scrolls up one text row first.
    pub fn put_string(
        &mut self,
        text: &str,
        top_row: usize,
        bottom_row: usize,
        paper: Color,
        ink: Color,
    ) {
        for ch in text.chars() {
            if self.cursor.row >= bottom_row {
                self.scroll_vertical(top_row, bottom_row);
                self.cursor.row = self.cursor.row.saturating_sub(1);
            }

            match ch {
                '\n' | '\r' => {
                    self.cursor.col = 0;
                    self.cursor.row += 1;
                }
                _ => {
                    self.put_char(self.cursor.col, self.cursor.row, paper, ink, ch);
                    self.cursor.col += 1;
                    if self.cursor.col >= TEXT_COLS {
                        self.cursor.col = 0;
                        self.cursor.row += 1;
                    }
                }
            }
        }
    }

    /// Format text and write it with `put_string`
    ///
    /// At most `PRINT_BUFFER_LEN` characters are written; the rest of the
    /// formatted output is dropped.
    ///
    /// # Example
    /// ```
    /// use boxel_core::canvas::{Color, FrameBuffer};
    /// let mut fb = FrameBuffer::default();
    /// fb.print(0, 8, Color::Black, Color::White, format_args!("x={}", 42));
    /// assert_eq!(fb.cursor().col, 4);
    /// ```
    pub fn print(
        &mut self,
        top_row: usize,
        bottom_row: usize,
        paper: Color,
        ink: Color,
        args: fmt::Arguments<'_>,
    ) {
        let mut text: String<PRINT_BUFFER_LEN> = String::new();
        // Overflow only means the text was truncated
        let _ = Truncating(&mut text).write_fmt(args);
        self.put_string(&text, top_row, bottom_row, paper, ink);
    }

    /// Scroll text rows `[top_row, bottom_row)` up by one text row
    ///
    /// The top row's content is discarded; the freed bottom row is blank in
    /// the canvas colours. The whole band is marked dirty. A band with
    /// `top_row >= bottom_row` is left alone; `bottom_row` is clamped to
    /// the canvas.
    pub fn scroll_vertical(&mut self, top_row: usize, bottom_row: usize) {
        let bottom_row = bottom_row.min(TEXT_ROWS);
        if top_row >= bottom_row {
            return;
        }

        self.pixels
            .scroll_up(top_row * BLOCK_SIZE, bottom_row * BLOCK_SIZE, BLOCK_SIZE);

        let start = top_row * TEXT_COLS;
        let end = bottom_row * TEXT_COLS;
        self.attrs.copy_within(start + TEXT_COLS..end, start);

        let CanvasConfig { paper, ink } = self.canvas;
        self.attrs[end - TEXT_COLS..end].fill(BlockAttr::new(paper, ink));

        for attr in &mut self.attrs[start..end] {
            attr.mark_dirty();
        }
    }

    // ------------------------------------------------------------------
    // Graphics operations
    // ------------------------------------------------------------------

    /// Set one pixel to ink and recolour its block
    pub fn set_pixel(&mut self, x: i32, y: i32, paper: Color, ink: Color) {
        let Some((x, y)) = Self::clip(x, y) else {
            return;
        };
        self.pixels.set(x, y, true);
        self.put_color_attr(x / BLOCK_SIZE, y / BLOCK_SIZE, paper, ink);
    }

    /// Draw a line with Bresenham's algorithm in the existing block colours
    ///
    /// If either endpoint is off-canvas nothing is drawn.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        if Self::clip(x0, y0).is_none() || Self::clip(x1, y1).is_none() {
            return;
        }

        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let mut err = (if dx > dy { dx } else { -dy }) / 2;

        let (mut x, mut y) = (x0, y0);
        for _ in 0..MAX_LINE_STEPS {
            // Both endpoints are on-canvas and the walk never leaves their
            // bounding box, so the casts cannot wrap.
            self.plot(x as usize, y as usize);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = err;
            if e2 > -dx {
                err -= dy;
                x += sx;
            }
            if e2 < dy {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw a text label at a pixel position
    ///
    /// Unlike `put_char` the label need not be block-aligned. Only ink bits
    /// are set unless `overwrite` is true, in which case glyph background
    /// pixels are cleared as well. Block colours are unchanged. The label
    /// is cut at the right edge and at the first non-printable character;
    /// a start position that leaves no room for one full glyph draws
    /// nothing.
    pub fn put_text_label(&mut self, text: &str, x: i32, y: i32, overwrite: bool) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if x > WIDTH - BLOCK_SIZE || y > HEIGHT - BLOCK_SIZE {
            return;
        }

        let max_len = (WIDTH - x) / BLOCK_SIZE;
        for (n, ch) in text.chars().take(max_len).enumerate() {
            let Some(glyph) = font::glyph(ch) else {
                return;
            };
            let left = x + n * BLOCK_SIZE;

            for (line, bits) in glyph.iter().enumerate() {
                let py = y + line;
                for i in 0..BLOCK_SIZE {
                    let px = left + i;
                    if bits & (0x80 >> i) != 0 {
                        self.pixels.set(px, py, true);
                    } else if overwrite {
                        self.pixels.set(px, py, false);
                    }
                }
            }

            // A glyph straddles at most 2x2 blocks
            for py in [y, y + BLOCK_SIZE - 1] {
                for px in [left, left + BLOCK_SIZE - 1] {
                    if let Some(index) = Self::block_index(px / BLOCK_SIZE, py / BLOCK_SIZE) {
                        self.attrs[index].mark_dirty();
                    }
                }
            }
        }
    }

    /// Blank the pixels of one block, keeping its colours
    pub fn clear_block(&mut self, col: usize, row: usize) {
        let Some(index) = Self::block_index(col, row) else {
            return;
        };
        for line in 0..BLOCK_SIZE {
            self.pixels.set_block_row(col, row * BLOCK_SIZE + line, 0);
        }
        self.attrs[index].mark_dirty();
    }
}

/// `fmt::Write` adapter that keeps as many characters as fit
struct Truncating<'a, const N: usize>(&'a mut String<N>);

impl<const N: usize> Write for Truncating<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            self.0.push(ch).map_err(|_| fmt::Error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Canvas with every dirty flag cleared, as after an initial flush
    fn clean_canvas() -> FrameBuffer {
        let mut fb = FrameBuffer::default();
        fb.mark_all_clean();
        fb
    }

    #[test]
    fn test_new_canvas_is_blank_and_dirty() {
        let fb = FrameBuffer::default();
        assert_eq!(fb.dirty_count(), BLOCK_COUNT);
        assert!(fb.pixels().as_bytes().iter().all(|&b| b == 0));
        assert_eq!(fb.cursor(), Cursor::default());
    }

    #[test]
    fn test_clear_paints_every_block() {
        let mut fb = clean_canvas();
        fb.set_pixel(3, 3, Color::Black, Color::Red);
        fb.set_cursor(5, 6);
        fb.mark_all_clean();

        fb.clear(Color::Blue, Color::Yellow);

        assert_eq!(fb.dirty_count(), BLOCK_COUNT);
        assert!(!fb.pixel(3, 3));
        assert_eq!(fb.cursor(), Cursor::default());
        for attr in fb.attrs() {
            assert_eq!(attr.paper(), Color::Blue);
            assert_eq!(attr.ink(), Color::Yellow);
        }
    }

    #[test]
    fn test_clear_default_uses_canvas_colours() {
        let mut fb = FrameBuffer::new(CanvasConfig {
            paper: Color::Blue,
            ink: Color::Cyan,
        });
        fb.clear(Color::Red, Color::Green);
        fb.clear_default();
        let attr = fb.attr(0, 0).unwrap();
        assert_eq!(attr.paper(), Color::Blue);
        assert_eq!(attr.ink(), Color::Cyan);
    }

    #[test]
    fn test_set_pixel_marks_block() {
        let mut fb = clean_canvas();
        fb.set_pixel(17, 9, Color::Black, Color::Yellow);

        assert!(fb.pixel(17, 9));
        assert!(fb.is_dirty(2, 1));
        assert_eq!(fb.dirty_count(), 1);
        assert_eq!(fb.attr(2, 1).unwrap().ink(), Color::Yellow);
    }

    #[test]
    fn test_set_pixel_clips() {
        let mut fb = clean_canvas();
        let before = fb.clone();
        fb.set_pixel(-1, 0, Color::Black, Color::White);
        fb.set_pixel(0, -1, Color::Black, Color::White);
        fb.set_pixel(WIDTH as i32, 0, Color::Black, Color::White);
        fb.set_pixel(0, HEIGHT as i32, Color::Black, Color::White);
        assert_eq!(fb, before);
    }

    #[test]
    fn test_draw_horizontal_line() {
        let mut fb = clean_canvas();
        fb.draw_line(0, 4, 15, 4);

        for x in 0..16 {
            assert!(fb.pixel(x, 4));
        }
        assert!(!fb.pixel(16, 4));
        assert!(fb.is_dirty(0, 0));
        assert!(fb.is_dirty(1, 0));
        assert_eq!(fb.dirty_count(), 2);
    }

    #[test]
    fn test_draw_line_keeps_colours() {
        let mut fb = clean_canvas();
        fb.put_color_attr(0, 0, Color::Blue, Color::Red);
        fb.draw_line(0, 0, 7, 7);
        let attr = fb.attr(0, 0).unwrap();
        assert_eq!(attr.paper(), Color::Blue);
        assert_eq!(attr.ink(), Color::Red);
    }

    #[test]
    fn test_draw_diagonal_reaches_both_ends() {
        let mut fb = clean_canvas();
        fb.draw_line(100, 200, 10, 20);
        assert!(fb.pixel(100, 200));
        assert!(fb.pixel(10, 20));
    }

    #[test]
    fn test_draw_full_diagonal() {
        let mut fb = clean_canvas();
        let (x1, y1) = (WIDTH as i32 - 1, HEIGHT as i32 - 1);
        fb.draw_line(0, 0, x1, y1);
        assert!(fb.pixel(0, 0));
        assert!(fb.pixel(x1, y1));
    }

    #[test]
    fn test_draw_line_rejects_off_canvas_endpoint() {
        let mut fb = clean_canvas();
        let before = fb.clone();
        fb.draw_line(0, 0, WIDTH as i32, 10);
        fb.draw_line(-5, 0, 10, 10);
        fb.draw_line(0, 0, 10, HEIGHT as i32);
        assert_eq!(fb, before);
    }

    #[test]
    fn test_put_char_renders_glyph() {
        let mut fb = clean_canvas();
        fb.put_char(3, 2, Color::Black, Color::Green, '_');

        // '_' is a single bar on the last glyph row
        assert_eq!(fb.pixels().block_row(3, 2 * 8 + 7), 0xFE);
        assert_eq!(fb.pixels().block_row(3, 2 * 8), 0x00);
        assert!(fb.is_dirty(3, 2));
        assert_eq!(fb.attr(3, 2).unwrap().ink(), Color::Green);
    }

    #[test]
    fn test_put_char_rejects_non_printable() {
        let mut fb = clean_canvas();
        let before = fb.clone();
        fb.put_char(0, 0, Color::Black, Color::White, '\u{7f}');
        fb.put_char(0, 0, Color::Black, Color::White, '\t');
        fb.put_char(TEXT_COLS, 0, Color::Black, Color::White, 'A');
        assert_eq!(fb, before);
    }

    #[test]
    fn test_put_string_advances_cursor() {
        let mut fb = clean_canvas();
        fb.put_string("AB\nC", 0, TEXT_ROWS, Color::Black, Color::White);
        assert_eq!(fb.cursor(), Cursor { col: 1, row: 1 });
        assert!(fb.is_dirty(0, 0));
        assert!(fb.is_dirty(1, 0));
        assert!(fb.is_dirty(0, 1));
    }

    #[test]
    fn test_put_string_wraps_at_right_edge() {
        let mut fb = clean_canvas();
        fb.set_cursor(TEXT_COLS - 1, 0);
        fb.put_string("XY", 0, TEXT_ROWS, Color::Black, Color::White);
        assert!(fb.is_dirty(TEXT_COLS - 1, 0));
        assert!(fb.is_dirty(0, 1));
        assert_eq!(fb.cursor(), Cursor { col: 1, row: 1 });
    }

    #[test]
    fn test_put_string_scrolls_at_bottom() {
        let mut fb = clean_canvas();
        fb.put_string("A\nB\nC", 0, 2, Color::Black, Color::White);

        // Two-row band: "A" scrolled out, "B" now on row 0, "C" on row 1
        let b = font::glyph('B').unwrap();
        let c = font::glyph('C').unwrap();
        for line in 0..8 {
            assert_eq!(fb.pixels().block_row(0, line), b[line]);
            assert_eq!(fb.pixels().block_row(0, 8 + line), c[line]);
        }
        assert_eq!(fb.cursor(), Cursor { col: 1, row: 1 });
    }

    #[test]
    fn test_print_formats_and_truncates() {
        let mut fb = clean_canvas();
        fb.print(0, TEXT_ROWS, Color::Black, Color::White, format_args!("{}-{}", 12, 34));
        assert_eq!(fb.cursor(), Cursor { col: 5, row: 0 });

        let mut fb = clean_canvas();
        let long = "0123456789";
        fb.print(
            0,
            TEXT_ROWS,
            Color::Black,
            Color::White,
            format_args!("{long}{long}{long}{long}{long}{long}{long}"),
        );
        // 70 characters requested, only two rows' worth kept
        assert_eq!(fb.cursor(), Cursor { col: 0, row: 2 });
    }

    #[test]
    fn test_scroll_clears_bottom_row_with_canvas_colours() {
        let mut fb = clean_canvas();
        fb.put_char(0, 0, Color::Red, Color::Yellow, 'A');
        fb.put_char(0, 1, Color::Green, Color::Blue, 'B');
        fb.put_char(0, 2, Color::Cyan, Color::Magenta, 'C');
        fb.mark_all_clean();

        fb.scroll_vertical(0, 2);

        // Row 1 moved to row 0, row 1 freed, row 2 outside band untouched
        let b = font::glyph('B').unwrap();
        for line in 0..8 {
            assert_eq!(fb.pixels().block_row(0, line), b[line]);
            assert_eq!(fb.pixels().block_row(0, 8 + line), 0);
        }
        assert_eq!(fb.attr(0, 0).unwrap().paper(), Color::Green);
        assert_eq!(fb.attr(0, 1).unwrap().paper(), Color::Black);
        assert_eq!(fb.attr(0, 1).unwrap().ink(), Color::White);
        assert_eq!(fb.attr(0, 2).unwrap().paper(), Color::Cyan);

        assert_eq!(fb.dirty_count(), 2 * TEXT_COLS);
        assert!(!fb.is_dirty(0, 2));
    }

    #[test]
    fn test_scroll_inverted_band_is_noop() {
        let mut fb = clean_canvas();
        fb.put_char(0, 5, Color::Black, Color::White, 'Z');
        fb.mark_all_clean();
        let before = fb.clone();
        fb.scroll_vertical(6, 4);
        fb.scroll_vertical(4, 4);
        assert_eq!(fb, before);
    }

    #[test]
    fn test_text_label_overlay_and_overwrite() {
        let mut fb = clean_canvas();
        // Fill a block so we can tell overlay from overwrite
        for line in 0..8 {
            fb.pixels.set_block_row(1, 8 + line, 0xFF);
        }

        fb.put_text_label("_", 8, 8, false);
        assert_eq!(fb.pixels().block_row(1, 8), 0xFF);

        fb.put_text_label("_", 8, 8, true);
        assert_eq!(fb.pixels().block_row(1, 8), 0x00);
        assert_eq!(fb.pixels().block_row(1, 15), 0xFE);
        assert!(fb.is_dirty(1, 1));
    }

    #[test]
    fn test_text_label_unaligned_marks_four_blocks() {
        let mut fb = clean_canvas();
        fb.put_text_label("#", 4, 4, false);
        assert!(fb.is_dirty(0, 0));
        assert!(fb.is_dirty(1, 0));
        assert!(fb.is_dirty(0, 1));
        assert!(fb.is_dirty(1, 1));
        assert_eq!(fb.dirty_count(), 4);
    }

    #[test]
    fn test_text_label_clipping() {
        let mut fb = clean_canvas();
        let before = fb.clone();
        fb.put_text_label("A", (WIDTH - 7) as i32, 0, true);
        fb.put_text_label("A", 0, (HEIGHT - 7) as i32, true);
        fb.put_text_label("A", -1, 0, true);
        assert_eq!(fb, before);

        // Only as many glyphs as fit are drawn
        fb.put_text_label("ABCD", (WIDTH - 16) as i32, 0, true);
        assert!(fb.is_dirty(TEXT_COLS - 1, 0));
        assert_eq!(fb.dirty_count(), 2);
    }

    #[test]
    fn test_text_label_stops_at_non_printable() {
        let mut fb = clean_canvas();
        fb.put_text_label("A\u{1}B", 0, 0, true);
        assert!(fb.is_dirty(0, 0));
        assert!(!fb.is_dirty(1, 0));
    }

    #[test]
    fn test_clear_block_keeps_colours() {
        let mut fb = clean_canvas();
        fb.put_char(4, 4, Color::Red, Color::Yellow, 'M');
        fb.mark_all_clean();

        fb.clear_block(4, 4);

        for line in 0..8 {
            assert_eq!(fb.pixels().block_row(4, 32 + line), 0);
        }
        let attr = fb.attr(4, 4).unwrap();
        assert!(attr.is_dirty());
        assert_eq!(attr.paper(), Color::Red);
        assert_eq!(attr.ink(), Color::Yellow);
        assert_eq!(fb.dirty_count(), 1);
    }

    #[test]
    fn test_clear_block_out_of_range() {
        let mut fb = clean_canvas();
        let before = fb.clone();
        fb.clear_block(TEXT_COLS, 0);
        fb.clear_block(0, TEXT_ROWS);
        assert_eq!(fb, before);
    }
}
