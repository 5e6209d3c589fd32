//! Text rendering with the built-in 5x8 font.

use super::font::{glyph, GLYPH_HEIGHT, GLYPH_WIDTH};
use super::framebuffer::Framebuffer;
use crate::LCD_WIDTH;

/// Horizontal distance between consecutive characters (glyph plus one blank column).
pub const CHAR_ADVANCE: u8 = GLYPH_WIDTH + 1;

/// Returns the horizontal space `draw_str` advances for `text` when nothing is truncated.
pub fn str_width(text: &str) -> u16 {
    (text.len() as u16).saturating_mul(CHAR_ADVANCE.into())
}

impl Framebuffer {
    /// Draws a single character from the font table.
    ///
    /// Only the glyph's lit pixels are written; the rest of the 5x8 cell is
    /// left as it was. Clear the cell first for opaque text.
    pub fn draw_char(&mut self, x: u8, y: u8, c: u8, set: bool) {
        self.glyph_at(i32::from(x), i32::from(y), c, set);
    }

    fn glyph_at(&mut self, x: i32, y: i32, c: u8, set: bool) {
        for (col, &bits) in glyph(c).iter().enumerate() {
            for row in 0..GLYPH_HEIGHT {
                if bits & (1 << row) != 0 {
                    self.plot(x + col as i32, y + i32::from(row), set);
                }
            }
        }
    }

    /// Draws a string left to right without wrapping.
    ///
    /// Rendering stops at the first character whose cell (glyph plus spacing
    /// column) would not fit before the right edge. Bytes outside printable
    /// ASCII render as blanks.
    pub fn draw_str(&mut self, x: u8, y: u8, text: &str, set: bool) {
        let mut cursor = i32::from(x);
        for c in text.bytes() {
            if cursor + i32::from(GLYPH_WIDTH) >= i32::from(LCD_WIDTH) {
                break;
            }
            self.glyph_at(cursor, i32::from(y), c, set);
            cursor += i32::from(CHAR_ADVANCE);
        }
    }
}
