//! Monochrome bitmap blitting.
//!
//! Source images are row-major with each row padded to whole bytes; bit 0 of
//! a byte is the leftmost of its eight pixels. This is independent of the
//! framebuffer's own column-major banking.

use super::framebuffer::Framebuffer;
use crate::{LCD_HEIGHT, LCD_WIDTH};

impl Framebuffer {
    /// Draws a `w` x `h` monochrome bitmap with its top-left corner at `(x, y)`.
    ///
    /// Only 1-bits are written (as `set`); 0-bits leave the framebuffer
    /// untouched. Reading stops early when `bitmap` runs out or the read
    /// cursor reaches `w * ceil(w / 8)` bytes.
    pub fn draw_bitmap(&mut self, x: u8, y: u8, w: u8, h: u8, bitmap: &[u8], set: bool) {
        let row_bytes = (usize::from(w) + 7) / 8;
        let limit = usize::from(w) * row_bytes;
        let (x, w) = (i32::from(x), i32::from(w));
        let mut cursor = 0usize;

        for row in 0..i32::from(h) {
            let dest_y = i32::from(y) + row;
            if dest_y >= i32::from(LCD_HEIGHT) {
                // Keep the cursor aligned to the start of the next row.
                cursor += row_bytes;
                continue;
            }

            for bank in 0..row_bytes {
                if cursor >= limit {
                    break;
                }
                let Some(&bits) = bitmap.get(cursor) else {
                    break;
                };
                cursor += 1;

                let bank_x = x + bank as i32 * 8;
                for bit in 0..8 {
                    let dest_x = bank_x + bit;
                    if dest_x >= i32::from(LCD_WIDTH) || dest_x >= x + w {
                        continue;
                    }
                    if bits & (1 << bit) != 0 {
                        self.plot(dest_x, dest_y, set);
                    }
                }
            }
        }
    }
}
