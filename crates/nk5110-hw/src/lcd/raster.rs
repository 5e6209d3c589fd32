//! Line rasterization over the framebuffer.

use super::framebuffer::Framebuffer;
use crate::LCD_HEIGHT;

impl Framebuffer {
    /// Draws a line between two points using Bresenham's algorithm.
    ///
    /// Both endpoints are plotted. Points off the display are clipped
    /// pixel by pixel.
    pub fn draw_line(&mut self, x1: i16, y1: i16, x2: i16, y2: i16, set: bool) {
        self.line(x1.into(), y1.into(), x2.into(), y2.into(), set);
    }

    pub(crate) fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, set: bool) {
        let (mut x, mut y) = (x1, y1);
        let dx = (x2 - x).abs();
        let dy = (y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = (if dx > dy { dx } else { -dy }) / 2;

        loop {
            self.plot(x, y, set);
            if x == x2 && y == y2 {
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

    /// Draws `w` pixels rightwards from `(x, y)`.
    ///
    /// Rows off the display are skipped entirely; columns are left to
    /// [`Framebuffer::plot`] to clip.
    pub(crate) fn fast_hline(&mut self, x: i32, y: i32, w: i32, set: bool) {
        if y < 0 || y >= i32::from(LCD_HEIGHT) {
            return;
        }
        for i in 0..w {
            self.plot(x + i, y, set);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LCD_FRAME_SIZE, LCD_WIDTH};
    use proptest::prelude::*;

    fn bit(fb: &Framebuffer, x: u8, y: u8) -> bool {
        fb.data()[x as usize + (y as usize / 8) * 84] & (1 << (y % 8)) != 0
    }

    #[test]
    fn test_single_point_line() {
        let mut fb = Framebuffer::new();
        fb.draw_line(10, 10, 10, 10, true);

        let mut expected = [0u8; LCD_FRAME_SIZE];
        expected[10 + 84] = 0x04;
        assert_eq!(fb.data(), &expected[..]);
    }

    #[test]
    fn test_shallow_line_pixels() {
        let mut fb = Framebuffer::new();
        fb.draw_line(0, 0, 4, 2, true);

        let mut expected = [0u8; LCD_FRAME_SIZE];
        expected[..5].copy_from_slice(&[0x01, 0x01, 0x02, 0x02, 0x04]);
        assert_eq!(fb.data(), &expected[..]);
    }

    #[test]
    fn test_vertical_line_fills_bank() {
        let mut fb = Framebuffer::new();
        fb.draw_line(3, 7, 3, 0, true);
        assert_eq!(fb.data()[3], 0xFF);
        assert_eq!(fb.data().iter().filter(|&&b| b != 0).count(), 1);
    }

    #[test]
    fn test_line_clear() {
        let mut fb = Framebuffer::new();
        fb.fill(0xFF);
        fb.draw_line(0, 8, 83, 8, false);
        assert!(fb.data()[84..168].iter().all(|&b| b == 0xFE));
        assert!(fb.data()[..84].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_line_partially_off_screen() {
        let mut fb = Framebuffer::new();
        fb.draw_line(-5, 0, 2, 0, true);
        assert_eq!(&fb.data()[..4], &[0x01, 0x01, 0x01, 0x00]);
    }

    #[test]
    fn test_fast_hline_skips_off_screen_rows() {
        let mut fb = Framebuffer::new();
        fb.fast_hline(0, -1, 84, true);
        fb.fast_hline(0, 48, 84, true);
        fb.fast_hline(0, 0, 0, true);
        fb.fast_hline(0, 0, -3, true);
        assert_eq!(fb, Framebuffer::new());
    }

    #[test]
    fn test_fast_hline_clips_columns() {
        let mut fb = Framebuffer::new();
        fb.fast_hline(80, 1, 10, true);
        fb.fast_hline(-2, 1, 4, true);
        let row: Vec<u8> = fb.data()[..84].to_vec();
        assert_eq!(&row[..2], &[0x02, 0x02]);
        assert_eq!(row[2], 0x00);
        assert_eq!(&row[80..], &[0x02, 0x02, 0x02, 0x02]);
    }

    proptest! {
        #[test]
        fn prop_line_includes_endpoints(
            x1 in 0u8..LCD_WIDTH, y1 in 0u8..LCD_HEIGHT,
            x2 in 0u8..LCD_WIDTH, y2 in 0u8..LCD_HEIGHT,
        ) {
            let mut fb = Framebuffer::new();
            fb.draw_line(x1.into(), y1.into(), x2.into(), y2.into(), true);
            prop_assert!(bit(&fb, x1, y1));
            prop_assert!(bit(&fb, x2, y2));
        }
    }

    proptest! {
        #[test]
        fn prop_degenerate_line_is_one_pixel(x in 0u8..LCD_WIDTH, y in 0u8..LCD_HEIGHT) {
            let mut line = Framebuffer::new();
            line.draw_line(x.into(), y.into(), x.into(), y.into(), true);
            let mut pixel = Framebuffer::new();
            pixel.set_pixel(x, y, true);
            prop_assert_eq!(line, pixel);
        }
    }
}
