//! Page-addressed 1bpp framebuffer for the 84x48 display.
//!
//! Memory layout mirrors PCD8544 display RAM: six banks of 84 bytes. Each byte
//! holds eight vertically stacked pixels of one column, LSB at the top.

use crate::{LCD_FRAME_SIZE, LCD_HEIGHT, LCD_WIDTH};

/// Monochrome framebuffer for the 84x48 display.
///
/// The buffer is write-only from the outside: there is no pixel read-back,
/// only the packed bytes handed to the transport.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    data: [u8; LCD_FRAME_SIZE],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &LCD_WIDTH)
            .field("height", &LCD_HEIGHT)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Framebuffer {
    /// Creates a new framebuffer with every pixel off.
    pub fn new() -> Self {
        Self {
            data: [0; LCD_FRAME_SIZE],
        }
    }

    /// Returns the width of the framebuffer.
    pub fn width(&self) -> u8 {
        LCD_WIDTH
    }

    /// Returns the height of the framebuffer.
    pub fn height(&self) -> u8 {
        LCD_HEIGHT
    }

    /// Returns the packed display RAM image in transmission order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Overwrites every byte with `pattern` (0x00 clears, 0xFF sets all).
    pub fn fill(&mut self, pattern: u8) {
        self.data.fill(pattern);
    }

    /// Sets (`set == true`) or clears a single pixel.
    ///
    /// Coordinates outside the display are ignored.
    pub fn set_pixel(&mut self, x: u8, y: u8, set: bool) {
        self.plot(i32::from(x), i32::from(y), set);
    }

    /// Clipping pixel write shared by every primitive.
    ///
    /// Takes widened coordinates so shape math can go negative or past the
    /// right edge without wrapping back onto the screen.
    pub(crate) fn plot(&mut self, x: i32, y: i32, set: bool) {
        if x < 0 || y < 0 || x >= i32::from(LCD_WIDTH) || y >= i32::from(LCD_HEIGHT) {
            return;
        }
        let idx = x as usize + (y as usize / 8) * LCD_WIDTH as usize;
        let mask = 1u8 << (y % 8);
        if set {
            self.data[idx] |= mask;
        } else {
            self.data[idx] &= !mask;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_is_blank() {
        let fb = Framebuffer::new();
        assert_eq!(fb.data().len(), 504);
        assert!(fb.data().iter().all(|&b| b == 0));
        assert_eq!(fb.width(), 84);
        assert_eq!(fb.height(), 48);
    }

    #[test]
    fn test_fill() {
        let mut fb = Framebuffer::new();
        fb.fill(0xFF);
        assert!(fb.data().iter().all(|&b| b == 0xFF));
        fb.fill(0xA5);
        assert!(fb.data().iter().all(|&b| b == 0xA5));
        fb.fill(0x00);
        assert_eq!(fb, Framebuffer::new());
    }

    #[test]
    fn test_set_pixel_layout() {
        let mut fb = Framebuffer::new();
        fb.set_pixel(0, 0, true);
        fb.set_pixel(5, 7, true);
        fb.set_pixel(5, 8, true);
        fb.set_pixel(83, 47, true);

        let mut expected = [0u8; LCD_FRAME_SIZE];
        expected[0] = 0x01;
        expected[5] = 0x80;
        expected[5 + 84] = 0x01;
        expected[83 + 5 * 84] = 0x80;
        assert_eq!(fb.data(), &expected[..]);
    }

    #[test]
    fn test_clear_pixel() {
        let mut fb = Framebuffer::new();
        fb.fill(0xFF);
        fb.set_pixel(10, 19, false);
        assert_eq!(fb.data()[10 + 2 * 84], 0xF7);
        assert_eq!(fb.data()[11 + 2 * 84], 0xFF);
    }

    #[test]
    fn test_plot_negative_is_clipped() {
        let mut fb = Framebuffer::new();
        fb.plot(-1, 0, true);
        fb.plot(0, -1, true);
        fb.plot(-300, -300, true);
        fb.plot(256 + 3, 3, true);
        assert_eq!(fb, Framebuffer::new());
    }

    #[test]
    fn test_debug_omits_bytes() {
        let dbg = format!("{:?}", Framebuffer::new());
        assert!(dbg.contains("width: 84"));
        assert!(dbg.contains("bytes: 504"));
    }

    proptest! {
        #[test]
        fn prop_out_of_range_is_noop(
            x in any::<u8>(),
            y in any::<u8>(),
            pattern in any::<u8>(),
            set in any::<bool>(),
        ) {
            prop_assume!(x >= LCD_WIDTH || y >= LCD_HEIGHT);
            let mut fb = Framebuffer::new();
            fb.fill(pattern);
            let before = fb.clone();
            fb.set_pixel(x, y, set);
            prop_assert_eq!(fb, before);
        }
    }

    proptest! {
        #[test]
        fn prop_set_pixels_pack_exactly(
            points in proptest::collection::vec((0u8..LCD_WIDTH, 0u8..LCD_HEIGHT), 0..64),
        ) {
            let mut fb = Framebuffer::new();
            let mut expected = [0u8; LCD_FRAME_SIZE];
            for &(x, y) in &points {
                fb.set_pixel(x, y, true);
                expected[x as usize + (y as usize / 8) * 84] |= 1 << (y % 8);
            }
            prop_assert_eq!(fb.data(), &expected[..]);
        }
    }
}
