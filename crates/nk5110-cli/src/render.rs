//! Turns emulated display RAM into something a human can look at.

use anyhow::Result;
use nk5110_hw::lcd::font::{FIRST_CHAR, GLYPHS, GLYPH_HEIGHT};
use nk5110_hw::{DisplayMode, LCD_HEIGHT, LCD_WIDTH};

/// Pixel colour for a lit segment (RGB).
const INK: [u8; 3] = [0x1E, 0x24, 0x1A];

/// Pixel colour for an unlit segment (RGB), roughly a green backlight.
const PAPER: [u8; 3] = [0x9C, 0xB8, 0x84];

/// Whether the segment at `(x, y)` is dark, given display RAM and mode.
pub fn is_lit(ram: &[u8], mode: DisplayMode, x: u8, y: u8) -> bool {
    let bit = ram[x as usize + (y as usize / 8) * LCD_WIDTH as usize] & (1 << (y % 8)) != 0;
    match mode {
        DisplayMode::Blank => false,
        DisplayMode::AllOn => true,
        DisplayMode::Normal => bit,
        DisplayMode::Inverse => !bit,
    }
}

/// Renders the panel as text, one character per pixel.
pub fn to_ascii(ram: &[u8], mode: DisplayMode) -> String {
    let mut out = String::with_capacity((LCD_WIDTH as usize + 1) * LCD_HEIGHT as usize);
    for y in 0..LCD_HEIGHT {
        for x in 0..LCD_WIDTH {
            out.push(if is_lit(ram, mode, x, y) { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}

/// Renders the panel as a PNG with each pixel scaled to `scale` x `scale`.
pub fn to_png(ram: &[u8], mode: DisplayMode, scale: u32) -> Result<Vec<u8>> {
    let scale = scale.max(1);
    let width = u32::from(LCD_WIDTH) * scale;
    let height = u32::from(LCD_HEIGHT) * scale;

    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    for py in 0..height {
        for px in 0..width {
            let lit = is_lit(ram, mode, (px / scale) as u8, (py / scale) as u8);
            rgb.extend_from_slice(if lit { &INK } else { &PAPER });
        }
    }

    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&rgb)?;
    }

    Ok(png_data)
}

/// Renders the whole font table as text, `per_row` glyphs to a line.
pub fn glyph_sheet(per_row: usize) -> String {
    let mut out = String::new();
    for (chunk_idx, chunk) in GLYPHS.chunks(per_row.max(1)).enumerate() {
        let first = FIRST_CHAR as usize + chunk_idx * per_row.max(1);
        for (i, _) in chunk.iter().enumerate() {
            let code = (first + i) as u8;
            out.push_str(&format!("{:<6}", code as char));
        }
        out.push('\n');
        for row in 0..GLYPH_HEIGHT {
            for glyph in chunk {
                for &column in glyph {
                    out.push(if column & (1 << row) != 0 { '#' } else { '.' });
                }
                out.push(' ');
            }
            out.push('\n');
        }
        out.push('\n');
    }
    out
}
