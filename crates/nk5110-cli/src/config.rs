//! Scene files.
//!
//! A scene is a TOML document with optional controller settings and an
//! ordered list of drawing operations.

use anyhow::{Context, Result};
use nk5110_hw::{ControllerConfig, DisplayMode, Framebuffer};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete scene description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    /// Controller configuration
    #[serde(default)]
    pub lcd: LcdConfig,

    /// Drawing operations, applied in order
    #[serde(default)]
    pub ops: Vec<DrawOp>,
}

/// Controller settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LcdConfig {
    /// Operating voltage (0-127)
    #[serde(default = "default_contrast")]
    pub contrast: u8,

    /// Bias system (0-7)
    #[serde(default = "default_bias")]
    pub bias: u8,

    /// Temperature coefficient (0-3)
    #[serde(default)]
    pub temp_coeff: u8,

    /// Display mode: blank, normal, all-on, inverse
    #[serde(default = "default_mode")]
    pub mode: String,
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self {
            contrast: default_contrast(),
            bias: default_bias(),
            temp_coeff: 0,
            mode: default_mode(),
        }
    }
}

/// One drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum DrawOp {
    Fill {
        pattern: u8,
    },
    Pixel {
        x: u8,
        y: u8,
        #[serde(default = "default_set")]
        set: bool,
    },
    Line {
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        #[serde(default = "default_set")]
        set: bool,
    },
    Rect {
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        #[serde(default = "default_set")]
        set: bool,
    },
    Frect {
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        #[serde(default = "default_set")]
        set: bool,
    },
    Rrect {
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        r: i16,
        #[serde(default = "default_set")]
        set: bool,
    },
    Rfrect {
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        r: i16,
        #[serde(default = "default_set")]
        set: bool,
    },
    Char {
        x: u8,
        y: u8,
        c: char,
        #[serde(default = "default_set")]
        set: bool,
    },
    Str {
        x: u8,
        y: u8,
        text: String,
        #[serde(default = "default_set")]
        set: bool,
    },
    Bitmap {
        x: u8,
        y: u8,
        w: u8,
        h: u8,
        data: Vec<u8>,
        #[serde(default = "default_set")]
        set: bool,
    },
}

// Default value functions
fn default_contrast() -> u8 {
    0x3F
}

fn default_bias() -> u8 {
    3
}

fn default_mode() -> String {
    "normal".to_string()
}

fn default_set() -> bool {
    true
}

impl LcdConfig {
    /// Converts to the driver's controller settings.
    pub fn controller_config(&self) -> Result<ControllerConfig> {
        let mode: DisplayMode = self.mode.parse()?;
        let config = ControllerConfig {
            contrast: self.contrast,
            bias: self.bias,
            temp_coeff: self.temp_coeff,
            mode,
        };
        config.validate()?;
        Ok(config)
    }
}

impl DrawOp {
    /// Applies this operation to a framebuffer.
    pub fn apply(&self, fb: &mut Framebuffer) {
        match *self {
            DrawOp::Fill { pattern } => fb.fill(pattern),
            DrawOp::Pixel { x, y, set } => fb.set_pixel(x, y, set),
            DrawOp::Line { x1, y1, x2, y2, set } => fb.draw_line(x1, y1, x2, y2, set),
            DrawOp::Rect { x, y, w, h, set } => fb.draw_rect(x, y, w, h, set),
            DrawOp::Frect { x, y, w, h, set } => fb.draw_frect(x, y, w, h, set),
            DrawOp::Rrect { x, y, w, h, r, set } => fb.draw_rrect(x, y, w, h, r, set),
            DrawOp::Rfrect { x, y, w, h, r, set } => fb.draw_rfrect(x, y, w, h, r, set),
            // Anything outside ASCII falls back to the blank glyph.
            DrawOp::Char { x, y, c, set } => {
                fb.draw_char(x, y, u8::try_from(c).unwrap_or(0), set)
            }
            DrawOp::Str {
                x,
                y,
                ref text,
                set,
            } => fb.draw_str(x, y, text, set),
            DrawOp::Bitmap {
                x,
                y,
                w,
                h,
                ref data,
                set,
            } => fb.draw_bitmap(x, y, w, h, data, set),
        }
    }
}

impl Scene {
    /// Loads a scene from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read scene file")?;
        Self::parse(&content)
    }

    /// Parses a scene from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse scene")
    }

    /// Draws every operation into `fb`, in order.
    pub fn draw(&self, fb: &mut Framebuffer) {
        for op in &self.ops {
            op.apply(fb);
        }
    }
}
