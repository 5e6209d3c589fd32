//! PCD8544 instruction set and encoding.
//!
//! Protocol structure:
//! - Every byte clocked with D/C low is an instruction, D/C high is display RAM data
//! - Instructions are split into a basic set (H = 0) and an extended set (H = 1),
//!   selected with the function-set instruction
//! - Display RAM is 6 banks x 84 columns; the X address auto-increments and
//!   wraps into the next bank, so a full frame is one contiguous write

use crate::{Error, Result};
use std::str::FromStr;

/// Function set: power on, horizontal addressing, basic instruction set.
pub const FUNCTION_SET: u8 = 0x20;

/// Function-set flag selecting the extended instruction set.
pub const EXTENDED_INSTRUCTIONS: u8 = 0x01;

/// Display control (basic set). Combined with a [`DisplayMode`].
pub const DISPLAY_CONTROL: u8 = 0x08;

/// Set Y address (bank 0-5), basic set.
pub const SET_Y_ADDRESS: u8 = 0x40;

/// Set X address (column 0-83), basic set.
pub const SET_X_ADDRESS: u8 = 0x80;

/// Temperature coefficient (0-3), extended set.
pub const TEMP_COEFF: u8 = 0x04;

/// Bias system (0-7), extended set.
pub const BIAS: u8 = 0x10;

/// Operating voltage / contrast (0-127), extended set.
pub const SET_VOP: u8 = 0x80;

/// Display control modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum DisplayMode {
    /// All segments off.
    Blank = 0x08,
    /// Display RAM shown as-is.
    #[default]
    Normal = 0x0C,
    /// All segments on.
    AllOn = 0x09,
    /// Display RAM shown inverted.
    Inverse = 0x0D,
}

impl DisplayMode {
    /// Returns the display-control instruction byte.
    pub fn command(&self) -> u8 {
        *self as u8
    }
}

impl FromStr for DisplayMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "blank" => Ok(DisplayMode::Blank),
            "normal" => Ok(DisplayMode::Normal),
            "all-on" | "all_on" => Ok(DisplayMode::AllOn),
            "inverse" | "inverted" => Ok(DisplayMode::Inverse),
            _ => Err(Error::InvalidDisplayMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayMode::Blank => write!(f, "blank"),
            DisplayMode::Normal => write!(f, "normal"),
            DisplayMode::AllOn => write!(f, "all-on"),
            DisplayMode::Inverse => write!(f, "inverse"),
        }
    }
}

/// Power-on controller settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Operating voltage (contrast), 0-127.
    pub contrast: u8,
    /// Bias system, 0-7.
    pub bias: u8,
    /// Temperature coefficient, 0-3.
    pub temp_coeff: u8,
    /// Display mode selected at the end of initialization.
    pub mode: DisplayMode,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            contrast: 0x3F,
            bias: 0x03, // 1:48
            temp_coeff: 0x00,
            mode: DisplayMode::Normal,
        }
    }
}

impl ControllerConfig {
    /// Checks every field against the controller's register widths.
    pub fn validate(&self) -> Result<()> {
        if self.contrast > 0x7F {
            return Err(Error::InvalidConfig(format!(
                "contrast must be 0-127, got {}",
                self.contrast
            )));
        }
        if self.bias > 0x07 {
            return Err(Error::InvalidConfig(format!(
                "bias must be 0-7, got {}",
                self.bias
            )));
        }
        if self.temp_coeff > 0x03 {
            return Err(Error::InvalidConfig(format!(
                "temperature coefficient must be 0-3, got {}",
                self.temp_coeff
            )));
        }
        Ok(())
    }
}

/// Builds the power-on instruction sequence.
///
/// The defaults produce `21 13 BF 04 20 0C`.
pub fn init_sequence(config: &ControllerConfig) -> [u8; 6] {
    [
        FUNCTION_SET | EXTENDED_INSTRUCTIONS,
        BIAS | config.bias,
        SET_VOP | config.contrast,
        TEMP_COEFF | config.temp_coeff,
        FUNCTION_SET,
        config.mode.command(),
    ]
}

/// Builds the instructions that change contrast at runtime.
pub fn contrast_sequence(contrast: u8) -> [u8; 3] {
    [
        FUNCTION_SET | EXTENDED_INSTRUCTIONS,
        SET_VOP | (contrast & 0x7F),
        FUNCTION_SET,
    ]
}

/// Instructions moving the RAM write pointer to column 0, bank 0.
pub fn address_reset() -> [u8; 2] {
    [SET_X_ADDRESS, SET_Y_ADDRESS]
}
