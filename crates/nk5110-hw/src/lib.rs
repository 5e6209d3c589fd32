//! NK5110 Hardware Library
//!
//! Framebuffer graphics and transport for PCD8544-based LCD modules
//! (Nokia 5110/3310 and compatible 84x48 breakout boards).

pub mod error;
pub mod lcd;
pub mod transport;

pub use error::{Error, Result};
pub use lcd::{ControllerConfig, Corner, DisplayMode, Framebuffer, Nk5110};
pub use transport::{BusEvent, MemoryTransport, SpiTransport, Transport};

/// LCD display dimensions
pub const LCD_WIDTH: u8 = 84;
pub const LCD_HEIGHT: u8 = 48;

/// Number of 8-pixel-tall banks (pages) in display RAM.
pub const LCD_BANKS: u8 = LCD_HEIGHT / 8;

/// Size of display RAM in bytes (84 * 6).
pub const LCD_FRAME_SIZE: usize = LCD_WIDTH as usize * LCD_BANKS as usize;
