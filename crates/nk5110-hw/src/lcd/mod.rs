//! LCD display module.
//!
//! Provides the 84x48 monochrome framebuffer, its drawing primitives and the
//! PCD8544 command set used to push it to the panel.

mod bitmap;
mod device;
mod raster;
mod shapes;
mod text;

pub mod font;
pub mod framebuffer;
pub mod protocol;

pub use device::Nk5110;
pub use framebuffer::Framebuffer;
pub use protocol::{ControllerConfig, DisplayMode};
pub use shapes::Corner;
pub use text::{str_width, CHAR_ADVANCE};
