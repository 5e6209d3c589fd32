//! Bus transports.
//!
//! The controller only needs three things from the host: a way to clock an
//! instruction byte, a way to clock display RAM bytes, and a reset pulse.

mod memory;
mod spi;

pub use memory::{BusEvent, MemoryTransport};
pub use spi::SpiTransport;

use crate::Result;

/// Byte-level link to a PCD8544 controller.
pub trait Transport {
    /// Sends one instruction byte (D/C low).
    fn send_command(&mut self, command: u8) -> Result<()>;

    /// Sends display RAM bytes (D/C high). An empty slice sends nothing.
    fn send_data(&mut self, data: &[u8]) -> Result<()>;

    /// Pulses the hardware reset line.
    fn reset(&mut self) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send_command(&mut self, command: u8) -> Result<()> {
        (**self).send_command(command)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<()> {
        (**self).send_data(data)
    }

    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }
}
