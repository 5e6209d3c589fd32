//! LCD driver context: framebuffer plus transport.

use crate::transport::Transport;
use crate::{Error, Result, LCD_FRAME_SIZE};
use tracing::{debug, info, warn};

use super::framebuffer::Framebuffer;
use super::protocol::{
    address_reset, contrast_sequence, init_sequence, ControllerConfig, DisplayMode,
};

/// PCD8544 display controller.
///
/// Drawing happens on the owned [`Framebuffer`]; nothing reaches the panel
/// until [`Nk5110::flush`] is called.
pub struct Nk5110<T> {
    transport: T,
    framebuffer: Framebuffer,
    config: ControllerConfig,
}

impl<T: Transport> Nk5110<T> {
    /// Creates a driver with the default controller settings.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ControllerConfig::default())
    }

    /// Creates a driver with explicit controller settings.
    pub fn with_config(transport: T, config: ControllerConfig) -> Self {
        Self {
            transport,
            framebuffer: Framebuffer::new(),
            config,
        }
    }

    /// Resets and configures the controller, then blanks the panel.
    ///
    /// Any failure here leaves the panel unusable and is reported as
    /// [`Error::HardwareInit`].
    pub fn init(&mut self) -> Result<()> {
        self.bring_up().map_err(|e| {
            warn!("LCD initialization failed: {}", e);
            Error::HardwareInit(Box::new(e))
        })?;
        info!(
            "PCD8544 initialized (contrast 0x{:02X}, bias {}, mode {})",
            self.config.contrast, self.config.bias, self.config.mode
        );
        Ok(())
    }

    fn bring_up(&mut self) -> Result<()> {
        self.config.validate()?;
        self.transport.reset()?;
        for command in init_sequence(&self.config) {
            self.transport.send_command(command)?;
        }
        self.framebuffer.fill(0x00);
        self.flush()
    }

    /// Sends the whole framebuffer to display RAM.
    pub fn flush(&mut self) -> Result<()> {
        for command in address_reset() {
            self.transport.send_command(command)?;
        }
        self.transport.send_data(self.framebuffer.data())?;
        debug!("Flushed {} bytes", LCD_FRAME_SIZE);
        Ok(())
    }

    /// Switches between blank, normal, all-on and inverse display.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<()> {
        self.transport.send_command(mode.command())?;
        self.config.mode = mode;
        debug!("Set display mode to {}", mode);
        Ok(())
    }

    /// Changes the operating voltage (contrast), 0-127.
    pub fn set_contrast(&mut self, contrast: u8) -> Result<()> {
        if contrast > 0x7F {
            return Err(Error::InvalidConfig(format!(
                "contrast must be 0-127, got {}",
                contrast
            )));
        }
        for command in contrast_sequence(contrast) {
            self.transport.send_command(command)?;
        }
        self.config.contrast = contrast;
        debug!("Set contrast to 0x{:02X}", contrast);
        Ok(())
    }

    /// Returns the current controller settings.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Returns the framebuffer.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Returns the framebuffer for drawing.
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consumes the driver and returns the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{BusEvent, MemoryTransport};

    struct FailingReset;

    impl Transport for FailingReset {
        fn send_command(&mut self, _command: u8) -> Result<()> {
            Ok(())
        }

        fn send_data(&mut self, _data: &[u8]) -> Result<()> {
            Ok(())
        }

        fn reset(&mut self) -> Result<()> {
            Err(Error::Bus("RST pin: stuck".to_string()))
        }
    }

    #[test]
    fn test_flush_after_fill() {
        let mut lcd = Nk5110::new(MemoryTransport::new());
        lcd.framebuffer_mut().fill(0xFF);
        lcd.flush().unwrap();

        let events = lcd.transport().events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], BusEvent::Command(0x80));
        assert_eq!(events[1], BusEvent::Command(0x40));
        assert_eq!(events[2], BusEvent::Data(vec![0xFF; 504]));
    }

    #[test]
    fn test_init_sequence_and_blank_frame() {
        let mut lcd = Nk5110::new(MemoryTransport::new());
        lcd.framebuffer_mut().fill(0x55);
        lcd.init().unwrap();

        let t = lcd.transport();
        assert_eq!(t.events()[0], BusEvent::Reset);
        assert_eq!(
            t.commands(),
            vec![0x21, 0x13, 0xBF, 0x04, 0x20, 0x0C, 0x80, 0x40]
        );
        assert_eq!(t.data_bytes(), vec![0x00; 504]);
        assert_eq!(t.display_mode(), Some(DisplayMode::Normal));
    }

    #[test]
    fn test_init_failure_is_hardware_init() {
        let mut lcd = Nk5110::new(FailingReset);
        let err = lcd.init().unwrap_err();
        match err {
            Error::HardwareInit(inner) => assert!(matches!(*inner, Error::Bus(_))),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_init_rejects_bad_config() {
        let config = ControllerConfig {
            bias: 9,
            ..Default::default()
        };
        let mut lcd = Nk5110::with_config(MemoryTransport::new(), config);
        assert!(matches!(lcd.init(), Err(Error::HardwareInit(_))));
        assert!(lcd.transport().events().is_empty());
    }

    #[test]
    fn test_runtime_settings() {
        let mut lcd = Nk5110::new(MemoryTransport::new());
        lcd.set_display_mode(DisplayMode::Inverse).unwrap();
        lcd.set_contrast(0x30).unwrap();
        assert!(lcd.set_contrast(0x90).is_err());

        assert_eq!(lcd.transport().commands(), vec![0x0D, 0x21, 0xB0, 0x20]);
        assert_eq!(lcd.config().mode, DisplayMode::Inverse);
        assert_eq!(lcd.config().contrast, 0x30);
    }

    #[test]
    fn test_flush_through_borrowed_transport() {
        let mut transport = MemoryTransport::new();
        {
            let mut lcd = Nk5110::new(&mut transport);
            lcd.framebuffer_mut().set_pixel(0, 0, true);
            lcd.flush().unwrap();
        }
        assert_eq!(transport.display_ram()[0], 0x01);
    }
}
