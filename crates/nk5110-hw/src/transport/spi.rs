//! SPI transport built on `embedded-hal` traits.

use super::Transport;
use crate::{Error, Result};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use std::fmt::Debug;
use tracing::trace;

/// How long the reset line is held in each state.
const RESET_HOLD_MS: u32 = 100;

/// PCD8544 link over an SPI device plus D/C and RST lines.
///
/// Chip select is owned by the [`SpiDevice`] implementation and asserted for
/// each write.
pub struct SpiTransport<SPI, DC, RST, D> {
    spi: SPI,
    dc: DC,
    rst: RST,
    delay: D,
}

impl<SPI, DC, RST, D> SpiTransport<SPI, DC, RST, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    /// Creates a transport from an SPI device, the D/C and RST pins, and a delay source.
    pub fn new(spi: SPI, dc: DC, rst: RST, delay: D) -> Self {
        Self {
            spi,
            dc,
            rst,
            delay,
        }
    }

    /// Releases the underlying peripherals.
    pub fn release(self) -> (SPI, DC, RST, D) {
        (self.spi, self.dc, self.rst, self.delay)
    }
}

fn bus_error<E: Debug>(what: &'static str) -> impl FnOnce(E) -> Error {
    move |e| Error::Bus(format!("{}: {:?}", what, e))
}

impl<SPI, DC, RST, D> Transport for SpiTransport<SPI, DC, RST, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    fn send_command(&mut self, command: u8) -> Result<()> {
        self.dc.set_low().map_err(bus_error("D/C pin"))?;
        self.spi.write(&[command]).map_err(bus_error("SPI write"))?;
        trace!("Command 0x{:02X}", command);
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        self.dc.set_high().map_err(bus_error("D/C pin"))?;
        self.spi.write(data).map_err(bus_error("SPI write"))?;
        trace!("Data {} bytes", data.len());
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.rst.set_low().map_err(bus_error("RST pin"))?;
        self.delay.delay_ms(RESET_HOLD_MS);
        self.rst.set_high().map_err(bus_error("RST pin"))?;
        self.delay.delay_ms(RESET_HOLD_MS);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::spi::{ErrorKind, Operation};
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Wire {
        Pin(&'static str, bool),
        Write(Vec<u8>),
        DelayMs(u32),
    }

    type Log = Rc<RefCell<Vec<Wire>>>;

    struct FakeSpi(Log);

    impl embedded_hal::spi::ErrorType for FakeSpi {
        type Error = Infallible;
    }

    impl SpiDevice for FakeSpi {
        fn transaction(
            &mut self,
            operations: &mut [Operation<'_, u8>],
        ) -> std::result::Result<(), Infallible> {
            for op in operations {
                if let Operation::Write(buf) = op {
                    self.0.borrow_mut().push(Wire::Write(buf.to_vec()));
                }
            }
            Ok(())
        }
    }

    struct BrokenSpi;

    impl embedded_hal::spi::ErrorType for BrokenSpi {
        type Error = ErrorKind;
    }

    impl SpiDevice for BrokenSpi {
        fn transaction(
            &mut self,
            _operations: &mut [Operation<'_, u8>],
        ) -> std::result::Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }
    }

    struct FakePin(&'static str, Log);

    impl embedded_hal::digital::ErrorType for FakePin {
        type Error = Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> std::result::Result<(), Infallible> {
            self.1.borrow_mut().push(Wire::Pin(self.0, false));
            Ok(())
        }

        fn set_high(&mut self) -> std::result::Result<(), Infallible> {
            self.1.borrow_mut().push(Wire::Pin(self.0, true));
            Ok(())
        }
    }

    struct FakeDelay(Log);

    impl DelayNs for FakeDelay {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.0.borrow_mut().push(Wire::DelayMs(ms));
        }
    }

    fn transport(log: &Log) -> SpiTransport<FakeSpi, FakePin, FakePin, FakeDelay> {
        SpiTransport::new(
            FakeSpi(log.clone()),
            FakePin("dc", log.clone()),
            FakePin("rst", log.clone()),
            FakeDelay(log.clone()),
        )
    }

    #[test]
    fn test_command_drives_dc_low() {
        let log = Log::default();
        let mut t = transport(&log);
        t.send_command(0x21).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![Wire::Pin("dc", false), Wire::Write(vec![0x21])]
        );
    }

    #[test]
    fn test_data_drives_dc_high() {
        let log = Log::default();
        let mut t = transport(&log);
        t.send_data(&[1, 2, 3]).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![Wire::Pin("dc", true), Wire::Write(vec![1, 2, 3])]
        );
    }

    #[test]
    fn test_empty_data_is_skipped() {
        let log = Log::default();
        let mut t = transport(&log);
        t.send_data(&[]).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_reset_pulse() {
        let log = Log::default();
        let mut t = transport(&log);
        t.reset().unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                Wire::Pin("rst", false),
                Wire::DelayMs(100),
                Wire::Pin("rst", true),
                Wire::DelayMs(100),
            ]
        );
    }

    #[test]
    fn test_spi_failure_maps_to_bus_error() {
        let log = Log::default();
        let mut t = SpiTransport::new(
            BrokenSpi,
            FakePin("dc", log.clone()),
            FakePin("rst", log.clone()),
            FakeDelay(log.clone()),
        );
        let err = t.send_command(0x20).unwrap_err();
        assert!(matches!(err, Error::Bus(ref msg) if msg.starts_with("SPI write")));
    }

    #[test]
    fn test_release() {
        let log = Log::default();
        let (_spi, dc, rst, _delay) = transport(&log).release();
        assert_eq!(dc.0, "dc");
        assert_eq!(rst.0, "rst");
    }
}
