//! In-memory transport that records bus traffic.
//!
//! Used by tests and by the preview tool. [`MemoryTransport::display_ram`]
//! replays the recorded traffic the way the controller would, which makes it
//! possible to see what the panel would show without any hardware.

use super::Transport;
use crate::lcd::protocol::{
    DisplayMode, EXTENDED_INSTRUCTIONS, FUNCTION_SET, SET_X_ADDRESS, SET_Y_ADDRESS,
};
use crate::{Result, LCD_BANKS, LCD_FRAME_SIZE, LCD_WIDTH};

/// One recorded bus transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    Reset,
    Command(u8),
    Data(Vec<u8>),
}

/// Transport that stores every transaction instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    events: Vec<BusEvent>,
}

impl MemoryTransport {
    /// Creates an empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded events in order.
    pub fn events(&self) -> &[BusEvent] {
        &self.events
    }

    /// Returns only the instruction bytes, in order.
    pub fn commands(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BusEvent::Command(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    /// Returns all data bytes concatenated, in order.
    pub fn data_bytes(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BusEvent::Data(d) => Some(d.as_slice()),
                _ => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    /// Forgets all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Replays the recorded traffic against an emulated controller and
    /// returns its display RAM.
    pub fn display_ram(&self) -> [u8; LCD_FRAME_SIZE] {
        self.replay().ram
    }

    /// Display mode most recently selected, if any.
    pub fn display_mode(&self) -> Option<DisplayMode> {
        self.replay().mode
    }

    fn replay(&self) -> Controller {
        let mut ctl = Controller::default();
        for event in &self.events {
            match event {
                BusEvent::Reset => ctl = Controller::default(),
                BusEvent::Command(c) => ctl.command(*c),
                BusEvent::Data(d) => ctl.write(d),
            }
        }
        ctl
    }
}

impl Transport for MemoryTransport {
    fn send_command(&mut self, command: u8) -> Result<()> {
        self.events.push(BusEvent::Command(command));
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<()> {
        if !data.is_empty() {
            self.events.push(BusEvent::Data(data.to_vec()));
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.events.push(BusEvent::Reset);
        Ok(())
    }
}

/// Minimal PCD8544 model: address pointer, instruction-set flag, RAM.
struct Controller {
    ram: [u8; LCD_FRAME_SIZE],
    x: usize,
    bank: usize,
    extended: bool,
    mode: Option<DisplayMode>,
}

impl Default for Controller {
    fn default() -> Self {
        Self {
            ram: [0; LCD_FRAME_SIZE],
            x: 0,
            bank: 0,
            extended: false,
            mode: None,
        }
    }
}

impl Controller {
    fn command(&mut self, c: u8) {
        if c & 0xF8 == FUNCTION_SET {
            self.extended = c & EXTENDED_INSTRUCTIONS != 0;
            return;
        }
        if self.extended {
            return;
        }
        if c & SET_X_ADDRESS != 0 {
            self.x = usize::from(c & 0x7F) % usize::from(LCD_WIDTH);
        } else if c & 0xF8 == SET_Y_ADDRESS {
            self.bank = usize::from(c & 0x07) % usize::from(LCD_BANKS);
        } else if c & 0xF8 == 0x08 {
            self.mode = match c & 0x0D {
                0x08 => Some(DisplayMode::Blank),
                0x09 => Some(DisplayMode::AllOn),
                0x0C => Some(DisplayMode::Normal),
                0x0D => Some(DisplayMode::Inverse),
                _ => self.mode,
            };
        }
    }

    fn write(&mut self, data: &[u8]) {
        for &byte in data {
            self.ram[self.x + self.bank * usize::from(LCD_WIDTH)] = byte;
            self.x += 1;
            if self.x == usize::from(LCD_WIDTH) {
                self.x = 0;
                self.bank = (self.bank + 1) % usize::from(LCD_BANKS);
            }
        }
    }
}
