//! Test doubles for the driver tests: a simulated MCP4251 behind the
//! `SpiBus` trait, a bus that always fails, and a chip-select pin that
//! records its transitions.

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, ErrorKind, SpiBus};

use crate::registers::DATA_MASK;

/// Chip-select pin that records assert/release transitions.
pub struct RecordingPin {
    high: bool,
    asserts: u32,
    releases: u32,
}

impl RecordingPin {
    pub fn new() -> Self {
        // Idle deselected, matching an active-low select line.
        Self {
            high: true,
            asserts: 0,
            releases: 0,
        }
    }

    pub fn asserts(&self) -> u32 {
        self.asserts
    }

    pub fn releases(&self) -> u32 {
        self.releases
    }

    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl digital::ErrorType for RecordingPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.high {
            self.asserts += 1;
        }
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high {
            self.releases += 1;
        }
        self.high = true;
        Ok(())
    }
}

/// Bus whose every operation fails with a link error.
pub struct FailingBus;

impl spi::ErrorType for FailingBus {
    type Error = ErrorKind;
}

impl SpiBus<u8> for FailingBus {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

/// Simulated MCP4251 register file behind the `SpiBus` trait.
///
/// Decodes one command per `transfer` call: a 1-byte frame is a wiper
/// increment/decrement, a 2-byte frame a register read/write. Writes store
/// the 9-bit payload verbatim; increments clamp at full scale, decrements at
/// zero. With `nack` set the chip answers every command with the
/// acknowledgement bit clear while still echoing payload bits, which is how
/// the real chip behaves under command error conditions.
pub struct SimChip {
    /// Register file indexed by address nibble: wiper0, wiper1, tcon, status.
    regs: [u16; 4],
    pub nack: bool,
}

const FULL_SCALE: u16 = 0x100;

impl SimChip {
    pub fn new() -> Self {
        // TCON power-on default: all terminals connected, both pots started.
        Self {
            regs: [0, 0, 0xFF, 0],
            nack: false,
        }
    }

    pub fn reg(&self, address_nibble: u8) -> u16 {
        self.regs[Self::index(address_nibble)]
    }

    pub fn set_reg(&mut self, address_nibble: u8, value: u16) {
        self.regs[Self::index(address_nibble)] = value;
    }

    fn index(address_nibble: u8) -> usize {
        match address_nibble {
            0x0 => 0,
            0x1 => 1,
            0x4 => 2,
            0x5 => 3,
            _ => panic!("unmapped register address nibble {address_nibble:#x}"),
        }
    }

    fn short_command(&mut self, command: u8) -> u8 {
        let idx = Self::index(command >> 4);
        match (command >> 2) & 0b11 {
            0b01 => self.regs[idx] = (self.regs[idx] + 1).min(FULL_SCALE),
            0b10 => self.regs[idx] = self.regs[idx].saturating_sub(1),
            _ => return 0,
        }
        if self.nack {
            0
        } else {
            0b0000_0010
        }
    }

    fn long_command(&mut self, frame: [u8; 2]) -> u16 {
        let idx = Self::index(frame[0] >> 4);
        let ack = if self.nack { 0 } else { 1 << 9 };
        match (frame[0] >> 2) & 0b11 {
            0b00 => {
                let payload = u16::from(frame[0] & 0b11) << 8 | u16::from(frame[1]);
                self.regs[idx] = payload & DATA_MASK;
                ack
            }
            0b11 => ack | (self.regs[idx] & DATA_MASK),
            _ => 0,
        }
    }
}

impl spi::ErrorType for SimChip {
    type Error = ErrorKind;
}

impl SpiBus<u8> for SimChip {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        let mut sink = [0u8; 2];
        self.transfer(&mut sink[..words.len()], words)
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        match *write {
            [command] => read[0] = self.short_command(command),
            [msb, lsb] => {
                let response = self.long_command([msb, lsb]);
                read.copy_from_slice(&response.to_be_bytes());
            }
            _ => return Err(ErrorKind::Other),
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let mut tx = [0u8; 2];
        let tx = &mut tx[..words.len()];
        tx.copy_from_slice(words);
        self.transfer(words, tx)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
