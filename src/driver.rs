//! Low-level MCP4251 command driver.
//!
//! Frames the two SPI command shapes the chip understands — short commands
//! (one byte out, one byte in: wiper increment/decrement) and long commands
//! (two bytes out, two bytes in: register read/write) — and decodes the two
//! response framings. Chip-select is asserted for exactly one command and
//! released on every exit path, including transport failure.
//!
//! This module is crate-private — consumers interact with [`Mcp4251`]
//! in `digipot.rs` instead.
//!
//! [`Mcp4251`]: crate::Mcp4251

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::registers::{command_byte, Command, Register, DATA_MASK, DUMMY_DATA};

// ---------------------------------------------------------------------------
// Chip-select guard
// ---------------------------------------------------------------------------

/// Scoped chip-select assertion.
///
/// Drives the pin low on construction and back high on drop, so the select
/// line is released on every exit path out of a transaction, early `?`
/// returns included. Pin errors during release cannot be reported from
/// `Drop` and are discarded; a select line that cannot be driven makes the
/// following exchange fail on its own.
struct SelectGuard<'a, CS: OutputPin> {
    cs: &'a mut CS,
}

impl<'a, CS: OutputPin> SelectGuard<'a, CS> {
    fn assert(cs: &'a mut CS) -> Self {
        let _ = cs.set_low();
        Self { cs }
    }
}

impl<CS: OutputPin> Drop for SelectGuard<'_, CS> {
    fn drop(&mut self) {
        let _ = self.cs.set_high();
    }
}

// ---------------------------------------------------------------------------
// Response framings
// ---------------------------------------------------------------------------

/// One-byte response to a short (increment/decrement) command.
///
/// Bit 1 is the acknowledgement; every other bit is reserved and ignored.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub(crate) struct ShortResponse(u8);

impl ShortResponse {
    const ACK_BIT: u8 = 1;

    pub(crate) fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    pub(crate) fn success(self) -> bool {
        self.0 & (1 << Self::ACK_BIT) != 0
    }
}

/// Two-byte response to a long (read/write) command, concatenated with the
/// first byte received as the most significant byte.
///
/// Bit 9 is the acknowledgement; the low 9 bits are the register payload and
/// are only meaningful when the acknowledgement is set.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub(crate) struct LongResponse(u16);

impl LongResponse {
    const ACK_BIT: u16 = 9;

    pub(crate) fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub(crate) fn success(self) -> bool {
        self.0 & (1 << Self::ACK_BIT) != 0
    }

    pub(crate) fn data(self) -> u16 {
        self.0 & DATA_MASK
    }
}

// ---------------------------------------------------------------------------
// Command driver
// ---------------------------------------------------------------------------

/// Low-level command driver owning the SPI bus and the chip-select pin.
///
/// Every command is one chip-select bracket around one full-duplex exchange.
/// Transport failures and chip nacks both collapse into the absent-result
/// channel here; callers that need to tell them apart must instrument the
/// bus implementation.
pub(crate) struct CommandDriver<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> CommandDriver<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    pub(crate) fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    pub(crate) fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    /// One chip-select-bracketed full-duplex exchange.
    ///
    /// The bus is flushed before the guard drops so the final clock edges
    /// land while the chip is still selected.
    fn exchange(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<(), SPI::Error> {
        let _select = SelectGuard::assert(&mut self.cs);
        self.spi.transfer(rx, tx)?;
        self.spi.flush()
    }

    /// Send a one-byte command and report the chip's acknowledgement.
    fn short_command(&mut self, command: u8) -> bool {
        let mut response = [0u8; 1];
        if self.exchange(&[command], &mut response).is_err() {
            return false;
        }
        ShortResponse::from_raw(response[0]).success()
    }

    /// Send a two-byte command and return the 9-bit payload when the chip
    /// acknowledged, `None` on nack or transport failure.
    fn long_command(&mut self, frame: [u8; 2]) -> Option<u16> {
        let mut response = [0u8; 2];
        self.exchange(&frame, &mut response).ok()?;
        let decoded = LongResponse::from_raw(u16::from_be_bytes(response));
        if !decoded.success() {
            return None;
        }
        Some(decoded.data())
    }

    /// Read a register. The second byte of the frame is dummy filler; the
    /// chip returns the register value across both response bytes.
    pub(crate) fn read_register(&mut self, register: Register) -> Option<u16> {
        self.long_command([command_byte(Command::Read, register), DUMMY_DATA])
    }

    /// Write a 9-bit value to a register.
    ///
    /// The value is masked to 9 bits first; bit 8 of the payload rides in
    /// bit 0 of the command byte, the remaining 8 bits in the second byte.
    pub(crate) fn write_register(&mut self, register: Register, value: u16) -> bool {
        let value = value & DATA_MASK;
        let frame = [
            command_byte(Command::Write, register) | (value >> 8) as u8,
            value as u8,
        ];
        self.long_command(frame).is_some()
    }

    /// Step a wiper register up or down by one position.
    pub(crate) fn wiper_step(&mut self, command: Command, register: Register) -> bool {
        self.short_command(command_byte(command, register))
    }
}
