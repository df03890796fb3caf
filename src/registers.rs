//! Register map and bit-field views for the MCP4251.
//!
//! The chip exposes a 9-bit register space addressed by a 4-bit register
//! address in bits 4–7 of the command byte, combined with a 2-bit command
//! opcode in bits 2–3. This module defines both fields pre-shifted into
//! position, the composition of the command byte, and typed views over the
//! two bit-packed registers (TCON and STATUS).

// ---------------------------------------------------------------------------
// Protocol constants
// ---------------------------------------------------------------------------

/// Filler byte sent as the payload of a read command; the chip ignores it.
pub(crate) const DUMMY_DATA: u8 = 0xFF;

/// Mask applied to every register payload before transmission. Register
/// values are 9 bits wide; the top 7 bits of a `u16` must never reach the
/// chip.
pub const DATA_MASK: u16 = 0x01FF;

/// Full-scale wiper position (wiper connected directly to terminal A).
pub const WIPER_FULL_SCALE: u16 = 0x100;

// ---------------------------------------------------------------------------
// Register addresses and command opcodes
// ---------------------------------------------------------------------------

/// Register addresses, pre-shifted into bits 4–7 of the command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Wiper position of pot 0 (volatile).
    Wiper0 = 0x00,
    /// Wiper position of pot 1 (volatile).
    Wiper1 = 0x10,
    /// Terminal control register; two 4-bit nibbles, one per pot.
    Tcon = 0x40,
    /// Status register; shutdown flag at bit 1, all other bits reserved.
    Status = 0x50,
}

/// Command opcodes, pre-shifted into bits 2–3 of the command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum Command {
    Write = 0x00,
    Increment = 0x04,
    Decrement = 0x08,
    Read = 0x0C,
}

/// Compose a command byte from an opcode and a register address.
///
/// The two fields occupy disjoint bit ranges (bits 2–3 and bits 4–7), so the
/// composition is a plain OR. Bits 0–1 stay clear for the two high payload
/// bits of a long write command.
pub(crate) fn command_byte(command: Command, register: Register) -> u8 {
    command as u8 | register as u8
}

/// Selects one of the two on-chip potentiometers.
///
/// Increment and decrement commands are only defined against the two wiper
/// registers, so the wiper operations take this type rather than the full
/// [`Register`] set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WiperChannel {
    /// Pot 0.
    Wiper0,
    /// Pot 1.
    Wiper1,
}

impl WiperChannel {
    /// The wiper register this channel addresses.
    pub fn register(self) -> Register {
        match self {
            WiperChannel::Wiper0 => Register::Wiper0,
            WiperChannel::Wiper1 => Register::Wiper1,
        }
    }

    /// Bit offset of this channel's nibble within the TCON byte.
    fn tcon_offset(self) -> u8 {
        match self {
            WiperChannel::Wiper0 => 0,
            WiperChannel::Wiper1 => 4,
        }
    }
}

// ---------------------------------------------------------------------------
// TCON register view
// ---------------------------------------------------------------------------

/// Typed view over the 8-bit terminal control (TCON) register.
///
/// The byte holds two 4-bit nibbles, pot 0 in bits 0–3 and pot 1 in bits
/// 4–7, each with the same four flags. Both nibbles alias the same byte, so
/// changing one pot's flags without disturbing the other requires a
/// read-modify-write cycle — see
/// [`Mcp4251::modify_tcon`](crate::Mcp4251::modify_tcon).
///
/// Conversion to and from the raw byte is lossless for every value; reserved
/// bit patterns are carried through unchanged.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct TconRegister(u8);

impl TconRegister {
    const TERMINAL_B_BIT: u8 = 0;
    const WIPER_BIT: u8 = 1;
    const TERMINAL_A_BIT: u8 = 2;
    const STARTED_BIT: u8 = 3;

    /// View over a raw TCON byte.
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// View over a 16-bit register read; TCON occupies the low 8 bits.
    pub fn from_read(value: u16) -> Self {
        Self((value & DATA_MASK) as u8)
    }

    /// The raw byte.
    pub fn raw(self) -> u8 {
        self.0
    }

    fn flag(self, channel: WiperChannel, bit: u8) -> bool {
        self.0 & (1 << (channel.tcon_offset() + bit)) != 0
    }

    fn set_flag(&mut self, channel: WiperChannel, bit: u8, value: bool) {
        let mask = 1 << (channel.tcon_offset() + bit);
        if value {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    /// Whether terminal B of the given pot is connected to the resistor
    /// network.
    pub fn terminal_b_connected(self, channel: WiperChannel) -> bool {
        self.flag(channel, Self::TERMINAL_B_BIT)
    }

    /// Connect or disconnect terminal B of the given pot.
    pub fn set_terminal_b_connected(&mut self, channel: WiperChannel, connected: bool) {
        self.set_flag(channel, Self::TERMINAL_B_BIT, connected);
    }

    /// Whether the wiper terminal of the given pot is connected.
    pub fn wiper_connected(self, channel: WiperChannel) -> bool {
        self.flag(channel, Self::WIPER_BIT)
    }

    /// Connect or disconnect the wiper terminal of the given pot.
    pub fn set_wiper_connected(&mut self, channel: WiperChannel, connected: bool) {
        self.set_flag(channel, Self::WIPER_BIT, connected);
    }

    /// Whether terminal A of the given pot is connected.
    pub fn terminal_a_connected(self, channel: WiperChannel) -> bool {
        self.flag(channel, Self::TERMINAL_A_BIT)
    }

    /// Connect or disconnect terminal A of the given pot.
    pub fn set_terminal_a_connected(&mut self, channel: WiperChannel, connected: bool) {
        self.set_flag(channel, Self::TERMINAL_A_BIT, connected);
    }

    /// Whether the given pot is running (not forced into hardware shutdown).
    pub fn pot_started(self, channel: WiperChannel) -> bool {
        self.flag(channel, Self::STARTED_BIT)
    }

    /// Start or shut down the given pot.
    pub fn set_pot_started(&mut self, channel: WiperChannel, started: bool) {
        self.set_flag(channel, Self::STARTED_BIT, started);
    }
}

impl core::fmt::Debug for TconRegister {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TconRegister")
            .field("pot0_terminal_b", &self.terminal_b_connected(WiperChannel::Wiper0))
            .field("pot0_wiper", &self.wiper_connected(WiperChannel::Wiper0))
            .field("pot0_terminal_a", &self.terminal_a_connected(WiperChannel::Wiper0))
            .field("pot0_started", &self.pot_started(WiperChannel::Wiper0))
            .field("pot1_terminal_b", &self.terminal_b_connected(WiperChannel::Wiper1))
            .field("pot1_wiper", &self.wiper_connected(WiperChannel::Wiper1))
            .field("pot1_terminal_a", &self.terminal_a_connected(WiperChannel::Wiper1))
            .field("pot1_started", &self.pot_started(WiperChannel::Wiper1))
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TconRegister {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "TconRegister({=u8:#010b})", self.0);
    }
}

// ---------------------------------------------------------------------------
// STATUS register view
// ---------------------------------------------------------------------------

/// Typed view over the 16-bit status (STATUS) register.
///
/// Only the shutdown flag at bit 1 is specified; every other bit is reserved
/// and must be preserved verbatim on a round trip, so the view keeps the full
/// raw word.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct StatusRegister(u16);

impl StatusRegister {
    const SHUTDOWN_BIT: u16 = 1;

    /// View over a raw STATUS word.
    pub fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// The raw word, reserved bits included.
    pub fn raw(self) -> u16 {
        self.0
    }

    /// Whether the chip is in hardware shutdown.
    pub fn shutdown(self) -> bool {
        self.0 & (1 << Self::SHUTDOWN_BIT) != 0
    }
}

impl core::fmt::Debug for StatusRegister {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StatusRegister")
            .field("shutdown", &self.shutdown())
            .field("raw", &self.0)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusRegister {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "StatusRegister({=u16:#018b})", self.0);
    }
}
