//! High-level interface for the MCP4251 dual digital potentiometer.
//!
//! [`Mcp4251`] wraps the low-level command driver with register-level
//! read/write/modify operations and wiper conveniences. Every operation is
//! one or two fresh bus round trips; the driver keeps no register cache.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::driver::CommandDriver;
use crate::registers::{Command, Register, StatusRegister, TconRegister, WiperChannel, DATA_MASK};

/// Blocking SPI driver for the MCP4251 dual digital potentiometer.
///
/// Owns the SPI bus and the active-low chip-select pin. Chip nack and bus
/// failure are both reported through the absent-result channel (`None` /
/// `false`); a nack is an expected outcome under chip busy or shutdown
/// conditions, not an exceptional one.
///
/// # Example
///
/// ```ignore
/// use mcp4251_driver::{Mcp4251, WiperChannel};
///
/// // `spi` is any blocking `embedded-hal` SPI bus, `cs` an output pin.
/// let mut pot = Mcp4251::new(spi, cs);
///
/// pot.set_wiper(WiperChannel::Wiper0, 128);
/// let position = pot.wiper(WiperChannel::Wiper0);
/// ```
pub struct Mcp4251<SPI, CS> {
    driver: CommandDriver<SPI, CS>,
}

impl<SPI, CS> Mcp4251<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    /// Create a new driver.
    ///
    /// No bus traffic is generated; the chip-select pin is assumed to idle
    /// high (deselected).
    ///
    /// # Arguments
    /// * `spi` — SPI bus (takes ownership for exclusive access)
    /// * `cs` — active-low chip-select pin
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self {
            driver: CommandDriver::new(spi, cs),
        }
    }

    /// Consume the driver and hand back the bus and the chip-select pin.
    pub fn release(self) -> (SPI, CS) {
        self.driver.release()
    }

    // -----------------------------------------------------------------------
    // Register operations
    // -----------------------------------------------------------------------

    /// Read a register.
    ///
    /// # Returns
    /// The 9-bit register value, or `None` if the chip did not acknowledge
    /// or the bus failed.
    pub fn read_register(&mut self, register: Register) -> Option<u16> {
        self.driver.read_register(register)
    }

    /// Write a register.
    ///
    /// `value` is masked to 9 bits before transmission so stray high bits
    /// never reach the chip.
    ///
    /// # Returns
    /// Whether the chip acknowledged the write.
    pub fn write_register(&mut self, register: Register, value: u16) -> bool {
        self.driver.write_register(register, value)
    }

    /// Read a register, apply `f` to the raw value, and write the result
    /// back.
    ///
    /// This is the sanctioned way to change a single sub-field of a register
    /// without disturbing its siblings (e.g. one pot's TCON nibble). The
    /// read and the write-back are two separate bus transactions with no
    /// atomicity between them; the chip must have a single logical owner for
    /// the duration of the call.
    ///
    /// # Returns
    /// `false` if the initial read came back absent or the write-back was
    /// not acknowledged; no write is attempted after a failed read.
    pub fn modify_register(
        &mut self,
        register: Register,
        f: impl FnOnce(u16) -> u16,
    ) -> bool {
        let Some(current) = self.read_register(register) else {
            return false;
        };
        self.write_register(register, f(current))
    }

    // -----------------------------------------------------------------------
    // Wiper operations
    // -----------------------------------------------------------------------

    /// Step a wiper one position towards terminal A.
    ///
    /// The chip clamps at full scale; stepping past it is not an error.
    ///
    /// # Returns
    /// Whether the chip acknowledged the step.
    pub fn wiper_increment(&mut self, channel: WiperChannel) -> bool {
        self.driver.wiper_step(Command::Increment, channel.register())
    }

    /// Step a wiper one position towards terminal B.
    ///
    /// # Returns
    /// Whether the chip acknowledged the step.
    pub fn wiper_decrement(&mut self, channel: WiperChannel) -> bool {
        self.driver.wiper_step(Command::Decrement, channel.register())
    }

    /// Set a wiper position directly.
    ///
    /// Equivalent to [`write_register`](Self::write_register) on the
    /// channel's wiper register; `position` is masked to 9 bits.
    pub fn set_wiper(&mut self, channel: WiperChannel, position: u16) -> bool {
        self.write_register(channel.register(), position & DATA_MASK)
    }

    /// Read a wiper position.
    pub fn wiper(&mut self, channel: WiperChannel) -> Option<u16> {
        self.read_register(channel.register())
    }

    // -----------------------------------------------------------------------
    // TCON and STATUS conveniences
    // -----------------------------------------------------------------------

    /// Read the terminal control register as a typed view.
    pub fn read_tcon(&mut self) -> Option<TconRegister> {
        self.read_register(Register::Tcon).map(TconRegister::from_read)
    }

    /// Write the terminal control register.
    ///
    /// Prefer [`modify_tcon`](Self::modify_tcon) when changing one pot's
    /// flags so the sibling nibble is carried through from the chip instead
    /// of overwritten.
    pub fn write_tcon(&mut self, tcon: TconRegister) -> bool {
        self.write_register(Register::Tcon, u16::from(tcon.raw()))
    }

    /// Read-modify-write the terminal control register.
    ///
    /// `f` receives the current TCON view and mutates it in place; bits it
    /// leaves alone are written back unchanged.
    ///
    /// # Example
    /// ```ignore
    /// use mcp4251_driver::WiperChannel;
    ///
    /// // Disconnect pot 0's wiper terminal without touching pot 1.
    /// pot.modify_tcon(|tcon| {
    ///     tcon.set_wiper_connected(WiperChannel::Wiper0, false);
    /// });
    /// ```
    pub fn modify_tcon(&mut self, f: impl FnOnce(&mut TconRegister)) -> bool {
        self.modify_register(Register::Tcon, |raw| {
            let mut tcon = TconRegister::from_read(raw);
            f(&mut tcon);
            u16::from(tcon.raw())
        })
    }

    /// Read the status register as a typed view.
    ///
    /// Reserved bits are carried through verbatim in the view's raw word.
    pub fn read_status(&mut self) -> Option<StatusRegister> {
        self.read_register(Register::Status).map(StatusRegister::from_raw)
    }

    /// Whether the chip reports hardware shutdown.
    pub fn is_shutdown(&mut self) -> Option<bool> {
        self.read_status().map(StatusRegister::shutdown)
    }
}
