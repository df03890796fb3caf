//! Blocking SPI driver for the MCP4251 dual digital potentiometer.
//!
//! The MCP4251 carries two independent 257-position potentiometers behind a
//! single SPI interface with a 9-bit register space. This crate implements
//! the chip's command protocol: register reads and writes as two-byte
//! transactions, wiper increment/decrement as one-byte transactions, and the
//! bit-packed TCON and STATUS registers as typed views.
//!
//! # Architecture
//!
//! The crate is split into three layers:
//!
//! - **`registers`** — Register addresses, command-byte composition, and the
//!   [`TconRegister`]/[`StatusRegister`] bit-field views.
//! - **`driver`** (crate-private) — Command framing, response decoding, and
//!   the chip-select bracket around each transaction.
//! - **[`Mcp4251`]** (public) — Register-level read/write/modify API and
//!   wiper conveniences.
//!
//! # Quick start
//!
//! ```ignore
//! use mcp4251_driver::{Mcp4251, WiperChannel};
//!
//! // Construct with any blocking `embedded-hal` SPI bus and output pin.
//! let mut pot = Mcp4251::new(spi, cs);
//!
//! // Move pot 0 to mid scale and step it up one position.
//! pot.set_wiper(WiperChannel::Wiper0, 128);
//! pot.wiper_increment(WiperChannel::Wiper0);
//! ```
//!
//! # Error model
//!
//! A chip nack and a bus failure are both reported as an absent result
//! (`None` / `false`); neither is an exceptional outcome at this layer.
//! Callers that need to distinguish them must instrument the bus
//! implementation.
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on public types
//!   for embedded logging.

#![no_std]

pub use digipot::Mcp4251;
pub use registers::{
    Register, StatusRegister, TconRegister, WiperChannel, DATA_MASK, WIPER_FULL_SCALE,
};

mod digipot;
mod driver;
mod registers;

#[cfg(test)]
mod testutil;
