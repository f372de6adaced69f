// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Transport adapters for the BMP581.
//!
//! The register-map driver is transport-agnostic: it moves bytes through
//! the [`RegisterInterface`] capability and never knows which bus carries
//! them. Two adapters implement it, one for the shared I2C bus and one
//! for point-to-point SPI. Each adapter bundles its transport handle with
//! its addressing parameters, so several sensors on different buses can
//! coexist without shared state.

pub mod i2c;
pub mod spi;

pub use self::i2c::{Address, I2cInterface};
pub use self::spi::SpiInterface;

/// Byte-level register access consumed by the register-map driver
pub trait RegisterInterface {
    /// Interface-associated error type
    type InterfaceError;

    /// Read `buffer.len()` bytes starting at `register`
    fn read_registers(
        &mut self,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::InterfaceError>;

    /// Write `data` to consecutive registers starting at `register`
    fn write_registers(&mut self, register: u8, data: &[u8])
        -> Result<(), Self::InterfaceError>;
}
