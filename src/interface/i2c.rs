// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! I2C transport adapter.
//!
//! Register reads are two bus frames: an addressed write carrying the
//! register address, then a read frame clocking the data out. Register
//! writes are a single frame of the register address followed by the
//! payload.

use core::convert::Infallible;

use embedded_hal::i2c::I2c;

use super::RegisterInterface;
use crate::config::InvalidSetting;
use crate::Error;

/// Longest write frame the adapter assembles: register address plus the
/// largest register burst the BMP5 driver issues.
const WRITE_FRAME_LEN: usize = 16;

/// The two bus addresses the BMP581 responds on, selected by the SDO pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Address {
    /// SDO tied low
    #[default]
    Primary = 0x46,
    /// SDO tied high
    Secondary = 0x47,
}

impl From<Address> for u8 {
    fn from(address: Address) -> Self {
        address as u8
    }
}

impl TryFrom<u8> for Address {
    type Error = InvalidSetting;

    fn try_from(value: u8) -> Result<Self, InvalidSetting> {
        match value {
            0x46 => Ok(Address::Primary),
            0x47 => Ok(Address::Secondary),
            _ => Err(InvalidSetting),
        }
    }
}

/// Adapter for a BMP581 sharing a multi-drop I2C bus
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C, CommE> I2cInterface<I2C>
where
    I2C: I2c<Error = CommE>,
{
    pub fn new(i2c: I2C, address: Address) -> Self {
        Self {
            i2c,
            address: address.into(),
        }
    }

    /// Returns the previously consumed bus instance
    pub fn free(self) -> I2C {
        self.i2c
    }
}

impl<I2C, CommE> RegisterInterface for I2cInterface<I2C>
where
    I2C: I2c<Error = CommE>,
{
    type InterfaceError = Error<CommE, Infallible>;

    fn read_registers(
        &mut self,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::InterfaceError> {
        if buffer.is_empty() {
            return Err(Error::EmptyTransfer);
        }

        // Move the register pointer, then clock the data out in a
        // separate read frame.
        self.i2c
            .write(self.address, &[register])
            .map_err(Error::Comm)?;
        self.i2c.read(self.address, buffer).map_err(Error::Comm)
    }

    fn write_registers(&mut self, register: u8, data: &[u8]) -> Result<(), Self::InterfaceError> {
        if data.is_empty() {
            return Err(Error::EmptyTransfer);
        }
        if data.len() >= WRITE_FRAME_LEN {
            return Err(Error::TransferTooLong);
        }

        let mut frame = [0u8; WRITE_FRAME_LEN];
        frame[0] = register;
        frame[1..=data.len()].copy_from_slice(data);
        self.i2c
            .write(self.address, &frame[..=data.len()])
            .map_err(Error::Comm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn read_is_register_write_then_read_frame() {
        let expectations = [
            I2cTransaction::write(0x46, vec![0x1D]),
            I2cTransaction::read(0x46, vec![0xAA, 0xBB, 0xCC]),
        ];
        let mut iface = I2cInterface::new(I2cMock::new(&expectations), Address::Primary);

        let mut buffer = [0u8; 3];
        iface.read_registers(0x1D, &mut buffer).unwrap();
        assert_eq!(buffer, [0xAA, 0xBB, 0xCC]);

        iface.free().done();
    }

    #[test]
    fn write_is_single_frame() {
        let expectations = [I2cTransaction::write(0x47, vec![0x37, 0x01, 0x02])];
        let mut iface = I2cInterface::new(I2cMock::new(&expectations), Address::Secondary);

        iface.write_registers(0x37, &[0x01, 0x02]).unwrap();

        iface.free().done();
    }

    #[test]
    fn zero_length_requests_never_touch_the_bus() {
        let mut iface = I2cInterface::new(I2cMock::new(&[]), Address::Primary);

        let mut empty = [0u8; 0];
        assert_eq!(
            iface.read_registers(0x1D, &mut empty),
            Err(Error::EmptyTransfer)
        );
        assert_eq!(iface.write_registers(0x1D, &[]), Err(Error::EmptyTransfer));

        iface.free().done();
    }

    #[test]
    fn oversized_write_burst_is_rejected() {
        let mut iface = I2cInterface::new(I2cMock::new(&[]), Address::Primary);

        let burst = [0u8; WRITE_FRAME_LEN];
        assert_eq!(
            iface.write_registers(0x1D, &burst),
            Err(Error::TransferTooLong)
        );

        iface.free().done();
    }

    #[test]
    fn address_selector_validation() {
        assert_eq!(Address::try_from(0x46), Ok(Address::Primary));
        assert_eq!(Address::try_from(0x47), Ok(Address::Secondary));
        assert_eq!(Address::try_from(0x76), Err(InvalidSetting));
    }
}
