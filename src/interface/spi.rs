// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! SPI transport adapter.
//!
//! One exchange per register access: chip select held low for the whole
//! transfer, a register-address byte first, then the payload bytes. The
//! address byte carries the read flag in its top bit. The bus must be
//! configured for mode 0 and most-significant-bit-first transfers; clock
//! rate is owned by the platform HAL.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::RegisterInterface;
use crate::Error;

/// Read transactions set the top bit of the register address
const SPI_READ_BIT: u8 = 0x80;

/// Adapter for a BMP581 on a point-to-point SPI connection
pub struct SpiInterface<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS, CommE, PinE> SpiInterface<SPI, CS>
where
    SPI: SpiBus<u8, Error = CommE>,
    CS: OutputPin<Error = PinE>,
{
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    /// Returns the previously consumed bus and chip-select instances
    pub fn free(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    fn transfer_read(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), Error<CommE, PinE>> {
        self.spi
            .write(&[register | SPI_READ_BIT])
            .map_err(Error::Comm)?;
        self.spi.read(buffer).map_err(Error::Comm)?;
        self.spi.flush().map_err(Error::Comm)
    }

    fn transfer_write(&mut self, register: u8, data: &[u8]) -> Result<(), Error<CommE, PinE>> {
        self.spi.write(&[register]).map_err(Error::Comm)?;
        self.spi.write(data).map_err(Error::Comm)?;
        self.spi.flush().map_err(Error::Comm)
    }
}

impl<SPI, CS, CommE, PinE> RegisterInterface for SpiInterface<SPI, CS>
where
    SPI: SpiBus<u8, Error = CommE>,
    CS: OutputPin<Error = PinE>,
{
    type InterfaceError = Error<CommE, PinE>;

    fn read_registers(
        &mut self,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::InterfaceError> {
        if buffer.is_empty() {
            return Err(Error::EmptyTransfer);
        }

        self.cs.set_low().map_err(Error::Pin)?;
        let result = self.transfer_read(register, buffer);
        // Deselect even when the transfer failed, the line must not stay
        // active between exchanges.
        let deselect = self.cs.set_high().map_err(Error::Pin);
        result.and(deselect)
    }

    fn write_registers(&mut self, register: u8, data: &[u8]) -> Result<(), Self::InterfaceError> {
        if data.is_empty() {
            return Err(Error::EmptyTransfer);
        }

        self.cs.set_low().map_err(Error::Pin)?;
        let result = self.transfer_write(register, data);
        let deselect = self.cs.set_high().map_err(Error::Pin);
        result.and(deselect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    #[test]
    fn read_sets_read_bit_and_frames_with_chip_select() {
        let spi_expectations = [
            SpiTransaction::write_vec(vec![0x1D | 0x80]),
            SpiTransaction::read_vec(vec![0xAA, 0xBB]),
            SpiTransaction::flush(),
        ];
        let cs_expectations = [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];
        let mut iface = SpiInterface::new(
            SpiMock::new(&spi_expectations),
            PinMock::new(&cs_expectations),
        );

        let mut buffer = [0u8; 2];
        iface.read_registers(0x1D, &mut buffer).unwrap();
        assert_eq!(buffer, [0xAA, 0xBB]);

        let (mut spi, mut cs) = iface.free();
        spi.done();
        cs.done();
    }

    #[test]
    fn write_keeps_read_bit_clear() {
        let spi_expectations = [
            SpiTransaction::write_vec(vec![0x37]),
            SpiTransaction::write_vec(vec![0x01, 0x02, 0x03]),
            SpiTransaction::flush(),
        ];
        let cs_expectations = [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];
        let mut iface = SpiInterface::new(
            SpiMock::new(&spi_expectations),
            PinMock::new(&cs_expectations),
        );

        iface.write_registers(0x37, &[0x01, 0x02, 0x03]).unwrap();

        let (mut spi, mut cs) = iface.free();
        spi.done();
        cs.done();
    }

    #[test]
    fn zero_length_requests_never_assert_chip_select() {
        let mut iface = SpiInterface::new(SpiMock::new(&[]), PinMock::new(&[]));

        let mut empty = [0u8; 0];
        assert!(matches!(
            iface.read_registers(0x1D, &mut empty),
            Err(Error::EmptyTransfer)
        ));
        assert!(matches!(
            iface.write_registers(0x1D, &[]),
            Err(Error::EmptyTransfer)
        ));

        let (mut spi, mut cs) = iface.free();
        spi.done();
        cs.done();
    }
}
