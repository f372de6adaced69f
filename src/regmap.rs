// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Boundary to the external register-map driver.
//!
//! Register-level access to the BMP581 is owned by Bosch's BMP5 sensor
//! API: it knows the register addresses and bit layouts, runs the
//! bring-up sequencing and converts raw readings into physical units.
//! This crate treats that layer as an opaque collaborator behind the
//! [`RegisterMap`] trait. A binding implements the trait over one of the
//! [`crate::interface`] adapters; the [`crate::driver::BMP581`] facade is
//! generic over it and only ever exchanges the value types of
//! [`crate::config`].
//!
//! Errors pass through the facade unmodified; no retries happen at this
//! level.

use crate::config::{
    FifoConfig, FifoFrameSel, IirConfig, InterruptDrive, InterruptMode, InterruptPolarity,
    InterruptSources, InterruptStatus, OorConfig, OsrOdrConfig, OsrOdrEffective, PowerMode,
    SensorData,
};

/// Primitive operations the device facade consumes from the register-map
/// driver.
///
/// Every method maps to one driver call issuing one or more register
/// transactions, blocking until they complete or fail.
pub trait RegisterMap {
    /// Error type reported by the driver binding
    type Error;

    /// Soft-reset the device and wait out the reset time
    fn soft_reset(&mut self) -> Result<(), Self::Error>;

    /// Read the current power mode back from the device
    fn power_mode(&mut self) -> Result<PowerMode, Self::Error>;

    /// Switch the device into `mode`
    fn set_power_mode(&mut self, mode: PowerMode) -> Result<(), Self::Error>;

    /// Apply the oversampling/pressure-enable/ODR block
    fn set_osr_odr_config(&mut self, config: &OsrOdrConfig) -> Result<(), Self::Error>;

    /// Read the oversampling and data rate the device actually runs at
    fn effective_osr_odr(&mut self) -> Result<OsrOdrEffective, Self::Error>;

    /// Read one compensated temperature/pressure sample
    fn sensor_data(&mut self, config: &OsrOdrConfig) -> Result<SensorData, Self::Error>;

    /// Apply the IIR filter configuration
    fn set_iir_config(&mut self, config: &IirConfig) -> Result<(), Self::Error>;

    /// Apply the pressure out-of-range detection window
    fn set_oor_config(&mut self, config: &OorConfig) -> Result<(), Self::Error>;

    /// Configure the interrupt pin itself
    fn configure_interrupt(
        &mut self,
        mode: InterruptMode,
        polarity: InterruptPolarity,
        drive: InterruptDrive,
        enable: bool,
    ) -> Result<(), Self::Error>;

    /// Route the selected event sources to the interrupt pin
    fn select_interrupt_sources(&mut self, sources: &InterruptSources) -> Result<(), Self::Error>;

    /// Read and clear the interrupt status register
    fn interrupt_status(&mut self) -> Result<InterruptStatus, Self::Error>;

    /// Apply the FIFO configuration registers. The device only accepts
    /// these writes in standby mode; the caller is responsible for the
    /// mode.
    fn set_fifo_config(&mut self, config: &FifoConfig) -> Result<(), Self::Error>;

    /// Number of bytes currently held in the FIFO buffer
    fn fifo_length(&mut self, config: &FifoConfig) -> Result<u16, Self::Error>;

    /// Drain up to `buffer.len()` raw bytes from the FIFO into `buffer`,
    /// returning how many were actually available. The buffer is borrowed
    /// only for this call.
    fn read_fifo_data(&mut self, config: &FifoConfig, buffer: &mut [u8])
        -> Result<usize, Self::Error>;

    /// Decode raw FIFO bytes into samples, returning the number of
    /// complete frames decoded. Trailing partial frames are ignored.
    fn extract_fifo_frames(
        &mut self,
        frame_sel: FifoFrameSel,
        raw: &[u8],
        frames: &mut [SensorData],
    ) -> Result<usize, Self::Error>;

    /// Read one 16-bit word from non-volatile memory
    fn nvm_read(&mut self, address: u8) -> Result<u16, Self::Error>;

    /// Program one 16-bit word into non-volatile memory
    fn nvm_write(&mut self, address: u8, data: u16) -> Result<(), Self::Error>;
}
