// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! BMP581 device facade.
//!
//! This module contains the main driver for the BMP581 pressure and
//! temperature sensor. It provides a high-level API for bringing the
//! sensor up, configuring power mode, oversampling, data rate, FIFO
//! buffering, interrupts and out-of-range detection, and reading samples
//! singly or in FIFO batches.
//!
//! All register traffic goes through an external register-map driver
//! behind the [`RegisterMap`] trait; the facade contributes the state
//! that must persist between calls and the sequencing rules the datasheet
//! imposes (standby for FIFO configuration, mode bouncing for a FIFO
//! flush).

use log::{debug, trace};

use crate::config::{
    FifoConfig, IirConfig, InterruptConfig, InterruptStatus, InvalidSetting, OorConfig,
    OsrOdrConfig, OsrOdrEffective, OutputDataRate, Oversampling, PowerMode, SensorData,
};
use crate::regmap::RegisterMap;

/// Total FIFO capacity: 32 pressure+temperature frames or 64
/// single-channel frames, 192 bytes either way.
const FIFO_BUF_LEN: usize = 192;

/// Driver-level errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError<E> {
    /// Error bubbled up from the register-map driver
    Driver(E),
    /// Caller-supplied setting outside the legal range, rejected before
    /// any hardware access
    InvalidSetting,
}

impl<E> From<InvalidSetting> for DriverError<E> {
    fn from(_: InvalidSetting) -> Self {
        DriverError::InvalidSetting
    }
}

/// BMP581 pressure/temperature sensor driver
///
/// Owns the oversampling/ODR and FIFO configuration state for the
/// lifetime of the connection. The device itself is reached through a
/// [`RegisterMap`] binding, so the same facade drives I2C- and
/// SPI-attached sensors alike.
///
/// Operations are blocking and expect exclusive access; there is no
/// internal locking.
pub struct BMP581<D> {
    pub(crate) regmap: D,
    osr_odr_config: OsrOdrConfig,
    fifo: FifoConfig,
}

impl<D> BMP581<D> {
    /// Create a new BMP581 driver over the given register-map driver
    pub fn new_with_driver(regmap: D) -> Self {
        Self {
            regmap,
            osr_odr_config: OsrOdrConfig::default(),
            fifo: FifoConfig::default(),
        }
    }

    /// Returns the previously consumed register-map driver instance
    pub fn free(self) -> D {
        self.regmap
    }
}

impl<D, E> BMP581<D>
where
    D: RegisterMap<Error = E>,
{
    /// Bring the sensor up: soft reset, enable the pressure channel, then
    /// switch to normal mode.
    ///
    /// The sequence aborts on the first failing step and returns that
    /// step's error; nothing is rolled back.
    pub fn init(&mut self) -> Result<(), DriverError<E>> {
        trace!("init");
        self.osr_odr_config = OsrOdrConfig::default();
        self.fifo = FifoConfig::default();

        self.regmap.soft_reset().map_err(DriverError::Driver)?;
        self.enable_pressure(true)?;
        self.set_mode(PowerMode::Normal)
    }

    /// Switch the sensor into the given power mode
    pub fn set_mode(&mut self, mode: PowerMode) -> Result<(), DriverError<E>> {
        self.regmap.set_power_mode(mode).map_err(DriverError::Driver)
    }

    /// Read the current power mode back from the device
    pub fn mode(&mut self) -> Result<PowerMode, DriverError<E>> {
        self.regmap.power_mode().map_err(DriverError::Driver)
    }

    /// Enable or disable the pressure channel. Temperature is always
    /// measured.
    pub fn enable_pressure(&mut self, enable: bool) -> Result<(), DriverError<E>> {
        self.osr_odr_config.pressure_enable = enable;
        self.apply_osr_odr_config()
    }

    /// Read one compensated temperature/pressure sample
    pub fn sensor_data(&mut self) -> Result<SensorData, DriverError<E>> {
        self.regmap
            .sensor_data(&self.osr_odr_config)
            .map_err(DriverError::Driver)
    }

    /// Set the output data rate used in normal mode
    pub fn set_odr_frequency(&mut self, odr: OutputDataRate) -> Result<(), DriverError<E>> {
        // TODO reject ODR/OSR combinations the device cannot reach
        // instead of letting it step the oversampling down silently
        self.osr_odr_config.odr = odr;
        self.apply_osr_odr_config()
    }

    /// The configured output data rate. Reflects driver state, no
    /// hardware access.
    pub fn odr_frequency(&self) -> OutputDataRate {
        self.osr_odr_config.odr
    }

    /// Set the oversampling multipliers for both measurement channels
    pub fn set_osr_multipliers(
        &mut self,
        temperature: Oversampling,
        pressure: Oversampling,
    ) -> Result<(), DriverError<E>> {
        self.osr_odr_config.temperature_oversampling = temperature;
        self.osr_odr_config.pressure_oversampling = pressure;
        self.apply_osr_odr_config()
    }

    /// The configured oversampling multipliers as (temperature, pressure).
    /// Reflects driver state, no hardware access.
    pub fn osr_multipliers(&self) -> (Oversampling, Oversampling) {
        (
            self.osr_odr_config.temperature_oversampling,
            self.osr_odr_config.pressure_oversampling,
        )
    }

    /// Read the oversampling and data rate the device actually runs at
    pub fn effective_osr_odr(&mut self) -> Result<OsrOdrEffective, DriverError<E>> {
        self.regmap.effective_osr_odr().map_err(DriverError::Driver)
    }

    /// Apply an IIR low-pass filter configuration
    pub fn set_filter_config(&mut self, config: &IirConfig) -> Result<(), DriverError<E>> {
        self.regmap.set_iir_config(config).map_err(DriverError::Driver)
    }

    /// Apply a pressure out-of-range detection window
    pub fn set_oor_config(&mut self, config: &OorConfig) -> Result<(), DriverError<E>> {
        self.regmap.set_oor_config(config).map_err(DriverError::Driver)
    }

    /// Configure the interrupt pin and route event sources to it.
    ///
    /// Two driver calls; if the pin configuration fails the sources are
    /// left untouched.
    pub fn set_interrupt_config(&mut self, config: &InterruptConfig) -> Result<(), DriverError<E>> {
        self.regmap
            .configure_interrupt(config.mode, config.polarity, config.drive, config.enable)
            .map_err(DriverError::Driver)?;
        self.regmap
            .select_interrupt_sources(&config.sources)
            .map_err(DriverError::Driver)
    }

    /// Read and clear the interrupt status register
    pub fn interrupt_status(&mut self) -> Result<InterruptStatus, DriverError<E>> {
        self.regmap.interrupt_status().map_err(DriverError::Driver)
    }

    /// Apply a FIFO configuration.
    ///
    /// The FIFO register block only accepts writes in standby, so the
    /// current power mode is captured, the device is forced into standby,
    /// the configuration is applied and the original mode is restored.
    /// When the apply step fails the restore is skipped: the call returns
    /// the apply error and the device stays in standby. The caller
    /// recovers by setting the mode again.
    pub fn set_fifo_config(&mut self, config: &FifoConfig) -> Result<(), DriverError<E>> {
        debug!("fifo config: {:?}", config);
        self.fifo = *config;

        let original_mode = self.mode()?;
        self.set_mode(PowerMode::Standby)?;

        self.regmap
            .set_fifo_config(&self.fifo)
            .map_err(DriverError::Driver)?;

        self.set_mode(original_mode)
    }

    /// Number of complete samples currently buffered in the FIFO.
    ///
    /// The device reports a byte count; it is divided by the frame width
    /// implied by the configured frame selector and a trailing partial
    /// frame is discarded. A FIFO configured to store nothing always
    /// reports zero samples.
    pub fn fifo_length(&mut self) -> Result<usize, DriverError<E>> {
        let bytes = self
            .regmap
            .fifo_length(&self.fifo)
            .map_err(DriverError::Driver)?;

        let frame_size = self.fifo.frame_sel.frame_size();
        if frame_size == 0 {
            return Ok(0);
        }
        Ok(bytes as usize / frame_size)
    }

    /// Drain up to `frames.len()` samples out of the FIFO.
    ///
    /// Returns the number of frames actually decoded, which is lower than
    /// requested when the device held fewer bytes; that is a normal
    /// drain-to-empty outcome, not an error. Raw bytes live in a buffer
    /// scoped to this call.
    pub fn fifo_data(&mut self, frames: &mut [SensorData]) -> Result<usize, DriverError<E>> {
        let frame_size = self.fifo.frame_sel.frame_size();
        if frame_size == 0 || frames.is_empty() {
            return Ok(0);
        }

        let mut raw = [0u8; FIFO_BUF_LEN];
        let requested = usize::min(frames.len() * frame_size, FIFO_BUF_LEN);

        let available = self
            .regmap
            .read_fifo_data(&self.fifo, &mut raw[..requested])
            .map_err(DriverError::Driver)?;

        self.regmap
            .extract_fifo_frames(self.fifo.frame_sel, &raw[..available], frames)
            .map_err(DriverError::Driver)
    }

    /// Discard everything buffered in the FIFO.
    ///
    /// There is no flush register; the FIFO drains as a side effect of a
    /// power-mode change. The mode is bounced through standby and back,
    /// or through forced when the device already sits in standby (the
    /// sensor leaves forced mode on its own after the single
    /// acquisition). The externally visible mode is unchanged.
    pub fn flush_fifo(&mut self) -> Result<(), DriverError<E>> {
        trace!("flush fifo");
        let original_mode = self.mode()?;

        if original_mode == PowerMode::Standby {
            self.set_mode(PowerMode::Forced)?;
        } else {
            self.set_mode(PowerMode::Standby)?;
        }

        self.set_mode(original_mode)
    }

    /// Read one 16-bit word from non-volatile memory
    pub fn nvm_read(&mut self, address: u8) -> Result<u16, DriverError<E>> {
        self.regmap.nvm_read(address).map_err(DriverError::Driver)
    }

    /// Program one 16-bit word into non-volatile memory
    pub fn nvm_write(&mut self, address: u8, data: u16) -> Result<(), DriverError<E>> {
        self.regmap
            .nvm_write(address, data)
            .map_err(DriverError::Driver)
    }

    fn apply_osr_odr_config(&mut self) -> Result<(), DriverError<E>> {
        self.regmap
            .set_osr_odr_config(&self.osr_odr_config)
            .map_err(DriverError::Driver)
    }
}
