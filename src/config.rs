// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Value and configuration types exchanged with the BMP5 register-map
//! driver.
//!
//! Raw register selectors are modeled as `#[repr(u8)]` enums carrying the
//! on-wire encoding. Selectors parsed from untyped input go through
//! `TryFrom<u8>`, which rejects anything outside the device's enumerated
//! range before any hardware access happens.

/// Raw selector value outside the device's enumerated legal range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSetting;

/// Sensor power modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PowerMode {
    /// Idle, lowest measurement power. Configuration registers stay
    /// accessible.
    #[default]
    Standby = 0x00,
    /// Continuous sampling at the configured output data rate
    Normal = 0x01,
    /// Single on-demand measurement; the device returns to standby on its
    /// own once the sample completes
    Forced = 0x02,
    /// Continuous sampling without ODR pacing
    Continuous = 0x03,
    /// Lowest-power retention state
    DeepStandby = 0x04,
}

impl From<PowerMode> for u8 {
    fn from(mode: PowerMode) -> Self {
        mode as u8
    }
}

impl TryFrom<u8> for PowerMode {
    type Error = InvalidSetting;

    fn try_from(value: u8) -> Result<Self, InvalidSetting> {
        match value {
            0x00 => Ok(PowerMode::Standby),
            0x01 => Ok(PowerMode::Normal),
            0x02 => Ok(PowerMode::Forced),
            0x03 => Ok(PowerMode::Continuous),
            0x04 => Ok(PowerMode::DeepStandby),
            _ => Err(InvalidSetting),
        }
    }
}

/// Oversampling multipliers for temperature and pressure measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Oversampling {
    #[default]
    X1 = 0x00,
    X2 = 0x01,
    X4 = 0x02,
    X8 = 0x03,
    X16 = 0x04,
    X32 = 0x05,
    X64 = 0x06,
    X128 = 0x07,
}

impl From<Oversampling> for u8 {
    fn from(osr: Oversampling) -> Self {
        osr as u8
    }
}

impl TryFrom<u8> for Oversampling {
    type Error = InvalidSetting;

    fn try_from(value: u8) -> Result<Self, InvalidSetting> {
        match value {
            0x00 => Ok(Oversampling::X1),
            0x01 => Ok(Oversampling::X2),
            0x02 => Ok(Oversampling::X4),
            0x03 => Ok(Oversampling::X8),
            0x04 => Ok(Oversampling::X16),
            0x05 => Ok(Oversampling::X32),
            0x06 => Ok(Oversampling::X64),
            0x07 => Ok(Oversampling::X128),
            _ => Err(InvalidSetting),
        }
    }
}

/// Output data rate in normal mode
///
/// Variant names carry the rate in Hz, with `_` standing in for the
/// decimal point on the fractional rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
#[allow(non_camel_case_types)]
pub enum OutputDataRate {
    #[default]
    Hz240 = 0x00,
    Hz218_5 = 0x01,
    Hz199_8 = 0x02,
    Hz179_2 = 0x03,
    Hz160 = 0x04,
    Hz149_3 = 0x05,
    Hz140 = 0x06,
    Hz129_8 = 0x07,
    Hz120 = 0x08,
    Hz110_1 = 0x09,
    Hz100_2 = 0x0A,
    Hz89_6 = 0x0B,
    Hz80 = 0x0C,
    Hz70 = 0x0D,
    Hz60 = 0x0E,
    Hz50 = 0x0F,
    Hz45 = 0x10,
    Hz40 = 0x11,
    Hz35 = 0x12,
    Hz30 = 0x13,
    Hz25 = 0x14,
    Hz20 = 0x15,
    Hz15 = 0x16,
    Hz10 = 0x17,
    Hz5 = 0x18,
    Hz4 = 0x19,
    Hz3 = 0x1A,
    Hz2 = 0x1B,
    Hz1 = 0x1C,
    Hz0_5 = 0x1D,
    Hz0_25 = 0x1E,
    Hz0_125 = 0x1F,
}

impl From<OutputDataRate> for u8 {
    fn from(odr: OutputDataRate) -> Self {
        odr as u8
    }
}

impl TryFrom<u8> for OutputDataRate {
    type Error = InvalidSetting;

    fn try_from(value: u8) -> Result<Self, InvalidSetting> {
        match value {
            0x00 => Ok(OutputDataRate::Hz240),
            0x01 => Ok(OutputDataRate::Hz218_5),
            0x02 => Ok(OutputDataRate::Hz199_8),
            0x03 => Ok(OutputDataRate::Hz179_2),
            0x04 => Ok(OutputDataRate::Hz160),
            0x05 => Ok(OutputDataRate::Hz149_3),
            0x06 => Ok(OutputDataRate::Hz140),
            0x07 => Ok(OutputDataRate::Hz129_8),
            0x08 => Ok(OutputDataRate::Hz120),
            0x09 => Ok(OutputDataRate::Hz110_1),
            0x0A => Ok(OutputDataRate::Hz100_2),
            0x0B => Ok(OutputDataRate::Hz89_6),
            0x0C => Ok(OutputDataRate::Hz80),
            0x0D => Ok(OutputDataRate::Hz70),
            0x0E => Ok(OutputDataRate::Hz60),
            0x0F => Ok(OutputDataRate::Hz50),
            0x10 => Ok(OutputDataRate::Hz45),
            0x11 => Ok(OutputDataRate::Hz40),
            0x12 => Ok(OutputDataRate::Hz35),
            0x13 => Ok(OutputDataRate::Hz30),
            0x14 => Ok(OutputDataRate::Hz25),
            0x15 => Ok(OutputDataRate::Hz20),
            0x16 => Ok(OutputDataRate::Hz15),
            0x17 => Ok(OutputDataRate::Hz10),
            0x18 => Ok(OutputDataRate::Hz5),
            0x19 => Ok(OutputDataRate::Hz4),
            0x1A => Ok(OutputDataRate::Hz3),
            0x1B => Ok(OutputDataRate::Hz2),
            0x1C => Ok(OutputDataRate::Hz1),
            0x1D => Ok(OutputDataRate::Hz0_5),
            0x1E => Ok(OutputDataRate::Hz0_25),
            0x1F => Ok(OutputDataRate::Hz0_125),
            _ => Err(InvalidSetting),
        }
    }
}

/// Oversampling, pressure-enable and output-data-rate configuration
///
/// The device facade owns one of these for the lifetime of the
/// connection; setters mutate it and push the whole block to the sensor
/// in a single apply call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OsrOdrConfig {
    pub temperature_oversampling: Oversampling,
    pub pressure_oversampling: Oversampling,
    /// Pressure channel enable. Temperature is always measured.
    pub pressure_enable: bool,
    pub odr: OutputDataRate,
}

/// Oversampling and data rate the sensor actually runs at, read back from
/// the device. Differs from the requested configuration when the
/// requested combination is not reachable and the device has stepped the
/// oversampling down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OsrOdrEffective {
    pub temperature_oversampling: Oversampling,
    pub pressure_oversampling: Oversampling,
    pub odr: OutputDataRate,
}

/// One temperature/pressure sample
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorData {
    /// Temperature in degrees Celsius
    pub temperature: f32,
    /// Pressure in Pascal. Zero when the pressure channel is disabled.
    pub pressure: f32,
}

/// Which channels are stored per buffered FIFO frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FifoFrameSel {
    /// FIFO buffering disabled, nothing is stored
    #[default]
    Disabled = 0x00,
    TemperatureOnly = 0x01,
    PressureOnly = 0x02,
    PressureAndTemperature = 0x03,
}

impl FifoFrameSel {
    /// Width in bytes of one stored frame: 3 bytes per enabled channel.
    ///
    /// A disabled FIFO stores nothing, so its width is zero; callers must
    /// not divide by this without checking.
    pub const fn frame_size(self) -> usize {
        match self {
            FifoFrameSel::Disabled => 0,
            FifoFrameSel::TemperatureOnly | FifoFrameSel::PressureOnly => 3,
            FifoFrameSel::PressureAndTemperature => 6,
        }
    }
}

/// FIFO downsampling: store every 2^n-th sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FifoDecimation {
    #[default]
    None = 0x00,
    X2 = 0x01,
    X4 = 0x02,
    X8 = 0x03,
    X16 = 0x04,
    X32 = 0x05,
    X64 = 0x06,
    X128 = 0x07,
}

/// Behavior when the FIFO buffer fills up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FifoMode {
    /// Oldest frames are overwritten
    #[default]
    Streaming = 0x00,
    /// Sampling into the FIFO stops until the host drains it
    StopOnFull = 0x01,
}

/// FIFO buffering configuration
///
/// The device only accepts FIFO register writes in standby mode;
/// [`crate::driver::BMP581::set_fifo_config`] handles the mode dance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FifoConfig {
    pub frame_sel: FifoFrameSel,
    pub decimation: FifoDecimation,
    pub mode: FifoMode,
    /// Frame count that raises the FIFO threshold interrupt, zero to
    /// disable
    pub threshold: u8,
    /// Store IIR-filtered instead of raw temperature frames
    pub filtered_temperature: bool,
    /// Store IIR-filtered instead of raw pressure frames
    pub filtered_pressure: bool,
}

/// IIR low-pass filter coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum IirFilter {
    #[default]
    Bypass = 0x00,
    Coeff1 = 0x01,
    Coeff3 = 0x02,
    Coeff7 = 0x03,
    Coeff15 = 0x04,
    Coeff31 = 0x05,
    Coeff63 = 0x06,
    Coeff127 = 0x07,
}

/// IIR filter configuration for both measurement channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IirConfig {
    pub temperature: IirFilter,
    pub pressure: IirFilter,
    /// Update the temperature shadow registers from the filtered value
    pub shadow_temperature: bool,
    /// Update the pressure shadow registers from the filtered value
    pub shadow_pressure: bool,
    /// Flush the filter state when a forced measurement is triggered
    pub flush_on_forced: bool,
}

/// Consecutive out-of-range samples required before the interrupt fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum OorCountLimit {
    #[default]
    One = 0x00,
    Three = 0x01,
    Seven = 0x02,
    Fifteen = 0x03,
}

/// Pressure out-of-range detection window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OorConfig {
    /// Center of the monitored pressure window, 17-bit raw register value
    pub threshold: u32,
    /// Half-width of the window around the threshold
    pub range: u8,
    pub count_limit: OorCountLimit,
    /// Compare the IIR-filtered value instead of the raw one
    pub use_filtered_pressure: bool,
}

/// Interrupt pin pulse behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum InterruptMode {
    #[default]
    Pulsed = 0x00,
    /// Stays asserted until the status register is read
    Latched = 0x01,
}

/// Interrupt pin polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum InterruptPolarity {
    ActiveLow = 0x00,
    #[default]
    ActiveHigh = 0x01,
}

/// Interrupt pin output driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum InterruptDrive {
    #[default]
    PushPull = 0x00,
    OpenDrain = 0x01,
}

/// Which events assert the interrupt pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterruptSources {
    pub data_ready: bool,
    pub fifo_full: bool,
    pub fifo_threshold: bool,
    pub pressure_out_of_range: bool,
}

/// Interrupt pin and source configuration, applied as one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterruptConfig {
    pub mode: InterruptMode,
    pub polarity: InterruptPolarity,
    pub drive: InterruptDrive,
    pub enable: bool,
    pub sources: InterruptSources,
}

/// Snapshot of the INT_STATUS register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterruptStatus(pub u8);

impl InterruptStatus {
    const DATA_READY: u8 = 0x01;
    const FIFO_FULL: u8 = 0x02;
    const FIFO_THRESHOLD: u8 = 0x04;
    const PRESSURE_OOR: u8 = 0x08;
    const POR_COMPLETE: u8 = 0x10;

    pub fn data_ready(self) -> bool {
        self.0 & Self::DATA_READY != 0
    }

    pub fn fifo_full(self) -> bool {
        self.0 & Self::FIFO_FULL != 0
    }

    pub fn fifo_threshold(self) -> bool {
        self.0 & Self::FIFO_THRESHOLD != 0
    }

    pub fn pressure_out_of_range(self) -> bool {
        self.0 & Self::PRESSURE_OOR != 0
    }

    /// Power-on or soft reset completed since the last status read
    pub fn reset_complete(self) -> bool {
        self.0 & Self::POR_COMPLETE != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odr_selector_round_trip() {
        for raw in 0x00..=0x1Fu8 {
            let odr = OutputDataRate::try_from(raw).unwrap();
            assert_eq!(u8::from(odr), raw);
        }
    }

    #[test]
    fn odr_selector_out_of_range() {
        for raw in 0x20..=0xFFu8 {
            assert_eq!(OutputDataRate::try_from(raw), Err(InvalidSetting));
        }
    }

    #[test]
    fn oversampling_selector_round_trip() {
        for raw in 0x00..=0x07u8 {
            let osr = Oversampling::try_from(raw).unwrap();
            assert_eq!(u8::from(osr), raw);
        }
        assert_eq!(Oversampling::try_from(0x08), Err(InvalidSetting));
    }

    #[test]
    fn power_mode_selector_round_trip() {
        for raw in 0x00..=0x04u8 {
            let mode = PowerMode::try_from(raw).unwrap();
            assert_eq!(u8::from(mode), raw);
        }
        assert_eq!(PowerMode::try_from(0x05), Err(InvalidSetting));
    }

    #[test]
    fn frame_size_per_selector() {
        assert_eq!(FifoFrameSel::Disabled.frame_size(), 0);
        assert_eq!(FifoFrameSel::TemperatureOnly.frame_size(), 3);
        assert_eq!(FifoFrameSel::PressureOnly.frame_size(), 3);
        assert_eq!(FifoFrameSel::PressureAndTemperature.frame_size(), 6);
    }

    #[test]
    fn interrupt_status_flags() {
        let status = InterruptStatus(0x05);
        assert!(status.data_ready());
        assert!(!status.fifo_full());
        assert!(status.fifo_threshold());
        assert!(!status.pressure_out_of_range());
        assert!(!status.reset_complete());
    }
}
