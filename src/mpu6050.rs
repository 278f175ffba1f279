// Copyright (c) 2022, Zachary D. Olkin.
// This code is provided under the MIT license.

/// The i2c module holds the driver implementation. The MPU-6050 has no SPI interface.
pub mod i2c;

/// Bit layouts of the configuration registers the driver writes.
pub mod bits;

use strum::{EnumIter, FromRepr};

/// 7-bit I2C address with the AD0 pin pulled low (the usual breakout board wiring).
pub const DEFAULT_ADDR: u8 = 0x68;
/// 7-bit I2C address with the AD0 pin pulled high.
pub const ALT_ADDR: u8 = 0x69;
/// Value of the WHO_AM_I register. It does not follow the AD0 pin.
pub const DEVICE_ID: u8 = 0x68;

/// Standard gravity in m/s^2, used to turn g into m/s^2.
pub const GRAVITY: f32 = 9.806_65;

const ACCEL_SEN_0: f32 = 16_384.0;
const ACCEL_SEN_1: f32 = 8_192.0;
const ACCEL_SEN_2: f32 = 4_096.0;
const ACCEL_SEN_3: f32 = 2_048.0;

const GYRO_SEN_0: f32 = 131.0;
const GYRO_SEN_1: f32 = 65.5;
const GYRO_SEN_2: f32 = 32.8;
const GYRO_SEN_3: f32 = 16.4;

const TEMP_SEN: f32 = 340.0;
const TEMP_OFFSET: f32 = 36.53;

/// Settling time after a reset and after waking the device.
const SETTLE_MS: u32 = 100;

/// Accelerometer full scale range options as specified in the data sheet in g's.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromRepr, EnumIter)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccRange {
    /// +/-2g
    Range2g = 0,
    /// +/-4g
    Range4g = 1,
    /// +/-8g
    Range8g = 2,
    /// +/-16g
    Range16g = 3,
}

/// Gyro full scale range options as specified in the data sheet in degrees per second (dps).
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromRepr, EnumIter)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
    /// +/-250 dps
    Range250dps = 0,
    /// +/-500 dps
    Range500dps = 1,
    /// +/-1000 dps
    Range1000dps = 2,
    /// +/-2000 dps
    Range2000dps = 3,
}

/// Digital Low Pass Filter (DLPF) options. The DLPF is shared by the accelerometer and the gyro.
/// The names are the accelerometer 3DB BW, the gyro BW of each setting is within a few Hz.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromRepr, EnumIter)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterBandwidth {
    /// 260Hz 3DB BW
    BW260 = 0,
    /// 184Hz 3DB BW
    BW184 = 1,
    /// 94Hz 3DB BW
    BW94 = 2,
    /// 44Hz 3DB BW
    BW44 = 3,
    /// 21Hz 3DB BW
    BW21 = 4,
    /// 10Hz 3DB BW
    BW10 = 5,
    /// 5Hz 3DB BW
    BW5 = 6,
}

/// Clock sources selectable in PWR_MGMT_1.
///
/// The data sheet recommends one of the gyro PLLs over the internal oscillator.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromRepr, EnumIter)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// Internal 8MHz oscillator
    Internal8MHz = 0,
    /// PLL with X axis gyroscope reference
    PllGyroX = 1,
    /// PLL with Y axis gyroscope reference
    PllGyroY = 2,
    /// PLL with Z axis gyroscope reference
    PllGyroZ = 3,
    /// PLL with external 32.768kHz reference
    PllExt32kHz = 4,
    /// PLL with external 19.2MHz reference
    PllExt19MHz = 5,
    /// Stops the clock and keeps the timing generator in reset
    Stopped = 7,
}

impl AccRange {
    /// Sensitivity in LSB/g.
    pub const fn sensitivity(self) -> f32 {
        match self {
            AccRange::Range2g => ACCEL_SEN_0,
            AccRange::Range4g => ACCEL_SEN_1,
            AccRange::Range8g => ACCEL_SEN_2,
            AccRange::Range16g => ACCEL_SEN_3,
        }
    }
}

impl GyroRange {
    /// Sensitivity in LSB/dps.
    pub const fn sensitivity(self) -> f32 {
        match self {
            GyroRange::Range250dps => GYRO_SEN_0,
            GyroRange::Range500dps => GYRO_SEN_1,
            GyroRange::Range1000dps => GYRO_SEN_2,
            GyroRange::Range2000dps => GYRO_SEN_3,
        }
    }
}

/// A raw value that does not correspond to any option of the target enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidValue(pub u8);

impl TryFrom<u8> for AccRange {
    type Error = InvalidValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        AccRange::from_repr(value).ok_or(InvalidValue(value))
    }
}

impl TryFrom<u8> for GyroRange {
    type Error = InvalidValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        GyroRange::from_repr(value).ok_or(InvalidValue(value))
    }
}

impl TryFrom<u8> for FilterBandwidth {
    type Error = InvalidValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        FilterBandwidth::from_repr(value).ok_or(InvalidValue(value))
    }
}

impl TryFrom<u8> for ClockSource {
    type Error = InvalidValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ClockSource::from_repr(value).ok_or(InvalidValue(value))
    }
}

/// Configuration applied when the driver is created.
///
/// `MpuConfig::default()` is what [`i2c::MpuImu::new`] uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MpuConfig {
    /// Accelerometer full scale range
    pub acc_range: AccRange,
    /// Gyro full scale range
    pub gyro_range: GyroRange,
    /// DLPF setting
    pub filter_bandwidth: FilterBandwidth,
    /// Clock source selected when the device is woken up
    pub clock_source: ClockSource,
}

impl Default for MpuConfig {
    fn default() -> Self {
        MpuConfig {
            acc_range: AccRange::Range2g,
            gyro_range: GyroRange::Range500dps,
            filter_bandwidth: FilterBandwidth::BW260,
            clock_source: ClockSource::PllGyroX,
        }
    }
}

/// Every channel of the IMU from a single burst read.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AllData {
    /// Acceleration in m/s^2, order: x, y, z
    pub accel: [f32; 3],
    /// Angular rate in dps, order: x, y, z
    pub gyro: [f32; 3],
    /// Die temperature in Celsius
    pub temp: f32,
}

/// The possible errors that the driver can return.
///
/// The `BusError` option is for when a HAL function using the I2C bus fails.
/// This may be caused by a number of reasons. For example, using the wrong 7-bit address will cause a bus error.
///
/// `DeviceNotFound` holds the value read from WHO_AM_I when it is not the MPU-6050 id.
///
/// `InvalidParameter` is for when an input to a driver function is unacceptable. It is always
/// returned before the bus is touched.
#[derive(Debug, PartialEq, Eq)]
pub enum MpuError<E> {
    /// An error occurred when using the bus
    BusError(E),
    /// The device did not identify itself as an MPU-6050
    DeviceNotFound(u8),
    /// An invalid input was passed to the function
    InvalidParameter,
}

impl<E> From<E> for MpuError<E> {
    fn from(error: E) -> Self {
        MpuError::BusError(error)
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for MpuError<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            MpuError::BusError(_) => defmt::write!(fmt, "Bus Error!"),
            MpuError::DeviceNotFound(id) => {
                defmt::write!(fmt, "No MPU-6050 found, WHO_AM_I read {=u8:#x}", *id)
            }
            MpuError::InvalidParameter => defmt::write!(fmt, "Invalid input in the function!"),
        }
    }
}

#[derive(Clone, Copy)]
enum Registers {
    SmplrtDiv,
    Config,
    GyroConfig,
    AccelConfig,
    AccelOut,
    TempOut,
    GyroOut,
    PwrMgmt1,
    Wai,
}

impl Registers {
    fn get_addr(&self) -> u8 {
        match *self {
            Registers::SmplrtDiv => 0x19,
            Registers::Config => 0x1A,
            Registers::GyroConfig => 0x1B,
            Registers::AccelConfig => 0x1C,
            Registers::AccelOut => 0x3B,
            Registers::TempOut => 0x41,
            Registers::GyroOut => 0x43,
            Registers::PwrMgmt1 => 0x6B,
            Registers::Wai => 0x75,
        }
    }
}

/// Splits a burst read into big endian i16 words.
fn be_words<const N: usize>(bytes: &[u8]) -> [i16; N] {
    let mut words = [0; N];
    for (word, pair) in words.iter_mut().zip(bytes.chunks_exact(2)) {
        *word = i16::from_be_bytes([pair[0], pair[1]]);
    }
    words
}

fn acc_from_raw(raw: [i16; 3], range: AccRange, as_g: bool) -> [f32; 3] {
    let unit = if as_g { 1.0 } else { GRAVITY };
    raw.map(|v| v as f32 / range.sensitivity() * unit)
}

fn gyro_from_raw(raw: [i16; 3], range: GyroRange) -> [f32; 3] {
    raw.map(|v| v as f32 / range.sensitivity())
}

fn temp_from_raw(raw: i16) -> f32 {
    raw as f32 / TEMP_SEN + TEMP_OFFSET
}
