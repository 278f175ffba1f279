// Copyright (c) 2022, Zachary D. Olkin.
// This code is provided under the MIT license.

use crate::mpu6050::bits;
use crate::mpu6050::Registers;
use crate::mpu6050::{acc_from_raw, be_words, gyro_from_raw, temp_from_raw};
use crate::mpu6050::{AccRange, AllData, ClockSource, FilterBandwidth, GyroRange};
use crate::mpu6050::{MpuConfig, MpuError};
use crate::mpu6050::{DEFAULT_ADDR, DEVICE_ID, SETTLE_MS};

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c;

const POWER_ON_ACC_RANGE: AccRange = AccRange::Range2g;
const POWER_ON_GYRO_RANGE: GyroRange = GyroRange::Range250dps;

/// The MPU IMU struct is the base of the driver. Instantiate this struct in your application code then use
/// it to interact with the IMU.
///
/// The stored ranges always match the ones last written to the device, so the scaling of every
/// reading follows the hardware.
pub struct MpuImu<BUS> {
    bus: BUS,
    addr: u8,

    acc_range: AccRange,
    gyro_range: GyroRange,
}

impl<BUS, E> MpuImu<BUS>
where
    BUS: i2c::I2c<Error = E>,
{
    /// Create and initialize a new IMU driver at the default address (0x68) with the default configuration.
    ///
    /// The I2C bus is given as `bus`. `delay` is used for the settling times after the reset
    /// and after waking the device, creating the driver blocks for about 200ms.
    pub fn new<D: DelayNs>(bus: BUS, delay: &mut D) -> Result<Self, MpuError<E>> {
        Self::new_with_config(bus, DEFAULT_ADDR, MpuConfig::default(), delay)
    }

    /// Create and initialize a new IMU driver with the default configuration.
    ///
    /// The 7-bit address is specified as `addr`
    pub fn new_with_addr<D: DelayNs>(bus: BUS, addr: u8, delay: &mut D) -> Result<Self, MpuError<E>> {
        Self::new_with_config(bus, addr, MpuConfig::default(), delay)
    }

    /// Create and initialize a new IMU driver.
    ///
    /// Checks WHO_AM_I, resets the device, writes the ranges and the DLPF from `config`, then wakes
    /// the device with the configured clock source.
    ///
    /// Returns `DeviceNotFound` without writing anything if WHO_AM_I does not match.
    /// A bus error part way through leaves the device partially configured.
    pub fn new_with_config<D: DelayNs>(
        bus: BUS,
        addr: u8,
        config: MpuConfig,
        delay: &mut D,
    ) -> Result<Self, MpuError<E>> {
        let mut imu = MpuImu {
            bus,
            addr,
            acc_range: POWER_ON_ACC_RANGE,
            gyro_range: POWER_ON_GYRO_RANGE,
        };

        let wai = imu.wai()?;
        if wai != DEVICE_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("No MPU-6050 at {=u8:#x}, WHO_AM_I: {=u8:#x}", addr, wai);
            return Err(MpuError::DeviceNotFound(wai));
        }

        imu.reset(delay)?;
        imu.set_acc_range(config.acc_range)?;
        imu.set_gyro_range(config.gyro_range)?;
        imu.set_filter_bandwidth(config.filter_bandwidth)?;
        imu.wake(config.clock_source)?;
        delay.delay_ms(SETTLE_MS);

        #[cfg(feature = "defmt")]
        defmt::info!("MPU-6050 at {=u8:#x} configured: {}", addr, config);

        Ok(imu)
    }

    /// Who Am I? Reads the wai register and reports the value.
    ///
    /// Useful for testing that the IMU is properly connected. An MPU-6050 reports 0x68.
    pub fn wai(&mut self) -> Result<u8, MpuError<E>> {
        let mut buf = [0];
        self.read_regs(Registers::Wai, &mut buf)?;
        Ok(buf[0])
    }

    // ----------------- Reset ----------------- //
    /// Resets the IMU.
    ///
    /// Every register goes back to its power on value, which leaves the device asleep with the
    /// +/-2g and +/-250dps ranges. The stored ranges follow. Call [`wake`](Self::wake) afterwards.
    /// Blocks 100ms with `delay` while the device restarts.
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), MpuError<E>> {
        let mut pwr = bits::PwrMgmt1::new(0);
        pwr.set_device_reset(true);
        self.write_reg(Registers::PwrMgmt1, pwr.raw())?;

        self.acc_range = POWER_ON_ACC_RANGE;
        self.gyro_range = POWER_ON_GYRO_RANGE;

        delay.delay_ms(SETTLE_MS);
        Ok(())
    }

    /// Wakes the IMU from sleep mode and selects the clock source.
    pub fn wake(&mut self, clock: ClockSource) -> Result<(), MpuError<E>> {
        let mut pwr = bits::PwrMgmt1::new(0);
        pwr.set_sleep(false);
        pwr.set_clksel(clock as u8);
        self.write_reg(Registers::PwrMgmt1, pwr.raw())
    }

    /// Sets the full scale range of the accelerometer.
    ///
    /// `range` is an [`AccRange`] or its raw code (0 to 3). Any other code returns `InvalidParameter`
    /// before the bus is used.
    pub fn set_acc_range<R>(&mut self, range: R) -> Result<(), MpuError<E>>
    where
        R: TryInto<AccRange>,
    {
        let range = range.try_into().map_err(|_| MpuError::InvalidParameter)?;

        let mut cfg = bits::AccelConfig::new(0);
        cfg.set_afs_sel(range as u8);
        self.write_reg(Registers::AccelConfig, cfg.raw())?;

        #[cfg(feature = "defmt")]
        defmt::trace!("Accelerometer range: {}", range);

        self.acc_range = range;
        Ok(())
    }

    /// Sets the full scale range of the gyro.
    ///
    /// `range` is a [`GyroRange`] or its raw code (0 to 3). Any other code returns `InvalidParameter`
    /// before the bus is used.
    pub fn set_gyro_range<R>(&mut self, range: R) -> Result<(), MpuError<E>>
    where
        R: TryInto<GyroRange>,
    {
        let range = range.try_into().map_err(|_| MpuError::InvalidParameter)?;

        let mut cfg = bits::GyroConfig::new(0);
        cfg.set_fs_sel(range as u8);
        self.write_reg(Registers::GyroConfig, cfg.raw())?;

        #[cfg(feature = "defmt")]
        defmt::trace!("Gyro range: {}", range);

        self.gyro_range = range;
        Ok(())
    }

    /// Configures the Digital Low Pass Filter (DLPF).
    ///
    /// `bw` is a [`FilterBandwidth`] or its raw code (0 to 6). The setting is not kept by the driver.
    pub fn set_filter_bandwidth<B>(&mut self, bw: B) -> Result<(), MpuError<E>>
    where
        B: TryInto<FilterBandwidth>,
    {
        let bw = bw.try_into().map_err(|_| MpuError::InvalidParameter)?;

        let mut cfg = bits::Config::new(0);
        cfg.set_dlpf_cfg(bw as u8);
        self.write_reg(Registers::Config, cfg.raw())?;

        #[cfg(feature = "defmt")]
        defmt::trace!("DLPF: {}", bw);

        Ok(())
    }

    /// Configure the data rate by directly modifying the sample rate divider.
    ///
    /// Sample rate = gyro output rate / (1 + `div`). The gyro output rate is 8kHz with the
    /// 260Hz DLPF setting and 1kHz otherwise.
    pub fn set_sample_rate_div(&mut self, div: u8) -> Result<(), MpuError<E>> {
        self.write_reg(Registers::SmplrtDiv, div)
    }

    /// Reads all three accelerometer values and returns them as an array.
    ///
    /// The values are in g if `as_g` is true, otherwise in m/s^2.
    pub fn read_acc(&mut self, as_g: bool) -> Result<[f32; 3], MpuError<E>> {
        let mut buf = [0; 6];
        self.read_regs(Registers::AccelOut, &mut buf)?;

        Ok(acc_from_raw(be_words(&buf), self.acc_range, as_g))
    }

    /// Reads all three gyro values and returns them as an array in dps.
    pub fn read_gyro(&mut self) -> Result<[f32; 3], MpuError<E>> {
        let mut buf = [0; 6];
        self.read_regs(Registers::GyroOut, &mut buf)?;

        Ok(gyro_from_raw(be_words(&buf), self.gyro_range))
    }

    /// Read the temperature sensor.
    ///
    /// Returns the temperature in Celsius.
    pub fn read_temp(&mut self) -> Result<f32, MpuError<E>> {
        let mut buf = [0; 2];
        self.read_regs(Registers::TempOut, &mut buf)?;

        let [raw] = be_words::<1>(&buf);
        Ok(temp_from_raw(raw))
    }

    /// Reads the accelerometer, the temperature and the gyro in one burst.
    ///
    /// Prefer this over the single reads, all channels come from the same sample and only one
    /// transaction is used. Acceleration is in m/s^2.
    pub fn read_all(&mut self) -> Result<AllData, MpuError<E>> {
        let mut buf = [0; 14];
        self.read_regs(Registers::AccelOut, &mut buf)?;

        let [ax, ay, az, t, gx, gy, gz] = be_words::<7>(&buf);
        Ok(AllData {
            accel: acc_from_raw([ax, ay, az], self.acc_range, false),
            gyro: gyro_from_raw([gx, gy, gz], self.gyro_range),
            temp: temp_from_raw(t),
        })
    }

    /// The accelerometer range the readings are scaled with.
    pub fn acc_range(&self) -> AccRange {
        self.acc_range
    }

    /// The gyro range the readings are scaled with.
    pub fn gyro_range(&self) -> GyroRange {
        self.gyro_range
    }

    /// The 7-bit address of the device.
    pub fn addr(&self) -> u8 {
        self.addr
    }

    /// Destroys the driver and gives back the bus.
    pub fn release(self) -> BUS {
        self.bus
    }

    fn read_regs(&mut self, reg: Registers, buf: &mut [u8]) -> Result<(), MpuError<E>> {
        self.bus.write_read(self.addr, &[reg.get_addr()], buf)?;
        Ok(())
    }

    fn write_reg(&mut self, reg: Registers, value: u8) -> Result<(), MpuError<E>> {
        self.bus.write(self.addr, &[reg.get_addr(), value])?;
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl<BUS> defmt::Format for MpuImu<BUS> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "MPU-6050 IMU at {=u8:#x} ({}, {})",
            self.addr,
            self.acc_range,
            self.gyro_range
        )
    }
}
