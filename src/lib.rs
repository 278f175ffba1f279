// Copyright (c) 2022, Zachary D. Olkin.
// This code is provided under the MIT license.

//! Device agnostic driver for the MPU-6050 IMU (inertial measurement unit).
//! The driver depends on embedded-hal, so as long as the HAL you use implements those traits, then
//! this driver should be compatible.
//!
//! The register map for this device can be found [here](https://invensense.tdk.com/wp-content/uploads/2015/02/MPU-6000-Register-Map1.pdf).
//!
//! The MPU-6050 only speaks I2C, so the driver lives in the [`mpu6050::i2c`] module. Shared enums,
//! constants and the unit conversions live in [`mpu6050`].
//!
//! Creating the driver checks the WHO_AM_I register, resets the device and applies a known
//! configuration (+/-2g, +/-500dps, 260Hz DLPF, gyro X PLL clock). After that the ranges can be
//! changed at any time and the readings are always scaled with the range that was last written.
//!
//! You can instantiate multiple objects if you have multiple IMUs (one at 0x68, one at 0x69).
//! The driver assumes control of the bus, so either hand it a `&mut` to your bus or use
//! embedded-hal-bus to share it.
//!
//! There is no support for the FIFO, the interrupts, the auxiliary I2C master or the DMP.
//!
//! Enable the `defmt` feature for logging and `defmt::Format` impls. The `rtt` feature also links
//! defmt-rtt as the global logger and panic-probe as the panic handler for on-target builds.

#![warn(missing_docs)]
#![no_std]

#[cfg(feature = "rtt")]
use defmt_rtt as _; // global logger
#[cfg(feature = "rtt")]
use panic_probe as _;

/// Main module that holds the I2C driver.
/// Also holds the enums, constants and conversions used by the driver.
pub mod mpu6050;
