// Copyright (c) 2022, Zachary D. Olkin.
// This code is provided under the MIT license.

//! Polls the MPU-6050 on a Raspberry Pi Pico (RP2040) and logs every sample over RTT.
//!
//! Wiring on I2C0: SDA to GP8, SCL to GP9, AD0 to GND (address 0x68).
//!
//! `cargo run --example basic_i2c --features rtt --target thumbv6m-none-eabi`

#![deny(warnings)]
#![no_main]
#![no_std]

use cortex_m_rt::entry;
use embassy_rp::i2c::{self, I2c};
use embassy_time::Delay;
use embedded_hal::delay::DelayNs;
use mpu6050_driver::mpu6050;
use mpu6050_driver::mpu6050::i2c::MpuImu;

#[entry]
fn main() -> ! {
    let p = embassy_rp::init(Default::default());

    let mut config = i2c::Config::default();
    config.frequency = 400_000;
    let bus = I2c::new_blocking(p.I2C0, p.PIN_9, p.PIN_8, config);
    let mut delay = Delay;

    defmt::info!("MPU-6050 example - basic_i2c");

    defmt::info!("Setting up IMU...");
    let mut imu = defmt::unwrap!(MpuImu::new(bus, &mut delay));
    defmt::unwrap!(imu.set_acc_range(mpu6050::AccRange::Range4g));
    defmt::unwrap!(imu.set_filter_bandwidth(mpu6050::FilterBandwidth::BW44));

    loop {
        let data = defmt::unwrap!(imu.read_all());

        defmt::info!("Temperature reading (C): {}", data.temp);
        defmt::info!(
            "Accelerometer readings (m/s^2): X: {}, Y: {}, Z: {}",
            data.accel[0],
            data.accel[1],
            data.accel[2]
        );
        defmt::info!(
            "Gyro readings (dps): X: {}, Y: {}, Z: {}",
            data.gyro[0],
            data.gyro[1],
            data.gyro[2]
        );

        delay.delay_ms(500);
    }
}
