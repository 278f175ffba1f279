//! Setter validation and the registers they write

use crate::common::mock_i2c::{ACCEL_CONFIG, CONFIG, GYRO_CONFIG, PWR_MGMT_1, SMPLRT_DIV};
use crate::common::{create_mock_driver, MockDelay, MockError};
use mpu6050_driver::mpu6050::{AccRange, ClockSource, FilterBandwidth, GyroRange, MpuError};
use strum::IntoEnumIterator;

#[test]
fn test_acc_range_writes_bits_4_3() {
    let (mut imu, bus) = create_mock_driver();

    for range in AccRange::iter() {
        bus.clear_ops();
        imu.set_acc_range(range).unwrap();

        assert_eq!(bus.writes(), vec![(ACCEL_CONFIG, (range as u8) << 3)]);
        assert_eq!(imu.acc_range(), range);
    }
}

#[test]
fn test_gyro_range_writes_bits_4_3() {
    let (mut imu, bus) = create_mock_driver();

    for range in GyroRange::iter() {
        bus.clear_ops();
        imu.set_gyro_range(range).unwrap();

        assert_eq!(bus.writes(), vec![(GYRO_CONFIG, (range as u8) << 3)]);
        assert_eq!(imu.gyro_range(), range);
    }
}

#[test]
fn test_raw_range_codes_are_accepted() {
    let (mut imu, bus) = create_mock_driver();

    imu.set_acc_range(3u8).unwrap();
    imu.set_gyro_range(2u8).unwrap();

    assert_eq!(imu.acc_range(), AccRange::Range16g);
    assert_eq!(imu.gyro_range(), GyroRange::Range1000dps);
    assert_eq!(bus.register(ACCEL_CONFIG), 0x18);
    assert_eq!(bus.register(GYRO_CONFIG), 0x10);
}

#[test]
fn test_invalid_acc_range_touches_nothing() {
    let (mut imu, bus) = create_mock_driver();
    imu.set_acc_range(AccRange::Range8g).unwrap();
    bus.clear_ops();

    let result = imu.set_acc_range(5u8);

    assert_eq!(result, Err(MpuError::InvalidParameter));
    assert!(bus.ops().is_empty());
    assert_eq!(imu.acc_range(), AccRange::Range8g);
    assert_eq!(bus.register(ACCEL_CONFIG), 0x10);
}

#[test]
fn test_invalid_gyro_range_touches_nothing() {
    let (mut imu, bus) = create_mock_driver();

    for code in [4u8, 8, 0x18, 0xFF] {
        assert_eq!(imu.set_gyro_range(code), Err(MpuError::InvalidParameter));
    }

    assert!(bus.ops().is_empty());
    assert_eq!(imu.gyro_range(), GyroRange::Range500dps);
}

#[test]
fn test_filter_bandwidth_codes() {
    let (mut imu, bus) = create_mock_driver();

    for code in 0..=6u8 {
        bus.clear_ops();
        imu.set_filter_bandwidth(code).unwrap();
        assert_eq!(bus.writes(), vec![(CONFIG, code)]);
    }

    imu.set_filter_bandwidth(FilterBandwidth::BW44).unwrap();
    assert_eq!(bus.register(CONFIG), 3);
}

#[test]
fn test_invalid_filter_bandwidth_touches_nothing() {
    let (mut imu, bus) = create_mock_driver();

    assert_eq!(imu.set_filter_bandwidth(7u8), Err(MpuError::InvalidParameter));
    assert_eq!(imu.set_filter_bandwidth(200u8), Err(MpuError::InvalidParameter));
    assert!(bus.ops().is_empty());
}

#[test]
fn test_failed_write_keeps_stored_range() {
    let (mut imu, bus) = create_mock_driver();
    bus.fail_writes_to(Some(ACCEL_CONFIG));

    let result = imu.set_acc_range(AccRange::Range16g);

    assert_eq!(result, Err(MpuError::BusError(MockError::Injected)));
    assert_eq!(imu.acc_range(), AccRange::Range2g);
    assert_eq!(bus.register(ACCEL_CONFIG), 0x00);

    bus.fail_writes_to(None);
    imu.set_acc_range(AccRange::Range16g).unwrap();
    assert_eq!(imu.acc_range(), AccRange::Range16g);
}

#[test]
fn test_failed_gyro_write_keeps_stored_range() {
    let (mut imu, bus) = create_mock_driver();
    bus.fail_writes_to(Some(GYRO_CONFIG));

    assert!(imu.set_gyro_range(GyroRange::Range250dps).is_err());
    assert_eq!(imu.gyro_range(), GyroRange::Range500dps);
}

#[test]
fn test_sample_rate_div() {
    let (mut imu, bus) = create_mock_driver();

    imu.set_sample_rate_div(7).unwrap();

    assert_eq!(bus.writes(), vec![(SMPLRT_DIV, 7)]);
}

#[test]
fn test_reset_writes_reset_bit_and_waits() {
    let (mut imu, bus) = create_mock_driver();
    let mut delay = MockDelay::new();

    imu.reset(&mut delay).unwrap();

    assert_eq!(bus.writes(), vec![(PWR_MGMT_1, 0x80)]);
    assert_eq!(delay.total_ms(), 100);
    // back to sleep with power on configuration
    assert_eq!(bus.register(PWR_MGMT_1), 0x40);
    assert_eq!(bus.register(GYRO_CONFIG), 0x00);
    assert_eq!(imu.acc_range(), AccRange::Range2g);
    assert_eq!(imu.gyro_range(), GyroRange::Range250dps);
}

#[test]
fn test_wake_selects_clock() {
    let (mut imu, bus) = create_mock_driver();

    imu.wake(ClockSource::Internal8MHz).unwrap();
    imu.wake(ClockSource::PllExt19MHz).unwrap();

    assert_eq!(bus.writes(), vec![(PWR_MGMT_1, 0x00), (PWR_MGMT_1, 0x05)]);
}
