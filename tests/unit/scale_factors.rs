//! Unit tests for full-scale ranges and derived scale factors

use crate::common::create_mock_driver;
use mpu6x00::{AccelFullScale, DriverConfig, GyroFullScale};

#[test]
fn test_gyro_scale_factors() {
    let spans = [250.0_f32, 500.0, 1000.0, 2000.0];
    for (range, span) in GyroFullScale::ALL.iter().zip(spans) {
        assert_eq!(range.span_dps(), span);
        assert_eq!(range.scale(), span / 32768.0, "{:?}", range);
    }
}

#[test]
fn test_accel_scale_factors() {
    let spans = [2.0_f32, 4.0, 8.0, 16.0];
    for (range, span) in AccelFullScale::ALL.iter().zip(spans) {
        assert_eq!(range.span_g(), span);
        assert_eq!(range.scale(), span / 32768.0, "{:?}", range);
    }
}

#[test]
fn test_defaults_are_widest_ranges() {
    let config = DriverConfig::default();
    assert_eq!(config.gyro_full_scale, GyroFullScale::Dps2000);
    assert_eq!(config.accel_full_scale, AccelFullScale::G16);
    assert!(config.verify_identity);
}

#[test]
fn test_driver_scales_fixed_at_construction() {
    for gyro in GyroFullScale::ALL {
        for accel in AccelFullScale::ALL {
            let config = DriverConfig::new()
                .gyro_full_scale(gyro)
                .accel_full_scale(accel);
            let (mut driver, interface) = create_mock_driver(config);

            assert_eq!(driver.gyro_scale(), gyro.scale());
            assert_eq!(driver.accel_scale(), accel.scale());

            // Initialization and reads leave them untouched
            driver.init(&mut interface.delay()).unwrap();
            driver.trigger_read().unwrap();
            assert_eq!(driver.gyro_scale(), gyro.scale());
            assert_eq!(driver.accel_scale(), accel.scale());
        }
    }
}

#[test]
fn test_full_scale_reading_reaches_span() {
    let config = DriverConfig::new()
        .gyro_full_scale(GyroFullScale::Dps250)
        .accel_full_scale(AccelFullScale::G2);
    let (mut driver, interface) = create_mock_driver(config);
    interface.set_accel_data(i16::MIN, 16384, 0);
    interface.set_gyro_data(i16::MIN, 16384, 0);

    driver.trigger_read().unwrap();

    assert_eq!(driver.accel().x, -2.0);
    assert_eq!(driver.accel().y, 1.0);
    assert_eq!(driver.gyro().x, -250.0);
    assert_eq!(driver.gyro().y, 125.0);
}
