//! Unit tests for identity verification during initialization

use crate::common::mock_interface::REG_WHO_AM_I;
use crate::common::test_utils::DEFAULT_INIT_WRITES;
use crate::common::{Operation, create_mock_driver};
use mpu6x00::{DriverConfig, Error, Variant, WHO_AM_I_MPU6000, WHO_AM_I_MPU6500};

/// Registers that must stay untouched after an identity mismatch
const POST_IDENTITY_REGISTERS: [u8; 5] = [0x1B, 0x1C, 0x37, 0x38, 0x1A];

#[test]
fn test_mismatch_reports_value_read() {
    let (mut driver, interface) = create_mock_driver(DriverConfig::default());
    interface.set_who_am_i(0x00);

    let result = driver.init(&mut interface.delay());

    assert!(matches!(result, Err(Error::InvalidDevice(0x00))));
}

#[test]
fn test_mismatch_stops_configuration() {
    let (mut driver, interface) = create_mock_driver(DriverConfig::default());
    interface.set_who_am_i(0xFF);

    assert!(driver.init(&mut interface.delay()).is_err());

    // Only the pre-identity writes happened
    assert_eq!(interface.writes(), DEFAULT_INIT_WRITES[..5].to_vec());
    for reg in POST_IDENTITY_REGISTERS {
        assert!(
            interface.writes().iter().all(|(address, _)| *address != reg),
            "register {:#04x} written after identity mismatch",
            reg
        );
    }

    // The identity read is the last transaction
    assert!(matches!(
        interface.operations().last(),
        Some(Operation::Read { address, .. }) if *address == REG_WHO_AM_I
    ));
}

#[test]
fn test_any_wrong_identity_fails() {
    for value in [0x00, 0x69, 0x70, 0x71, 0x98, 0xEA, 0xFF] {
        let (mut driver, interface) = create_mock_driver(DriverConfig::default());
        interface.set_who_am_i(value);

        let result = driver.init(&mut interface.delay());
        assert!(
            matches!(result, Err(Error::InvalidDevice(v)) if v == value),
            "WHO_AM_I {:#04x} accepted",
            value
        );
    }
}

#[test]
fn test_mpu6500_identity() {
    let config = DriverConfig::new().variant(Variant::Mpu6500);
    let (mut driver, interface) = create_mock_driver(config);
    interface.set_who_am_i(WHO_AM_I_MPU6500);

    driver.init(&mut interface.delay()).unwrap();
    assert_eq!(interface.writes(), DEFAULT_INIT_WRITES.to_vec());
}

#[test]
fn test_mpu6500_rejects_mpu6000_identity() {
    let config = DriverConfig::new().variant(Variant::Mpu6500);
    let (mut driver, interface) = create_mock_driver(config);
    interface.set_who_am_i(WHO_AM_I_MPU6000);

    let result = driver.init(&mut interface.delay());
    assert!(matches!(result, Err(Error::InvalidDevice(WHO_AM_I_MPU6000))));
}

#[test]
fn test_verification_disabled_skips_identity_read() {
    let config = DriverConfig::new().verify_identity(false);
    let (mut driver, interface) = create_mock_driver(config);
    interface.set_who_am_i(0x00);

    driver.init(&mut interface.delay()).unwrap();

    assert_eq!(interface.read_count(REG_WHO_AM_I), 0);
    assert_eq!(interface.writes(), DEFAULT_INIT_WRITES.to_vec());
}

#[test]
fn test_read_who_am_i() {
    let (mut driver, interface) = create_mock_driver(DriverConfig::default());
    interface.set_who_am_i(0x70);

    assert_eq!(driver.read_who_am_i().unwrap(), 0x70);
}

#[test]
fn test_failed_init_is_not_retried() {
    let (mut driver, interface) = create_mock_driver(DriverConfig::default());
    interface.set_who_am_i(0x00);

    assert!(driver.init(&mut interface.delay()).is_err());
    assert_eq!(interface.read_count(REG_WHO_AM_I), 1);
}
