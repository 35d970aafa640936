//! Register definitions for the MPU-6000 / MPU-6500
//!
//! Only the registers touched by the power-up sequence are declared here. The
//! sensor data block (`ACCEL_XOUT_H` through `GYRO_ZOUT_L`) is read as a single
//! burst through the bus interface, see [`ACCEL_XOUT_H`] and
//! [`crate::sample::RawSample`].
//!
//! Both family members share this register map in SPI mode. They only differ
//! in the `WHO_AM_I` value and the temperature sensor transfer function.

/// First register of the 14-byte sensor data block (accel, temperature, gyro)
pub const ACCEL_XOUT_H: u8 = 0x3B;

/// Length of the sensor data block in bytes
pub const SENSOR_DATA_LEN: usize = 14;

/// Bit set in the address byte of every SPI read transaction
pub const SPI_READ_FLAG: u8 = 0x80;

device_driver::create_device!(
    device_name: Mpu6x00,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// SMPLRT_DIV - Sample Rate Divider (0x19)
        ///
        /// Sample rate = gyroscope output rate / (1 + divider)
        register SmplrtDiv {
            const ADDRESS = 0x19;
            const SIZE_BITS = 8;

            smplrt_div: uint = 0..8,
        },

        /// CONFIG - Frame sync and digital low-pass filter (0x1A)
        register DlpfConfig {
            const ADDRESS = 0x1A;
            const SIZE_BITS = 8;

            /// Digital low-pass filter setting (0 = widest bandwidth)
            dlpf_cfg: uint = 0..3,
            /// FSYNC pin sampling location
            ext_sync_set: uint = 3..6,
            reserved_7_6: uint = 6..8,
        },

        /// GYRO_CONFIG - Gyroscope full-scale selection (0x1B)
        register GyroConfig {
            const ADDRESS = 0x1B;
            const SIZE_BITS = 8;

            reserved_2_0: uint = 0..3,
            /// Full scale select (±250, ±500, ±1000, ±2000 dps)
            fs_sel: uint = 3..5,
            /// Per-axis self-test enables (Z, Y, X)
            self_test: uint = 5..8,
        },

        /// ACCEL_CONFIG - Accelerometer full-scale selection (0x1C)
        register AccelConfig {
            const ADDRESS = 0x1C;
            const SIZE_BITS = 8;

            reserved_2_0: uint = 0..3,
            /// Full scale select (±2, ±4, ±8, ±16 g)
            afs_sel: uint = 3..5,
            /// Per-axis self-test enables (Z, Y, X)
            self_test: uint = 5..8,
        },

        /// INT_PIN_CFG - Interrupt pin electrical configuration (0x37)
        register IntPinCfg {
            const ADDRESS = 0x37;
            const SIZE_BITS = 8;

            reserved_0: uint = 0..1,
            /// Auxiliary I2C bypass
            bypass_en: bool = 1,
            /// FSYNC acts as an interrupt input
            fsync_int_en: bool = 2,
            /// FSYNC active low
            fsync_int_level: bool = 3,
            /// Clear interrupt status on any register read
            int_rd_clear: bool = 4,
            /// Latch the INT pin until cleared
            latch_int_en: bool = 5,
            /// INT pin open drain (push-pull when clear)
            int_open: bool = 6,
            /// INT pin active low
            int_level: bool = 7,
        },

        /// INT_ENABLE - Interrupt sources (0x38)
        register IntEnable {
            const ADDRESS = 0x38;
            const SIZE_BITS = 8;

            /// Raw data ready interrupt
            data_rdy_en: bool = 0,
            reserved_7_1: uint = 1..8,
        },

        /// USER_CTRL - User Control (0x6A)
        register UserCtrl {
            const ADDRESS = 0x6A;
            const SIZE_BITS = 8;

            reserved_3_0: uint = 0..4,
            /// Disable the I2C slave interface, SPI only
            i2c_if_dis: bool = 4,
            reserved_7_5: uint = 5..8,
        },

        /// PWR_MGMT_1 - Power Management 1 (0x6B)
        register PwrMgmt1 {
            const ADDRESS = 0x6B;
            const SIZE_BITS = 8;

            /// Clock source select (3 = PLL with Z-axis gyroscope reference)
            clksel: uint = 0..3,
            /// Temperature sensor disable
            temp_dis: bool = 3,
            reserved_4: uint = 4..5,
            /// Cycle between sleep and a single sample
            cycle: bool = 5,
            /// Sleep mode enable
            sleep: bool = 6,
            /// Device reset
            device_reset: bool = 7,
        },

        /// PWR_MGMT_2 - Per-axis standby (0x6C)
        register PwrMgmt2 {
            const ADDRESS = 0x6C;
            const SIZE_BITS = 8;

            /// Gyroscope Z-axis standby
            stby_zg: bool = 0,
            /// Gyroscope Y-axis standby
            stby_yg: bool = 1,
            /// Gyroscope X-axis standby
            stby_xg: bool = 2,
            /// Accelerometer Z-axis standby
            stby_za: bool = 3,
            /// Accelerometer Y-axis standby
            stby_ya: bool = 4,
            /// Accelerometer X-axis standby
            stby_xa: bool = 5,
            /// Low-power wake-up frequency
            lp_wake_ctrl: uint = 6..8,
        },

        /// WHO_AM_I - Device ID (0x75)
        ///
        /// 0x68 on the MPU-6000, 0x70 on the MPU-6500
        register WhoAmI {
            const ADDRESS = 0x75;
            const SIZE_BITS = 8;

            who_am_i: uint = 0..8,
        },
    }
);
