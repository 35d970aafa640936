//! Driver configuration
//!
//! ```
//! use mpu6x00::{AccelFullScale, DriverConfig, GyroFullScale, Variant};
//!
//! let config = DriverConfig::new()
//!     .gyro_full_scale(GyroFullScale::Dps500)
//!     .accel_full_scale(AccelFullScale::G4)
//!     .variant(Variant::Mpu6500);
//!
//! assert!(config.verify_identity);
//! ```

use crate::Variant;
use crate::sensors::{AccelFullScale, GyroFullScale};

/// Per-device configuration, fixed for the lifetime of a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverConfig {
    /// Gyroscope full-scale range
    pub gyro_full_scale: GyroFullScale,
    /// Accelerometer full-scale range
    pub accel_full_scale: AccelFullScale,
    /// Which member of the sensor family is wired up
    pub variant: Variant,
    /// Read back `WHO_AM_I` during `init()` and fail on mismatch
    ///
    /// Disabling this lets `init()` configure a device whose identity register
    /// reads differently (clones, unlisted revisions) at the cost of not
    /// detecting a missing or mis-wired sensor.
    pub verify_identity: bool,
}

impl DriverConfig {
    /// Widest ranges, MPU-6000 identity, identity verification on
    #[must_use]
    pub const fn new() -> Self {
        Self {
            gyro_full_scale: GyroFullScale::Dps2000,
            accel_full_scale: AccelFullScale::G16,
            variant: Variant::Mpu6000,
            verify_identity: true,
        }
    }

    /// Set the gyroscope full-scale range
    #[must_use]
    pub const fn gyro_full_scale(mut self, full_scale: GyroFullScale) -> Self {
        self.gyro_full_scale = full_scale;
        self
    }

    /// Set the accelerometer full-scale range
    #[must_use]
    pub const fn accel_full_scale(mut self, full_scale: AccelFullScale) -> Self {
        self.accel_full_scale = full_scale;
        self
    }

    /// Set the sensor variant
    #[must_use]
    pub const fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Enable or disable the `WHO_AM_I` check in `init()`
    #[must_use]
    pub const fn verify_identity(mut self, verify: bool) -> Self {
        self.verify_identity = verify;
        self
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::new()
    }
}
