//! Gyroscope sensor types
//!
//! Provides the full-scale selection and data types for the 3-axis gyroscope.

/// Gyroscope full-scale range
///
/// The discriminant is the `FS_SEL` value programmed into `GYRO_CONFIG[4:3]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroFullScale {
    /// ±250°/s range
    Dps250 = 0,
    /// ±500°/s range
    Dps500 = 1,
    /// ±1000°/s range
    Dps1000 = 2,
    /// ±2000°/s range
    #[default]
    Dps2000 = 3,
}

impl GyroFullScale {
    /// All selectable ranges, narrowest first
    pub const ALL: [Self; 4] = [Self::Dps250, Self::Dps500, Self::Dps1000, Self::Dps2000];

    /// Get the span of the range in °/s
    #[must_use]
    pub const fn span_dps(self) -> f32 {
        match self {
            Self::Dps250 => 250.0,
            Self::Dps500 => 500.0,
            Self::Dps1000 => 1000.0,
            Self::Dps2000 => 2000.0,
        }
    }

    /// Get the scale factor in (°/s)/LSB
    ///
    /// Multiply a raw sample by this value to get degrees per second.
    #[must_use]
    pub fn scale(self) -> f32 {
        self.span_dps() / super::RAW_FULL_SCALE
    }

    /// `FS_SEL` field value for `GYRO_CONFIG`
    #[must_use]
    pub const fn fs_sel(self) -> u8 {
        self as u8
    }
}

/// Gyroscope data in degrees per second
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroDataDps {
    /// X-axis rotation rate in °/s
    pub x: f32,
    /// Y-axis rotation rate in °/s
    pub y: f32,
    /// Z-axis rotation rate in °/s
    pub z: f32,
}

impl GyroDataDps {
    /// Create from raw sensor values
    ///
    /// # Arguments
    ///
    /// * `raw_x` - Raw X-axis value
    /// * `raw_y` - Raw Y-axis value
    /// * `raw_z` - Raw Z-axis value
    /// * `scale` - Scale factor in (°/s)/LSB (from `GyroFullScale::scale()`)
    #[must_use]
    pub fn from_raw(raw_x: i16, raw_y: i16, raw_z: i16, scale: f32) -> Self {
        Self {
            x: f32::from(raw_x) * scale,
            y: f32::from(raw_y) * scale,
            z: f32::from(raw_z) * scale,
        }
    }
}
