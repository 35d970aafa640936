//! Accelerometer sensor types
//!
//! Provides the full-scale selection and data types for the 3-axis accelerometer.

/// Accelerometer full-scale range
///
/// The discriminant is the `AFS_SEL` value programmed into `ACCEL_CONFIG[4:3]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelFullScale {
    /// ±2g range (most sensitive, least range)
    G2 = 0,
    /// ±4g range
    G4 = 1,
    /// ±8g range
    G8 = 2,
    /// ±16g range (least sensitive, most range)
    #[default]
    G16 = 3,
}

impl AccelFullScale {
    /// All selectable ranges, narrowest first
    pub const ALL: [Self; 4] = [Self::G2, Self::G4, Self::G8, Self::G16];

    /// Get the span of the range in g
    #[must_use]
    pub const fn span_g(self) -> f32 {
        match self {
            Self::G2 => 2.0,
            Self::G4 => 4.0,
            Self::G8 => 8.0,
            Self::G16 => 16.0,
        }
    }

    /// Get the scale factor in g/LSB
    ///
    /// Multiply a raw sample by this value to get acceleration in g.
    #[must_use]
    pub fn scale(self) -> f32 {
        self.span_g() / super::RAW_FULL_SCALE
    }

    /// `AFS_SEL` field value for `ACCEL_CONFIG`
    #[must_use]
    pub const fn afs_sel(self) -> u8 {
        self as u8
    }
}

/// Accelerometer data in physical units (g-force)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelDataG {
    /// X-axis acceleration in g
    pub x: f32,
    /// Y-axis acceleration in g
    pub y: f32,
    /// Z-axis acceleration in g
    pub z: f32,
}

impl AccelDataG {
    /// Create from raw sensor values
    ///
    /// # Arguments
    ///
    /// * `raw_x` - Raw X-axis value
    /// * `raw_y` - Raw Y-axis value
    /// * `raw_z` - Raw Z-axis value
    /// * `scale` - Scale factor in g/LSB (from `AccelFullScale::scale()`)
    #[must_use]
    pub fn from_raw(raw_x: i16, raw_y: i16, raw_z: i16, scale: f32) -> Self {
        Self {
            x: f32::from(raw_x) * scale,
            y: f32::from(raw_y) * scale,
            z: f32::from(raw_z) * scale,
        }
    }
}
