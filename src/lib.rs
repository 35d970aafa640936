#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod device;
pub mod interface;
pub mod registers;
pub mod sample;
pub mod sensors;

// Re-export main types
pub use config::DriverConfig;
pub use device::{AccelData, GyroData, Mpu6x00Driver};
pub use interface::{
    BitOrder, BusConfig, BusSpeed, ChipSelectControl, FULL_CLOCK_HZ, FixedClock, INIT_CLOCK_HZ,
    SpeedControl, SpiError, SpiInterface, SpiSettings,
};
pub use sample::{RAW_SAMPLE_LEN, RawSample};
pub use sensors::{AccelDataG, AccelFullScale, GyroDataDps, GyroFullScale};

/// Expected value of `WHO_AM_I` on the MPU-6000
pub const WHO_AM_I_MPU6000: u8 = 0x68;

/// Expected value of `WHO_AM_I` on the MPU-6500
pub const WHO_AM_I_MPU6500: u8 = 0x70;

/// Member of the sensor family
///
/// Both parts share the SPI register map used by this driver. They differ in
/// the identity register and in the temperature sensor transfer function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// MPU-6000 (SPI-capable sibling of the MPU-6050)
    #[default]
    Mpu6000,
    /// MPU-6500
    Mpu6500,
}

impl Variant {
    /// Expected `WHO_AM_I` value
    #[must_use]
    pub const fn who_am_i(self) -> u8 {
        match self {
            Self::Mpu6000 => WHO_AM_I_MPU6000,
            Self::Mpu6500 => WHO_AM_I_MPU6500,
        }
    }

    /// Convert a raw temperature reading to degrees Celsius
    #[must_use]
    pub fn temperature_to_celsius(self, raw: i16) -> f32 {
        match self {
            // Datasheet: Temp_degC = TEMP_OUT / 340 + 36.53
            Self::Mpu6000 => f32::from(raw) / 340.0 + 36.53,
            // Datasheet: Temp_degC = (TEMP_OUT - RoomTemp_Offset) / 333.87 + 21
            Self::Mpu6500 => f32::from(raw) / 333.87 + 21.0,
        }
    }
}

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Invalid `WHO_AM_I` register value (contains the actual value read)
    InvalidDevice(u8),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
