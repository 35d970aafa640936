//! Sensor modules for the MPU-6000 / MPU-6500
//!
//! This module provides full-scale selections and physical-unit data types for:
//! - Accelerometer (3-axis)
//! - Gyroscope (3-axis)
//!
//! All sensor operations are performed through methods on `Mpu6x00Driver`.

pub mod accelerometer;
pub mod gyroscope;

// Re-export main types
pub use accelerometer::{AccelDataG, AccelFullScale};
pub use gyroscope::{GyroDataDps, GyroFullScale};

/// Raw count corresponding to the full-scale span (2^15)
pub(crate) const RAW_FULL_SCALE: f32 = 32768.0;
