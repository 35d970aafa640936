//! Raw sample buffer filled by a burst read
//!
//! One burst transaction returns 15 bytes. Byte 0 is clocked in while the
//! address byte goes out and carries no data, so the interface discards it and
//! it stays zero in samples filled by the driver. The remaining 14 bytes mirror
//! registers `0x3B..=0x48` in ascending order:
//!
//! | Offset | Content |
//! |--------|---------|
//! | 0      | framing (discarded) |
//! | 1..=6  | accelerometer X, Y, Z (big-endian `i16`) |
//! | 7..=8  | temperature (big-endian `i16`) |
//! | 9..=14 | gyroscope X, Y, Z (big-endian `i16`) |

use crate::device::{AccelData, GyroData};
use crate::registers::SENSOR_DATA_LEN;

/// Size of the burst buffer, including the framing byte
pub const RAW_SAMPLE_LEN: usize = SENSOR_DATA_LEN + 1;

const ACCEL_OFFSET: usize = 1;
const TEMP_OFFSET: usize = 7;
const GYRO_OFFSET: usize = 9;

/// Snapshot of one burst read
///
/// Decoding is pure: every accessor re-reads the same bytes and returns
/// values, so a copy stays valid after the driver's next read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    bytes: [u8; RAW_SAMPLE_LEN],
}

impl RawSample {
    /// Wrap a full burst buffer (framing byte included)
    #[must_use]
    pub const fn from_bytes(bytes: [u8; RAW_SAMPLE_LEN]) -> Self {
        Self { bytes }
    }

    /// The underlying burst buffer
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; RAW_SAMPLE_LEN] {
        &self.bytes
    }

    /// The 14 data bytes following the framing byte
    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[1..]
    }

    /// Raw accelerometer triple
    #[must_use]
    pub const fn accel(&self) -> AccelData {
        AccelData {
            x: self.word(ACCEL_OFFSET),
            y: self.word(ACCEL_OFFSET + 2),
            z: self.word(ACCEL_OFFSET + 4),
        }
    }

    /// Raw gyroscope triple
    #[must_use]
    pub const fn gyro(&self) -> GyroData {
        GyroData {
            x: self.word(GYRO_OFFSET),
            y: self.word(GYRO_OFFSET + 2),
            z: self.word(GYRO_OFFSET + 4),
        }
    }

    /// Raw temperature reading
    #[must_use]
    pub const fn temperature(&self) -> i16 {
        self.word(TEMP_OFFSET)
    }

    const fn word(&self, offset: usize) -> i16 {
        i16::from_be_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }
}
