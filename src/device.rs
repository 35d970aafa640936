//! High-level driver API for the MPU-6000 / MPU-6500
//!
//! This module provides the polled acquisition loop for the sensor:
//! configure once with [`Mpu6x00Driver::init`], then alternate
//! [`Mpu6x00Driver::trigger_read`] with any number of decode calls.
//!
//! ```ignore
//! let mut imu = Mpu6x00Driver::new(SpiInterface::new(&mut spi, cs), DriverConfig::default());
//! imu.init(&mut delay)?;
//!
//! loop {
//!     imu.trigger_read()?;
//!     let accel = imu.accel();
//!     let gyro = imu.gyro();
//! }
//! ```

use crate::config::DriverConfig;
use crate::interface::{BusSpeed, ChipSelectControl, SpeedControl};
use crate::registers::{ACCEL_XOUT_H, Mpu6x00 as RegisterDevice, SENSOR_DATA_LEN};
use crate::sample::RawSample;
use crate::sensors::{AccelDataG, GyroDataDps};
use crate::Error;

// Only import RegisterInterface when not using async feature
#[cfg(not(feature = "async"))]
use device_driver::RegisterInterface;

/// `PWR_MGMT_1.CLKSEL`: PLL with Z-axis gyroscope reference
const CLKSEL_PLL_GYRO_Z: u8 = 3;

/// Settle time after a device reset
const RESET_DELAY_MS: u32 = 100;

/// Settle time after selecting the clock source
const CLOCK_SETTLE_US: u32 = 7;

/// Settle time after each configuration write
const WRITE_SETTLE_US: u32 = 15;

/// Settle time after the final filter write
const FILTER_SETTLE_US: u32 = 1;

/// Size of the sensor data block in bits
const SENSOR_DATA_BITS: u32 = SENSOR_DATA_LEN as u32 * 8;

/// Accelerometer data (raw 16-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelData {
    /// X-axis acceleration (raw)
    pub x: i16,
    /// Y-axis acceleration (raw)
    pub y: i16,
    /// Z-axis acceleration (raw)
    pub z: i16,
}

/// Gyroscope data (raw 16-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroData {
    /// X-axis rotation (raw)
    pub x: i16,
    /// Y-axis rotation (raw)
    pub y: i16,
    /// Z-axis rotation (raw)
    pub z: i16,
}

/// Main driver for the MPU-6000 / MPU-6500
pub struct Mpu6x00Driver<I> {
    device: RegisterDevice<I>,
    config: DriverConfig,
    // Derived from the configured ranges, fixed for the driver's lifetime
    gyro_scale: f32,
    accel_scale: f32,
    sample: RawSample,
}

impl<I> Mpu6x00Driver<I> {
    /// Create a new driver instance
    ///
    /// Computes the scale factors for the configured ranges. No bus traffic
    /// happens here; call `init()` before the first read.
    pub fn new(interface: I, config: DriverConfig) -> Self {
        Self {
            device: RegisterDevice::new(interface),
            gyro_scale: config.gyro_full_scale.scale(),
            accel_scale: config.accel_full_scale.scale(),
            config,
            sample: RawSample::default(),
        }
    }

    /// Configuration the driver was created with
    pub const fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Gyroscope scale factor in (°/s)/LSB
    pub const fn gyro_scale(&self) -> f32 {
        self.gyro_scale
    }

    /// Accelerometer scale factor in g/LSB
    pub const fn accel_scale(&self) -> f32 {
        self.accel_scale
    }

    /// Raw accelerometer values from the last burst read
    #[must_use]
    pub const fn accel_raw(&self) -> AccelData {
        self.sample.accel()
    }

    /// Raw gyroscope values from the last burst read
    #[must_use]
    pub const fn gyro_raw(&self) -> GyroData {
        self.sample.gyro()
    }

    /// Acceleration in g from the last burst read
    #[must_use]
    pub fn accel(&self) -> AccelDataG {
        let raw = self.accel_raw();
        AccelDataG::from_raw(raw.x, raw.y, raw.z, self.accel_scale)
    }

    /// Angular rate in °/s from the last burst read
    #[must_use]
    pub fn gyro(&self) -> GyroDataDps {
        let raw = self.gyro_raw();
        GyroDataDps::from_raw(raw.x, raw.y, raw.z, self.gyro_scale)
    }

    /// Raw temperature from the last burst read
    #[must_use]
    pub const fn temperature_raw(&self) -> i16 {
        self.sample.temperature()
    }

    /// Die temperature in °C from the last burst read
    #[must_use]
    pub fn temperature_celsius(&self) -> f32 {
        self.config
            .variant
            .temperature_to_celsius(self.temperature_raw())
    }

    /// Copy of the last burst read
    ///
    /// All zeros until the first successful `trigger_read()`.
    #[must_use]
    pub const fn raw_sample(&self) -> RawSample {
        self.sample
    }

    /// Direct access to the bus interface (for advanced usage)
    pub fn interface(&mut self) -> &mut I {
        &mut self.device.interface
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }
}

#[cfg(not(feature = "async"))]
impl<I> Mpu6x00Driver<I>
where
    I: RegisterInterface<AddressType = u8> + SpeedControl,
    I: ChipSelectControl<<I as RegisterInterface>::Error>,
{
    /// Initialize the device
    ///
    /// Deasserts chip select, then resets the sensor, selects the gyro PLL clock, switches it to SPI-only
    /// operation, verifies `WHO_AM_I` (unless disabled in the configuration)
    /// and programs the full-scale ranges, the data-ready interrupt and the
    /// low-pass filter. Runs entirely at the reduced initialization clock.
    ///
    /// The settle delays between writes are required by the device and
    /// account for roughly 100 ms in total.
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay provider implementing `embedded_hal::delay::DelayNs`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - The `WHO_AM_I` register contains an unexpected value. In that case no
    ///   range, interrupt or filter register has been written.
    pub fn init<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.device.interface.deselect()?;
        self.device.interface.set_speed(BusSpeed::Init);

        self.device.pwr_mgmt_1().write(|w| {
            w.set_device_reset(true);
        })?;
        delay.delay_ms(RESET_DELAY_MS);

        self.device.pwr_mgmt_1().write(|w| {
            w.set_clksel(CLKSEL_PLL_GYRO_Z);
        })?;
        delay.delay_us(CLOCK_SETTLE_US);

        self.device.user_ctrl().write(|w| {
            w.set_i_2_c_if_dis(true);
        })?;
        delay.delay_us(WRITE_SETTLE_US);

        self.device.pwr_mgmt_2().write(|w| {
            w.set_stby_xa(false);
            w.set_stby_ya(false);
            w.set_stby_za(false);
            w.set_stby_xg(false);
            w.set_stby_yg(false);
            w.set_stby_zg(false);
        })?;
        delay.delay_us(WRITE_SETTLE_US);

        self.device.smplrt_div().write(|w| {
            w.set_smplrt_div(0);
        })?;
        delay.delay_us(WRITE_SETTLE_US);

        if self.config.verify_identity {
            let who_am_i = self.read_who_am_i()?;
            let expected = self.config.variant.who_am_i();
            if who_am_i != expected {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "WHO_AM_I mismatch: read {=u8:#x}, expected {=u8:#x}",
                    who_am_i,
                    expected
                );
                return Err(Error::InvalidDevice(who_am_i));
            }
        }

        let fs_sel = self.config.gyro_full_scale.fs_sel();
        self.device.gyro_config().write(|w| {
            w.set_fs_sel(fs_sel);
        })?;
        delay.delay_us(WRITE_SETTLE_US);

        let afs_sel = self.config.accel_full_scale.afs_sel();
        self.device.accel_config().write(|w| {
            w.set_afs_sel(afs_sel);
        })?;
        delay.delay_us(WRITE_SETTLE_US);

        // Active high, push-pull, status cleared by any read
        self.device.int_pin_cfg().write(|w| {
            w.set_int_rd_clear(true);
        })?;
        delay.delay_us(WRITE_SETTLE_US);

        self.device.int_enable().write(|w| {
            w.set_data_rdy_en(true);
        })?;
        delay.delay_us(WRITE_SETTLE_US);

        self.device.dlpf_config().write(|w| {
            w.set_dlpf_cfg(0);
        })?;
        delay.delay_us(FILTER_SETTLE_US);

        #[cfg(feature = "defmt")]
        defmt::debug!("MPU-6x00 initialized: {}", self.config);

        Ok(())
    }

    /// Read the `WHO_AM_I` register at the initialization clock rate
    ///
    /// Should return 0x68 for an MPU-6000 and 0x70 for an MPU-6500.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_who_am_i(&mut self) -> Result<u8, Error<I::Error>> {
        self.device.interface.set_speed(BusSpeed::Init);
        let reg = self.device.who_am_i().read()?;
        Ok(reg.who_am_i())
    }

    /// Burst-read accelerometer, temperature and gyroscope data
    ///
    /// One transaction at the full clock rate captures all channels from the
    /// same sampling instant. The result is kept until the next call and can
    /// be decoded with `accel()`, `gyro()` and friends.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The sample
    /// buffer may then hold a partial transfer.
    pub fn trigger_read(&mut self) -> Result<(), Error<I::Error>> {
        self.device.interface.set_speed(BusSpeed::Full);
        self.device
            .interface
            .read_register(ACCEL_XOUT_H, SENSOR_DATA_BITS, self.sample.data_mut())?;
        Ok(())
    }
}

#[cfg(feature = "async")]
impl<I> Mpu6x00Driver<I>
where
    I: device_driver::AsyncRegisterInterface<AddressType = u8> + SpeedControl,
    I: ChipSelectControl<<I as device_driver::AsyncRegisterInterface>::Error>,
{
    /// Initialize the device
    ///
    /// Same sequence and settle delays as the blocking version.
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay provider implementing `embedded_hal_async::delay::DelayNs`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - The `WHO_AM_I` register contains an unexpected value. In that case no
    ///   range, interrupt or filter register has been written.
    pub async fn init<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.device.interface.deselect()?;
        self.device.interface.set_speed(BusSpeed::Init);

        self.device
            .pwr_mgmt_1()
            .write_async(|w| {
                w.set_device_reset(true);
            })
            .await?;
        delay.delay_ms(RESET_DELAY_MS).await;

        self.device
            .pwr_mgmt_1()
            .write_async(|w| {
                w.set_clksel(CLKSEL_PLL_GYRO_Z);
            })
            .await?;
        delay.delay_us(CLOCK_SETTLE_US).await;

        self.device
            .user_ctrl()
            .write_async(|w| {
                w.set_i_2_c_if_dis(true);
            })
            .await?;
        delay.delay_us(WRITE_SETTLE_US).await;

        self.device
            .pwr_mgmt_2()
            .write_async(|w| {
                w.set_stby_xa(false);
                w.set_stby_ya(false);
                w.set_stby_za(false);
                w.set_stby_xg(false);
                w.set_stby_yg(false);
                w.set_stby_zg(false);
            })
            .await?;
        delay.delay_us(WRITE_SETTLE_US).await;

        self.device
            .smplrt_div()
            .write_async(|w| {
                w.set_smplrt_div(0);
            })
            .await?;
        delay.delay_us(WRITE_SETTLE_US).await;

        if self.config.verify_identity {
            let who_am_i = self.read_who_am_i().await?;
            let expected = self.config.variant.who_am_i();
            if who_am_i != expected {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "WHO_AM_I mismatch: read {=u8:#x}, expected {=u8:#x}",
                    who_am_i,
                    expected
                );
                return Err(Error::InvalidDevice(who_am_i));
            }
        }

        let fs_sel = self.config.gyro_full_scale.fs_sel();
        self.device
            .gyro_config()
            .write_async(|w| {
                w.set_fs_sel(fs_sel);
            })
            .await?;
        delay.delay_us(WRITE_SETTLE_US).await;

        let afs_sel = self.config.accel_full_scale.afs_sel();
        self.device
            .accel_config()
            .write_async(|w| {
                w.set_afs_sel(afs_sel);
            })
            .await?;
        delay.delay_us(WRITE_SETTLE_US).await;

        // Active high, push-pull, status cleared by any read
        self.device
            .int_pin_cfg()
            .write_async(|w| {
                w.set_int_rd_clear(true);
            })
            .await?;
        delay.delay_us(WRITE_SETTLE_US).await;

        self.device
            .int_enable()
            .write_async(|w| {
                w.set_data_rdy_en(true);
            })
            .await?;
        delay.delay_us(WRITE_SETTLE_US).await;

        self.device
            .dlpf_config()
            .write_async(|w| {
                w.set_dlpf_cfg(0);
            })
            .await?;
        delay.delay_us(FILTER_SETTLE_US).await;

        #[cfg(feature = "defmt")]
        defmt::debug!("MPU-6x00 initialized: {}", self.config);

        Ok(())
    }

    /// Read the `WHO_AM_I` register at the initialization clock rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_who_am_i(&mut self) -> Result<u8, Error<I::Error>> {
        self.device.interface.set_speed(BusSpeed::Init);
        let reg = self.device.who_am_i().read_async().await?;
        Ok(reg.who_am_i())
    }

    /// Burst-read accelerometer, temperature and gyroscope data
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn trigger_read(&mut self) -> Result<(), Error<I::Error>> {
        self.device.interface.set_speed(BusSpeed::Full);
        device_driver::AsyncRegisterInterface::read_register(
            &mut self.device.interface,
            ACCEL_XOUT_H,
            SENSOR_DATA_BITS,
            self.sample.data_mut(),
        )
        .await?;
        Ok(())
    }
}
