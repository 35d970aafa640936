//! SPI bus interface for the MPU-6000 / MPU-6500
//!
//! This module implements the `device-driver` register traits on top of an
//! `embedded-hal` [`SpiBus`](embedded_hal::spi::SpiBus) and a chip-select
//! [`OutputPin`].
//!
//! Every transaction is bracketed the same way:
//! 1. apply the bus settings for the current [`BusSpeed`] ([`BusConfig::apply`])
//! 2. assert chip select (low)
//! 3. transfer
//! 4. flush the bus
//! 5. deassert chip select (high)
//!
//! The sensor only accepts 1 MHz while it is being configured but can be read
//! at 20 MHz afterwards, so the driver switches speeds through
//! [`SpeedControl`]. `embedded-hal` has no notion of clock rate. The host
//! passes a [`BusConfig`] hook next to the bus: any
//! `FnMut(&mut SPI, &SpiSettings)` closure, its own type, or [`FixedClock`]
//! when the peripheral is clocked once at setup.
//!
//! # Example
//!
//! ```ignore
//! use mpu6x00::{DriverConfig, Mpu6x00Driver, SpiInterface, SpiSettings};
//!
//! let interface = SpiInterface::with_bus_config(spi, cs, |spi: &mut HalSpi, settings: &SpiSettings| {
//!     spi.set_frequency(settings.frequency_hz);
//! });
//! let mut imu = Mpu6x00Driver::new(interface, DriverConfig::default());
//! ```

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{MODE_3, Mode};

use crate::registers::SPI_READ_FLAG;

/// Clock rate used while configuring the device
pub const INIT_CLOCK_HZ: u32 = 1_000_000;

/// Clock rate used for sensor data reads
pub const FULL_CLOCK_HZ: u32 = 20_000_000;

/// Largest payload carried by a single transaction
const MAX_TRANSFER_LEN: usize = 32;

/// Bit order on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Most significant bit first (the only order the sensor accepts)
    MsbFirst,
    /// Least significant bit first
    LsbFirst,
}

/// Bus parameters applied at the start of each transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiSettings {
    /// SCLK frequency in Hz
    pub frequency_hz: u32,
    /// Clock polarity and phase
    pub mode: Mode,
    /// Bit order
    pub bit_order: BitOrder,
}

impl SpiSettings {
    /// Settings for the sensor at the given clock rate (mode 3, MSB first)
    #[must_use]
    pub const fn new(frequency_hz: u32) -> Self {
        Self {
            frequency_hz,
            mode: MODE_3,
            bit_order: BitOrder::MsbFirst,
        }
    }
}

/// Bus speed phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusSpeed {
    /// Reduced clock for register configuration and identity reads
    #[default]
    Init,
    /// Full rated clock for sensor data bursts
    Full,
}

/// Selects the clock rate for subsequent transactions
pub trait SpeedControl {
    /// Use `speed` for every transaction until changed again
    fn set_speed(&mut self, speed: BusSpeed);
}

/// Deasserts chip select outside of a transaction
pub trait ChipSelectControl<E> {
    /// Drive chip select high
    fn deselect(&mut self) -> Result<(), E>;
}

/// Host hook that applies [`SpiSettings`] to the SPI peripheral
///
/// Called before chip select is asserted. Implemented for every
/// `FnMut(&mut SPI, &SpiSettings)` closure.
pub trait BusConfig<SPI> {
    /// Reconfigure `spi` for the next transaction
    fn apply(&mut self, spi: &mut SPI, settings: &SpiSettings);
}

impl<SPI, F> BusConfig<SPI> for F
where
    F: FnMut(&mut SPI, &SpiSettings),
{
    fn apply(&mut self, spi: &mut SPI, settings: &SpiSettings) {
        self(spi, settings);
    }
}

/// Bus configuration that leaves the peripheral untouched
///
/// For buses clocked once at setup. Run them at the 1 MHz initialization rate
/// at most; data reads then stay at that rate too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixedClock;

impl<SPI> BusConfig<SPI> for FixedClock {
    fn apply(&mut self, _spi: &mut SPI, _settings: &SpiSettings) {}
}

/// SPI interface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiError<S, P> {
    /// The SPI bus reported an error
    Spi(S),
    /// Driving the chip-select pin failed
    ChipSelect(P),
}

/// SPI interface for the MPU-6000 / MPU-6500
///
/// Owns the chip-select pin. Pass the bus as `&mut bus` to keep using it for
/// other devices once the driver is released.
pub struct SpiInterface<SPI, CS, C = FixedClock> {
    spi: SPI,
    cs: CS,
    bus_config: C,
    speed: BusSpeed,
    init_clock_hz: u32,
    full_clock_hz: u32,
}

impl<SPI, CS> SpiInterface<SPI, CS, FixedClock> {
    /// Create a new SPI interface on a bus whose clock is set up by the host
    pub const fn new(spi: SPI, cs: CS) -> Self {
        Self::with_bus_config(spi, cs, FixedClock)
    }
}

impl<SPI, CS, C> SpiInterface<SPI, CS, C> {
    /// Create a new SPI interface that reconfigures the bus through `bus_config`
    ///
    /// Uses the rated clock rates (1 MHz / 20 MHz).
    pub const fn with_bus_config(spi: SPI, cs: CS, bus_config: C) -> Self {
        Self {
            spi,
            cs,
            bus_config,
            speed: BusSpeed::Init,
            init_clock_hz: INIT_CLOCK_HZ,
            full_clock_hz: FULL_CLOCK_HZ,
        }
    }

    /// Override the clock rates
    ///
    /// Useful when the board wiring cannot sustain 20 MHz.
    #[must_use]
    pub fn with_clock_rates(mut self, init_clock_hz: u32, full_clock_hz: u32) -> Self {
        self.init_clock_hz = init_clock_hz;
        self.full_clock_hz = full_clock_hz;
        self
    }

    /// Currently selected bus speed
    pub const fn speed(&self) -> BusSpeed {
        self.speed
    }

    /// Settings applied to the next transaction
    pub const fn settings(&self) -> SpiSettings {
        match self.speed {
            BusSpeed::Init => SpiSettings::new(self.init_clock_hz),
            BusSpeed::Full => SpiSettings::new(self.full_clock_hz),
        }
    }

    /// Consume the interface and return the SPI bus and chip-select pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS, C> SpeedControl for SpiInterface<SPI, CS, C> {
    fn set_speed(&mut self, speed: BusSpeed) {
        self.speed = speed;
    }
}

impl<SPI, CS, C> ChipSelectControl<SpiError<SPI::Error, CS::Error>> for SpiInterface<SPI, CS, C>
where
    SPI: embedded_hal::spi::ErrorType,
    CS: OutputPin,
{
    fn deselect(&mut self) -> Result<(), SpiError<SPI::Error, CS::Error>> {
        self.cs.set_high().map_err(SpiError::ChipSelect)
    }
}

impl<SPI, CS, C> SpiInterface<SPI, CS, C>
where
    C: BusConfig<SPI>,
    CS: OutputPin,
{
    /// Apply bus settings and assert chip select
    fn begin(&mut self) -> Result<(), CS::Error> {
        let settings = self.settings();
        self.bus_config.apply(&mut self.spi, &settings);
        self.cs.set_low()
    }

    /// Deassert chip select, then report the transfer outcome
    fn end<E>(&mut self, transfer: Result<(), E>) -> Result<(), SpiError<E, CS::Error>> {
        if let Err(error) = self.cs.set_high() {
            return Err(SpiError::ChipSelect(error));
        }
        transfer.map_err(SpiError::Spi)
    }
}

/// Build the read frame `[address | 0x80, 0, ..]` and return its length
fn read_frame(address: u8, len: usize, frame: &mut [u8; MAX_TRANSFER_LEN + 1]) -> usize {
    debug_assert!(len <= MAX_TRANSFER_LEN, "read of {} bytes exceeds the frame", len);
    let frame_len = len.min(MAX_TRANSFER_LEN) + 1;
    frame[0] = address | SPI_READ_FLAG;
    frame[1..frame_len].fill(0);
    frame_len
}

/// Build the write frame `[address & 0x7F, data..]` and return its length
fn write_frame(address: u8, data: &[u8], frame: &mut [u8; MAX_TRANSFER_LEN + 1]) -> usize {
    debug_assert!(
        data.len() <= MAX_TRANSFER_LEN,
        "write of {} bytes exceeds the frame",
        data.len()
    );
    frame[0] = address & !SPI_READ_FLAG;
    let len = data.len().min(MAX_TRANSFER_LEN);
    frame[1..=len].copy_from_slice(&data[..len]);
    len + 1
}

impl<SPI, CS, C> device_driver::RegisterInterface for SpiInterface<SPI, CS, C>
where
    SPI: embedded_hal::spi::SpiBus,
    CS: OutputPin,
    C: BusConfig<SPI>,
{
    type Error = SpiError<SPI::Error, CS::Error>;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for SPI
        let mut frame = [0u8; MAX_TRANSFER_LEN + 1];
        let frame_len = read_frame(address, read_data.len(), &mut frame);

        if let Err(error) = self.begin() {
            return Err(SpiError::ChipSelect(error));
        }
        let transfer = self
            .spi
            .transfer_in_place(&mut frame[..frame_len])
            .and_then(|()| self.spi.flush());
        self.end(transfer)?;

        // Byte 0 was clocked in while the address went out
        read_data[..frame_len - 1].copy_from_slice(&frame[1..frame_len]);
        Ok(())
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for SPI
        let mut frame = [0u8; MAX_TRANSFER_LEN + 1];
        let frame_len = write_frame(address, write_data, &mut frame);

        if let Err(error) = self.begin() {
            return Err(SpiError::ChipSelect(error));
        }
        let transfer = self
            .spi
            .write(&frame[..frame_len])
            .and_then(|()| self.spi.flush());
        self.end(transfer)
    }
}

#[cfg(feature = "async")]
impl<SPI, CS, C> device_driver::AsyncRegisterInterface for SpiInterface<SPI, CS, C>
where
    SPI: embedded_hal_async::spi::SpiBus,
    CS: OutputPin,
    C: BusConfig<SPI>,
{
    type Error = SpiError<SPI::Error, CS::Error>;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for SPI
        let mut frame = [0u8; MAX_TRANSFER_LEN + 1];
        let frame_len = read_frame(address, read_data.len(), &mut frame);

        if let Err(error) = self.begin() {
            return Err(SpiError::ChipSelect(error));
        }
        let mut transfer = self.spi.transfer_in_place(&mut frame[..frame_len]).await;
        if transfer.is_ok() {
            transfer = self.spi.flush().await;
        }
        self.end(transfer)?;

        // Byte 0 was clocked in while the address went out
        read_data[..frame_len - 1].copy_from_slice(&frame[1..frame_len]);
        Ok(())
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for SPI
        let mut frame = [0u8; MAX_TRANSFER_LEN + 1];
        let frame_len = write_frame(address, write_data, &mut frame);

        if let Err(error) = self.begin() {
            return Err(SpiError::ChipSelect(error));
        }
        let mut transfer = self.spi.write(&frame[..frame_len]).await;
        if transfer.is_ok() {
            transfer = self.spi.flush().await;
        }
        self.end(transfer)
    }
}
