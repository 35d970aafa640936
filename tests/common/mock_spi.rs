//! Mock SPI bus and chip-select pin for wire-level tests
//!
//! Both halves log into one shared timeline so tests can check how chip
//! select brackets each transfer.

use mpu6x00::{BusConfig, SpiSettings};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

/// Events seen on the wire
#[derive(Debug, Clone, PartialEq)]
pub enum WireEvent {
    /// Bus settings applied before a transaction
    Configure(SpiSettings),
    /// Chip select driven low
    CsLow,
    /// Chip select driven high
    CsHigh,
    /// Full-duplex transfer, bytes sent
    Transfer(Vec<u8>),
    /// Write-only transfer, bytes sent
    Write(Vec<u8>),
    /// Bus flush
    Flush,
}

/// Mock bus error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockSpiError;

impl embedded_hal::spi::Error for MockSpiError {
    fn kind(&self) -> embedded_hal::spi::ErrorKind {
        embedded_hal::spi::ErrorKind::Other
    }
}

#[derive(Default)]
struct WireState {
    events: Vec<WireEvent>,
    responses: VecDeque<Vec<u8>>,
    fail_next_transfer: bool,
}

/// Mock SPI bus
///
/// Each full-duplex transfer consumes one queued response. Missing responses
/// clock in zeros.
#[derive(Clone, Default)]
pub struct MockSpiBus {
    state: Rc<RefCell<WireState>>,
}

impl MockSpiBus {
    /// Create a bus with an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Chip-select pin logging into the same timeline
    pub fn cs_pin(&self) -> MockPin {
        MockPin {
            state: Rc::clone(&self.state),
        }
    }

    /// Queue the bytes clocked in during the next full-duplex transfer
    pub fn queue_response(&self, bytes: &[u8]) {
        self.state.borrow_mut().responses.push_back(bytes.to_vec());
    }

    /// Make the next transfer or write fail
    pub fn fail_next_transfer(&self) {
        self.state.borrow_mut().fail_next_transfer = true;
    }

    /// Logged events
    pub fn events(&self) -> Vec<WireEvent> {
        self.state.borrow().events.clone()
    }

    /// Clear the event log
    pub fn clear_events(&self) {
        self.state.borrow_mut().events.clear();
    }

    /// Payloads of write-only transfers
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                WireEvent::Write(bytes) => Some(bytes),
                _ => None,
            })
            .collect()
    }

    fn check_failure(&self) -> Result<(), MockSpiError> {
        let mut state = self.state.borrow_mut();
        if state.fail_next_transfer {
            state.fail_next_transfer = false;
            return Err(MockSpiError);
        }
        Ok(())
    }
}

/// Bus configuration hook that logs the applied settings
#[derive(Debug, Clone, Copy, Default)]
pub struct MockClock;

impl BusConfig<MockSpiBus> for MockClock {
    fn apply(&mut self, spi: &mut MockSpiBus, settings: &SpiSettings) {
        spi.state
            .borrow_mut()
            .events
            .push(WireEvent::Configure(*settings));
    }
}

impl embedded_hal::spi::ErrorType for MockSpiBus {
    type Error = MockSpiError;
}

impl embedded_hal::spi::SpiBus for MockSpiBus {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.transfer_in_place(words)
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.check_failure()?;
        self.state
            .borrow_mut()
            .events
            .push(WireEvent::Write(words.to_vec()));
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        let mut buffer = write.to_vec();
        buffer.resize(read.len().max(write.len()), 0);
        self.transfer_in_place(&mut buffer)?;
        read.copy_from_slice(&buffer[..read.len()]);
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.check_failure()?;
        let mut state = self.state.borrow_mut();
        state.events.push(WireEvent::Transfer(words.to_vec()));

        let response = state.responses.pop_front().unwrap_or_default();
        for (i, word) in words.iter_mut().enumerate() {
            *word = response.get(i).copied().unwrap_or(0);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().events.push(WireEvent::Flush);
        Ok(())
    }
}

/// Mock chip-select pin
pub struct MockPin {
    state: Rc<RefCell<WireState>>,
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().events.push(WireEvent::CsLow);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().events.push(WireEvent::CsHigh);
        Ok(())
    }
}

/// Delay that returns immediately
pub struct NoopDelay;

impl embedded_hal::delay::DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
