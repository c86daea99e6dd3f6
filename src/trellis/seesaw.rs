//! Register access for Adafruit seesaw co-processors over I2C.
//!
//! Every register is addressed by a module base byte and a function byte. A
//! write sends `[base, function, data...]`. A read writes `[base, function]`,
//! waits for the chip to prepare the answer, and then reads.

use embedded_hal::i2c::Error as _;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, Operation};

use crate::{Error, Result};

// ============================================================================
// Register map
// ============================================================================

/// Status module.
pub const STATUS_BASE: u8 = 0x00;
/// Chip id register.
pub const STATUS_HW_ID: u8 = 0x01;
/// Software reset register; write [`SOFTWARE_RESET_VALUE`].
pub const STATUS_SWRST: u8 = 0x7F;
/// Value that triggers a software reset.
pub const SOFTWARE_RESET_VALUE: u8 = 0xFF;

/// NeoPixel module.
pub const NEOPIXEL_BASE: u8 = 0x0E;
/// Output pin for the pixel chain.
pub const NEOPIXEL_PIN: u8 = 0x01;
/// Data rate; 1 selects 800 kHz.
pub const NEOPIXEL_SPEED: u8 = 0x02;
/// Pixel buffer length in bytes (big-endian `u16`).
pub const NEOPIXEL_BUF_LENGTH: u8 = 0x03;
/// Pixel buffer: big-endian `u16` byte offset, then pixel bytes.
pub const NEOPIXEL_BUF: u8 = 0x04;
/// Latch the pixel buffer out to the LEDs.
pub const NEOPIXEL_SHOW: u8 = 0x05;

/// Keypad module.
pub const KEYPAD_BASE: u8 = 0x10;
/// Enable or disable an edge on one key.
pub const KEYPAD_EVENT: u8 = 0x01;
/// Enable the keypad interrupt.
pub const KEYPAD_INTENSET: u8 = 0x02;
/// Number of events waiting in the FIFO.
pub const KEYPAD_COUNT: u8 = 0x04;
/// Event FIFO; one byte per event.
pub const KEYPAD_FIFO: u8 = 0x10;

/// Chip ids of boards that speak seesaw (SAMD09 and ATtiny8x7 families).
pub const HARDWARE_IDS: [u8; 5] = [0x55, 0x84, 0x85, 0x86, 0x87];

/// Pause between requesting a register and reading it.
pub const READ_DELAY_US: u32 = 250;
/// Pause after a software reset.
pub const RESET_DELAY_MS: u32 = 10;

// ============================================================================
// Seesaw bus
// ============================================================================

/// An I2C bus shared by any number of seesaw chips, plus the delay source that
/// reads need.
pub struct Seesaw<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C, D> Seesaw<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Wrap a bus and a delay source.
    #[must_use]
    pub const fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Give back the bus and delay source.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Write `data` to a register.
    pub async fn write(&mut self, address: u8, base: u8, function: u8, data: &[u8]) -> Result<()> {
        // Adjacent writes in one transaction go out as a single I2C write.
        self.i2c
            .transaction(
                address,
                &mut [Operation::Write(&[base, function]), Operation::Write(data)],
            )
            .await
            .map_err(|err| Error::I2c(err.kind()))
    }

    /// Read `buffer.len()` bytes from a register.
    pub async fn read(
        &mut self,
        address: u8,
        base: u8,
        function: u8,
        buffer: &mut [u8],
    ) -> Result<()> {
        self.i2c
            .write(address, &[base, function])
            .await
            .map_err(|err| Error::I2c(err.kind()))?;
        self.delay.delay_us(READ_DELAY_US).await;
        self.i2c
            .read(address, buffer)
            .await
            .map_err(|err| Error::I2c(err.kind()))
    }

    /// Read a one-byte register.
    pub async fn read_u8(&mut self, address: u8, base: u8, function: u8) -> Result<u8> {
        let mut buffer = [0u8];
        self.read(address, base, function, &mut buffer).await?;
        Ok(buffer[0])
    }

    /// Reset the chip and confirm it is a seesaw.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownHardwareId`] if the chip id is not a known seesaw.
    pub async fn reset(&mut self, address: u8) -> Result<u8> {
        self.write(address, STATUS_BASE, STATUS_SWRST, &[SOFTWARE_RESET_VALUE])
            .await?;
        self.delay.delay_ms(RESET_DELAY_MS).await;
        let found = self.read_u8(address, STATUS_BASE, STATUS_HW_ID).await?;
        if HARDWARE_IDS.contains(&found) {
            Ok(found)
        } else {
            Err(Error::UnknownHardwareId { address, found })
        }
    }

    /// Wait for `us` microseconds.
    pub async fn pause_us(&mut self, us: u32) {
        self.delay.delay_us(us).await;
    }
}
