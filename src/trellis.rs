//! A device abstraction for an 8×8 key/LED matrix built from four Adafruit
//! NeoTrellis panels on one I2C bus.
//!
//! See [`MultiTrellis`] for usage. The control loop only sees the [`LedMatrix`]
//! and [`KeyPad`] traits, so any display and key source with the same shape can
//! stand in.
//!
//! # Wiring
//!
//! Panels are tiled two by two. Their I2C addresses (set with the solder jumpers
//! on the back) are listed in [`PANEL_ADDRESSES`], indexed `[panel_row][panel_column]`.
//! Matrix coordinates put `(0, 0)` at the top-left key; key number `y * 8 + x`.

pub mod neotrellis;
pub mod seesaw;

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use heapless::Vec;
use smart_leds::RGB8;

use crate::config::{
    Brightness, DEFAULT_BRIGHTNESS, KEY_COUNT, PANEL_ADDRESSES, PANEL_COLUMNS, PANEL_ROWS,
    PANEL_SIZE, WIDTH,
};
use crate::controls::{Edge, KeyEvent};
use crate::frame::MatrixFrame;
use crate::{Error, Result};
use neotrellis::PANEL_KEYS;
use seesaw::Seesaw;

/// Most key events delivered by one poll.
pub const MAX_EVENTS_PER_POLL: usize = 32;

/// Buffer that [`KeyPad::poll`] fills.
pub type KeyEvents = Vec<KeyEvent, MAX_EVENTS_PER_POLL>;

// ============================================================================
// Traits
// ============================================================================

/// A matrix of RGB pixels that shows whole frames.
pub trait LedMatrix {
    /// Set the global output level used by the following writes.
    fn set_brightness(&mut self, brightness: Brightness);

    /// Load a frame into the display's buffer.
    async fn write_frame(&mut self, frame: &MatrixFrame) -> Result<()>;

    /// Make the loaded frame visible.
    async fn show(&mut self) -> Result<()>;
}

/// A source of key events that must be polled.
pub trait KeyPad {
    /// Append the events that happened since the last poll.
    ///
    /// Events beyond the buffer's capacity are dropped.
    async fn poll(&mut self, events: &mut KeyEvents) -> Result<()>;
}

// ============================================================================
// Coordinates
// ============================================================================

/// Where a matrix key lives: panel row, panel column, and key on that panel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PanelKey {
    /// Panel row (top is 0).
    pub panel_row: usize,
    /// Panel column (left is 0).
    pub panel_column: usize,
    /// Key on the panel, row by row.
    pub key: u8,
}

impl PanelKey {
    /// Locate a matrix key number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyOutOfRange`] if `matrix_key >= KEY_COUNT`.
    pub fn from_matrix_key(matrix_key: u8) -> Result<Self> {
        let index = usize::from(matrix_key);
        if index >= KEY_COUNT {
            return Err(Error::KeyOutOfRange(matrix_key));
        }
        let (x, y) = (index % WIDTH, index / WIDTH);
        Ok(Self::from_xy(x, y))
    }

    /// Locate the key at matrix coordinates `(x, y)`.
    #[must_use]
    pub const fn from_xy(x: usize, y: usize) -> Self {
        Self {
            panel_row: y / PANEL_SIZE,
            panel_column: x / PANEL_SIZE,
            key: ((y % PANEL_SIZE) * PANEL_SIZE + x % PANEL_SIZE) as u8,
        }
    }

    /// Matrix key number.
    #[must_use]
    pub const fn matrix_key(&self) -> u8 {
        let local = self.key as usize;
        let x = self.panel_column * PANEL_SIZE + local % PANEL_SIZE;
        let y = self.panel_row * PANEL_SIZE + local / PANEL_SIZE;
        (y * WIDTH + x) as u8
    }
}

// ============================================================================
// MultiTrellis
// ============================================================================

/// Four NeoTrellis panels driven as one 8×8 matrix.
///
/// # Example
///
/// ```rust,no_run
/// # use trellis_noise::trellis::{KeyEvents, KeyPad, LedMatrix, MultiTrellis};
/// # use trellis_noise::frame::{MatrixFrame, colors};
/// # async fn example<I2C, D>(bus: I2C, delay: D) -> trellis_noise::Result<()>
/// # where I2C: embedded_hal_async::i2c::I2c, D: embedded_hal_async::delay::DelayNs {
/// let mut trellis = MultiTrellis::new(bus, delay);
/// trellis.begin().await?;
///
/// trellis.write_frame(&MatrixFrame::filled(colors::BLUE)).await?;
/// trellis.show().await?;
///
/// let mut events = KeyEvents::new();
/// trellis.poll(&mut events).await?;
/// # Ok(())
/// # }
/// ```
pub struct MultiTrellis<I2C, D> {
    seesaw: Seesaw<I2C, D>,
    addresses: [[u8; PANEL_COLUMNS]; PANEL_ROWS],
    brightness: Brightness,
}

impl<I2C, D> MultiTrellis<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Use the standard panel addresses.
    #[must_use]
    pub const fn new(i2c: I2C, delay: D) -> Self {
        Self::with_addresses(i2c, delay, PANEL_ADDRESSES)
    }

    /// Use custom panel addresses, indexed `[panel_row][panel_column]`.
    #[must_use]
    pub const fn with_addresses(
        i2c: I2C,
        delay: D,
        addresses: [[u8; PANEL_COLUMNS]; PANEL_ROWS],
    ) -> Self {
        Self {
            seesaw: Seesaw::new(i2c, delay),
            addresses,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }

    /// Give back the bus and delay source.
    pub fn release(self) -> (I2C, D) {
        self.seesaw.release()
    }

    /// Current global output level.
    #[must_use]
    pub const fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Initialize every panel and enable press reporting on every key.
    ///
    /// # Errors
    ///
    /// Fails on the first panel that does not answer or is not a seesaw.
    pub async fn begin(&mut self) -> Result<()> {
        for address in self.addresses.into_iter().flatten() {
            neotrellis::begin(&mut self.seesaw, address).await?;
        }
        for matrix_key in 0..KEY_COUNT as u8 {
            self.activate_key(matrix_key, Edge::Rising, true).await?;
        }
        Ok(())
    }

    /// Turn reporting of `edge` on or off for one matrix key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyOutOfRange`] for keys outside the matrix, or a bus error.
    pub async fn activate_key(&mut self, matrix_key: u8, edge: Edge, enable: bool) -> Result<()> {
        let location = PanelKey::from_matrix_key(matrix_key)?;
        let address = self.addresses[location.panel_row][location.panel_column];
        neotrellis::activate_key(&mut self.seesaw, address, location.key, edge, enable).await
    }

    fn panel_pixels(
        frame: &MatrixFrame,
        panel_row: usize,
        panel_column: usize,
    ) -> [RGB8; PANEL_KEYS] {
        core::array::from_fn(|key| {
            let x = panel_column * PANEL_SIZE + key % PANEL_SIZE;
            let y = panel_row * PANEL_SIZE + key / PANEL_SIZE;
            frame[(x, y)]
        })
    }
}

impl<I2C, D> LedMatrix for MultiTrellis<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn set_brightness(&mut self, brightness: Brightness) {
        self.brightness = brightness;
    }

    async fn write_frame(&mut self, frame: &MatrixFrame) -> Result<()> {
        for (panel_row, row) in self.addresses.into_iter().enumerate() {
            for (panel_column, address) in row.into_iter().enumerate() {
                let pixels = Self::panel_pixels(frame, panel_row, panel_column);
                neotrellis::write_pixels(&mut self.seesaw, address, &pixels, self.brightness)
                    .await?;
            }
        }
        Ok(())
    }

    async fn show(&mut self) -> Result<()> {
        for address in self.addresses.into_iter().flatten() {
            neotrellis::show(&mut self.seesaw, address).await?;
        }
        Ok(())
    }
}

impl<I2C, D> KeyPad for MultiTrellis<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    async fn poll(&mut self, events: &mut KeyEvents) -> Result<()> {
        for (panel_row, row) in self.addresses.into_iter().enumerate() {
            for (panel_column, address) in row.into_iter().enumerate() {
                neotrellis::read_events(&mut self.seesaw, address, |key, edge| {
                    let location = PanelKey {
                        panel_row,
                        panel_column,
                        key,
                    };
                    // A full buffer drops the rest of this poll's events.
                    let _ = events.push(KeyEvent {
                        key: location.matrix_key(),
                        edge,
                    });
                })
                .await?;
            }
        }
        Ok(())
    }
}
