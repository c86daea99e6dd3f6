//! One NeoTrellis 4×4 panel: 16 NeoPixels under 16 keys, behind a seesaw chip.
//!
//! Keys are numbered row by row, `0..16`, on the panel. The seesaw firmware
//! numbers them on an 8-wide grid instead; [`panel_to_seesaw_key`] and
//! [`seesaw_to_panel_key`] convert between the two.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use smart_leds::RGB8;

use super::seesaw::{
    KEYPAD_BASE, KEYPAD_COUNT, KEYPAD_EVENT, KEYPAD_FIFO, KEYPAD_INTENSET, NEOPIXEL_BASE,
    NEOPIXEL_BUF, NEOPIXEL_BUF_LENGTH, NEOPIXEL_PIN, NEOPIXEL_SHOW, NEOPIXEL_SPEED, Seesaw,
};
use crate::Result;
use crate::config::{Brightness, PANEL_SIZE};
use crate::controls::Edge;
use crate::math8::scale8;

/// Keys (and pixels) on one panel.
pub const PANEL_KEYS: usize = PANEL_SIZE * PANEL_SIZE;
/// Seesaw pin wired to the pixel chain.
pub const PIXEL_PIN: u8 = 3;
/// Bytes per pixel (GRB).
pub const BYTES_PER_PIXEL: usize = 3;
/// Pixels sent per buffer write; keeps each I2C write within 32 bytes.
pub const PIXELS_PER_WRITE: usize = 8;
/// FIFO bytes read per poll.
pub const MAX_FIFO_EVENTS: usize = 16;
/// Pause between reading the event count and reading the FIFO.
pub const FIFO_DELAY_US: u32 = 500;

const EMPTY_FIFO_SLOT: u8 = 0xFF;
const SEESAW_ROW_STRIDE: u8 = 8;
const PIXEL_BUFFER_LEN: u16 = (PANEL_KEYS * BYTES_PER_PIXEL) as u16;

/// Seesaw key number for a panel key.
#[must_use]
pub const fn panel_to_seesaw_key(key: u8) -> u8 {
    (key / PANEL_SIZE as u8) * SEESAW_ROW_STRIDE + key % PANEL_SIZE as u8
}

/// Panel key for a seesaw key number, or `None` for a column that has no key.
#[must_use]
pub const fn seesaw_to_panel_key(seesaw_key: u8) -> Option<u8> {
    let column = seesaw_key % SEESAW_ROW_STRIDE;
    if column >= PANEL_SIZE as u8 {
        return None;
    }
    Some((seesaw_key / SEESAW_ROW_STRIDE) * PANEL_SIZE as u8 + column)
}

/// Register value that enables (or disables) reporting `edge` for a key.
#[must_use]
pub const fn key_activation(edge: Edge, enable: bool) -> u8 {
    ((1 << edge.bits()) << 1) | enable as u8
}

/// Decode one FIFO byte into `(panel key, edge)`.
#[must_use]
pub const fn decode_event(raw: u8) -> Option<(u8, Edge)> {
    if raw == EMPTY_FIFO_SLOT {
        return None;
    }
    match seesaw_to_panel_key(raw >> 2) {
        Some(key) => Some((key, Edge::from_bits(raw))),
        None => None,
    }
}

/// Reset the panel, check its chip id, and set up pixels and the keypad.
pub async fn begin<I2C: I2c, D: DelayNs>(seesaw: &mut Seesaw<I2C, D>, address: u8) -> Result<()> {
    seesaw.reset(address).await?;
    seesaw.write(address, NEOPIXEL_BASE, NEOPIXEL_SPEED, &[1]).await?;
    seesaw
        .write(
            address,
            NEOPIXEL_BASE,
            NEOPIXEL_BUF_LENGTH,
            &PIXEL_BUFFER_LEN.to_be_bytes(),
        )
        .await?;
    seesaw.write(address, NEOPIXEL_BASE, NEOPIXEL_PIN, &[PIXEL_PIN]).await?;
    seesaw.write(address, KEYPAD_BASE, KEYPAD_INTENSET, &[0x01]).await
}

/// Turn reporting of `edge` on or off for one panel key.
pub async fn activate_key<I2C: I2c, D: DelayNs>(
    seesaw: &mut Seesaw<I2C, D>,
    address: u8,
    key: u8,
    edge: Edge,
    enable: bool,
) -> Result<()> {
    seesaw
        .write(
            address,
            KEYPAD_BASE,
            KEYPAD_EVENT,
            &[panel_to_seesaw_key(key), key_activation(edge, enable)],
        )
        .await
}

/// Load the panel's pixel buffer, scaled by `brightness`. Call [`show`] to latch it.
pub async fn write_pixels<I2C: I2c, D: DelayNs>(
    seesaw: &mut Seesaw<I2C, D>,
    address: u8,
    pixels: &[RGB8; PANEL_KEYS],
    brightness: Brightness,
) -> Result<()> {
    let level = brightness.get();
    let mut offset = 0u16;
    for chunk in pixels.chunks(PIXELS_PER_WRITE) {
        let mut payload = [0u8; 2 + PIXELS_PER_WRITE * BYTES_PER_PIXEL];
        let [offset_high, offset_low] = offset.to_be_bytes();
        payload[0] = offset_high;
        payload[1] = offset_low;
        for (bytes, pixel) in payload[2..].chunks_exact_mut(BYTES_PER_PIXEL).zip(chunk) {
            bytes.copy_from_slice(&[
                scale8(pixel.g, level),
                scale8(pixel.r, level),
                scale8(pixel.b, level),
            ]);
        }
        let used = 2 + chunk.len() * BYTES_PER_PIXEL;
        seesaw
            .write(address, NEOPIXEL_BASE, NEOPIXEL_BUF, &payload[..used])
            .await?;
        offset += (chunk.len() * BYTES_PER_PIXEL) as u16;
    }
    Ok(())
}

/// Latch the pixel buffer out to the LEDs.
pub async fn show<I2C: I2c, D: DelayNs>(seesaw: &mut Seesaw<I2C, D>, address: u8) -> Result<()> {
    seesaw.write(address, NEOPIXEL_BASE, NEOPIXEL_SHOW, &[]).await
}

/// Drain up to [`MAX_FIFO_EVENTS`] key events, calling `on_event(panel_key, edge)` for each.
pub async fn read_events<I2C: I2c, D: DelayNs>(
    seesaw: &mut Seesaw<I2C, D>,
    address: u8,
    mut on_event: impl FnMut(u8, Edge),
) -> Result<()> {
    let pending = seesaw.read_u8(address, KEYPAD_BASE, KEYPAD_COUNT).await?;
    let pending = usize::from(pending).min(MAX_FIFO_EVENTS);
    if pending == 0 {
        return Ok(());
    }
    seesaw.pause_us(FIFO_DELAY_US).await;

    let mut fifo = [EMPTY_FIFO_SLOT; MAX_FIFO_EVENTS];
    let fifo = &mut fifo[..pending];
    seesaw.read(address, KEYPAD_BASE, KEYPAD_FIFO, fifo).await?;
    for (key, edge) in fifo.iter().filter_map(|&raw| decode_event(raw)) {
        on_event(key, edge);
    }
    Ok(())
}
