//! Perlin-noise color animation for an 8×8 key matrix built from four Adafruit
//! NeoTrellis panels, driven by a Raspberry Pi Pico.
//!
//! The noise field, palettes, color mapping, and key dispatch are plain
//! `no_std` logic and also build on the host (feature `host`) for testing. The
//! seesaw I2C driver is generic over `embedded-hal-async`. Only the control
//! loop in `app` needs the embedded runtime.
//!
//! # Glossary
//!
//! - **Seesaw:** Adafruit's I2C co-processor firmware. Each NeoTrellis panel
//!   has one, which owns its 16 NeoPixels and 16 keys.
//! - **Palette:** 16 color stops blended to map an index `0..=255` to a color.
//! - **Scale:** spatial frequency of the noise; larger means busier.
//! - **Speed:** how fast the noise moves through time.
//! - **Color loop:** slowly rotate every palette index so colors drift.
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

// Compile-time checks: a board and an architecture must be selected (unless testing with host feature)
#[cfg(all(not(feature = "pico1"), not(feature = "host")))]
compile_error!("Must enable the 'pico1' board feature (or 'host' for testing)");

#[cfg(all(not(feature = "arm"), not(feature = "host")))]
compile_error!("Must enable the 'arm' architecture feature (or 'host' for testing)");

pub mod animation;
#[cfg(not(feature = "host"))]
pub mod app;
pub mod config;
pub mod controls;
mod error;
pub mod frame;
pub mod math8;
pub mod noise;
pub mod palette;
pub mod render;
pub mod rng;
#[cfg(feature = "host")]
pub mod to_png;
pub mod trellis;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
