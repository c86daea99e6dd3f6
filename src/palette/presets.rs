//! The twelve selectable looks: a palette plus the speed, scale, and color-loop
//! setting that suit it.
//!
//! Selecting a preset replaces all of those together; see
//! [`AnimationConfig::with_preset`](crate::config::AnimationConfig::with_preset).

use super::{Palette16, named};
use crate::rng::Rng16;

/// Where a preset's palette comes from.
#[derive(Clone, Copy, Debug)]
pub enum PaletteSource {
    /// Always the same palette.
    Fixed(Palette16),
    /// Built when the preset is selected (possibly drawing random numbers).
    Generated(fn(&mut Rng16) -> Palette16),
}

impl PaletteSource {
    /// Produce the palette.
    #[must_use]
    pub fn palette(&self, rng: &mut Rng16) -> Palette16 {
        match self {
            Self::Fixed(palette) => *palette,
            Self::Generated(generate) => generate(rng),
        }
    }
}

/// A palette bundled with the animation parameters that suit it.
#[derive(Clone, Copy, Debug)]
pub struct Preset {
    /// Short human-readable name, used in logs.
    pub name: &'static str,
    /// The palette.
    pub palette: PaletteSource,
    /// Speed of the noise field.
    pub speed: u16,
    /// Spatial scale of the noise field.
    pub scale: u16,
    /// Whether the palette index drifts over time.
    pub color_loop: bool,
}

/// Preset applied at power-on.
pub const DEFAULT_PRESET: usize = 0;

/// All presets, in key order.
pub const PRESETS: [Preset; 12] = [
    Preset {
        name: "rainbow",
        palette: PaletteSource::Fixed(named::RAINBOW),
        speed: 20,
        scale: 30,
        color_loop: true,
    },
    Preset {
        name: "purple and green",
        palette: PaletteSource::Generated(|_| Palette16::purple_and_green()),
        speed: 10,
        scale: 50,
        color_loop: true,
    },
    Preset {
        name: "black and white",
        palette: PaletteSource::Fixed(Palette16::black_and_white_stripes()),
        speed: 20,
        scale: 30,
        color_loop: true,
    },
    Preset {
        name: "forest",
        palette: PaletteSource::Fixed(named::FOREST),
        speed: 8,
        scale: 120,
        color_loop: false,
    },
    Preset {
        name: "cloud",
        palette: PaletteSource::Fixed(named::CLOUD),
        speed: 4,
        scale: 30,
        color_loop: false,
    },
    Preset {
        name: "lava",
        palette: PaletteSource::Fixed(named::LAVA),
        speed: 8,
        scale: 50,
        color_loop: false,
    },
    Preset {
        name: "ocean",
        palette: PaletteSource::Fixed(named::OCEAN),
        speed: 20,
        scale: 90,
        color_loop: false,
    },
    Preset {
        name: "party",
        palette: PaletteSource::Fixed(named::PARTY),
        speed: 20,
        scale: 30,
        color_loop: true,
    },
    Preset {
        name: "random slow",
        palette: PaletteSource::Generated(Palette16::random),
        speed: 20,
        scale: 20,
        color_loop: true,
    },
    Preset {
        name: "random medium",
        palette: PaletteSource::Generated(Palette16::random),
        speed: 50,
        scale: 50,
        color_loop: true,
    },
    Preset {
        name: "random fast",
        palette: PaletteSource::Generated(Palette16::random),
        speed: 90,
        scale: 90,
        color_loop: true,
    },
    Preset {
        name: "rainbow stripes",
        palette: PaletteSource::Fixed(named::RAINBOW_STRIPES),
        speed: 30,
        scale: 20,
        color_loop: true,
    },
];
