//! Compile-time configuration and the animation parameters the keys control.
//!
//! Everything here is fixed at build time except [`AnimationConfig`], which the
//! key dispatcher replaces with a new value on every recognized press.

use embassy_time::Duration;

use crate::controls::Action;
use crate::palette::Palette16;
use crate::palette::presets::{DEFAULT_PRESET, PRESETS, Preset};
use crate::rng::Rng16;

// ============================================================================
// Geometry
// ============================================================================

/// Keys (and LEDs) along one side of a NeoTrellis panel.
pub const PANEL_SIZE: usize = 4;
/// Panels stacked vertically.
pub const PANEL_ROWS: usize = 2;
/// Panels side by side.
pub const PANEL_COLUMNS: usize = 2;
/// Matrix width in keys.
pub const WIDTH: usize = PANEL_COLUMNS * PANEL_SIZE;
/// Matrix height in keys.
pub const HEIGHT: usize = PANEL_ROWS * PANEL_SIZE;
/// Total keys; key numbers run `0..KEY_COUNT`, row by row.
pub const KEY_COUNT: usize = WIDTH * HEIGHT;

/// 7-bit I2C address of each panel, indexed `[panel_row][panel_column]`.
pub const PANEL_ADDRESSES: [[u8; PANEL_COLUMNS]; PANEL_ROWS] = [[0x30, 0x2F], [0x32, 0x31]];

// ============================================================================
// Timing and bus
// ============================================================================

/// Minimum time between key polls.
pub const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// I2C clock for the panel bus.
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

// ============================================================================
// Brightness
// ============================================================================

/// Global output level applied by the display driver, `0..=255`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(not(feature = "host"), derive(defmt::Format))]
pub struct Brightness(u8);

impl Brightness {
    /// Full output.
    pub const MAX: Self = Self(255);

    /// Wrap a raw level.
    #[must_use]
    pub const fn new(level: u8) -> Self {
        Self(level)
    }

    /// The raw level.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Brightness at power-on.
pub const DEFAULT_BRIGHTNESS: Brightness = Brightness::new(24);

// ============================================================================
// AnimationConfig
// ============================================================================

/// Everything the keys can change, as one value.
///
/// Nothing mutates a config in place from the outside: [`apply`](Self::apply)
/// returns the next config.
///
/// ```rust
/// use trellis_noise::config::AnimationConfig;
/// use trellis_noise::controls::Action;
/// use trellis_noise::rng::Rng16;
///
/// let mut rng = Rng16::default();
/// let config = AnimationConfig::power_on(&mut rng);
/// let faster = config.apply(Action::SetSpeed(128), &mut rng);
/// assert_eq!(faster.speed, 128);
/// assert_eq!(faster.scale, config.scale);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AnimationConfig {
    /// Gradient the noise values index into.
    pub palette: Palette16,
    /// How fast the noise field moves.
    pub speed: u16,
    /// How far apart neighboring keys sample the noise field.
    pub scale: u16,
    /// Whether a slowly rising offset is added to every palette index.
    pub color_loop: bool,
    /// Global display brightness.
    pub brightness: Brightness,
}

impl AnimationConfig {
    /// Config for `preset` at the given brightness.
    #[must_use]
    pub fn from_preset(preset: &Preset, brightness: Brightness, rng: &mut Rng16) -> Self {
        Self {
            palette: preset.palette.palette(rng),
            speed: preset.speed,
            scale: preset.scale,
            color_loop: preset.color_loop,
            brightness,
        }
    }

    /// The default preset at the default brightness.
    #[must_use]
    pub fn power_on(rng: &mut Rng16) -> Self {
        Self::from_preset(&PRESETS[DEFAULT_PRESET], DEFAULT_BRIGHTNESS, rng)
    }

    /// Replace palette, speed, scale, and color loop with `preset`'s, keeping brightness.
    #[must_use]
    pub fn with_preset(self, preset: &Preset, rng: &mut Rng16) -> Self {
        Self::from_preset(preset, self.brightness, rng)
    }

    /// The config that results from `action`.
    ///
    /// Selecting a preset number that does not exist leaves the config unchanged.
    #[must_use]
    pub fn apply(self, action: Action, rng: &mut Rng16) -> Self {
        match action {
            Action::SetBrightness(brightness) => Self { brightness, ..self },
            Action::SelectPreset(preset_index) => PRESETS
                .get(usize::from(preset_index))
                .map_or(self, |preset| self.with_preset(preset, rng)),
            Action::ToggleColorLoop => Self {
                color_loop: !self.color_loop,
                ..self
            },
            Action::SetSpeed(speed) => Self { speed, ..self },
            Action::SetScale(scale) => Self { scale, ..self },
        }
    }
}
