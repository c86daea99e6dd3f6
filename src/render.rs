//! Paints a noise field into a frame through the current palette.

use crate::config::AnimationConfig;
use crate::frame::Frame2d;
use crate::math8::dim8_raw;
use crate::noise::NoiseField;

/// Intensities above this are shown at full brightness.
pub const BRIGHTNESS_MIDPOINT: u8 = 127;

/// Map a noise intensity to a per-pixel brightness.
///
/// The upper half saturates, because the palettes already carry their own
/// light/dark range. The lower half is doubled and then squared, which keeps
/// some detail in the shadows.
#[must_use]
pub const fn compress_brightness(intensity: u8) -> u8 {
    if intensity > BRIGHTNESS_MIDPOINT {
        255
    } else {
        dim8_raw(intensity * 2)
    }
}

/// Turns noise intensities into pixel colors, one frame at a time.
///
/// Hue comes from the cell itself, brightness from the mirrored cell
/// (`grid[y][x]`), so light and color move independently across the matrix.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ColorMapper {
    hue_rotor: u8,
}

impl ColorMapper {
    /// Start with no hue offset.
    #[must_use]
    pub const fn new() -> Self {
        Self { hue_rotor: 0 }
    }

    /// Offset added to palette indices when the color loop is on.
    #[must_use]
    pub const fn hue_rotor(&self) -> u8 {
        self.hue_rotor
    }

    /// Paint every pixel of `frame` from `noise`, then step the hue offset.
    pub fn paint<const N: usize>(
        &mut self,
        noise: &NoiseField<N, N>,
        config: &AnimationConfig,
        frame: &mut Frame2d<N, N>,
    ) {
        let grid = noise.grid();
        for (x_index, column) in grid.iter().enumerate() {
            for (y_index, &intensity) in column.iter().enumerate() {
                let mut index = intensity;
                if config.color_loop {
                    index = index.wrapping_add(self.hue_rotor);
                }
                let brightness = compress_brightness(grid[y_index][x_index]);
                frame[(x_index, y_index)] = config.palette.color_at(index, brightness);
            }
        }
        self.hue_rotor = self.hue_rotor.wrapping_add(1);
    }
}
