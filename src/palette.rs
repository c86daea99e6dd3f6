//! 16-stop color gradients and lookups into them.
//!
//! A [`Palette16`] maps an 8-bit index onto a smooth, cyclic gradient: the high
//! nibble picks a stop and the low nibble blends toward the next one (stop 15
//! blends back into stop 0).
//!
//! - [`named`] holds the fixed gradients.
//! - [`presets`] bundles gradients with animation parameters.

pub mod named;
pub mod presets;

use core::ops::Deref;

use smart_leds::RGB8;
use smart_leds::hsv::Hsv;

use crate::math8::{qadd8, scale8, scale8_video};
use crate::rng::Rng16;

/// Hue of pure green on the [`hsv2rgb_rainbow`] wheel.
pub const HUE_GREEN: u8 = 96;
/// Hue of purple on the [`hsv2rgb_rainbow`] wheel.
pub const HUE_PURPLE: u8 = 192;

/// Convert HSV to RGB on the "rainbow" hue wheel.
///
/// Unlike an even six-sector spectrum, this wheel gives yellow and orange a
/// full eighth each, so hue 64 is yellow, 96 green, 160 blue and 192 purple.
/// The stops of [`named::RAINBOW`] lie on it.
#[must_use]
pub const fn hsv2rgb_rainbow(hsv: Hsv) -> RGB8 {
    let Hsv { hue, sat, val } = hsv;
    let offset8 = (hue & 0x1F) << 3;
    let third = scale8(offset8, 85);
    let two_thirds = scale8(offset8, 170);

    // Eight sectors of 32 hues, picked by the top three bits.
    let (mut red, mut green, mut blue) = match hue >> 5 {
        0 => (255 - third, third, 0),
        1 => (171, 85 + third, 0),
        2 => (171 - two_thirds, 170 + third, 0),
        3 => (0, 255 - third, third),
        4 => (0, 171 - two_thirds, 85 + two_thirds),
        5 => (third, 0, 255 - third),
        6 => (85 + third, 0, 171 - third),
        _ => (170 + third, 0, 85 - third),
    };

    if sat == 0 {
        red = 255;
        green = 255;
        blue = 255;
    } else if sat != 255 {
        // Desaturating lifts every channel by the same floor.
        let desat = scale8_video(255 - sat, 255 - sat);
        let keep = 255 - desat;
        red = qadd8(scale8(red, keep), desat);
        green = qadd8(scale8(green, keep), desat);
        blue = qadd8(scale8(blue, keep), desat);
    }

    if val != 255 {
        let level = scale8_video(val, val);
        red = scale8(red, level);
        green = scale8(green, level);
        blue = scale8(blue, level);
    }
    RGB8::new(red, green, blue)
}

/// A cyclic gradient of 16 RGB stops.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Palette16(pub [RGB8; 16]);

impl Palette16 {
    /// Number of stops.
    pub const LEN: usize = 16;

    /// A palette with every stop set to `color`.
    #[must_use]
    pub const fn filled(color: RGB8) -> Self {
        Self([color; 16])
    }

    /// Build a palette from `0xRRGGBB` codes.
    #[must_use]
    pub const fn from_hex(codes: [u32; 16]) -> Self {
        let mut entries = [RGB8::new(0, 0, 0); 16];
        let mut index = 0;
        while index < 16 {
            let [_, red, green, blue] = codes[index].to_be_bytes();
            entries[index] = RGB8::new(red, green, blue);
            index += 1;
        }
        Self(entries)
    }

    /// Look up `index` with linear blending, then dim by `brightness`.
    ///
    /// Indices that are multiples of 16 hit a stop exactly. A `brightness` of
    /// 255 leaves the color alone and 0 yields black.
    #[must_use]
    pub fn color_at(&self, index: u8, brightness: u8) -> RGB8 {
        let stop = usize::from(index >> 4);
        let blend = (index & 0x0F) << 4;
        let mut color = self.0[stop];

        if blend != 0 {
            let next = self.0[(stop + 1) % Self::LEN];
            let keep = 255 - blend;
            color = RGB8::new(
                qadd8(scale8(color.r, keep), scale8(next.r, blend)),
                qadd8(scale8(color.g, keep), scale8(next.g, blend)),
                qadd8(scale8(color.b, keep), scale8(next.b, blend)),
            );
        }

        match brightness {
            255 => color,
            0 => RGB8::new(0, 0, 0),
            _ => {
                let scale = brightness + 1;
                RGB8::new(
                    scale8(color.r, scale),
                    scale8(color.g, scale),
                    scale8(color.b, scale),
                )
            }
        }
    }

    /// Spread four HSV colors over the palette at stops 0, 5, 10 and 15,
    /// blending between them along the shortest way around the hue wheel.
    #[must_use]
    pub fn gradient(colors: [Hsv; 4]) -> Self {
        const ANCHORS: [usize; 4] = [0, 5, 10, 15];
        let mut stops = [Hsv { hue: 0, sat: 0, val: 0 }; 16];
        for (ends, anchors) in colors.windows(2).zip(ANCHORS.windows(2)) {
            if let ([start_color, end_color], [start, end]) = (ends, anchors) {
                fill_hsv_gradient(&mut stops, *start, *start_color, *end, *end_color);
            }
        }
        Self(stops.map(hsv2rgb_rainbow))
    }

    /// A random four-color gradient: dim, bright, pastel, bright.
    ///
    /// The dim and pastel stops give the gradient light/dark variation that a
    /// plain rainbow of hues lacks.
    #[must_use]
    pub fn random(rng: &mut Rng16) -> Self {
        let dim = Hsv { hue: rng.random8(), sat: 255, val: 32 };
        let bright = Hsv { hue: rng.random8(), sat: 255, val: 255 };
        let pastel = Hsv { hue: rng.random8(), sat: 128, val: 255 };
        let bright_again = Hsv { hue: rng.random8(), sat: 255, val: 255 };
        Self::gradient([dim, bright, pastel, bright_again])
    }

    /// Green and purple stripes, two stops each, separated by black.
    #[must_use]
    pub fn purple_and_green() -> Self {
        let purple = hsv2rgb_rainbow(Hsv { hue: HUE_PURPLE, sat: 255, val: 255 });
        let green = hsv2rgb_rainbow(Hsv { hue: HUE_GREEN, sat: 255, val: 255 });
        let black = RGB8::new(0, 0, 0);
        Self([
            green, green, black, black, purple, purple, black, black, green, green, black, black,
            purple, purple, black, black,
        ])
    }

    /// Black with a white stop every fourth entry.
    #[must_use]
    pub const fn black_and_white_stripes() -> Self {
        let mut palette = Self::filled(RGB8::new(0, 0, 0));
        let white = RGB8::new(255, 255, 255);
        palette.0[0] = white;
        palette.0[4] = white;
        palette.0[8] = white;
        palette.0[12] = white;
        palette
    }
}

impl Deref for Palette16 {
    type Target = [RGB8; 16];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Fill `stops[start..=end]` with an HSV blend in 8.7 fixed point.
fn fill_hsv_gradient(
    stops: &mut [Hsv; 16],
    start: usize,
    mut start_color: Hsv,
    end: usize,
    mut end_color: Hsv,
) {
    // Fading to black or white has no meaningful hue; hold the other end's hue.
    if end_color.val == 0 || end_color.sat == 0 {
        end_color.hue = start_color.hue;
    }
    if start_color.val == 0 || start_color.sat == 0 {
        start_color.hue = end_color.hue;
    }

    let sat_distance = (i16::from(end_color.sat) - i16::from(start_color.sat)) << 7;
    let val_distance = (i16::from(end_color.val) - i16::from(start_color.val)) << 7;
    let hue_delta = end_color.hue.wrapping_sub(start_color.hue);
    let hue_distance = if hue_delta > 127 {
        -(i16::from(0u8.wrapping_sub(hue_delta)) << 7)
    } else {
        i16::from(hue_delta) << 7
    };

    let divisor = i16::try_from(end.saturating_sub(start)).unwrap_or(i16::MAX).max(1);
    let hue_step = (hue_distance / divisor).wrapping_mul(2);
    let sat_step = (sat_distance / divisor).wrapping_mul(2);
    let val_step = (val_distance / divisor).wrapping_mul(2);

    let mut hue88 = u16::from(start_color.hue) << 8;
    let mut sat88 = u16::from(start_color.sat) << 8;
    let mut val88 = u16::from(start_color.val) << 8;
    for stop in &mut stops[start..=end] {
        let [hue, _] = hue88.to_be_bytes();
        let [sat, _] = sat88.to_be_bytes();
        let [val, _] = val88.to_be_bytes();
        *stop = Hsv { hue, sat, val };
        hue88 = hue88.wrapping_add_signed(hue_step);
        sat88 = sat88.wrapping_add_signed(sat_step);
        val88 = val88.wrapping_add_signed(val_step);
    }
}
