#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for palettes and the preset table.

use smart_leds::hsv::Hsv;
use trellis_noise::frame::{RGB8, colors};
use trellis_noise::palette::named::{RAINBOW, RAINBOW_STRIPES};
use trellis_noise::palette::presets::{DEFAULT_PRESET, PRESETS, PaletteSource};
use trellis_noise::palette::{HUE_GREEN, HUE_PURPLE, Palette16, hsv2rgb_rainbow};
use trellis_noise::rng::Rng16;

const BLACK: RGB8 = RGB8::new(0, 0, 0);

#[test]
fn hex_codes_become_rgb_stops() {
    assert_eq!(RAINBOW[0], RGB8::new(0xFF, 0x00, 0x00));
    assert_eq!(RAINBOW[10], RGB8::new(0x00, 0x00, 0xFF));
    assert_eq!(RAINBOW_STRIPES[1], BLACK);
}

#[test]
fn multiples_of_sixteen_hit_stops_exactly() {
    for stop in 0..16u8 {
        assert_eq!(RAINBOW.color_at(stop * 16, 255), RAINBOW[usize::from(stop)]);
    }
}

#[test]
fn zero_brightness_is_black() {
    for index in [0, 1, 100, 255] {
        assert_eq!(RAINBOW.color_at(index, 0), BLACK);
    }
}

#[test]
fn blending_wraps_from_the_last_stop_to_the_first() {
    let stripes = Palette16::black_and_white_stripes();
    // Halfway from stop 15 (black) to stop 0 (white).
    assert_eq!(stripes.color_at(0xF8, 255), RGB8::new(128, 128, 128));
    // Halfway from stop 0 (white) to stop 1 (black).
    assert_eq!(stripes.color_at(0x08, 255), RGB8::new(127, 127, 127));
}

#[test]
fn brightness_scales_each_channel() {
    let palette = Palette16::filled(RGB8::new(200, 100, 0));
    assert_eq!(palette.color_at(0, 127), RGB8::new(100, 50, 0));
    // Blending a stop with itself can lose a unit to rounding.
    assert_eq!(palette.color_at(77, 255), RGB8::new(200, 99, 0));
}

fn hsv(hue: u8, sat: u8, val: u8) -> Hsv {
    Hsv { hue, sat, val }
}

#[test]
fn rainbow_wheel_matches_the_rainbow_palette() {
    assert_eq!(hsv2rgb_rainbow(hsv(0, 255, 255)), RGB8::new(255, 0, 0));
    assert_eq!(hsv2rgb_rainbow(hsv(64, 255, 255)), RGB8::new(171, 170, 0));
    assert_eq!(hsv2rgb_rainbow(hsv(HUE_GREEN, 255, 255)), RGB8::new(0, 255, 0));
    assert_eq!(hsv2rgb_rainbow(hsv(160, 255, 255)), RAINBOW[10]);
    assert_eq!(hsv2rgb_rainbow(hsv(HUE_PURPLE, 255, 255)), RAINBOW[12]);
    assert_eq!(hsv2rgb_rainbow(hsv(16, 255, 255)), RGB8::new(212, 43, 0));
}

#[test]
fn rainbow_wheel_desaturates_and_dims() {
    assert_eq!(hsv2rgb_rainbow(hsv(123, 0, 255)), colors::WHITE);
    assert_eq!(hsv2rgb_rainbow(hsv(40, 128, 255)), RGB8::new(192, 143, 64));
    assert_eq!(hsv2rgb_rainbow(hsv(200, 255, 32)), RGB8::new(2, 0, 3));
    assert_eq!(hsv2rgb_rainbow(hsv(10, 255, 0)), BLACK);
}

#[test]
fn stripe_palettes_follow_their_pattern() {
    let green = hsv2rgb_rainbow(Hsv { hue: HUE_GREEN, sat: 255, val: 255 });
    let purple = hsv2rgb_rainbow(Hsv { hue: HUE_PURPLE, sat: 255, val: 255 });
    assert_eq!(green, RGB8::new(0, 255, 0));
    assert_eq!(purple, RGB8::new(85, 0, 171));
    let palette = Palette16::purple_and_green();
    let expected = [green, green, BLACK, BLACK, purple, purple, BLACK, BLACK];
    assert_eq!(&palette[..8], &expected);
    assert_eq!(&palette[8..], &expected);

    let stripes = Palette16::black_and_white_stripes();
    for (index, stop) in stripes.iter().enumerate() {
        let expected = if index % 4 == 0 { colors::WHITE } else { BLACK };
        assert_eq!(*stop, expected, "stop {index}");
    }
}

#[test]
fn gradient_hits_its_anchors() {
    let anchors = [
        Hsv { hue: 0, sat: 255, val: 255 },
        Hsv { hue: 64, sat: 255, val: 255 },
        Hsv { hue: 128, sat: 255, val: 255 },
        Hsv { hue: 192, sat: 255, val: 255 },
    ];
    let palette = Palette16::gradient(anchors);
    assert_eq!(palette[0], hsv2rgb_rainbow(anchors[0]));
    assert_eq!(palette[5], hsv2rgb_rainbow(anchors[1]));
    assert_eq!(palette[10], hsv2rgb_rainbow(anchors[2]));
    // Fixed-point steps can stop just short of the last anchor's hue.
    assert_ne!(palette[15], palette[10]);
}

#[test]
fn random_palettes_repeat_for_a_seed_and_start_dim() {
    let first = Palette16::random(&mut Rng16::new(7));
    let second = Palette16::random(&mut Rng16::new(7));
    assert_eq!(first, second);
    assert_ne!(first, Palette16::random(&mut Rng16::new(8)));

    for seed in 0..32 {
        let palette = Palette16::random(&mut Rng16::new(seed));
        let RGB8 { r, g, b } = palette[0];
        assert!(r.max(g).max(b) <= 32, "seed {seed}: {:?}", palette[0]);
    }
}

#[test]
fn preset_table_matches_the_key_row() {
    let expected: [(u16, u16, bool); 12] = [
        (20, 30, true),
        (10, 50, true),
        (20, 30, true),
        (8, 120, false),
        (4, 30, false),
        (8, 50, false),
        (20, 90, false),
        (20, 30, true),
        (20, 20, true),
        (50, 50, true),
        (90, 90, true),
        (30, 20, true),
    ];
    for (preset, (speed, scale, color_loop)) in PRESETS.iter().zip(expected) {
        assert_eq!(
            (preset.speed, preset.scale, preset.color_loop),
            (speed, scale, color_loop),
            "{}",
            preset.name
        );
    }
    assert_eq!(DEFAULT_PRESET, 0);
}

#[test]
fn fixed_presets_ignore_the_rng_and_random_ones_use_it() {
    let mut rng = Rng16::default();
    let before = rng;
    assert_eq!(PRESETS[0].palette.palette(&mut rng), RAINBOW);
    assert_eq!(rng, before);

    assert!(matches!(PRESETS[8].palette, PaletteSource::Generated(_)));
    let palette = PRESETS[8].palette.palette(&mut rng);
    assert_ne!(rng, before);
    let mut replay = before;
    assert_eq!(palette, Palette16::random(&mut replay));
}
