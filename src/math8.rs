//! 8-bit fixed-point helpers for the noise and color math.
//!
//! A `u8` used as a fraction stands for `value / 256`, so `scale8(i, 255)` leaves
//! `i` unchanged and `scale8(i, 0)` is almost zero. Signed helpers work on
//! 7-bit values in `-128..=127`.

/// Adds with saturation at 255.
#[must_use]
#[inline]
pub const fn qadd8(i: u8, j: u8) -> u8 {
    i.saturating_add(j)
}

/// Subtracts with saturation at 0.
#[must_use]
#[inline]
pub const fn qsub8(i: u8, j: u8) -> u8 {
    i.saturating_sub(j)
}

/// Scales `i` by the fraction `scale / 256`, with `scale = 255` meaning one.
#[must_use]
#[inline]
pub const fn scale8(i: u8, scale: u8) -> u8 {
    ((i as u16 * (scale as u16 + 1)) >> 8) as u8
}

/// Like [`scale8`], but never scales a nonzero value down to zero.
#[must_use]
#[inline]
pub const fn scale8_video(i: u8, scale: u8) -> u8 {
    let scaled = ((i as u16 * scale as u16) >> 8) as u8;
    if i != 0 && scale != 0 { scaled + 1 } else { scaled }
}

/// Squares the value in fraction space: a cheap dimming curve.
#[must_use]
#[inline]
pub const fn dim8_raw(x: u8) -> u8 {
    scale8(x, x)
}

/// Quadratic ease-in/ease-out over `0..=255`.
#[must_use]
pub const fn ease8_in_out_quad(i: u8) -> u8 {
    let upper_half = i & 0x80 != 0;
    let folded = if upper_half { 255 - i } else { i };
    // folded <= 127, so the square is at most 63 and doubling cannot overflow
    let doubled = scale8(folded, folded) << 1;
    if upper_half { 255 - doubled } else { doubled }
}

/// Linear interpolation between two signed 7-bit values.
#[must_use]
pub const fn lerp7by8(a: i8, b: i8, frac: u8) -> i8 {
    if b > a {
        let delta = b.wrapping_sub(a) as u8;
        a.wrapping_add(scale8(delta, frac) as i8)
    } else {
        let delta = a.wrapping_sub(b) as u8;
        a.wrapping_sub(scale8(delta, frac) as i8)
    }
}

/// Average of two signed values, rounding toward the first one.
#[must_use]
#[inline]
pub const fn avg7(i: i8, j: i8) -> i8 {
    (i >> 1) + (j >> 1) + (i & 1)
}
