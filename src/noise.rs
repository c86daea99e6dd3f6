//! Coherent 3D noise and the animated noise field that drives the display.
//!
//! [`inoise8`] samples 8-bit gradient noise on a 16-bit lattice: the high byte
//! of each coordinate picks the lattice cell and the low byte is the position
//! inside it. [`NoiseField`] samples a grid of it every frame, treating `z` as
//! time.

use crate::math8::{avg7, ease8_in_out_quad, lerp7by8, qadd8, qsub8, scale8};
use crate::rng::Rng16;

// Ken Perlin's reference permutation with the first entry repeated, so that
// `cell + 1` lookups never wrap.
const PERMUTATION: [u8; 257] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207,
    206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154,
    163, 70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113,
    224, 232, 178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191,
    179, 162, 241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184,
    84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72,
    243, 141, 128, 195, 78, 66, 215, 61, 156, 180, 151,
];

/// Lowest value [`inoise8`] produces in practice.
pub const NOISE_TYPICAL_MIN: u8 = 16;
/// Highest value [`inoise8`] produces in practice.
pub const NOISE_TYPICAL_MAX: u8 = 238;

/// Below this speed, new samples are blended with the previous frame.
pub const SMOOTHING_SPEED_LIMIT: u16 = 50;

#[inline]
const fn permute(index: u16) -> u8 {
    PERMUTATION[index as usize]
}

#[inline]
const fn permute_next(index: u8) -> u8 {
    permute(index as u16 + 1)
}

const fn gradient(hash: u8, x: i8, y: i8, z: i8) -> i8 {
    let hash = hash & 0x0F;
    let mut u = if hash & 0x08 != 0 { y } else { x };
    let mut v = if hash < 4 {
        y
    } else if hash == 12 || hash == 14 {
        x
    } else {
        z
    };
    if hash & 0x01 != 0 {
        u = u.wrapping_neg();
    }
    if hash & 0x02 != 0 {
        v = v.wrapping_neg();
    }
    avg7(u, v)
}

/// Raw signed gradient noise, roughly `-64..=64`.
#[must_use]
pub const fn inoise8_raw(x: u16, y: u16, z: u16) -> i8 {
    let [x_cell, x_frac] = x.to_be_bytes();
    let [y_cell, y_frac] = y.to_be_bytes();
    let [z_cell, z_frac] = z.to_be_bytes();

    // Hash the eight cube corners.
    let a = permute(x_cell as u16).wrapping_add(y_cell);
    let aa = permute(a as u16).wrapping_add(z_cell);
    let ab = permute_next(a).wrapping_add(z_cell);
    let b = permute_next(x_cell).wrapping_add(y_cell);
    let ba = permute(b as u16).wrapping_add(z_cell);
    let bb = permute_next(b).wrapping_add(z_cell);

    // Position inside the cell as signed 7-bit values, and the same shifted to
    // the far corner.
    let xx = (x_frac >> 1) as i8;
    let yy = (y_frac >> 1) as i8;
    let zz = (z_frac >> 1) as i8;
    let xx_far = xx.wrapping_add(i8::MIN);
    let yy_far = yy.wrapping_add(i8::MIN);
    let zz_far = zz.wrapping_add(i8::MIN);

    let u = ease8_in_out_quad(x_frac);
    let v = ease8_in_out_quad(y_frac);
    let w = ease8_in_out_quad(z_frac);

    let x1 = lerp7by8(
        gradient(permute(aa as u16), xx, yy, zz),
        gradient(permute(ba as u16), xx_far, yy, zz),
        u,
    );
    let x2 = lerp7by8(
        gradient(permute(ab as u16), xx, yy_far, zz),
        gradient(permute(bb as u16), xx_far, yy_far, zz),
        u,
    );
    let x3 = lerp7by8(
        gradient(permute_next(aa), xx, yy, zz_far),
        gradient(permute_next(ba), xx_far, yy, zz_far),
        u,
    );
    let x4 = lerp7by8(
        gradient(permute_next(ab), xx, yy_far, zz_far),
        gradient(permute_next(bb), xx_far, yy_far, zz_far),
        u,
    );

    let y1 = lerp7by8(x1, x2, v);
    let y2 = lerp7by8(x3, x4, v);
    lerp7by8(y1, y2, w)
}

/// 8-bit 3D gradient noise.
///
/// Pure and deterministic. The output nominally spans `0..=255` but in practice
/// stays within [`NOISE_TYPICAL_MIN`]`..=`[`NOISE_TYPICAL_MAX`].
#[must_use]
pub const fn inoise8(x: u16, y: u16, z: u16) -> u8 {
    let shifted = inoise8_raw(x, y, z).wrapping_add(64) as u8;
    qadd8(shifted, shifted)
}

/// Stretch a raw noise sample from its typical `16..=238` range toward `0..=255`.
#[must_use]
pub const fn remap(sample: u8) -> u8 {
    let lowered = qsub8(sample, NOISE_TYPICAL_MIN);
    qadd8(lowered, scale8(lowered, 39))
}

/// How much of the previous frame to keep at a given speed (0 means none).
///
/// Slow animations keep more of the old value, which reads as motion blur.
#[must_use]
pub const fn smoothing_for_speed(speed: u16) -> u8 {
    if speed < SMOOTHING_SPEED_LIMIT {
        // speed < 50, so this stays within 4..=200
        (200 - speed * 4) as u8
    } else {
        0
    }
}

/// Blend a new sample into the previous one, keeping `smoothing / 256` of the old.
///
/// The two scaled parts are added with saturation, so the result never wraps past 255.
#[must_use]
pub const fn smooth(previous: u8, sample: u8, smoothing: u8) -> u8 {
    if smoothing == 0 {
        return sample;
    }
    let keep_new = (256 - smoothing as u16) as u8;
    qadd8(scale8(previous, smoothing), scale8(sample, keep_new))
}

/// A `W`×`H` grid of noise intensities that moves through 3D noise space.
///
/// Values are stored as `grid[x][y]`. Every call to [`advance`](Self::advance)
/// overwrites every cell.
///
/// # Example
///
/// ```rust
/// use trellis_noise::noise::NoiseField;
///
/// let mut field = NoiseField::<8, 8>::at_position(100, 200, 300);
/// field.advance(20, 30);
/// assert_eq!(field.position(), (102, 199, 320));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NoiseField<const W: usize, const H: usize> {
    grid: [[u8; H]; W],
    x_pos: u16,
    y_pos: u16,
    z_pos: u16,
}

impl<const W: usize, const H: usize> NoiseField<W, H> {
    /// Start at a random point in noise space, with an all-zero grid.
    #[must_use]
    pub fn new(rng: &mut Rng16) -> Self {
        let x_pos = rng.random16();
        let y_pos = rng.random16();
        let z_pos = rng.random16();
        Self::at_position(x_pos, y_pos, z_pos)
    }

    /// Start at an explicit point in noise space, with an all-zero grid.
    #[must_use]
    pub const fn at_position(x_pos: u16, y_pos: u16, z_pos: u16) -> Self {
        Self {
            grid: [[0; H]; W],
            x_pos,
            y_pos,
            z_pos,
        }
    }

    /// Current `(x, y, z)` position in noise space.
    #[must_use]
    pub const fn position(&self) -> (u16, u16, u16) {
        (self.x_pos, self.y_pos, self.z_pos)
    }

    /// Intensity at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= W` or `y >= H`.
    #[must_use]
    pub const fn value(&self, x: usize, y: usize) -> u8 {
        self.grid[x][y]
    }

    /// The whole grid, indexed `[x][y]`.
    #[must_use]
    pub const fn grid(&self) -> &[[u8; H]; W] {
        &self.grid
    }

    /// Sample the next frame of noise and drift through noise space.
    ///
    /// `scale` spaces neighboring cells apart in noise space (bigger is more
    /// zoomed out). `speed` moves the time axis and, more slowly, x and y.
    pub fn advance(&mut self, speed: u16, scale: u16) {
        let smoothing = smoothing_for_speed(speed);
        let mut x_offset = 0u16;
        for column in &mut self.grid {
            let x = self.x_pos.wrapping_add(x_offset);
            let mut y_offset = 0u16;
            for cell in column.iter_mut() {
                let y = self.y_pos.wrapping_add(y_offset);
                let sample = remap(inoise8(x, y, self.z_pos));
                *cell = smooth(*cell, sample, smoothing);
                y_offset = y_offset.wrapping_add(scale);
            }
            x_offset = x_offset.wrapping_add(scale);
        }

        self.z_pos = self.z_pos.wrapping_add(speed);
        self.x_pos = self.x_pos.wrapping_add(speed / 8);
        self.y_pos = self.y_pos.wrapping_sub(speed / 16);
    }
}
