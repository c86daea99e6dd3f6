//! In-memory RGB frames for the LED matrix.
//!
//! See [`Frame2d`] for details.

use core::ops::{Index, IndexMut};

/// Predefined RGB color constants from the `smart_leds` crate.
#[doc(inline)]
pub use smart_leds::colors;

/// RGB color type used by frames and palettes.
pub use smart_leds::RGB8;

use crate::config::{HEIGHT, WIDTH};

/// A frame sized for the whole key matrix.
pub type MatrixFrame = Frame2d<WIDTH, HEIGHT>;

/// Fixed-size 2D pixel buffer.
///
/// Frames are stored in row-major order; `frame[(x, y)]` is the pixel in column
/// `x` of row `y`, with `(0, 0)` at the top-left key. The trellis driver takes
/// care of splitting the frame across panels.
///
/// ```rust
/// use trellis_noise::frame::{Frame2d, colors};
///
/// let mut frame = Frame2d::<8, 8>::new();
/// frame[(7, 0)] = colors::RED;
/// assert_eq!(frame.0[0][7], colors::RED);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Frame2d<const W: usize, const H: usize>(pub [[RGB8; W]; H]);

impl<const W: usize, const H: usize> Frame2d<W, H> {
    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([[RGB8::new(0, 0, 0); W]; H])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: RGB8) -> Self {
        Self([[color; W]; H])
    }

    /// Iterate over `((x, y), color)` for every pixel, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = ((usize, usize), RGB8)> + '_ {
        self.0.iter().enumerate().flat_map(|(y_index, row)| {
            row.iter()
                .enumerate()
                .map(move |(x_index, color)| ((x_index, y_index), *color))
        })
    }
}

impl<const W: usize, const H: usize> Index<(usize, usize)> for Frame2d<W, H> {
    type Output = RGB8;

    fn index(&self, (x_index, y_index): (usize, usize)) -> &Self::Output {
        assert!(x_index < W, "x_index must be within width");
        assert!(y_index < H, "y_index must be within height");
        &self.0[y_index][x_index]
    }
}

impl<const W: usize, const H: usize> IndexMut<(usize, usize)> for Frame2d<W, H> {
    fn index_mut(&mut self, (x_index, y_index): (usize, usize)) -> &mut Self::Output {
        assert!(x_index < W, "x_index must be within width");
        assert!(y_index < H, "y_index must be within height");
        &mut self.0[y_index][x_index]
    }
}

impl<const W: usize, const H: usize> Default for Frame2d<W, H> {
    fn default() -> Self {
        Self::new()
    }
}
