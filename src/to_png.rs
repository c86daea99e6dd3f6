#![cfg(feature = "host")]
//! Off-device previews of matrix frames as PNG and looping APNG files.
//!
//! Each key becomes a square cell separated from its neighbors by a dark gap,
//! roughly how the silicone keypads look when lit.

use crate::frame::Frame2d;
use png::{BitDepth, ColorType, Encoder};
use smart_leds::RGB8;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Background color of the gaps between keys.
pub const GAP_COLOR: RGB8 = RGB8::new(16, 16, 16);

/// Write one frame as a PNG whose keys are `cell_size` pixels square.
///
/// # Errors
///
/// Returns an error if the file cannot be created or encoded.
pub fn write_frame_png<const W: usize, const H: usize>(
    frame: &Frame2d<W, H>,
    output_path: impl AsRef<Path>,
    cell_size: u32,
) -> Result<(), Box<dyn Error>> {
    let output_path = output_path.as_ref();
    let (width, height) = image_size::<W, H>(cell_size)?;
    let mut encoder = Encoder::new(BufWriter::new(create(output_path)?), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&cell_pixels(frame, cell_size))?;
    Ok(())
}

/// Write `frames` as a looping APNG shown `frame_delay_ms` apart.
///
/// # Errors
///
/// Returns an error if `frames` is empty, the delay does not fit the format,
/// or the file cannot be created or encoded.
pub fn write_frames_apng<const W: usize, const H: usize>(
    frames: &[Frame2d<W, H>],
    output_path: impl AsRef<Path>,
    cell_size: u32,
    frame_delay_ms: u16,
) -> Result<(), Box<dyn Error>> {
    if frames.is_empty() {
        return Err("an animation needs at least one frame".into());
    }
    let output_path = output_path.as_ref();
    let (width, height) = image_size::<W, H>(cell_size)?;
    let mut encoder = Encoder::new(BufWriter::new(create(output_path)?), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_animated(u32::try_from(frames.len())?, 0)?;
    let mut writer = encoder.write_header()?;
    for frame in frames {
        writer.set_frame_delay(frame_delay_ms, 1000)?;
        writer.write_image_data(&cell_pixels(frame, cell_size))?;
    }
    writer.finish()?;
    Ok(())
}

fn create(output_path: &Path) -> Result<File, Box<dyn Error>> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(File::create(output_path)?)
}

fn gap(cell_size: u32) -> u32 {
    (cell_size / 8).max(1)
}

fn image_size<const W: usize, const H: usize>(
    cell_size: u32,
) -> Result<(u32, u32), Box<dyn Error>> {
    if cell_size < 3 {
        return Err("cell_size must be at least 3 pixels".into());
    }
    let gap = gap(cell_size);
    let width = u32::try_from(W)? * cell_size + gap;
    let height = u32::try_from(H)? * cell_size + gap;
    Ok((width, height))
}

/// RGB bytes, row-major; the gap sits on the left/top of every cell plus one
/// trailing gap on the right/bottom edge.
fn cell_pixels<const W: usize, const H: usize>(frame: &Frame2d<W, H>, cell_size: u32) -> Vec<u8> {
    let cell = cell_size as usize;
    let gap = gap(cell_size) as usize;
    let width = W * cell + gap;
    let height = H * cell + gap;
    let mut bytes = Vec::with_capacity(width * height * 3);
    for image_y in 0..height {
        for image_x in 0..width {
            let (x, local_x) = (image_x / cell, image_x % cell);
            let (y, local_y) = (image_y / cell, image_y % cell);
            let color = if x < W && y < H && local_x >= gap && local_y >= gap {
                frame[(x, y)]
            } else {
                GAP_COLOR
            };
            bytes.extend_from_slice(&[color.r, color.g, color.b]);
        }
    }
    bytes
}
