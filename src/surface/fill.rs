use image::{Rgb, RgbaImage};
use log::debug;

use super::PixelSurface;
use crate::color::{opaque, rgb_of};
use crate::error::PaintResult;

impl PixelSurface {
    /// Paint-bucket fill.
    ///
    /// Recolors the 4-connected region of pixels whose RGB exactly equals the
    /// seed pixel's RGB. Returns the number of pixels recolored; filling with
    /// the color already under the seed changes nothing and returns 0.
    ///
    /// Works on an explicit stack of scanline seeds: each popped seed is
    /// widened to its full horizontal run, the run is painted, and the rows
    /// above and below contribute one seed per matching sub-run. Memory is
    /// bounded by the number of runs, not pixels, and nothing recurses.
    pub fn flood_fill(&mut self, seed_x: i32, seed_y: i32, fill: Rgb<u8>) -> PaintResult<usize> {
        let (seed_x, seed_y) = self.checked(seed_x, seed_y)?;
        let target = rgb_of(*self.pixels.get_pixel(seed_x, seed_y));
        if target == fill {
            debug!("fill at ({seed_x}, {seed_y}) skipped: region already {fill:?}");
            return Ok(0);
        }

        let width = self.width();
        let height = self.height();
        let replacement = opaque(fill);
        let mut stack = vec![(seed_x, seed_y)];
        let mut filled = 0usize;

        while let Some((x, y)) = stack.pop() {
            // Already painted via another seed on the same run
            if !is_target(&self.pixels, x, y, target) {
                continue;
            }

            let mut left = x;
            while left > 0 && is_target(&self.pixels, left - 1, y, target) {
                left -= 1;
            }
            let mut right = x;
            while right + 1 < width && is_target(&self.pixels, right + 1, y, target) {
                right += 1;
            }

            for px in left..=right {
                self.pixels.put_pixel(px, y, replacement);
            }
            filled += (right - left + 1) as usize;

            if y > 0 {
                push_row_seeds(&self.pixels, &mut stack, left, right, y - 1, target);
            }
            if y + 1 < height {
                push_row_seeds(&self.pixels, &mut stack, left, right, y + 1, target);
            }
        }

        self.touch();
        debug!("filled {filled} pixels from ({seed_x}, {seed_y}) with {fill:?}");
        Ok(filled)
    }
}

fn is_target(pixels: &RgbaImage, x: u32, y: u32, target: Rgb<u8>) -> bool {
    rgb_of(*pixels.get_pixel(x, y)) == target
}

/// Pushes one seed for every contiguous run of target pixels in `left..=right` on row `y`.
fn push_row_seeds(
    pixels: &RgbaImage,
    stack: &mut Vec<(u32, u32)>,
    left: u32,
    right: u32,
    y: u32,
    target: Rgb<u8>,
) {
    let mut in_run = false;
    for x in left..=right {
        if is_target(pixels, x, y, target) {
            if !in_run {
                stack.push((x, y));
                in_run = true;
            }
        } else {
            in_run = false;
        }
    }
}
