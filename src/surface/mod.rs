//! The drawing sheet: a fixed-size, always-opaque RGBA pixel buffer.
//!
//! All mutation goes through `&mut PixelSurface`, so whichever interaction
//! holds the mutable borrow (a stroke, a fill, a selection move) is the only
//! writer until it returns. The renderer reads between input events.

mod fill;
mod raster;
mod region;
mod text;

pub use region::{PixelRegion, SurfaceSnapshot};
pub use text::default_font;

use egui::{Vec2, vec2};
use image::{Rgb, Rgba, RgbaImage};

use crate::color::opaque;
use crate::error::{PaintError, PaintResult};

pub const DEFAULT_WIDTH: u32 = 1600;
pub const DEFAULT_HEIGHT: u32 = 1200;

pub struct PixelSurface {
    pixels: RgbaImage,
    background: Rgb<u8>,
    /// Bumped on every mutation so renderers know when to re-upload
    revision: u64,
}

impl std::fmt::Debug for PixelSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelSurface")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("background", &self.background)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl PixelSurface {
    /// Creates a sheet filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, opaque(background)),
            background,
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Vec2 {
        vec2(self.width() as f32, self.height() as f32)
    }

    pub fn background(&self) -> Rgb<u8> {
        self.background
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Raw RGBA bytes, row-major, `width * height * 4` long.
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> PaintResult<Rgba<u8>> {
        let (x, y) = self.checked(x, y)?;
        Ok(*self.pixels.get_pixel(x, y))
    }

    /// Overwrites one pixel. The alpha channel is always stored as 255.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>) -> PaintResult<()> {
        let (x, y) = self.checked(x, y)?;
        let [r, g, b, _] = color.0;
        self.pixels.put_pixel(x, y, Rgba([r, g, b, 255]));
        self.touch();
        Ok(())
    }

    fn checked(&self, x: i32, y: i32) -> PaintResult<(u32, u32)> {
        if self.contains(x, y) {
            Ok((x as u32, y as u32))
        } else {
            Err(PaintError::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    /// Writes a pixel if it is on the sheet; silently drops it otherwise.
    /// Callers are responsible for bumping the revision.
    fn plot(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if self.contains(x, y) {
            self.pixels.put_pixel(x as u32, y as u32, color);
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Default for PixelSurface {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, crate::color::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_background_everywhere() {
        let surface = PixelSurface::new(4, 3, Rgb([10, 20, 30]));
        assert_eq!(surface.as_raw().len(), 4 * 3 * 4);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(surface.get_pixel(x, y).unwrap(), Rgba([10, 20, 30, 255]));
            }
        }
    }

    #[test]
    fn out_of_bounds_access_is_rejected() {
        let mut surface = PixelSurface::new(4, 3, crate::color::WHITE);
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 3), (i32::MIN, i32::MAX)] {
            let expected = PaintError::OutOfBounds {
                x,
                y,
                width: 4,
                height: 3,
            };
            assert_eq!(surface.get_pixel(x, y), Err(expected.clone()));
            assert_eq!(surface.set_pixel(x, y, Rgba([0, 0, 0, 255])), Err(expected));
        }
        assert_eq!(surface.revision(), 0);
    }

    #[test]
    fn set_pixel_forces_opaque_alpha() {
        let mut surface = PixelSurface::new(2, 2, crate::color::WHITE);
        surface.set_pixel(1, 1, Rgba([1, 2, 3, 0])).unwrap();
        assert_eq!(surface.get_pixel(1, 1).unwrap(), Rgba([1, 2, 3, 255]));
        assert_eq!(surface.revision(), 1);
    }
}
