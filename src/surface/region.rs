use image::{RgbaImage, imageops};

use super::PixelSurface;
use crate::error::{PaintError, PaintResult};
use crate::geometry::PixelRect;

/// A rectangle of pixels copied off the surface.
///
/// Used for selections (what gets dragged around) and for history records
/// (what a rectangle looked like before and after an operation).
#[derive(Clone, PartialEq)]
pub struct PixelRegion {
    rect: PixelRect,
    pixels: RgbaImage,
}

impl std::fmt::Debug for PixelRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelRegion")
            .field("rect", &self.rect)
            .finish_non_exhaustive()
    }
}

impl PixelRegion {
    /// Where the pixels were copied from
    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    /// Byte size of the copied pixels; history uses it for diagnostics
    pub fn byte_len(&self) -> usize {
        self.pixels.as_raw().len()
    }
}

/// A full copy of the sheet taken when an interaction starts.
///
/// Only [`PixelSurface::snapshot`] creates one, so a snapshot always matches
/// the dimensions of the surface it came from.
#[derive(Clone)]
pub struct SurfaceSnapshot {
    pixels: RgbaImage,
}

impl std::fmt::Debug for SurfaceSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceSnapshot")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .finish_non_exhaustive()
    }
}

impl SurfaceSnapshot {
    /// Copies `rect` out of the snapshot, clipped to the sheet.
    pub fn region(&self, rect: PixelRect) -> PaintResult<PixelRegion> {
        crop(&self.pixels, rect)
    }
}

fn crop(pixels: &RgbaImage, rect: PixelRect) -> PaintResult<PixelRegion> {
    let clipped = rect
        .clip_to(pixels.width(), pixels.height())
        .ok_or(PaintError::OutOfBounds {
            x: rect.x,
            y: rect.y,
            width: pixels.width(),
            height: pixels.height(),
        })?;
    let pixels = imageops::crop_imm(
        pixels,
        clipped.x as u32,
        clipped.y as u32,
        clipped.width,
        clipped.height,
    )
    .to_image();
    Ok(PixelRegion {
        rect: clipped,
        pixels,
    })
}

impl PixelSurface {
    /// Copies the part of `rect` that lies on the sheet.
    ///
    /// Fails with `OutOfBounds` only when no part of `rect` is on the sheet.
    pub fn copy_region(&self, rect: PixelRect) -> PaintResult<PixelRegion> {
        crop(&self.pixels, rect)
    }

    /// Pastes `region` with its top-left at (`x`, `y`); off-sheet parts are dropped.
    pub fn paste_region(&mut self, region: &PixelRegion, x: i32, y: i32) {
        imageops::replace(&mut self.pixels, &region.pixels, i64::from(x), i64::from(y));
        self.touch();
    }

    /// Pastes `region` back where it was copied from.
    pub fn restore_region(&mut self, region: &PixelRegion) {
        self.paste_region(region, region.rect.x, region.rect.y);
    }

    /// Paints `rect` with the sheet's background color.
    pub fn clear_rect(&mut self, rect: PixelRect) {
        self.fill_rect(rect, self.background);
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        SurfaceSnapshot {
            pixels: self.pixels.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: &SurfaceSnapshot) {
        self.pixels.clone_from(&snapshot.pixels);
        self.touch();
    }

    /// Bounding box of every pixel that differs from `base`, or `None` if nothing changed.
    pub fn diff_bounds(&self, base: &SurfaceSnapshot) -> Option<PixelRect> {
        let row_len = self.width() as usize * 4;
        if row_len == 0 {
            return None;
        }
        let mut bounds: Option<(usize, usize, usize, usize)> = None;

        let rows = self
            .pixels
            .as_raw()
            .chunks_exact(row_len)
            .zip(base.pixels.as_raw().chunks_exact(row_len));
        for (y, (row, base_row)) in rows.enumerate() {
            if row == base_row {
                continue;
            }
            let mut changed = row
                .chunks_exact(4)
                .zip(base_row.chunks_exact(4))
                .enumerate()
                .filter(|(_, (a, b))| a != b)
                .map(|(x, _)| x);
            let Some(first) = changed.next() else {
                continue;
            };
            let last = changed.last().unwrap_or(first);

            bounds = Some(match bounds {
                None => (first, y, last, y),
                Some((left, top, right, _)) => (left.min(first), top, right.max(last), y),
            });
        }

        bounds.map(|(left, top, right, bottom)| {
            PixelRect::new(
                left as i32,
                top as i32,
                (right - left + 1) as u32,
                (bottom - top + 1) as u32,
            )
        })
    }
}
