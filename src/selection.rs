use egui::Pos2;

use crate::error::PaintResult;
use crate::geometry::PixelRect;
use crate::surface::{PixelRegion, PixelSurface};

/// A finished marquee: the rectangle plus the pixels that were under it when
/// the marquee was released.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    region: PixelRegion,
}

impl Selection {
    /// Captures the pixels inside the marquee dragged from `anchor` to `current`.
    ///
    /// The marquee is normalized, at least 1x1, and clipped to the sheet; a
    /// marquee entirely off the sheet fails with `OutOfBounds`.
    pub fn capture(surface: &PixelSurface, anchor: Pos2, current: Pos2) -> PaintResult<Self> {
        let region = surface.copy_region(PixelRect::from_corners(anchor, current))?;
        Ok(Self { region })
    }

    pub fn rect(&self) -> PixelRect {
        self.region.rect()
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    /// Moves the captured pixels by (`dx`, `dy`): the origin is cleared to the
    /// sheet background, then the pixels are pasted at the new place.
    pub fn move_by(&self, surface: &mut PixelSurface, dx: i32, dy: i32) {
        let origin = self.rect();
        surface.clear_rect(origin);
        surface.paste_region(&self.region, origin.x + dx, origin.y + dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE, opaque};
    use egui::pos2;

    #[test]
    fn click_without_drag_selects_one_pixel() {
        let surface = PixelSurface::new(10, 10, WHITE);
        let selection = Selection::capture(&surface, pos2(4.2, 5.9), pos2(4.2, 5.9)).unwrap();
        assert_eq!(selection.rect(), PixelRect::new(4, 5, 1, 1));
    }

    #[test]
    fn marquee_is_clipped_to_sheet() {
        let surface = PixelSurface::new(10, 10, WHITE);
        let selection = Selection::capture(&surface, pos2(8.0, 8.0), pos2(-3.0, 20.0)).unwrap();
        assert_eq!(selection.rect(), PixelRect::new(0, 8, 8, 2));
        assert!(Selection::capture(&surface, pos2(30.0, 30.0), pos2(40.0, 40.0)).is_err());
    }

    #[test]
    fn move_clears_origin_and_pastes() {
        let mut surface = PixelSurface::new(10, 10, WHITE);
        surface.fill_rect(PixelRect::new(1, 1, 2, 2), BLACK);
        let selection = Selection::capture(&surface, pos2(1.0, 1.0), pos2(3.0, 3.0)).unwrap();

        selection.move_by(&mut surface, 5, 0);
        assert_eq!(surface.get_pixel(1, 1).unwrap(), opaque(WHITE));
        assert_eq!(surface.get_pixel(6, 1).unwrap(), opaque(BLACK));
        assert_eq!(surface.get_pixel(7, 2).unwrap(), opaque(BLACK));
    }

    #[test]
    fn overlapping_move_keeps_moved_pixels() {
        let mut surface = PixelSurface::new(10, 10, WHITE);
        surface.fill_rect(PixelRect::new(2, 2, 4, 1), BLACK);
        let selection = Selection::capture(&surface, pos2(2.0, 2.0), pos2(6.0, 3.0)).unwrap();

        selection.move_by(&mut surface, 1, 0);
        assert_eq!(surface.get_pixel(2, 2).unwrap(), opaque(WHITE));
        for x in 3..7 {
            assert_eq!(surface.get_pixel(x, 2).unwrap(), opaque(BLACK), "x = {x}");
        }
    }
}
