use ab_glyph::{Font, FontArc, GlyphId, ScaleFont, point};
use egui::{FontDefinitions, FontFamily, Pos2};
use image::Rgb;

use super::PixelSurface;
use crate::color::opaque;
use crate::error::{PaintError, PaintResult};

/// Glyph coverage at or above this becomes a solid pixel; below it the
/// sheet is left alone. The sheet has no alpha to blend edges into.
const COVERAGE_THRESHOLD: f32 = 0.5;

/// The first proportional face bundled with egui.
pub fn default_font() -> PaintResult<FontArc> {
    let fonts = FontDefinitions::default();
    let name = fonts
        .families
        .get(&FontFamily::Proportional)
        .and_then(|names| names.first())
        .ok_or_else(|| PaintError::FontUnavailable("no proportional family".to_owned()))?;
    let data = fonts
        .font_data
        .get(name)
        .ok_or_else(|| PaintError::FontUnavailable(name.clone()))?;
    FontArc::try_from_vec(data.font.to_vec())
        .map_err(|err| PaintError::FontUnavailable(format!("{name}: {err}")))
}

impl PixelSurface {
    /// Writes one line of `text` with the top of its em box at `origin`.
    ///
    /// Returns the number of pixels written. Glyphs past the sheet edges are
    /// clipped.
    pub fn draw_text(&mut self, font: &FontArc, text: &str, origin: Pos2, size: f32, color: Rgb<u8>) -> usize {
        let scaled = font.as_scaled(size);
        let baseline = origin.y + scaled.ascent();
        let color = opaque(color);

        let mut written = 0;
        let mut caret = origin.x;
        let mut previous: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = font.glyph_id(ch);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, id);
            }
            let glyph = id.with_scale_and_position(size, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outline) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outline.px_bounds();
            let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
            outline.draw(|x, y, coverage| {
                if coverage >= COVERAGE_THRESHOLD {
                    let (px, py) = (left + x as i32, top + y as i32);
                    if self.contains(px, py) {
                        self.plot(px, py, color);
                        written += 1;
                    }
                }
            });
        }

        if written > 0 {
            self.touch();
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE};
    use egui::pos2;
    use image::Rgba;

    #[test]
    fn text_is_stamped_in_solid_color() {
        let font = default_font().unwrap();
        let mut surface = PixelSurface::new(60, 30, WHITE);
        let written = surface.draw_text(&font, "Hi", pos2(2.0, 2.0), 20.0, Rgb([200, 0, 0]));
        assert!(written > 0);
        assert_eq!(surface.revision(), 1);

        let mut red = 0;
        for y in 0..30 {
            for x in 0..60 {
                match surface.get_pixel(x, y).unwrap() {
                    Rgba([255, 255, 255, 255]) => {}
                    Rgba([200, 0, 0, 255]) => red += 1,
                    other => panic!("blended pixel {other:?} at ({x}, {y})"),
                }
            }
        }
        assert_eq!(red, written);
    }

    #[test]
    fn text_starts_at_the_origin() {
        let font = default_font().unwrap();
        let mut surface = PixelSurface::new(60, 40, WHITE);
        let base = surface.snapshot();
        surface.draw_text(&font, "H", pos2(20.0, 10.0), 20.0, BLACK);

        let changed = surface.diff_bounds(&base).unwrap();
        assert!(changed.x >= 19 && changed.y >= 10, "{changed:?}");
        assert!(changed.right() < 40 && changed.bottom() <= 32, "{changed:?}");
    }

    #[test]
    fn blank_and_offsheet_text_write_nothing() {
        let font = default_font().unwrap();
        let mut surface = PixelSurface::new(20, 20, WHITE);
        assert_eq!(surface.draw_text(&font, "   ", pos2(2.0, 2.0), 12.0, BLACK), 0);
        assert_eq!(surface.draw_text(&font, "Far", pos2(100.0, -80.0), 12.0, BLACK), 0);
        assert_eq!(surface.revision(), 0);
    }
}
