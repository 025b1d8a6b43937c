use std::f32::consts::TAU;

use egui::Pos2;
use image::{Rgb, Rgba};
use rand::Rng;

use super::PixelSurface;
use crate::color::opaque;
use crate::geometry::PixelRect;

/// Strokes at or below this width are drawn as hard one-pixel lines.
const HAIRLINE_WIDTH: f32 = 1.5;

/// Drawing primitives. Everything here clips silently at the sheet edges:
/// a stroke leaving the sheet is normal, unlike a direct pixel access.
impl PixelSurface {
    pub fn fill_rect(&mut self, rect: PixelRect, color: Rgb<u8>) {
        let Some(clip) = rect.clip_to(self.width(), self.height()) else {
            return;
        };
        let color = opaque(color);
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                self.pixels.put_pixel(x as u32, y as u32, color);
            }
        }
        self.touch();
    }

    /// Line with round caps and joins, `width` pixels across.
    pub fn draw_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Rgb<u8>) {
        self.segment(from, to, width, opaque(color));
        self.touch();
    }

    /// Rectangle outline through both corners (inclusive). The outline grows
    /// evenly inwards and outwards as `width` increases.
    pub fn stroke_rect(&mut self, a: Pos2, b: Pos2, width: f32, color: Rgb<u8>) {
        let left = a.x.min(b.x).floor() as i32;
        let top = a.y.min(b.y).floor() as i32;
        let right = a.x.max(b.x).floor() as i32;
        let bottom = a.y.max(b.y).floor() as i32;

        let thickness = width.round().max(1.0) as i32;
        let inner = (thickness - 1) / 2;
        let outer = thickness / 2;
        let band = |x0: i32, y0: i32, x1: i32, y1: i32| {
            PixelRect::new(x0, y0, (x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32)
        };

        let bands = [
            band(left - inner, top - inner, right + outer, top + outer),
            band(left - inner, bottom - inner, right + outer, bottom + outer),
            band(left - inner, top - inner, left + outer, bottom + outer),
            band(right - inner, top - inner, right + outer, bottom + outer),
        ];
        for rect in bands {
            self.fill_rect(rect, color);
        }
    }

    /// Ellipse outline inscribed in the box spanned by `a` and `b`.
    pub fn stroke_ellipse(&mut self, a: Pos2, b: Pos2, width: f32, color: Rgb<u8>) {
        let center = a.lerp(b, 0.5);
        let radius_x = ((b.x - a.x).abs() / 2.0).max(0.5);
        let radius_y = ((b.y - a.y).abs() / 2.0).max(0.5);
        let color = opaque(color);

        let steps = ((TAU * radius_x.max(radius_y)).ceil() as usize).max(16);
        let point = |i: usize| {
            let angle = TAU * i as f32 / steps as f32;
            Pos2::new(
                center.x + radius_x * angle.cos(),
                center.y + radius_y * angle.sin(),
            )
        };
        let mut previous = point(0);
        for i in 1..=steps {
            let next = point(i);
            self.segment(previous, next, width, color);
            previous = next;
        }
        self.touch();
    }

    /// Airbrush: scatters `density` single pixels uniformly by angle within `radius`.
    pub fn spray<R: Rng>(
        &mut self,
        center: Pos2,
        radius: f32,
        density: u32,
        color: Rgb<u8>,
        rng: &mut R,
    ) {
        let color = opaque(color);
        for _ in 0..density {
            let r = rng.random::<f32>() * radius;
            let angle = rng.random::<f32>() * TAU;
            let x = (center.x + angle.cos() * r).round() as i32;
            let y = (center.y + angle.sin() * r).round() as i32;
            self.plot(x, y, color);
        }
        self.touch();
    }

    fn segment(&mut self, from: Pos2, to: Pos2, width: f32, color: Rgba<u8>) {
        let (x0, y0) = (from.x.floor() as i32, from.y.floor() as i32);
        let (x1, y1) = (to.x.floor() as i32, to.y.floor() as i32);

        if width <= HAIRLINE_WIDTH {
            for (x, y) in line_pixels(x0, y0, x1, y1) {
                self.plot(x, y, color);
            }
        } else {
            let radius = width / 2.0;
            for (x, y) in line_pixels(x0, y0, x1, y1) {
                self.stamp_disc(x as f32 + 0.5, y as f32 + 0.5, radius, color);
            }
        }
    }

    fn stamp_disc(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
        // The pixel under the center is always painted, however small the radius
        self.plot(cx.floor() as i32, cy.floor() as i32, color);

        let radius_sq = radius * radius;
        let x0 = (cx - radius).floor() as i32;
        let x1 = (cx + radius).ceil() as i32;
        let y0 = (cy - radius).floor() as i32;
        let y1 = (cy + radius).ceil() as i32;
        for y in y0..=y1 {
            let dy = y as f32 + 0.5 - cy;
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                if dx * dx + dy * dy <= radius_sq {
                    self.plot(x, y, color);
                }
            }
        }
    }
}

/// Bresenham walk from (x0, y0) to (x1, y1), both ends included.
fn line_pixels(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let step_x = if x0 < x1 { 1 } else { -1 };
    let step_y = if y0 < y1 { 1 } else { -1 };

    let mut points = Vec::with_capacity(dx.max(-dy) as usize + 1);
    let (mut x, mut y) = (x0, y0);
    let mut err = dx + dy;
    loop {
        points.push((x, y));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += step_x;
        }
        if e2 <= dx {
            err += dx;
            y += step_y;
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE, rgb_of};
    use egui::pos2;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn painted(surface: &PixelSurface) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..surface.height() as i32 {
            for x in 0..surface.width() as i32 {
                if rgb_of(surface.get_pixel(x, y).unwrap()) != WHITE {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn bresenham_includes_both_ends() {
        let points = line_pixels(0, 0, 3, 1);
        assert_eq!(points.first(), Some(&(0, 0)));
        assert_eq!(points.last(), Some(&(3, 1)));
        assert_eq!(points.len(), 4);
        assert_eq!(line_pixels(2, 2, 2, 2), vec![(2, 2)]);
    }

    #[test]
    fn hairline_is_one_pixel_wide() {
        let mut surface = PixelSurface::new(10, 10, WHITE);
        surface.draw_line(pos2(1.2, 4.7), pos2(8.9, 4.1), 1.0, BLACK);
        assert_eq!(painted(&surface), (1..=8).map(|x| (x, 4)).collect::<Vec<_>>());
    }

    #[test]
    fn wide_line_has_round_caps() {
        let mut surface = PixelSurface::new(20, 20, WHITE);
        surface.draw_line(pos2(10.0, 10.0), pos2(10.0, 10.0), 6.0, BLACK);
        let pixels = painted(&surface);
        assert!(pixels.contains(&(10, 10)));
        assert!(pixels.contains(&(10, 7)));
        assert!(!pixels.contains(&(7, 7)), "corner of the bounding box stays clear");
    }

    #[test]
    fn one_pixel_rect_outline_hits_exact_border() {
        let mut surface = PixelSurface::new(10, 10, WHITE);
        surface.stroke_rect(pos2(7.0, 7.0), pos2(2.0, 2.0), 1.0, BLACK);
        let pixels = painted(&surface);
        assert_eq!(pixels.len(), 20);
        for (x, y) in pixels {
            assert!(x == 2 || x == 7 || y == 2 || y == 7);
        }
    }

    #[test]
    fn degenerate_ellipse_still_marks_a_pixel() {
        let mut surface = PixelSurface::new(10, 10, WHITE);
        surface.stroke_ellipse(pos2(5.0, 5.0), pos2(5.0, 5.0), 1.0, BLACK);
        assert!(!painted(&surface).is_empty());
    }

    #[test]
    fn ellipse_stays_in_its_box() {
        let mut surface = PixelSurface::new(40, 40, WHITE);
        surface.stroke_ellipse(pos2(5.0, 10.0), pos2(35.0, 30.0), 1.0, BLACK);
        let pixels = painted(&surface);
        assert!(pixels.contains(&(35, 20)) || pixels.contains(&(34, 20)));
        for (x, y) in pixels {
            assert!((4..=35).contains(&x) && (9..=30).contains(&y), "({x}, {y})");
        }
    }

    #[test]
    fn spray_is_reproducible_and_bounded() {
        let mut a = PixelSurface::new(30, 30, WHITE);
        let mut b = PixelSurface::new(30, 30, WHITE);
        a.spray(pos2(15.0, 15.0), 5.0, 40, BLACK, &mut SmallRng::seed_from_u64(7));
        b.spray(pos2(15.0, 15.0), 5.0, 40, BLACK, &mut SmallRng::seed_from_u64(7));
        assert_eq!(a.as_raw(), b.as_raw());
        for (x, y) in painted(&a) {
            let (dx, dy) = (x - 15, y - 15);
            assert!(dx * dx + dy * dy <= 36, "({x}, {y}) outside spray radius");
        }
    }

    #[test]
    fn strokes_clip_at_sheet_edges() {
        let mut surface = PixelSurface::new(5, 5, WHITE);
        surface.draw_line(pos2(-20.0, 2.0), pos2(30.0, 2.0), 3.0, BLACK);
        surface.fill_rect(PixelRect::new(-10, -10, 3, 3), BLACK);
        assert!(painted(&surface).contains(&(0, 2)));
        assert!(painted(&surface).contains(&(4, 2)));
    }
}
