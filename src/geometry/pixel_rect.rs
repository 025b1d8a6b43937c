use egui::{Pos2, Rect, pos2};

/// An integer rectangle in surface pixel space.
///
/// `x`/`y` may be negative (a rectangle can hang off the sheet); `width` and
/// `height` are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Degenerate sizes are bumped to 1 so every rect covers at least one pixel.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Builds the rectangle spanned by a drag from `a` to `b`, in either direction.
    pub fn from_corners(a: Pos2, b: Pos2) -> Self {
        let left = a.x.min(b.x).floor() as i32;
        let top = a.y.min(b.y).floor() as i32;
        let right = a.x.max(b.x).floor() as i32;
        let bottom = a.y.max(b.y).floor() as i32;
        Self::new(
            left,
            top,
            right.saturating_sub(left).max(0) as u32,
            bottom.saturating_sub(top).max(0) as u32,
        )
    }

    /// Exclusive right edge
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width as i32)
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height as i32)
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        pos.x >= self.x as f32
            && pos.y >= self.y as f32
            && pos.x < self.right() as f32
            && pos.y < self.bottom() as f32
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    pub fn intersect(&self, other: &PixelRect) -> Option<PixelRect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (left < right && top < bottom).then(|| PixelRect {
            x: left,
            y: top,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }

    /// The part of this rect that lies on a `width` x `height` surface.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<PixelRect> {
        if width == 0 || height == 0 {
            return None;
        }
        self.intersect(&PixelRect::new(0, 0, width, height))
    }

    /// Same rectangle as a float rect in surface coordinates
    pub fn to_rect(&self) -> Rect {
        Rect::from_min_max(
            pos2(self.x as f32, self.y as f32),
            pos2(self.right() as f32, self.bottom() as f32),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_normalized() {
        let forward = PixelRect::from_corners(pos2(2.0, 3.0), pos2(7.5, 9.2));
        let backward = PixelRect::from_corners(pos2(7.5, 9.2), pos2(2.0, 3.0));
        assert_eq!(forward, backward);
        assert_eq!(forward, PixelRect::new(2, 3, 5, 6));
    }

    #[test]
    fn degenerate_drag_is_one_pixel() {
        let rect = PixelRect::from_corners(pos2(4.2, 4.8), pos2(4.9, 4.1));
        assert_eq!(rect, PixelRect::new(4, 4, 1, 1));
    }

    #[test]
    fn clipping_drops_offsheet_parts() {
        let rect = PixelRect::new(-3, 8, 6, 6);
        assert_eq!(rect.clip_to(10, 10), Some(PixelRect::new(0, 8, 3, 2)));
        assert_eq!(PixelRect::new(12, 0, 4, 4).clip_to(10, 10), None);
    }

    #[test]
    fn contains_uses_half_open_edges() {
        let rect = PixelRect::new(2, 2, 3, 3);
        assert!(rect.contains(pos2(2.0, 2.0)));
        assert!(rect.contains(pos2(4.9, 4.9)));
        assert!(!rect.contains(pos2(5.0, 3.0)));
        assert!(!rect.contains(pos2(1.9, 3.0)));
    }
}
