//! Mapping between the on-screen canvas ("device" space) and the sheet
//! ("surface" space).
//!
//! The visible window is `[pan, pan + device / zoom)` in surface units. Pan is
//! clamped so that window never leaves the sheet; when the window is bigger
//! than the sheet (zoomed far out) pan is pinned to 0 and the sheet simply
//! renders smaller than the canvas.

mod scrollbar;

pub use scrollbar::{ARROW_STEP, MIN_THUMB_LENGTH, ScrollbarAxis};

use egui::{Pos2, Vec2, vec2};
use log::debug;

pub const ZOOM_MIN: f32 = 0.25;
pub const ZOOM_MAX: f32 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    surface_size: Vec2,
    device_size: Vec2,
    /// Top-left of the visible window, in surface coordinates
    pan: Vec2,
    zoom: f32,
    zoom_min: f32,
    zoom_max: f32,
}

impl Viewport {
    pub fn new(surface_size: Vec2, device_size: Vec2) -> Self {
        Self::with_zoom_range(surface_size, device_size, ZOOM_MIN, ZOOM_MAX)
    }

    pub fn with_zoom_range(surface_size: Vec2, device_size: Vec2, zoom_min: f32, zoom_max: f32) -> Self {
        Self {
            surface_size,
            device_size: device_size.max(Vec2::ZERO),
            pan: Vec2::ZERO,
            zoom: 1.0_f32.clamp(zoom_min, zoom_max),
            zoom_min,
            zoom_max,
        }
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn surface_size(&self) -> Vec2 {
        self.surface_size
    }

    pub fn device_size(&self) -> Vec2 {
        self.device_size
    }

    /// Size of the visible window in surface units, never larger than the sheet.
    pub fn visible_size(&self) -> Vec2 {
        (self.device_size / self.zoom).min(self.surface_size)
    }

    /// Largest allowed pan on each axis
    pub fn max_pan(&self) -> Vec2 {
        (self.surface_size - self.visible_size()).max(Vec2::ZERO)
    }

    /// Device position to surface position, unrounded (drag deltas need the fraction).
    pub fn to_surface(&self, device: Pos2) -> Pos2 {
        Pos2::ZERO + self.pan + device.to_vec2() / self.zoom
    }

    /// Device position to the surface pixel under it (floor, so negative
    /// positions stay negative and are caught by bounds checks).
    pub fn to_surface_pixel(&self, device: Pos2) -> (i32, i32) {
        let surface = self.to_surface(device);
        (surface.x.floor() as i32, surface.y.floor() as i32)
    }

    pub fn to_device(&self, surface: Pos2) -> Pos2 {
        Pos2::ZERO + (surface.to_vec2() - self.pan) * self.zoom
    }

    /// Requests a pan; the stored value is clamped into `[0, max_pan]`.
    pub fn set_pan(&mut self, x: f32, y: f32) {
        let max = self.max_pan();
        self.pan = vec2(clamp_axis(x, max.x), clamp_axis(y, max.y));
    }

    /// Scrolls by a device-space delta (mouse wheel).
    pub fn scroll_by(&mut self, device_delta: Vec2) {
        let target = self.pan + device_delta / self.zoom;
        self.set_pan(target.x, target.y);
    }

    /// The canvas widget changed size; keeps the window on the sheet.
    pub fn set_device_size(&mut self, size: Vec2) {
        let size = size.max(Vec2::ZERO);
        if size != self.device_size {
            self.device_size = size;
            self.set_pan(self.pan.x, self.pan.y);
        }
    }

    /// Multiplies the zoom by `factor`, keeping `focal` (a surface point) at
    /// the same place on screen.
    ///
    /// Returns `false`, leaving everything untouched, when the clamped zoom
    /// would not change.
    pub fn zoom_at(&mut self, focal: Pos2, factor: f32) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let new_zoom = (self.zoom * factor).clamp(self.zoom_min, self.zoom_max);
        if new_zoom == self.zoom {
            return false;
        }

        // Device offset of the focal point, which must not move
        let offset = (focal.to_vec2() - self.pan) * self.zoom;
        self.zoom = new_zoom;
        let target = focal.to_vec2() - offset / new_zoom;
        self.set_pan(target.x, target.y);

        debug!(
            "zoom {:.0}% at ({:.1}, {:.1}), pan now ({:.1}, {:.1})",
            self.zoom * 100.0,
            focal.x,
            focal.y,
            self.pan.x,
            self.pan.y
        );
        true
    }

    /// [`Self::zoom_at`] with the focal point given in device coordinates.
    pub fn zoom_at_device(&mut self, device: Pos2, factor: f32) -> bool {
        let focal = self.to_surface(device);
        self.zoom_at(focal, factor)
    }

    /// Scrollbar model for the horizontal axis, given the track length in device pixels.
    pub fn horizontal_scrollbar(&self, track_length: f32) -> ScrollbarAxis {
        ScrollbarAxis::new(track_length, self.surface_size.x, self.visible_size().x)
    }

    pub fn vertical_scrollbar(&self, track_length: f32) -> ScrollbarAxis {
        ScrollbarAxis::new(track_length, self.surface_size.y, self.visible_size().y)
    }
}

fn clamp_axis(value: f32, max: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, max)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn sheet() -> Viewport {
        Viewport::new(vec2(1600.0, 1200.0), vec2(800.0, 600.0))
    }

    #[test]
    fn device_to_surface_example() {
        let mut viewport = sheet();
        assert!(viewport.zoom_at(Pos2::ZERO, 2.0));
        viewport.set_pan(100.0, 40.0);

        assert_eq!(viewport.to_surface(pos2(50.0, 0.0)), pos2(125.0, 40.0));
        assert_eq!(viewport.to_surface_pixel(pos2(51.0, 3.0)), (125, 41));
    }

    #[test]
    fn surface_and_device_mappings_are_inverse() {
        let mut viewport = sheet();
        viewport.zoom_at(pos2(300.0, 300.0), 3.0);
        viewport.set_pan(211.5, 97.25);
        let device = pos2(123.0, 456.0);
        let back = viewport.to_device(viewport.to_surface(device));
        assert!((back - device).length() < 1e-3);
    }

    #[test]
    fn negative_device_positions_floor_to_negative_pixels() {
        let viewport = sheet();
        assert_eq!(viewport.to_surface_pixel(pos2(-0.5, -3.0)), (-1, -3));
    }

    #[test]
    fn pan_is_always_clamped() {
        let mut viewport = sheet();
        for zoom_step in [0.25_f32, 0.5, 1.0, 1.5, 2.0, 4.0, 8.0, 16.0] {
            viewport.zoom_at(pos2(800.0, 600.0), zoom_step);
            for (x, y) in [
                (-50.0, -50.0),
                (0.0, 0.0),
                (400.0, 900.0),
                (1e9, 1e9),
                (f32::NAN, f32::INFINITY),
            ] {
                viewport.set_pan(x, y);
                let pan = viewport.pan();
                let max = viewport.max_pan();
                assert!(pan.x >= 0.0 && pan.x <= max.x, "x {pan:?} max {max:?}");
                assert!(pan.y >= 0.0 && pan.y <= max.y, "y {pan:?} max {max:?}");
                let visible = viewport.visible_size();
                assert!(pan.x + visible.x <= 1600.0 + 1e-3);
                assert!(pan.y + visible.y <= 1200.0 + 1e-3);
            }
        }
    }

    #[test]
    fn zoomed_out_past_sheet_pins_pan_to_zero() {
        let mut viewport = sheet();
        viewport.zoom_at(Pos2::ZERO, 0.25);
        assert_eq!(viewport.zoom(), 0.25);
        assert_eq!(viewport.visible_size(), vec2(1600.0, 1200.0));
        viewport.set_pan(10.0, 10.0);
        assert_eq!(viewport.pan(), Vec2::ZERO);
    }

    #[test]
    fn focal_point_stays_under_the_cursor() {
        for (device, factor) in [
            (pos2(400.0, 300.0), 2.0),
            (pos2(10.0, 590.0), 4.0),
            (pos2(799.0, 1.0), 1.25),
            (pos2(250.0, 100.0), 0.5),
        ] {
            let mut viewport = sheet();
            viewport.zoom_at(pos2(800.0, 600.0), 2.0);
            viewport.set_pan(500.0, 350.0);

            let focal = viewport.to_surface(device);
            viewport.zoom_at(focal, factor);
            let after = viewport.to_surface(device);
            assert!(
                (after - focal).length() <= 1.0,
                "focal {focal:?} drifted to {after:?} at zoom {}",
                viewport.zoom()
            );
        }
    }

    #[test]
    fn focal_point_holds_when_zooming_in_from_whole_sheet_view() {
        let mut viewport = sheet();
        viewport.zoom_at(Pos2::ZERO, 0.45);
        assert_eq!(viewport.pan(), Vec2::ZERO);

        let device = pos2(100.0, 100.0);
        let focal = viewport.to_surface(device);
        assert!(viewport.zoom_at(focal, 1.2));
        assert!(viewport.pan().x > 0.0 && viewport.pan().x < viewport.max_pan().x);
        let after = viewport.to_surface(device);
        assert!((after - focal).length() < 1e-2, "focal {focal:?} drifted to {after:?}");
    }

    #[test]
    fn clamped_zoom_is_a_noop() {
        let mut viewport = sheet();
        assert!(viewport.zoom_at(Pos2::ZERO, 8.0));
        viewport.set_pan(700.0, 500.0);
        let before = viewport.clone();

        assert!(!viewport.zoom_at(pos2(900.0, 700.0), 2.0));
        assert_eq!(viewport, before);
        assert!(!viewport.zoom_at(pos2(900.0, 700.0), f32::NAN));
        assert!(!viewport.zoom_at(pos2(900.0, 700.0), 0.0));
    }

    #[test]
    fn zoom_beyond_range_is_clamped() {
        let mut viewport = sheet();
        assert!(viewport.zoom_at(Pos2::ZERO, 100.0));
        assert_eq!(viewport.zoom(), ZOOM_MAX);
        assert!(viewport.zoom_at(Pos2::ZERO, 0.0001));
        assert_eq!(viewport.zoom(), ZOOM_MIN);
    }

    #[test]
    fn shrinking_the_canvas_keeps_pan_valid() {
        let mut viewport = sheet();
        viewport.set_pan(800.0, 600.0);
        assert_eq!(viewport.pan(), vec2(800.0, 600.0));

        viewport.set_device_size(vec2(1200.0, 900.0));
        assert_eq!(viewport.pan(), vec2(400.0, 300.0));
    }

    #[test]
    fn wheel_scroll_is_in_device_units() {
        let mut viewport = sheet();
        viewport.zoom_at(Pos2::ZERO, 2.0);
        viewport.scroll_by(vec2(40.0, -10.0));
        assert_eq!(viewport.pan(), vec2(20.0, 0.0));
    }
}
