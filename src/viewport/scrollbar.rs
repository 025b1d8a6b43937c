/// Shortest thumb that is still comfortable to grab, in device pixels
pub const MIN_THUMB_LENGTH: f32 = 16.0;

/// How far one click on a scrollbar arrow scrolls, in device pixels
pub const ARROW_STEP: f32 = 16.0;

/// One scrollbar axis: a linear map between the thumb's offset inside its
/// track and the viewport pan on that axis.
///
/// Pan 0 maps to thumb offset 0 and the largest pan maps to
/// `track_length - thumb_length`, in both directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarAxis {
    track_length: f32,
    surface_extent: f32,
    visible_extent: f32,
}

impl ScrollbarAxis {
    pub fn new(track_length: f32, surface_extent: f32, visible_extent: f32) -> Self {
        let surface_extent = surface_extent.max(0.0);
        Self {
            track_length: track_length.max(0.0),
            surface_extent,
            visible_extent: visible_extent.clamp(0.0, surface_extent),
        }
    }

    pub fn track_length(&self) -> f32 {
        self.track_length
    }

    /// Proportional to the visible share of the sheet, but never shorter
    /// than [`MIN_THUMB_LENGTH`] (unless the track itself is shorter).
    pub fn thumb_length(&self) -> f32 {
        if self.surface_extent <= 0.0 {
            return self.track_length;
        }
        let proportional = self.track_length * self.visible_extent / self.surface_extent;
        proportional.clamp(MIN_THUMB_LENGTH.min(self.track_length), self.track_length)
    }

    /// How far the thumb can move
    pub fn thumb_travel(&self) -> f32 {
        (self.track_length - self.thumb_length()).max(0.0)
    }

    pub fn max_pan(&self) -> f32 {
        (self.surface_extent - self.visible_extent).max(0.0)
    }

    /// Whether there is anything to scroll at all
    pub fn is_scrollable(&self) -> bool {
        self.max_pan() > 0.0 && self.thumb_travel() > 0.0
    }

    pub fn pan_to_thumb(&self, pan: f32) -> f32 {
        if !self.is_scrollable() {
            return 0.0;
        }
        (pan / self.max_pan()).clamp(0.0, 1.0) * self.thumb_travel()
    }

    pub fn thumb_to_pan(&self, thumb_offset: f32) -> f32 {
        if !self.is_scrollable() {
            return 0.0;
        }
        (thumb_offset / self.thumb_travel()).clamp(0.0, 1.0) * self.max_pan()
    }

    /// Pan after dragging the thumb: `pointer` is the pointer offset along the
    /// track and `grab` is where on the thumb the drag started.
    pub fn drag_to(&self, pointer: f32, grab: f32) -> f32 {
        self.thumb_to_pan(pointer - grab)
    }

    /// Pan after clicking the bare track at `click` (offset along the track):
    /// one visible extent towards the click.
    pub fn page(&self, click: f32, pan: f32) -> f32 {
        let thumb_start = self.pan_to_thumb(pan);
        let target = if click < thumb_start {
            pan - self.visible_extent
        } else if click > thumb_start + self.thumb_length() {
            pan + self.visible_extent
        } else {
            pan
        };
        target.clamp(0.0, self.max_pan())
    }

    /// Pan after clicking an arrow; `direction` is negative for the
    /// left/up arrow and positive for right/down.
    pub fn step(&self, pan: f32, direction: f32, zoom: f32) -> f32 {
        (pan + direction.signum() * ARROW_STEP / zoom).clamp(0.0, self.max_pan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis() -> ScrollbarAxis {
        // 1600 px sheet, 400 px visible, 300 px track
        ScrollbarAxis::new(300.0, 1600.0, 400.0)
    }

    #[test]
    fn thumb_is_proportional() {
        assert_eq!(axis().thumb_length(), 75.0);
        assert_eq!(axis().thumb_travel(), 225.0);
        assert_eq!(axis().max_pan(), 1200.0);
    }

    #[test]
    fn extremes_map_exactly() {
        let axis = axis();
        assert_eq!(axis.pan_to_thumb(0.0), 0.0);
        assert_eq!(axis.pan_to_thumb(axis.max_pan()), axis.track_length() - axis.thumb_length());
        assert_eq!(axis.thumb_to_pan(0.0), 0.0);
        assert_eq!(axis.thumb_to_pan(axis.thumb_travel()), axis.max_pan());
        assert_eq!(axis.thumb_to_pan(10_000.0), axis.max_pan());
        assert_eq!(axis.thumb_to_pan(-5.0), 0.0);
    }

    #[test]
    fn forward_and_inverse_round_trip() {
        let axis = axis();
        for step in 0..=100 {
            let pan = axis.max_pan() * step as f32 / 100.0;
            let back = axis.thumb_to_pan(axis.pan_to_thumb(pan));
            assert!((back - pan).abs() < 1e-2, "{pan} -> {back}");
        }
        for step in 0..=100 {
            let thumb = axis.thumb_travel() * step as f32 / 100.0;
            let back = axis.pan_to_thumb(axis.thumb_to_pan(thumb));
            assert!((back - thumb).abs() < 1e-3, "{thumb} -> {back}");
        }
    }

    #[test]
    fn tiny_visible_share_respects_minimum_thumb() {
        let axis = ScrollbarAxis::new(300.0, 1600.0, 10.0);
        assert_eq!(axis.thumb_length(), MIN_THUMB_LENGTH);
        assert_eq!(axis.pan_to_thumb(axis.max_pan()), 300.0 - MIN_THUMB_LENGTH);
        assert_eq!(axis.thumb_to_pan(300.0 - MIN_THUMB_LENGTH), axis.max_pan());

        let short_track = ScrollbarAxis::new(8.0, 1600.0, 10.0);
        assert_eq!(short_track.thumb_length(), 8.0);
        assert!(!short_track.is_scrollable());
    }

    #[test]
    fn whole_sheet_visible_means_no_scrolling() {
        let axis = ScrollbarAxis::new(300.0, 1600.0, 1600.0);
        assert_eq!(axis.thumb_length(), 300.0);
        assert!(!axis.is_scrollable());
        assert_eq!(axis.pan_to_thumb(50.0), 0.0);
        assert_eq!(axis.thumb_to_pan(50.0), 0.0);
    }

    #[test]
    fn track_click_pages_towards_click() {
        let axis = axis();
        // thumb spans 112.5..187.5 for pan 600
        assert_eq!(axis.pan_to_thumb(600.0), 112.5);
        assert_eq!(axis.page(10.0, 600.0), 200.0);
        assert_eq!(axis.page(200.0, 600.0), 1000.0);
        assert_eq!(axis.page(150.0, 600.0), 600.0);
        assert_eq!(axis.page(299.0, 1100.0), 1200.0);
    }

    #[test]
    fn drag_keeps_grab_point_under_pointer() {
        let axis = axis();
        assert_eq!(axis.drag_to(30.0 + 225.0, 30.0), axis.max_pan());
        assert_eq!(axis.drag_to(30.0, 30.0), 0.0);
    }

    #[test]
    fn arrow_steps_scale_with_zoom() {
        let axis = axis();
        assert_eq!(axis.step(100.0, 1.0, 2.0), 108.0);
        assert_eq!(axis.step(4.0, -1.0, 1.0), 0.0);
    }
}
