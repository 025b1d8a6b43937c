use egui::{Align2, Color32, FontId, Id, Pos2, Rect, Sense, pos2, vec2};

use crate::viewport::{ScrollbarAxis, Viewport};

/// Scrollbar thickness, also the size of the arrow buttons
pub const THICKNESS: f32 = 16.0;

const TRACK_COLOR: Color32 = Color32::from_gray(225);
const BUTTON_COLOR: Color32 = Color32::from_gray(200);
const THUMB_COLOR: Color32 = Color32::from_gray(165);
const THUMB_ACTIVE_COLOR: Color32 = Color32::from_gray(130);

/// Draws a classic scrollbar (arrow, track, arrow) in `rect` and returns the
/// new pan for its axis when the user moved it.
pub fn scrollbar(ui: &mut egui::Ui, id: Id, rect: Rect, viewport: &Viewport, horizontal: bool) -> Option<f32> {
    let along = |p: Pos2| if horizontal { p.x } else { p.y };
    let (dec_rect, track_rect, inc_rect) = split(rect, horizontal);
    let track_start = along(track_rect.min);
    let track_length = (along(track_rect.max) - track_start).max(0.0);

    let (axis, pan): (ScrollbarAxis, f32) = if horizontal {
        (viewport.horizontal_scrollbar(track_length), viewport.pan().x)
    } else {
        (viewport.vertical_scrollbar(track_length), viewport.pan().y)
    };
    let zoom = viewport.zoom();

    let mut new_pan = None;
    let dec = ui.interact(dec_rect, id.with("dec"), Sense::click());
    let inc = ui.interact(inc_rect, id.with("inc"), Sense::click());
    if dec.clicked() {
        new_pan = Some(axis.step(pan, -1.0, zoom));
    }
    if inc.clicked() {
        new_pan = Some(axis.step(pan, 1.0, zoom));
    }

    let track = ui.interact(track_rect, id.with("track"), Sense::click_and_drag());
    let thumb_offset = axis.pan_to_thumb(pan);
    let thumb_length = axis.thumb_length();
    let grab_id = id.with("grab");
    let pointer = track.interact_pointer_pos().map(|p| along(p) - track_start);

    if track.drag_started() {
        if let Some(offset) = pointer {
            if (thumb_offset..=thumb_offset + thumb_length).contains(&offset) {
                ui.data_mut(|d| d.insert_temp(grab_id, offset - thumb_offset));
            }
        }
    }
    let grab = ui.data(|d| d.get_temp::<f32>(grab_id));
    if track.dragged() {
        if let (Some(grab), Some(offset)) = (grab, pointer) {
            new_pan = Some(axis.drag_to(offset, grab));
        }
    }
    if track.drag_stopped() {
        ui.data_mut(|d| d.remove::<f32>(grab_id));
    }
    if track.clicked() {
        if let Some(offset) = pointer {
            new_pan = Some(axis.page(offset, pan));
        }
    }

    let painter = ui.painter();
    painter.rect_filled(track_rect, 0.0, TRACK_COLOR);
    if axis.is_scrollable() {
        let thumb_rect = if horizontal {
            Rect::from_min_size(
                pos2(track_start + thumb_offset, track_rect.min.y),
                vec2(thumb_length, track_rect.height()),
            )
        } else {
            Rect::from_min_size(
                pos2(track_rect.min.x, track_start + thumb_offset),
                vec2(track_rect.width(), thumb_length),
            )
        };
        let color = if grab.is_some() { THUMB_ACTIVE_COLOR } else { THUMB_COLOR };
        painter.rect_filled(thumb_rect.shrink(1.0), 2.0, color);
    }
    let (dec_glyph, inc_glyph) = if horizontal { ("⏴", "⏵") } else { ("⏶", "⏷") };
    for (button_rect, glyph) in [(dec_rect, dec_glyph), (inc_rect, inc_glyph)] {
        painter.rect_filled(button_rect, 0.0, BUTTON_COLOR);
        painter.text(
            button_rect.center(),
            Align2::CENTER_CENTER,
            glyph,
            FontId::proportional(10.0),
            Color32::BLACK,
        );
    }

    new_pan.filter(|p| *p != pan)
}

/// Decrement arrow, track, increment arrow
fn split(rect: Rect, horizontal: bool) -> (Rect, Rect, Rect) {
    if horizontal {
        let button = THICKNESS.min(rect.width() / 2.0);
        (
            Rect::from_min_max(rect.min, pos2(rect.min.x + button, rect.max.y)),
            Rect::from_min_max(pos2(rect.min.x + button, rect.min.y), pos2(rect.max.x - button, rect.max.y)),
            Rect::from_min_max(pos2(rect.max.x - button, rect.min.y), rect.max),
        )
    } else {
        let button = THICKNESS.min(rect.height() / 2.0);
        (
            Rect::from_min_max(rect.min, pos2(rect.max.x, rect.min.y + button)),
            Rect::from_min_max(pos2(rect.min.x, rect.min.y + button), pos2(rect.max.x, rect.max.y - button)),
            Rect::from_min_max(pos2(rect.min.x, rect.max.y - button), rect.max),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_leaves_track_between_arrows() {
        let rect = Rect::from_min_max(pos2(0.0, 500.0), pos2(332.0, 516.0));
        let (dec, track, inc) = split(rect, true);
        assert_eq!(dec.width(), THICKNESS);
        assert_eq!(inc.width(), THICKNESS);
        assert_eq!(track.width(), 300.0);
        assert_eq!(track.min.x, 16.0);
    }
}
