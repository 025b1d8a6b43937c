use egui::{Color32, Id, Rect, Sense, pos2, vec2};

use super::scrollbar::{THICKNESS, scrollbar};
use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let full = ui.available_rect_before_wrap();
            let canvas = Rect::from_min_max(full.min, full.max - vec2(THICKNESS, THICKNESS));
            app.controller_mut()
                .viewport_mut()
                .set_device_size(canvas.size());

            let response = ui.allocate_rect(canvas, Sense::click_and_drag());
            if response.hovered() {
                ctx.set_cursor_icon(app.controller().tool().cursor());
            }

            // Handle input, then render the result of this frame's events
            app.handle_input(ctx, canvas);
            app.render(ui.painter(), canvas);

            let viewport = app.controller().viewport().clone();
            let horizontal = Rect::from_min_max(pos2(canvas.min.x, canvas.max.y), pos2(canvas.max.x, full.max.y));
            let vertical = Rect::from_min_max(pos2(canvas.max.x, canvas.min.y), pos2(full.max.x, canvas.max.y));

            let mut pan = viewport.pan();
            if let Some(x) = scrollbar(ui, Id::new("scroll_x"), horizontal, &viewport, true) {
                pan.x = x;
            }
            if let Some(y) = scrollbar(ui, Id::new("scroll_y"), vertical, &viewport, false) {
                pan.y = y;
            }
            if pan != viewport.pan() {
                app.controller_mut().viewport_mut().set_pan(pan.x, pan.y);
            }

            let corner = Rect::from_min_max(canvas.max, full.max);
            ui.painter().rect_filled(corner, 0.0, Color32::from_gray(200));
        });
}
