use crate::PaintApp;

pub fn status_bar(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let controller = app.controller();
            ui.monospace(controller.status_text());
            ui.separator();
            ui.label(controller.help());
        });
    });
}
