use egui::{Color32, Sense, Stroke, vec2};
use image::Rgb;

use crate::PaintApp;
use crate::color::{to_color32, to_hex};
use crate::tools::{MAX_STROKE_WIDTH, MIN_STROKE_WIDTH, ToolKind};

const SWATCH: f32 = 16.0;
const SWATCHES_PER_ROW: usize = 7;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(120.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.controller().tool();
            egui::Grid::new("toolbox").num_columns(2).show(ui, |ui| {
                for (i, tool) in ToolKind::ALL.into_iter().enumerate() {
                    let button = ui
                        .selectable_label(active == tool, tool.icon())
                        .on_hover_text(tool.name());
                    if button.clicked() {
                        log::info!("Tool selected from UI: {tool}");
                        app.controller_mut().set_tool(tool);
                    }
                    if i % 2 == 1 {
                        ui.end_row();
                    }
                }
            });
            ui.separator();

            let mut width = app.controller().stroke_width();
            if ui
                .add(egui::Slider::new(&mut width, MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH).text("Size"))
                .changed()
            {
                app.controller_mut().set_stroke_width(width);
            }
            ui.separator();

            ui.horizontal(|ui| {
                let controller = app.controller();
                color_box(ui, controller.primary()).on_hover_text("Primary");
                color_box(ui, controller.secondary()).on_hover_text("Secondary");
            });

            // Left click picks the primary color, right click the secondary
            let mut picked = None;
            for row in app.palette().chunks(SWATCHES_PER_ROW) {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing = vec2(1.0, 1.0);
                    for &color in row {
                        let response = color_box(ui, color).on_hover_text(to_hex(color));
                        if response.clicked() {
                            picked = Some((color, true));
                        } else if response.secondary_clicked() {
                            picked = Some((color, false));
                        }
                    }
                });
            }
            match picked {
                Some((color, true)) => app.controller_mut().set_primary(color),
                Some((color, false)) => app.controller_mut().set_secondary(color),
                None => {}
            }
            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app.controller().history().can_undo();
                let can_redo = app.controller().history().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });
        });
}

fn color_box(ui: &mut egui::Ui, color: Rgb<u8>) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(vec2(SWATCH, SWATCH), Sense::click());
    ui.painter().rect_filled(rect, 0.0, to_color32(color));
    ui.painter()
        .rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::DARK_GRAY));
    response
}
