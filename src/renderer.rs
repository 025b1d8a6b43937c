use eframe::egui::{
    self, Align2, Color32, ColorImage, FontId, Rect, Shape, Stroke, TextureHandle, TextureOptions, pos2,
};

use crate::color::to_color32;
use crate::geometry::PixelRect;
use crate::state::ToolController;
use crate::tools::ToolKind;
use crate::viewport::Viewport;

/// Gray shown around the sheet when it is smaller than the canvas
const DESK_COLOR: Color32 = Color32::from_rgb(128, 128, 128);

/// Marquee dash pattern, in screen pixels
const DASH: f32 = 6.0;
const GAP: f32 = 4.0;

/// Draws the sheet into the canvas.
///
/// The sheet lives on the GPU as one texture; it is re-uploaded only when
/// the surface revision moves.
pub struct Renderer {
    ctx: egui::Context,
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("uploaded_revision", &self.uploaded_revision)
            .finish_non_exhaustive()
    }
}

impl Renderer {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            ctx: cc.egui_ctx.clone(),
            texture: None,
            uploaded_revision: None,
        }
    }

    /// Renders the visible part of the sheet, then the marquee and any
    /// uncommitted text on top.
    pub fn render(&mut self, painter: &egui::Painter, canvas: Rect, controller: &ToolController) {
        painter.rect_filled(canvas, 0.0, DESK_COLOR);

        let texture = self.sync_texture(controller);
        let viewport = controller.viewport();
        painter.image(
            texture,
            sheet_screen_rect(viewport, canvas),
            visible_uv(viewport),
            Color32::WHITE,
        );

        if let Some(marquee) = controller.marquee() {
            let outline = marquee_screen_rect(viewport, canvas, marquee);
            let corners = [
                outline.left_top(),
                outline.right_top(),
                outline.right_bottom(),
                outline.left_bottom(),
                outline.left_top(),
            ];
            let clipped = painter.with_clip_rect(canvas);
            clipped.extend(Shape::dashed_line(&corners, Stroke::new(1.0, Color32::BLACK), DASH, GAP));
        }

        if let Some((anchor, text)) = controller.state().typed_text() {
            let at = viewport.to_device(anchor) + canvas.min.to_vec2();
            let size = ToolKind::text_size(controller.stroke_width()) * viewport.zoom();
            let clipped = painter.with_clip_rect(canvas);
            let typed = clipped.text(
                at,
                Align2::LEFT_TOP,
                format!("{text}|"),
                FontId::proportional(size),
                to_color32(controller.primary()),
            );
            clipped.rect_stroke(typed.expand(2.0), 0.0, Stroke::new(1.0, Color32::DARK_GRAY));
        }
    }

    fn sync_texture(&mut self, controller: &ToolController) -> egui::TextureId {
        let surface = controller.surface();
        let revision = surface.revision();
        let image = || {
            ColorImage::from_rgba_unmultiplied(
                [surface.width() as usize, surface.height() as usize],
                surface.as_raw(),
            )
        };

        match &mut self.texture {
            Some(texture) => {
                if self.uploaded_revision != Some(revision) {
                    texture.set(image(), TextureOptions::NEAREST);
                }
            }
            None => {
                self.texture = Some(self.ctx.load_texture("sheet", image(), TextureOptions::NEAREST));
            }
        }
        self.uploaded_revision = Some(revision);
        self.texture
            .as_ref()
            .map_or(egui::TextureId::default(), TextureHandle::id)
    }
}

/// Where the visible window of the sheet lands on screen.
///
/// Anchored at the canvas' top-left; smaller than the canvas when zoomed out
/// past the sheet edges.
pub fn sheet_screen_rect(viewport: &Viewport, canvas: Rect) -> Rect {
    let size = viewport.visible_size() * viewport.zoom();
    Rect::from_min_size(canvas.min, size)
}

/// Texture coordinates of the visible window
pub fn visible_uv(viewport: &Viewport) -> Rect {
    let surface = viewport.surface_size();
    if surface.x <= 0.0 || surface.y <= 0.0 {
        return Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
    }
    let min = viewport.pan() / surface;
    let max = (viewport.pan() + viewport.visible_size()) / surface;
    Rect::from_min_max(min.to_pos2(), max.to_pos2())
}

/// A sheet rectangle in screen coordinates
pub fn marquee_screen_rect(viewport: &Viewport, canvas: Rect, rect: PixelRect) -> Rect {
    let sheet = rect.to_rect();
    let offset = canvas.min.to_vec2();
    Rect::from_min_max(
        viewport.to_device(sheet.min) + offset,
        viewport.to_device(sheet.max) + offset,
    )
}
