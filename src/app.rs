use image::Rgb;
use log::warn;

use crate::color::{DEFAULT_PALETTE, parse_palette};
use crate::config::PaintConfig;
use crate::input::InputHandler;
use crate::panels::{central_panel, status_bar, tools_panel};
use crate::renderer::Renderer;
use crate::state::ToolController;

pub struct PaintApp {
    // Needs the creation context, so there is none in headless use
    renderer: Option<Renderer>,
    controller: ToolController,
    input: InputHandler,
    palette: Vec<Rgb<u8>>,
}

impl std::fmt::Debug for PaintApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintApp")
            .field("controller", &self.controller)
            .field("palette", &self.palette.len())
            .finish_non_exhaustive()
    }
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::from_config(&PaintConfig::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: &PaintConfig) -> Self {
        Self {
            renderer: Some(Renderer::new(cc)),
            ..Self::from_config(config)
        }
    }

    /// Builds the editor without a renderer. An invalid config falls back to
    /// the defaults.
    pub fn from_config(config: &PaintConfig) -> Self {
        let controller = ToolController::from_config(config).unwrap_or_else(|err| {
            warn!("{err}; using default settings");
            ToolController::default()
        });
        let palette = config
            .palette_colors()
            .or_else(|_| parse_palette(&DEFAULT_PALETTE))
            .unwrap_or_default();
        Self {
            renderer: None,
            controller,
            input: InputHandler::new(),
            palette,
        }
    }

    pub fn controller(&self) -> &ToolController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ToolController {
        &mut self.controller
    }

    pub fn palette(&self) -> &[Rgb<u8>] {
        &self.palette
    }

    /// Feeds this frame's canvas input to the controller. A rejected event
    /// aborts only that operation.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas: egui::Rect) {
        for event in self.input.process_input(ctx, canvas) {
            if let Err(err) = self.controller.handle_event(&event) {
                warn!("{event:?} rejected: {err}");
            }
        }
    }

    pub fn undo(&mut self) {
        if let Err(err) = self.controller.undo() {
            warn!("{err}");
        }
    }

    pub fn redo(&mut self) {
        if let Err(err) = self.controller.redo() {
            warn!("{err}");
        }
    }

    pub fn render(&mut self, painter: &egui::Painter, canvas: egui::Rect) {
        if let Some(renderer) = &mut self.renderer {
            renderer.render(painter, canvas, &self.controller);
        }
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Side and bottom panels first so the central panel gets the rest
        status_bar(self, ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
