//! The editor's single state object: the sheet, the view onto it, the
//! current tool and colors, the interaction in progress and the history.
//!
//! All input reaches the sheet through [`ToolController::handle_event`]. Every
//! operation that changes pixels snapshots the sheet when it starts and, when
//! it finishes, records what changed as one history entry; an operation that
//! ends up changing nothing records nothing.

use std::mem;

use ab_glyph::FontArc;
use egui::{PointerButton, Pos2, vec2};
use image::Rgb;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::InteractionState;
use crate::color::{BLACK, WHITE, parse_hex, rgb_of, to_hex};
use crate::command::{Command, CommandHistory};
use crate::config::PaintConfig;
use crate::error::{PaintError, PaintResult};
use crate::geometry::PixelRect;
use crate::input::{InputEvent, Shortcut};
use crate::selection::Selection;
use crate::surface::{PixelSurface, SurfaceSnapshot, default_font};
use crate::tools::{DEFAULT_STROKE_WIDTH, MAX_STROKE_WIDTH, MIN_STROKE_WIDTH, ToolKind};
use crate::viewport::Viewport;

/// Canvas size assumed until the UI reports the real one
const INITIAL_DEVICE_SIZE: egui::Vec2 = vec2(800.0, 600.0);

/// Zoom tool step: left click multiplies, right click divides
const ZOOM_TOOL_FACTOR: f32 = 2.0;

pub struct ToolController {
    surface: PixelSurface,
    viewport: Viewport,
    history: CommandHistory,
    tool: ToolKind,
    primary: Rgb<u8>,
    secondary: Rgb<u8>,
    stroke_width: u32,
    state: InteractionState,
    /// Finished marquee waiting to be dragged; only exists while Idle
    selection: Option<Selection>,
    /// Last pointer position in sheet coordinates
    pointer: Option<Pos2>,
    /// Next spray seed; each stroke gets its own
    spray_seed: u64,
    /// Loaded on the first text commit
    font: Option<FontArc>,
}

impl std::fmt::Debug for ToolController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolController")
            .field("tool", &self.tool)
            .field("state", &self.state.name())
            .field("zoom", &self.viewport.zoom())
            .field("undo", &self.history.undo_len())
            .finish_non_exhaustive()
    }
}

impl Default for ToolController {
    fn default() -> Self {
        let surface = PixelSurface::default();
        let viewport = Viewport::new(surface.size(), INITIAL_DEVICE_SIZE);
        Self::new(surface, viewport, CommandHistory::default())
    }
}

impl ToolController {
    pub fn new(surface: PixelSurface, viewport: Viewport, history: CommandHistory) -> Self {
        Self {
            surface,
            viewport,
            history,
            tool: ToolKind::default(),
            primary: BLACK,
            secondary: WHITE,
            stroke_width: DEFAULT_STROKE_WIDTH,
            state: InteractionState::Idle,
            selection: None,
            pointer: None,
            spray_seed: 0,
            font: None,
        }
    }

    pub fn from_config(config: &PaintConfig) -> PaintResult<Self> {
        config.validate()?;
        let surface = PixelSurface::new(config.width, config.height, config.background_color()?);
        let viewport = Viewport::with_zoom_range(
            surface.size(),
            INITIAL_DEVICE_SIZE,
            config.zoom_min,
            config.zoom_max,
        );
        let mut controller = Self::new(surface, viewport, CommandHistory::new(config.undo_depth));
        controller.primary = config.primary_color()?;
        controller.secondary = config.secondary_color()?;
        controller.stroke_width = config.stroke_width;
        Ok(controller)
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The UI drives size changes and scrollbar drags through this.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn primary(&self) -> Rgb<u8> {
        self.primary
    }

    pub fn secondary(&self) -> Rgb<u8> {
        self.secondary
    }

    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Pointer position in sheet coordinates, once the pointer has been seen
    pub fn pointer(&self) -> Option<Pos2> {
        self.pointer
    }

    /// Outline to draw over the sheet, if any
    pub fn marquee(&self) -> Option<PixelRect> {
        self.state
            .marquee()
            .or_else(|| self.selection.as_ref().map(Selection::rect))
    }

    /// Switches tools. Whatever was in progress is cancelled and a pending
    /// selection is dropped.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool == self.tool {
            return;
        }
        self.cancel();
        self.selection = None;
        info!("tool: {} -> {}", self.tool, tool);
        self.tool = tool;
    }

    pub fn set_primary(&mut self, color: Rgb<u8>) {
        self.primary = color;
    }

    pub fn set_secondary(&mut self, color: Rgb<u8>) {
        self.secondary = color;
    }

    /// Sets a color from a `#RRGGBB` string; left button sets primary.
    pub fn set_color_hex(&mut self, button: PointerButton, hex: &str) -> PaintResult<()> {
        let color = parse_hex(hex)?;
        match button {
            PointerButton::Secondary => self.secondary = color,
            _ => self.primary = color,
        }
        Ok(())
    }

    /// Clamped to the slider range
    pub fn set_stroke_width(&mut self, width: u32) {
        self.stroke_width = width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
    }

    /// `x:{X} y:{Y}  |  Zoom: {Z}%`
    pub fn status_text(&self) -> String {
        let pointer = self.pointer.unwrap_or(Pos2::ZERO);
        format!(
            "x:{} y:{}  |  Zoom: {}%",
            pointer.x.round() as i64,
            pointer.y.round() as i64,
            (self.viewport.zoom() * 100.0).round() as i64
        )
    }

    pub fn help(&self) -> &'static str {
        self.tool.help()
    }

    /// Attempts to move the state machine to `next`.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` if `next` is not reachable from the current state;
    /// the current state is kept.
    pub fn transition_to(&mut self, next: InteractionState) -> PaintResult<()> {
        if !self.state.can_transition_to(&next) {
            return Err(PaintError::InvalidTransition {
                from: self.state.name(),
                to: next.name(),
            });
        }
        debug!("{} -> {}", self.state.name(), next.name());
        self.state = next;
        Ok(())
    }

    /// Ends the current interaction, handing back its data.
    fn finish(&mut self) -> InteractionState {
        let previous = mem::replace(&mut self.state, InteractionState::Idle);
        if !previous.is_idle() {
            debug!("{} -> Idle", previous.name());
        }
        previous
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> PaintResult<()> {
        match event {
            InputEvent::PointerDown { pos, button } => self.pointer_down(*pos, *button),
            InputEvent::PointerMove { pos } => {
                self.pointer_move(*pos);
                Ok(())
            }
            InputEvent::PointerUp { pos, button } => self.pointer_up(*pos, *button),
            InputEvent::Scroll { delta } => {
                self.viewport.scroll_by(*delta);
                Ok(())
            }
            InputEvent::Zoom { pos, factor } => {
                self.viewport.zoom_at_device(*pos, *factor);
                Ok(())
            }
            InputEvent::Shortcut(Shortcut::Undo) => self.undo(),
            InputEvent::Shortcut(Shortcut::Redo) => self.redo(),
            InputEvent::Shortcut(Shortcut::Cancel) => {
                self.cancel();
                Ok(())
            }
            InputEvent::Shortcut(Shortcut::Commit) => self.commit_text(),
            InputEvent::Shortcut(Shortcut::Backspace) => {
                if let InteractionState::Typing { text, .. } = &mut self.state {
                    text.pop();
                }
                Ok(())
            }
            InputEvent::Text(typed) => {
                if let InteractionState::Typing { text, .. } = &mut self.state {
                    text.extend(typed.chars().filter(|c| !c.is_control()));
                }
                Ok(())
            }
        }
    }

    fn color_for(&self, button: PointerButton) -> Rgb<u8> {
        match button {
            PointerButton::Secondary => self.secondary,
            _ => self.primary,
        }
    }

    fn pointer_down(&mut self, device: Pos2, button: PointerButton) -> PaintResult<()> {
        let pos = self.viewport.to_surface(device);
        self.pointer = Some(pos);
        if !matches!(button, PointerButton::Primary | PointerButton::Secondary) {
            return Ok(());
        }

        match self.tool {
            ToolKind::Fill => self.fill_at(pos, self.color_for(button)),
            ToolKind::Eyedropper => self.pick_color(pos, button),
            ToolKind::Zoom => self.transition_to(InteractionState::ZoomGesture { button, anchor: pos }),
            ToolKind::Select => self.begin_select(pos, button),
            ToolKind::Text => self.begin_typing(pos),
            tool @ (ToolKind::Pencil
            | ToolKind::Brush
            | ToolKind::Eraser
            | ToolKind::Spray
            | ToolKind::Line
            | ToolKind::Rect
            | ToolKind::Ellipse) => self.begin_drawing(tool, pos, button),
        }
    }

    /// Starts a text box at `pos`. Clicking elsewhere while typing throws the
    /// unfinished text away first.
    fn begin_typing(&mut self, pos: Pos2) -> PaintResult<()> {
        if let InteractionState::Typing { text, .. } = &self.state {
            debug!("abandoned text {text:?}");
            self.finish();
        }
        self.transition_to(InteractionState::Typing {
            anchor: pos,
            text: String::new(),
        })
    }

    /// Writes the typed text into the sheet in the primary color as one
    /// history entry. Blank text is dropped without an entry.
    fn commit_text(&mut self) -> PaintResult<()> {
        if !matches!(self.state, InteractionState::Typing { .. }) {
            return Ok(());
        }
        let InteractionState::Typing { anchor, text } = self.finish() else {
            return Ok(());
        };
        if text.trim().is_empty() {
            debug!("blank text dropped");
            return Ok(());
        }

        let font = self.font()?;
        let base = self.surface.snapshot();
        let size = ToolKind::text_size(self.stroke_width);
        let written = self.surface.draw_text(&font, &text, anchor, size, self.primary);
        debug!("text {text:?} at {anchor:?}, {written} px");
        self.record(ToolKind::Text.name(), &base)
    }

    fn font(&mut self) -> PaintResult<FontArc> {
        if let Some(font) = &self.font {
            return Ok(font.clone());
        }
        let font = default_font()?;
        self.font = Some(font.clone());
        Ok(font)
    }

    fn fill_at(&mut self, pos: Pos2, color: Rgb<u8>) -> PaintResult<()> {
        self.transition_to(InteractionState::Filling)?;
        let base = self.surface.snapshot();
        let filled = self
            .surface
            .flood_fill(pos.x.floor() as i32, pos.y.floor() as i32, color);
        self.finish();
        filled?;
        self.record(ToolKind::Fill.name(), &base)
    }

    fn pick_color(&mut self, pos: Pos2, button: PointerButton) -> PaintResult<()> {
        let picked = rgb_of(self.surface.get_pixel(pos.x.floor() as i32, pos.y.floor() as i32)?);
        debug!("picked {} for {button:?}", to_hex(picked));
        match button {
            PointerButton::Secondary => self.secondary = picked,
            _ => self.primary = picked,
        }
        Ok(())
    }

    fn begin_select(&mut self, pos: Pos2, button: PointerButton) -> PaintResult<()> {
        if self.state.is_idle() {
            if let Some(selection) = self.selection.take_if(|s| s.contains(pos)) {
                let base = self.surface.snapshot();
                return self.transition_to(InteractionState::DraggingSelection {
                    button,
                    selection,
                    grab: pos,
                    offset: (0, 0),
                    base,
                });
            }
        }
        self.transition_to(InteractionState::Selecting {
            button,
            anchor: pos,
            current: pos,
        })?;
        self.selection = None;
        Ok(())
    }

    fn begin_drawing(&mut self, tool: ToolKind, pos: Pos2, button: PointerButton) -> PaintResult<()> {
        let color = match tool {
            ToolKind::Eraser => self.secondary,
            _ => self.color_for(button),
        };
        let rng = SmallRng::seed_from_u64(self.spray_seed);
        self.transition_to(InteractionState::Drawing {
            tool,
            button,
            color,
            width: tool.line_width(self.stroke_width),
            start: pos,
            last: pos,
            base: self.surface.snapshot(),
            rng,
        })?;
        self.spray_seed = self.spray_seed.wrapping_add(1);

        // Freehand tools leave a dab right away
        if let InteractionState::Drawing { rng, .. } = &mut self.state {
            if tool.is_freehand() {
                paint_freehand(&mut self.surface, tool, pos, pos, color, self.stroke_width, rng);
            }
        }
        Ok(())
    }

    fn pointer_move(&mut self, device: Pos2) {
        let pos = self.viewport.to_surface(device);
        self.pointer = Some(pos);

        match &mut self.state {
            InteractionState::Drawing {
                tool,
                color,
                width,
                start,
                last,
                base,
                rng,
                ..
            } => {
                if tool.is_freehand() {
                    paint_freehand(&mut self.surface, *tool, *last, pos, *color, self.stroke_width, rng);
                    *last = pos;
                } else if tool.is_shape() {
                    self.surface.restore(base);
                    paint_shape(&mut self.surface, *tool, *start, pos, *width, *color);
                }
            }
            InteractionState::Selecting { current, .. } => *current = pos,
            InteractionState::DraggingSelection {
                selection,
                grab,
                offset,
                base,
                ..
            } => {
                let next = drag_offset(*grab, pos);
                if next != *offset {
                    *offset = next;
                    self.surface.restore(base);
                    selection.move_by(&mut self.surface, next.0, next.1);
                }
            }
            InteractionState::Idle
            | InteractionState::Filling
            | InteractionState::ZoomGesture { .. }
            | InteractionState::Typing { .. } => {}
        }
    }

    fn pointer_up(&mut self, device: Pos2, button: PointerButton) -> PaintResult<()> {
        let pos = self.viewport.to_surface(device);
        self.pointer = Some(pos);
        if self.state.button() != Some(button) {
            return Ok(());
        }

        match self.finish() {
            InteractionState::Drawing {
                tool,
                color,
                width,
                start,
                last,
                base,
                mut rng,
                ..
            } => {
                // The spray only dabs while the pointer moves
                if tool.is_freehand() && tool != ToolKind::Spray {
                    paint_freehand(&mut self.surface, tool, last, pos, color, self.stroke_width, &mut rng);
                } else if tool.is_shape() {
                    self.surface.restore(&base);
                    paint_shape(&mut self.surface, tool, start, pos, width, color);
                }
                self.record(tool.name(), &base)
            }
            InteractionState::Selecting { anchor, .. } => {
                match Selection::capture(&self.surface, anchor, pos) {
                    Ok(selection) => {
                        debug!("selected {:?}", selection.rect());
                        self.selection = Some(selection);
                    }
                    Err(err) => debug!("marquee left the sheet: {err}"),
                }
                Ok(())
            }
            InteractionState::DraggingSelection {
                selection,
                grab,
                base,
                ..
            } => {
                let (dx, dy) = drag_offset(grab, pos);
                self.surface.restore(&base);
                selection.move_by(&mut self.surface, dx, dy);
                self.record("Move selection", &base)
            }
            InteractionState::ZoomGesture { button, anchor } => {
                let factor = match button {
                    PointerButton::Secondary => 1.0 / ZOOM_TOOL_FACTOR,
                    _ => ZOOM_TOOL_FACTOR,
                };
                if self.viewport.zoom_at(anchor, factor) {
                    info!("zoom {}%", (self.viewport.zoom() * 100.0).round());
                }
                Ok(())
            }
            InteractionState::Idle | InteractionState::Filling | InteractionState::Typing { .. } => Ok(()),
        }
    }

    /// Abandons the interaction in progress, putting back the pixels it
    /// touched; when idle, drops the pending selection instead.
    pub fn cancel(&mut self) {
        match self.finish() {
            InteractionState::Drawing { base, .. } | InteractionState::DraggingSelection { base, .. } => {
                self.surface.restore(&base);
            }
            InteractionState::Idle => self.selection = None,
            InteractionState::Filling
            | InteractionState::Selecting { .. }
            | InteractionState::ZoomGesture { .. }
            | InteractionState::Typing { .. } => {}
        }
    }

    pub fn undo(&mut self) -> PaintResult<()> {
        self.cancel();
        self.selection = None;
        let label = self.history.undo(&mut self.surface)?;
        info!("undo: {label}");
        Ok(())
    }

    pub fn redo(&mut self) -> PaintResult<()> {
        self.cancel();
        self.selection = None;
        let label = self.history.redo(&mut self.surface)?;
        info!("redo: {label}");
        Ok(())
    }

    fn record(&mut self, label: &'static str, base: &SurfaceSnapshot) -> PaintResult<()> {
        match Command::from_changes(label, base, &self.surface)? {
            Some(command) => self.history.push(command),
            None => debug!("{label} changed nothing"),
        }
        Ok(())
    }
}

fn drag_offset(grab: Pos2, pos: Pos2) -> (i32, i32) {
    let delta = pos - grab;
    (delta.x.round() as i32, delta.y.round() as i32)
}

fn paint_freehand(
    surface: &mut PixelSurface,
    tool: ToolKind,
    from: Pos2,
    to: Pos2,
    color: Rgb<u8>,
    stroke_width: u32,
    rng: &mut SmallRng,
) {
    match tool {
        ToolKind::Spray => {
            let radius = ToolKind::spray_radius(stroke_width);
            surface.spray(to, radius as f32, ToolKind::spray_density(stroke_width), color, rng);
        }
        _ => surface.draw_line(from, to, tool.line_width(stroke_width), color),
    }
}

fn paint_shape(surface: &mut PixelSurface, tool: ToolKind, start: Pos2, end: Pos2, width: f32, color: Rgb<u8>) {
    match tool {
        ToolKind::Rect => surface.stroke_rect(start, end, width, color),
        ToolKind::Ellipse => surface.stroke_ellipse(start, end, width, color),
        _ => surface.draw_line(start, end, width, color),
    }
}
