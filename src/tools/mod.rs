use egui::CursorIcon;
use serde::{Deserialize, Serialize};

/// Smallest and largest line width the size slider offers
pub const MIN_STROKE_WIDTH: u32 = 1;
pub const MAX_STROKE_WIDTH: u32 = 20;
pub const DEFAULT_STROKE_WIDTH: u32 = 2;

/// The tools in the toolbox, in toolbox order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Select,
    Eraser,
    Fill,
    Eyedropper,
    Zoom,
    Pencil,
    Brush,
    Spray,
    Text,
    Line,
    Rect,
    Ellipse,
}

impl ToolKind {
    pub const ALL: [ToolKind; 12] = [
        ToolKind::Select,
        ToolKind::Eraser,
        ToolKind::Fill,
        ToolKind::Eyedropper,
        ToolKind::Zoom,
        ToolKind::Pencil,
        ToolKind::Brush,
        ToolKind::Spray,
        ToolKind::Text,
        ToolKind::Line,
        ToolKind::Rect,
        ToolKind::Ellipse,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "Select",
            ToolKind::Eraser => "Eraser",
            ToolKind::Fill => "Fill",
            ToolKind::Eyedropper => "Pick color",
            ToolKind::Zoom => "Zoom",
            ToolKind::Pencil => "Pencil",
            ToolKind::Brush => "Brush",
            ToolKind::Spray => "Airbrush",
            ToolKind::Text => "Text",
            ToolKind::Line => "Line",
            ToolKind::Rect => "Rectangle",
            ToolKind::Ellipse => "Ellipse",
        }
    }

    /// Short glyph for the toolbox button
    pub fn icon(self) -> &'static str {
        match self {
            ToolKind::Select => "⬚",
            ToolKind::Eraser => "⌫",
            ToolKind::Fill => "🪣",
            ToolKind::Eyedropper => "💧",
            ToolKind::Zoom => "🔍",
            ToolKind::Pencil => "✏",
            ToolKind::Brush => "🖌",
            ToolKind::Spray => "💨",
            ToolKind::Text => "A",
            ToolKind::Line => "╱",
            ToolKind::Rect => "▭",
            ToolKind::Ellipse => "◯",
        }
    }

    /// One-line usage hint shown in the status bar
    pub fn help(self) -> &'static str {
        match self {
            ToolKind::Select => "Select a rectangular region. Drag to move after selecting.",
            ToolKind::Eraser => "Erase with the secondary color (white by default).",
            ToolKind::Fill => "Fill a region with the selected color. Left=Primary, Right=Secondary.",
            ToolKind::Eyedropper => "Pick color from the canvas. Left→Primary, Right→Secondary.",
            ToolKind::Zoom => "Left=Zoom In, Right=Zoom Out.",
            ToolKind::Pencil => "Draw 1–2px hard lines.",
            ToolKind::Brush => "Draw thicker lines.",
            ToolKind::Spray => "Airbrush style spray.",
            ToolKind::Text => "Click to type. Enter to commit, Esc to cancel.",
            ToolKind::Line => "Draw straight lines.",
            ToolKind::Rect => "Draw rectangles.",
            ToolKind::Ellipse => "Draw ellipses.",
        }
    }

    pub fn cursor(self) -> CursorIcon {
        match self {
            ToolKind::Select => CursorIcon::Crosshair,
            ToolKind::Zoom => CursorIcon::ZoomIn,
            ToolKind::Eyedropper | ToolKind::Fill => CursorIcon::PointingHand,
            ToolKind::Text => CursorIcon::Text,
            _ => CursorIcon::Crosshair,
        }
    }

    /// Pencil, brush, eraser and spray paint continuously while dragged.
    pub fn is_freehand(self) -> bool {
        matches!(
            self,
            ToolKind::Pencil | ToolKind::Brush | ToolKind::Eraser | ToolKind::Spray
        )
    }

    /// Line, rectangle and ellipse preview until release.
    pub fn is_shape(self) -> bool {
        matches!(self, ToolKind::Line | ToolKind::Rect | ToolKind::Ellipse)
    }

    /// Effective line width for this tool at the slider value `stroke`.
    pub fn line_width(self, stroke: u32) -> f32 {
        match self {
            ToolKind::Pencil => stroke.clamp(1, 2) as f32,
            ToolKind::Brush => stroke.max(2) as f32,
            ToolKind::Eraser => (stroke * 3 / 2).max(4) as f32,
            _ => stroke.max(1) as f32,
        }
    }

    /// Text height in pixels at the slider value `stroke`
    pub fn text_size(stroke: u32) -> f32 {
        (stroke * 6).max(10) as f32
    }

    pub fn spray_radius(stroke: u32) -> u32 {
        stroke.max(3)
    }

    /// Dots per spray stamp
    pub fn spray_density(stroke: u32) -> u32 {
        20 + 2 * Self::spray_radius(stroke)
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_follow_tool_rules() {
        assert_eq!(ToolKind::Pencil.line_width(1), 1.0);
        assert_eq!(ToolKind::Pencil.line_width(9), 2.0);
        assert_eq!(ToolKind::Brush.line_width(1), 2.0);
        assert_eq!(ToolKind::Brush.line_width(7), 7.0);
        assert_eq!(ToolKind::Eraser.line_width(2), 4.0);
        assert_eq!(ToolKind::Eraser.line_width(5), 7.0);
        assert_eq!(ToolKind::Line.line_width(5), 5.0);
    }

    #[test]
    fn spray_scales_with_size() {
        assert_eq!(ToolKind::spray_radius(1), 3);
        assert_eq!(ToolKind::spray_density(1), 26);
        assert_eq!(ToolKind::spray_density(10), 40);
    }

    #[test]
    fn text_grows_with_size_from_ten_pixels() {
        assert_eq!(ToolKind::text_size(1), 10.0);
        assert_eq!(ToolKind::text_size(2), 12.0);
        assert_eq!(ToolKind::text_size(20), 120.0);
    }

    #[test]
    fn every_tool_has_help() {
        for tool in ToolKind::ALL {
            assert!(!tool.help().is_empty(), "{tool}");
        }
        assert_eq!(ToolKind::default(), ToolKind::Select);
    }
}
