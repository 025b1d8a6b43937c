//! The interaction state machine of the editor.
//!
//! Every pointer interaction starts from `Idle` and returns to `Idle`; there
//! are no direct hops between the active states. In particular a marquee has
//! to be released (`Selecting -> Idle`) before the resulting selection can be
//! dragged (`Idle -> DraggingSelection`).
//!
//! ```text
//!            ┌──► Drawing ───────────┐
//!            ├──► Filling ───────────┤
//!   Idle ────┼──► Selecting ─────────┼──► Idle
//!            ├──► DraggingSelection ─┤
//!            ├──► ZoomGesture ───────┤
//!            └──► Typing ────────────┘
//! ```

use egui::{PointerButton, Pos2};
use image::Rgb;
use rand::rngs::SmallRng;

use crate::geometry::PixelRect;
use crate::selection::Selection;
use crate::surface::SurfaceSnapshot;
use crate::tools::ToolKind;

#[derive(Debug)]
pub enum InteractionState {
    /// No active operation
    Idle,
    /// A freehand stroke or a shape preview is in progress
    Drawing {
        tool: ToolKind,
        button: PointerButton,
        color: Rgb<u8>,
        width: f32,
        start: Pos2,
        last: Pos2,
        /// The sheet as it was at pointer down
        base: SurfaceSnapshot,
        rng: SmallRng,
    },
    /// A flood fill is running
    Filling,
    /// A marquee is being dragged out
    Selecting {
        button: PointerButton,
        anchor: Pos2,
        current: Pos2,
    },
    /// A finished selection is being moved
    DraggingSelection {
        button: PointerButton,
        selection: Selection,
        grab: Pos2,
        offset: (i32, i32),
        base: SurfaceSnapshot,
    },
    /// The zoom tool is pressed; the zoom happens on release
    ZoomGesture { button: PointerButton, anchor: Pos2 },
    /// Text is being typed at `anchor`; nothing touches the sheet until commit
    Typing { anchor: Pos2, text: String },
}

impl InteractionState {
    /// Validates whether a transition to `next` is allowed
    pub fn can_transition_to(&self, next: &InteractionState) -> bool {
        match (self, next) {
            // From Idle, we can go to any state
            (InteractionState::Idle, _) => true,
            // Every operation finishes or cancels back to Idle
            (_, InteractionState::Idle) => true,
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "Idle",
            InteractionState::Drawing { .. } => "Drawing",
            InteractionState::Filling => "Filling",
            InteractionState::Selecting { .. } => "Selecting",
            InteractionState::DraggingSelection { .. } => "DraggingSelection",
            InteractionState::ZoomGesture { .. } => "ZoomGesture",
            InteractionState::Typing { .. } => "Typing",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    /// The button that started the current interaction
    pub fn button(&self) -> Option<PointerButton> {
        match self {
            InteractionState::Drawing { button, .. }
            | InteractionState::Selecting { button, .. }
            | InteractionState::DraggingSelection { button, .. }
            | InteractionState::ZoomGesture { button, .. } => Some(*button),
            InteractionState::Idle | InteractionState::Filling | InteractionState::Typing { .. } => None,
        }
    }

    /// Outline to draw for a marquee in progress or a selection being moved.
    pub fn marquee(&self) -> Option<PixelRect> {
        match self {
            InteractionState::Selecting { anchor, current, .. } => {
                Some(PixelRect::from_corners(*anchor, *current))
            }
            InteractionState::DraggingSelection {
                selection, offset, ..
            } => Some(selection.rect().translate(offset.0, offset.1)),
            _ => None,
        }
    }

    /// Where uncommitted text sits, and what has been typed so far
    pub fn typed_text(&self) -> Option<(Pos2, &str)> {
        match self {
            InteractionState::Typing { anchor, text } => Some((*anchor, text.as_str())),
            _ => None,
        }
    }
}
