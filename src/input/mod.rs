use egui::{Context, Event, Key, Modifiers, PointerButton, Pos2, Rect, Vec2};

/// Keyboard commands the editor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
    /// Escape: abandon the current interaction or drop the selection
    Cancel,
    /// Enter: write the typed text into the sheet
    Commit,
    /// Delete the last typed character
    Backspace,
}

/// Input in canvas terms.
///
/// Positions are device pixels relative to the top-left of the canvas
/// widget; the viewport turns them into sheet coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Pos2, button: PointerButton },
    PointerMove { pos: Pos2 },
    PointerUp { pos: Pos2, button: PointerButton },
    /// Wheel or touchpad scroll, in device pixels; positive scrolls right/down
    Scroll { delta: Vec2 },
    /// Pinch or ctrl+wheel zoom around `pos`
    Zoom { pos: Pos2, factor: f32 },
    Shortcut(Shortcut),
    /// Characters typed on the keyboard
    Text(String),
}

const BUTTONS: [PointerButton; 3] = [
    PointerButton::Primary,
    PointerButton::Secondary,
    PointerButton::Middle,
];

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    /// Button held since a press on the canvas; moves and the release are
    /// reported even if the pointer leaves the canvas meanwhile
    captured: Option<PointerButton>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_captured(&self) -> bool {
        self.captured.is_some()
    }

    /// Process raw egui input for a canvas occupying `canvas` on screen.
    pub fn process_input(&mut self, ctx: &Context, canvas: Rect) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let local = |pos: Pos2| (pos - canvas.min).to_pos2();

        ctx.input(|input| {
            let pos = input.pointer.latest_pos().or(self.last_pointer_pos);
            let over_canvas = input.pointer.hover_pos().is_some_and(|p| canvas.contains(p));

            if let Some(pos) = input.pointer.hover_pos() {
                if Some(pos) != self.last_pointer_pos && (over_canvas || self.captured.is_some()) {
                    events.push(InputEvent::PointerMove { pos: local(pos) });
                }
                self.last_pointer_pos = Some(pos);
            }

            for button in BUTTONS {
                if input.pointer.button_pressed(button) && over_canvas && self.captured.is_none() {
                    if let Some(pos) = pos {
                        self.captured = Some(button);
                        events.push(InputEvent::PointerDown {
                            pos: local(pos),
                            button,
                        });
                    }
                }
                if input.pointer.button_released(button) && self.captured == Some(button) {
                    self.captured = None;
                    if let Some(pos) = pos {
                        events.push(InputEvent::PointerUp {
                            pos: local(pos),
                            button,
                        });
                    }
                }
            }

            if over_canvas {
                let zoom = input.zoom_delta();
                if zoom != 1.0 {
                    if let Some(pos) = pos {
                        events.push(InputEvent::Zoom {
                            pos: local(pos),
                            factor: zoom,
                        });
                    }
                } else if input.raw_scroll_delta != Vec2::ZERO && !input.modifiers.command {
                    events.push(InputEvent::Scroll {
                        delta: -input.raw_scroll_delta,
                    });
                }
            }

            for event in &input.events {
                if let Event::Text(text) = event {
                    events.push(InputEvent::Text(text.clone()));
                }
            }
        });

        ctx.input_mut(|input| {
            // Shift variant first: a plain command+Z pattern also matches command+shift+Z
            if input.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)
                || input.consume_key(Modifiers::COMMAND, Key::Y)
            {
                events.push(InputEvent::Shortcut(Shortcut::Redo));
            } else if input.consume_key(Modifiers::COMMAND, Key::Z) {
                events.push(InputEvent::Shortcut(Shortcut::Undo));
            }
            if input.consume_key(Modifiers::NONE, Key::Escape) {
                events.push(InputEvent::Shortcut(Shortcut::Cancel));
            }
            if input.consume_key(Modifiers::NONE, Key::Enter) {
                events.push(InputEvent::Shortcut(Shortcut::Commit));
            }
            if input.consume_key(Modifiers::NONE, Key::Backspace) {
                events.push(InputEvent::Shortcut(Shortcut::Backspace));
            }
        });

        events
    }
}
