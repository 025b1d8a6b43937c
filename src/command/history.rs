use std::collections::VecDeque;

use log::debug;

use super::Command;
use crate::error::{PaintError, PaintResult};
use crate::surface::PixelSurface;

/// How many operations can be undone by default
pub const DEFAULT_UNDO_DEPTH: usize = 50;

/// Manages the history of committed commands for undo/redo
#[derive(Debug)]
pub struct CommandHistory {
    /// Oldest entry at the front; dropped first when full
    undo_stack: VecDeque<Command>,
    redo_stack: Vec<Command>,
    max_depth: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_DEPTH)
    }
}

impl CommandHistory {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_depth.min(DEFAULT_UNDO_DEPTH)),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Records a command that has already been applied to the surface.
    pub fn push(&mut self, command: Command) {
        debug!(
            "recording '{}' over {:?} ({} bytes)",
            command.label(),
            command.rect(),
            command.byte_len()
        );
        if self.undo_stack.len() == self.max_depth {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(command);
        self.redo_stack.clear();
    }

    /// Undoes the most recent command; returns its label.
    pub fn undo(&mut self, surface: &mut PixelSurface) -> PaintResult<&'static str> {
        let command = self.undo_stack.pop_back().ok_or(PaintError::NothingToUndo)?;
        command.undo(surface);
        let label = command.label();
        self.redo_stack.push(command);
        Ok(label)
    }

    /// Re-applies the most recently undone command; returns its label.
    pub fn redo(&mut self, surface: &mut PixelSurface) -> PaintResult<&'static str> {
        let command = self.redo_stack.pop().ok_or(PaintError::NothingToRedo)?;
        command.execute(surface);
        let label = command.label();
        self.undo_stack.push_back(command);
        Ok(label)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}
