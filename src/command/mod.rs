mod commands;
mod history;

pub use commands::Command;
pub use history::{CommandHistory, DEFAULT_UNDO_DEPTH};
