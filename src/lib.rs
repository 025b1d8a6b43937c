#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod command;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod selection;
pub mod state;
pub mod surface;
pub mod tools;
pub mod viewport;

pub use app::PaintApp;
pub use command::{Command, CommandHistory};
pub use config::PaintConfig;
pub use error::{PaintError, PaintResult};
pub use geometry::PixelRect;
pub use input::{InputEvent, InputHandler, Shortcut};
pub use renderer::Renderer;
pub use selection::Selection;
pub use state::{InteractionState, ToolController};
pub use surface::PixelSurface;
pub use tools::ToolKind;
pub use viewport::{ScrollbarAxis, Viewport};
