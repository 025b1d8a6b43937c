mod controller;
mod interaction;

pub use controller::ToolController;
pub use interaction::InteractionState;
