mod central_panel;
mod scrollbar;
mod status_bar;
mod tools_panel;

pub use central_panel::central_panel;
pub use status_bar::status_bar;
pub use tools_panel::tools_panel;
