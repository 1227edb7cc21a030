pub mod input;
pub mod log_panel;
pub mod menu;
pub mod renderer;
pub mod textbox;
