//! Line-based terminal front end: command parsing and text rendering.

pub mod commands;
pub mod render;

pub use commands::{parse_command, Command, HELP_TEXT};
pub use render::{describe_draw, describe_result, render_collection, render_history, render_status};
