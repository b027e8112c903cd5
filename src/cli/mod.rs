//! CLI layer - Command-line interface

pub mod commands;
pub mod output;
pub mod screens;

pub use commands::{Cli, Commands};
pub use output::{format_note, format_note_list};
