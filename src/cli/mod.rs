//! CLI layer - Command-line interface

pub mod commands;
pub mod output;
pub mod prompt;

pub use commands::{Cli, Commands, LogLevel};
pub use output::{format_config, format_tree};
pub use prompt::confirm;
