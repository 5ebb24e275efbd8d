//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "payman")]
#[command(about = "Organize reusable payload snippets in a folder tree", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: ./payman.toml)
    #[arg(long, global = true, env = "PAYMAN_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Payload data document (overrides data_file from config)
    #[arg(long, global = true, env = "PAYMAN_DATA", value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Log verbosity, written to stderr
    #[arg(long, global = true, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a config file and an empty payload document
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Show the folder tree
    Tree {
        /// Folder to start from (default: root)
        path: Option<String>,
    },

    /// Print the content of a file
    Show { path: String },

    /// Create an empty folder (replaces an existing entry)
    Mkdir { path: String },

    /// Create an empty file (replaces an existing entry)
    Touch { path: String },

    /// Delete a folder or file and everything under it
    Rm {
        path: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Append payload lines to a file (reads stdin when no lines are given)
    Add {
        path: String,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        lines: Vec<String>,
    },

    /// Remove payload lines from a file (reads stdin when no lines are given)
    Remove {
        path: String,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        lines: Vec<String>,
    },

    /// Append every line of a text file to a payload file
    Import { path: String, source: PathBuf },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}
