//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::model::GroupColor;

/// Group management commands.
#[derive(Debug, Subcommand)]
pub enum GroupCommand {
    /// Create a new group
    Create {
        /// Group name (at least 2 characters, unique ignoring case)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        /// Palette color as hex or name
        #[arg(long, value_enum, ignore_case = true)]
        color: Option<ColorArg>,
    },

    /// List all groups
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Note commands.
#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    /// Append a note to a group
    Add {
        /// Group id or name
        group: String,

        /// Note text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Show the notes of a group
    List {
        /// Group id or name
        group: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Group id or name to open next to the group list
    pub group: Option<String>,
}

/// Interactive session arguments.
#[derive(Debug, Args)]
pub struct ShellCommand {
    /// Surface width used to pick the one- or two-pane layout
    #[arg(short, long, default_value = "1024")]
    pub width: u32,

    /// Group id or name to open on start
    #[arg(short, long)]
    pub open: Option<String>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Palette color argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
    /// #B38BFA
    #[value(alias = "B38BFA", alias = "#B38BFA")]
    Lavender,
    /// #FF79F2
    #[value(alias = "FF79F2", alias = "#FF79F2")]
    Pink,
    /// #43E6FC
    #[value(alias = "43E6FC", alias = "#43E6FC")]
    Cyan,
    /// #F19576
    #[value(alias = "F19576", alias = "#F19576")]
    Peach,
    /// #0047FF
    #[value(alias = "0047FF", alias = "#0047FF")]
    Blue,
    /// #6691FF
    #[value(alias = "6691FF", alias = "#6691FF")]
    Periwinkle,
}

impl From<ColorArg> for GroupColor {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Lavender => Self::Lavender,
            ColorArg::Pink => Self::Pink,
            ColorArg::Cyan => Self::Cyan,
            ColorArg::Peach => Self::Peach,
            ColorArg::Blue => Self::Blue,
            ColorArg::Periwinkle => Self::Periwinkle,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
}
