//! Command-line interface for pocketnotes.
//!
//! This module provides the CLI structure for the `pnotes` binary and the
//! interactive session it can run.

mod commands;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ColorArg, ConfigCommand, GroupCommand, NoteCommand, OutputFormat, ShellCommand, ShowCommand,
    StatusCommand,
};
pub use shell::{Reply, Shell};

/// pnotes - Colored groups of timestamped notes
///
/// Create named groups, append short notes to them, and read them back.
/// Everything is kept in a local database.
#[derive(Debug, Parser)]
#[command(name = "pnotes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create and list groups
    #[command(subcommand)]
    Group(GroupCommand),

    /// Add and read notes
    #[command(subcommand)]
    Note(NoteCommand),

    /// Show the group list and, optionally, one group's notes
    Show(ShowCommand),

    /// Start an interactive session
    Shell(ShellCommand),

    /// Show storage status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn status_cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Status(StatusCommand { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "pnotes");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(status_cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(status_cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(status_cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(status_cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_group_create_joins_words() {
        let cli = Cli::try_parse_from([
            "pnotes", "group", "create", "Home", "Chores", "--color", "#6691ff",
        ])
        .unwrap();
        match cli.command {
            Command::Group(GroupCommand::Create { name, color }) => {
                assert_eq!(name, ["Home", "Chores"]);
                assert_eq!(color, Some(ColorArg::Periwinkle));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_group_create_requires_name() {
        assert!(Cli::try_parse_from(["pnotes", "group", "create"]).is_err());
    }

    #[test]
    fn test_parse_note_add() {
        let cli = Cli::try_parse_from(["pnotes", "note", "add", "Work", "Buy", "milk"]).unwrap();
        match cli.command {
            Command::Note(NoteCommand::Add { group, text }) => {
                assert_eq!(group, "Work");
                assert_eq!(text.join(" "), "Buy milk");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_note_list_json() {
        let cli = Cli::try_parse_from(["pnotes", "note", "list", "Work", "-f", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Note(NoteCommand::List {
                format: OutputFormat::Json,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_shell_defaults() {
        let cli = Cli::try_parse_from(["pnotes", "shell"]).unwrap();
        match cli.command {
            Command::Shell(cmd) => {
                assert_eq!(cmd.width, 1024);
                assert!(cmd.open.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["pnotes", "-c", "/custom/config.toml", "status"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose_and_quiet() {
        let cli = Cli::try_parse_from(["pnotes", "-vv", "status"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["pnotes", "-q", "status"]).unwrap();
        assert!(cli.quiet);
    }
}
