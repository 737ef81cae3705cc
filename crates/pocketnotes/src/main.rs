//! `pnotes` - CLI for pocketnotes
//!
//! This binary provides the command-line interface for creating groups,
//! appending notes to them, and reading them back.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Context;
use clap::Parser;

use pocketnotes::cli::{
    Cli, Command, ConfigCommand, GroupCommand, NoteCommand, OutputFormat, Reply, Shell,
    ShellCommand,
};
use pocketnotes::view::{render_notes, render_sidebar, RenderOptions};
use pocketnotes::{init_logging, Config, Error, GroupForm, SqliteBlobStore, Store};

type NoteStore = Store<SqliteBlobStore>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
        Command::Group(group_cmd) => handle_group(&config, group_cmd),
        Command::Note(note_cmd) => handle_note(&config, note_cmd),
        Command::Show(show_cmd) => handle_show(&config, show_cmd.group.as_deref()),
        Command::Shell(shell_cmd) => handle_shell(&config, &shell_cmd),
        Command::Status(status_cmd) => handle_status(&config, status_cmd.json),
    }
}

fn open_store(config: &Config) -> anyhow::Result<NoteStore> {
    let path = config.database_path();
    let blob = SqliteBlobStore::open(&path)
        .with_context(|| format!("opening notes database {}", path.display()))?;
    Ok(Store::open(blob, config.store_options())?)
}

fn render_options(config: &Config) -> RenderOptions {
    RenderOptions {
        utc: config.display.utc,
        ansi: io::stdout().is_terminal(),
    }
}

/// Print a persistence failure as a warning and keep going.
fn warn_unsaved(result: pocketnotes::Result<()>) -> anyhow::Result<()> {
    match result {
        Err(err) if err.is_persist() => {
            eprintln!("warning: {err}");
            Ok(())
        }
        other => Ok(other?),
    }
}

fn handle_group(config: &Config, cmd: GroupCommand) -> anyhow::Result<()> {
    let mut store = open_store(config)?;

    match cmd {
        GroupCommand::Create { name, color } => {
            let mut form = GroupForm::new().with_name(name.join(" "));
            if let Some(color) = color {
                form.choose_color(color.into());
            }
            let result = form.submit(&mut store).map(|id| {
                println!("Created group {} ({id})", form.name().trim());
            });
            warn_unsaved(result)?;
        }
        GroupCommand::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.groups())?);
            } else if store.is_empty() {
                println!("No groups yet.");
            } else {
                println!("{:<16} {:<24} {:<8} {:>5}", "ID", "NAME", "COLOR", "NOTES");
                for group in store.groups() {
                    println!(
                        "{:<16} {:<24} {:<8} {:>5}",
                        group.id,
                        group.name,
                        group.color,
                        group.notes.len()
                    );
                }
            }
        }
    }
    Ok(())
}

fn handle_note(config: &Config, cmd: NoteCommand) -> anyhow::Result<()> {
    let mut store = open_store(config)?;

    match cmd {
        NoteCommand::Add { group, text } => {
            let group = store.resolve(&group)?;
            let (id, name) = (group.id.clone(), group.name.clone());
            let result = store.append_note(&id, &text.join(" ")).map(|note| match note {
                Some(note) => println!("Added note {note} to {name}"),
                None => println!("Nothing to add: the note is blank."),
            });
            warn_unsaved(result)?;
        }
        NoteCommand::List { group, format } => {
            let group = store.resolve(&group)?;
            match format {
                OutputFormat::Plain => {
                    print!("{}", render_notes(Some(group), render_options(config)));
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&group.notes)?),
            }
        }
    }
    Ok(())
}

fn handle_show(config: &Config, query: Option<&str>) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let options = render_options(config);

    let selected = query.map(|q| store.resolve(q)).transpose()?;
    print!(
        "{}",
        render_sidebar(store.groups(), selected.map(|g| &g.id), options)
    );
    if let Some(group) = selected {
        println!();
        print!("{}", render_notes(Some(group), options));
    }
    Ok(())
}

fn handle_shell(config: &Config, cmd: &ShellCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let interactive = io::stdin().is_terminal();
    let mut shell = Shell::new(
        store,
        render_options(config),
        cmd.width,
        config.display.compact_breakpoint,
    );

    let opening = match &cmd.open {
        Some(query) => shell.handle_line(&format!("/open {query}")),
        None => Reply::Output(shell.screen()),
    };
    if let Reply::Output(text) = opening {
        print_reply(&text);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        if interactive {
            print!("{}", shell.prompt());
            stdout.flush()?;
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match shell.handle_line(line.trim_end_matches(['\r', '\n'])) {
            Reply::Output(text) => print_reply(&text),
            Reply::Quit => break,
        }
    }
    Ok(())
}

fn print_reply(text: &str) {
    if text.is_empty() {
        return;
    }
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let key = &store.options().key;
    let blob = store.blob();
    let stats = blob.stats()?;
    let updated_at = blob.updated_at(key)?;
    let keys = blob.keys()?;
    let notes: usize = store.groups().iter().map(|g| g.notes.len()).sum();

    if json {
        let status = serde_json::json!({
            "database_path": blob.path(),
            "key": key,
            "groups": store.len(),
            "notes": notes,
            "stored_keys": stats.keys,
            "keys": keys,
            "value_bytes": stats.value_bytes,
            "db_size_bytes": stats.db_size_bytes,
            "updated_at": updated_at,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("pnotes status");
        println!("-------------");
        println!("Database:      {}", blob.path().display());
        println!("Key:           {key}");
        println!("Groups:        {}", store.len());
        println!("Notes:         {notes}");
        println!("Stored keys:   {}", keys.join(", "));
        println!("Stored bytes:  {}", stats.value_bytes);
        println!("Database size: {}", stats.db_size_bytes);
        match updated_at {
            Some(at) => println!("Last saved:    {}", at.to_rfc3339()),
            None => println!("Last saved:    never"),
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Key:                {}", config.storage.key);
                println!("  Persist empty:      {}", config.storage.persist_empty);
                println!();
                println!("[Display]");
                println!(
                    "  Compact breakpoint: {}",
                    config.display.compact_breakpoint
                );
                println!("  UTC timestamps:     {}", config.display.utc);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(Error::ConfigValidation { message }) => {
                    anyhow::bail!("invalid configuration: {message}")
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}
