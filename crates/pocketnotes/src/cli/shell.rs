//! Line-oriented interactive session.
//!
//! Slash commands manage groups and selection; any other line is typed into
//! the note draft. A trailing backslash keeps the draft open for another line,
//! the way Shift+Enter would.

use tracing::warn;

use crate::creation::GroupForm;
use crate::error::Error;
use crate::model::{GroupColor, Note};
use crate::storage::BlobStore;
use crate::store::Store;
use crate::view::{format_date, format_time, render_sidebar, NotesView, Panes, RenderOptions};

const HELP: &str = "\
Commands:
  /new NAME [#HEX]        create a group (default color is the first in the palette)
  /open NAME|ID           open a group
  /back                   return to the group list
  /groups                 list groups
  /show                   redraw the visible panes
  /resize WIDTH           change the surface width
  /help                   show this help
  /quit                   leave
Any other line is added as a note to the open group. End a line with \\ to continue it.";

/// Result of handling one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to print; may be empty.
    Output(String),
    /// The session should end.
    Quit,
}

/// An interactive session over a [`Store`].
#[derive(Debug)]
pub struct Shell<B: BlobStore> {
    store: Store<B>,
    view: NotesView,
    panes: Panes,
    options: RenderOptions,
}

impl<B: BlobStore> Shell<B> {
    /// Start a session at the given surface `width`.
    #[must_use]
    pub fn new(store: Store<B>, options: RenderOptions, width: u32, breakpoint: u32) -> Self {
        Self {
            store,
            view: NotesView::new(options),
            panes: Panes::new(width, breakpoint),
            options,
        }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Store<B> {
        &self.store
    }

    /// The notes view state.
    #[must_use]
    pub fn view(&self) -> &NotesView {
        &self.view
    }

    /// Prompt reflecting the open group and whether a draft is pending.
    #[must_use]
    pub fn prompt(&self) -> String {
        let name = self
            .view
            .current(&self.store)
            .map_or("pocket notes", |g| g.name.as_str());
        if self.view.draft().is_empty() {
            format!("{name}> ")
        } else {
            format!("{name}.. ")
        }
    }

    /// Handle one line of input.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        let trimmed = line.trim();
        if self.view.draft().trim().is_empty() && trimmed.starts_with('/') {
            return self.handle_command(trimmed);
        }
        Reply::Output(self.type_line(line))
    }

    /// Everything currently visible.
    #[must_use]
    pub fn screen(&self) -> String {
        let mut out = String::new();
        if self.panes.show_sidebar() {
            out.push_str(&render_sidebar(
                self.store.groups(),
                self.view.selected(),
                self.options,
            ));
        }
        if self.panes.show_notes() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&self.view.render(self.view.current(&self.store)));
            if self.panes.can_go_back() {
                out.push_str("\n(/back for groups)\n");
            }
        }
        out
    }

    fn handle_command(&mut self, input: &str) -> Reply {
        let (command, rest) = input
            .split_once(char::is_whitespace)
            .map_or((input, ""), |(c, r)| (c, r.trim()));

        let output = match command {
            "/quit" | "/exit" => return Reply::Quit,
            "/help" => HELP.to_string(),
            "/groups" => render_sidebar(self.store.groups(), self.view.selected(), self.options),
            "/show" => self.screen(),
            "/back" => {
                self.panes.back();
                self.screen()
            }
            "/resize" => match rest.parse::<u32>() {
                Ok(width) => {
                    self.panes.resize(width);
                    self.screen()
                }
                Err(_) => format!("Invalid width '{rest}'"),
            },
            "/new" => self.create_group(rest),
            "/open" => self.open_group(rest),
            other => format!("Unknown command {other}. Type /help for a list."),
        };
        Reply::Output(output)
    }

    fn create_group(&mut self, args: &str) -> String {
        let (name, color) = split_color(args);
        let mut form = GroupForm::new().with_name(name);
        if let Some(color) = color {
            form.choose_color(color);
        }

        match form.submit(&mut self.store) {
            Ok(id) => format!("Created group {} ({id})", form.name().trim()),
            Err(err) => match form.error() {
                Some(rule) => rule.to_string(),
                None => warn_unsaved(&err),
            },
        }
    }

    fn open_group(&mut self, query: &str) -> String {
        let id = match self.store.resolve(query) {
            Ok(group) => group.id.clone(),
            Err(err) => return err.to_string(),
        };
        self.view.select(Some(id));
        self.panes.open_group();
        self.screen()
    }

    fn type_line(&mut self, line: &str) -> String {
        let (text, continued) = match line.strip_suffix('\\') {
            Some(head) => (head, true),
            None => (line, false),
        };
        if self.view.selected().is_none() {
            if text.trim().is_empty() {
                return String::new();
            }
            return "Open a group first (/open NAME).".to_string();
        }

        let draft = format!("{}{text}", self.view.draft());
        self.view.set_draft(draft);

        match self.view.handle_enter(continued, &mut self.store) {
            Ok(Some(_)) => self.last_note_line(),
            Ok(None) => {
                if !continued {
                    self.view.set_draft(String::new());
                }
                String::new()
            }
            Err(err) => warn_unsaved(&err),
        }
    }

    fn last_note_line(&self) -> String {
        self.view
            .current(&self.store)
            .and_then(|g| g.last_note())
            .map(|note| sent_line(note, self.options))
            .unwrap_or_default()
    }
}

fn sent_line(note: &Note, options: RenderOptions) -> String {
    format!(
        "  sent {} \u{2022} {}",
        format_date(&note.created_at, options),
        format_time(&note.created_at, options)
    )
}

/// Split a trailing color token off `/new` arguments.
fn split_color(args: &str) -> (&str, Option<GroupColor>) {
    if let Some((head, last)) = args.rsplit_once(char::is_whitespace) {
        if last.starts_with('#') {
            if let Ok(color) = last.parse() {
                return (head.trim(), Some(color));
            }
        }
    }
    (args, None)
}

fn warn_unsaved(err: &Error) -> String {
    warn!("{}", err);
    format!("warning: {err}")
}
