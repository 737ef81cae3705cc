//! Presentation of groups and notes.
//!
//! [`NotesView`] tracks which group is open and the unsent draft for it, and
//! forwards submitted drafts to the [`Store`]. Rendering produces plain text
//! (optionally with ANSI badges) for the terminal front end.

mod format;
mod layout;
mod sidebar;

use std::fmt::Write as _;

use crate::error::Result;
use crate::model::{Group, GroupId, NoteId};
use crate::storage::BlobStore;
use crate::store::Store;

pub use format::{badge, format_date, format_time, initials, RenderOptions};
pub use layout::{Layout, Panes};
pub use sidebar::{render_sidebar, APP_TITLE, NO_GROUPS};

/// Shown under the title when nothing is selected.
pub const TAGLINE: &str = "Send and receive messages without keeping your phone online.\n\
                           Use Pocket Notes on up to 4 linked devices and 1 mobile phone";

/// Shown for a group without notes.
pub const NO_NOTES: &str = "No notes yet. Start typing below to add your first note!";

/// The note thread for the selected group plus its input draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesView {
    selected: Option<GroupId>,
    draft: String,
    options: RenderOptions,
}

impl NotesView {
    /// A view with nothing selected.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Change the selection. Any unsent draft is discarded.
    pub fn select(&mut self, group: Option<GroupId>) {
        if self.selected != group {
            self.draft.clear();
        }
        self.selected = group;
    }

    /// The selected group id.
    #[must_use]
    pub fn selected(&self) -> Option<&GroupId> {
        self.selected.as_ref()
    }

    /// The selected group, looked up in `store`.
    #[must_use]
    pub fn current<'a, B: BlobStore>(&self, store: &'a Store<B>) -> Option<&'a Group> {
        self.selected.as_ref().and_then(|id| store.group(id))
    }

    /// Unsent input text.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Whether the send control is enabled.
    #[must_use]
    pub fn can_send(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// Enter sends the draft; Shift+Enter starts a new line in it.
    ///
    /// # Errors
    ///
    /// Propagates [`submit_note`](Self::submit_note) errors.
    pub fn handle_enter<B: BlobStore>(
        &mut self,
        shift: bool,
        store: &mut Store<B>,
    ) -> Result<Option<NoteId>> {
        if shift {
            self.draft.push('\n');
            return Ok(None);
        }
        self.submit_note(store)
    }

    /// Append the draft to the selected group and clear it.
    ///
    /// Nothing happens when no group is selected or the draft is blank.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`](crate::Error::Persist) if the note was added
    /// but could not be saved. The draft is cleared either way.
    pub fn submit_note<B: BlobStore>(&mut self, store: &mut Store<B>) -> Result<Option<NoteId>> {
        let Some(group_id) = self.selected.as_ref() else {
            return Ok(None);
        };
        if !self.can_send() {
            return Ok(None);
        }

        let result = store.append_note(group_id, &self.draft);
        self.draft.clear();
        result
    }

    /// Render `group`'s thread, or the placeholder when `None`.
    #[must_use]
    pub fn render(&self, group: Option<&Group>) -> String {
        render_notes(group, self.options)
    }
}

/// Render one group's notes in stored order.
#[must_use]
pub fn render_notes(group: Option<&Group>, options: RenderOptions) -> String {
    let mut out = String::new();

    let Some(group) = group else {
        let _ = writeln!(out, "{APP_TITLE}");
        let _ = writeln!(out);
        let _ = writeln!(out, "{TAGLINE}");
        return out;
    };

    let _ = writeln!(out, "{} {}", badge(group, options), group.name);
    let _ = writeln!(out);

    if group.notes.is_empty() {
        let _ = writeln!(out, "{NO_NOTES}");
        return out;
    }

    for (i, note) in group.notes.iter().enumerate() {
        if i > 0 {
            let _ = writeln!(out);
        }
        let _ = writeln!(out, "{}", note.text);
        let _ = writeln!(
            out,
            "{} \u{2022} {}",
            format_date(&note.created_at, options),
            format_time(&note.created_at, options)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FixedClock, GroupColor, SequentialIds};
    use crate::storage::MemoryBlobStore;
    use crate::store::StoreOptions;
    use chrono::{TimeZone, Utc};

    const UTC: RenderOptions = RenderOptions {
        utc: true,
        ansi: false,
    };

    fn create_test_store() -> Store<MemoryBlobStore> {
        Store::new(MemoryBlobStore::new(), StoreOptions::default())
            .with_ids(SequentialIds::new("n"))
            .with_clock(FixedClock(
                Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap(),
            ))
    }

    #[test]
    fn test_render_placeholder_without_group() {
        let out = NotesView::new(UTC).render(None);
        assert!(out.starts_with(APP_TITLE));
        assert!(out.contains("without keeping your phone online"));
    }

    #[test]
    fn test_render_group_without_notes() {
        let mut store = create_test_store();
        let id = store.create_group("Work", GroupColor::Blue).unwrap();

        let out = render_notes(store.group(&id), UTC);
        assert!(out.starts_with("[WO] Work"));
        assert!(out.contains(NO_NOTES));
    }

    #[test]
    fn test_render_notes_in_order_with_timestamps() {
        let mut store = create_test_store();
        let id = store.create_group("Work", GroupColor::Blue).unwrap();
        store.append_note(&id, "Buy milk").unwrap();
        store.append_note(&id, "Call Sam").unwrap();

        let out = render_notes(store.group(&id), UTC);
        let expected = concat!(
            "[WO] Work\n\n",
            "Buy milk\nJan 15, 2024 \u{2022} 02:30 PM\n\n",
            "Call Sam\nJan 15, 2024 \u{2022} 02:30 PM\n",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_submit_note_appends_and_clears_draft() {
        let mut store = create_test_store();
        let id = store.create_group("Work", GroupColor::Blue).unwrap();
        let mut view = NotesView::new(UTC);
        view.select(Some(id.clone()));

        view.set_draft("  Buy milk  ");
        assert!(view.can_send());
        let note = view.submit_note(&mut store).unwrap();

        assert!(note.is_some());
        assert_eq!(view.draft(), "");
        assert_eq!(store.group(&id).unwrap().notes[0].text, "Buy milk");
    }

    #[test]
    fn test_submit_blank_draft_is_noop() {
        let mut store = create_test_store();
        let id = store.create_group("Work", GroupColor::Blue).unwrap();
        let mut view = NotesView::new(UTC);
        view.select(Some(id.clone()));

        view.set_draft(" \n\t ");
        assert!(!view.can_send());
        assert!(view.submit_note(&mut store).unwrap().is_none());
        assert!(store.group(&id).unwrap().notes.is_empty());
    }

    #[test]
    fn test_submit_without_selection_is_noop() {
        let mut store = create_test_store();
        store.create_group("Work", GroupColor::Blue).unwrap();
        let mut view = NotesView::new(UTC);

        view.set_draft("orphan");
        assert!(view.submit_note(&mut store).unwrap().is_none());
        assert_eq!(view.draft(), "orphan");
        assert!(store.groups()[0].notes.is_empty());
    }

    #[test]
    fn test_selection_change_clears_draft() {
        let mut store = create_test_store();
        let work = store.create_group("Work", GroupColor::Blue).unwrap();
        let home = store.create_group("Home", GroupColor::Pink).unwrap();
        let mut view = NotesView::new(UTC);

        view.select(Some(work.clone()));
        view.set_draft("meant for work");
        view.select(Some(home.clone()));

        assert_eq!(view.draft(), "");
        assert_eq!(view.current(&store).unwrap().id, home);
        assert!(view.submit_note(&mut store).unwrap().is_none());
        assert!(store.group(&work).unwrap().notes.is_empty());
        assert!(store.group(&home).unwrap().notes.is_empty());
    }

    #[test]
    fn test_reselecting_same_group_keeps_draft() {
        let mut view = NotesView::new(UTC);
        view.select(Some(GroupId::new("1")));
        view.set_draft("keep me");
        view.select(Some(GroupId::new("1")));
        assert_eq!(view.draft(), "keep me");
    }

    #[test]
    fn test_enter_submits_and_shift_enter_adds_newline() {
        let mut store = create_test_store();
        let id = store.create_group("Work", GroupColor::Blue).unwrap();
        let mut view = NotesView::new(UTC);
        view.select(Some(id.clone()));

        view.set_draft("line one");
        assert!(view.handle_enter(true, &mut store).unwrap().is_none());
        assert_eq!(view.draft(), "line one\n");

        view.set_draft(format!("{}line two", view.draft()));
        assert!(view.handle_enter(false, &mut store).unwrap().is_some());
        assert_eq!(
            store.group(&id).unwrap().notes[0].text,
            "line one\nline two"
        );
    }
}
