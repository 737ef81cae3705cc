//! Which panes are visible for a given surface width.
//!
//! At or below the breakpoint only one pane fits: the group list until a group
//! is opened, then the note thread until the user goes back.

/// Whether the surface is wide enough for two panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Group list and note thread side by side.
    Wide,
    /// One pane at a time.
    Compact,
}

impl Layout {
    /// Layout for `width` against `breakpoint`.
    #[must_use]
    pub fn for_width(width: u32, breakpoint: u32) -> Self {
        if width <= breakpoint {
            Self::Compact
        } else {
            Self::Wide
        }
    }

    /// Whether only one pane is shown.
    #[must_use]
    pub fn is_compact(self) -> bool {
        self == Self::Compact
    }
}

/// Pane visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panes {
    breakpoint: u32,
    layout: Layout,
    notes_on_compact: bool,
}

impl Panes {
    /// Start at `width` with the group list in front.
    #[must_use]
    pub fn new(width: u32, breakpoint: u32) -> Self {
        Self {
            breakpoint,
            layout: Layout::for_width(width, breakpoint),
            notes_on_compact: false,
        }
    }

    /// Current layout.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// React to a width change. Going wide forgets the compact-mode pane.
    pub fn resize(&mut self, width: u32) {
        self.layout = Layout::for_width(width, self.breakpoint);
        if !self.layout.is_compact() {
            self.notes_on_compact = false;
        }
    }

    /// A group was selected.
    pub fn open_group(&mut self) {
        if self.layout.is_compact() {
            self.notes_on_compact = true;
        }
    }

    /// Return to the group list.
    pub fn back(&mut self) {
        self.notes_on_compact = false;
    }

    /// Whether the group list is visible.
    #[must_use]
    pub fn show_sidebar(&self) -> bool {
        !self.layout.is_compact() || !self.notes_on_compact
    }

    /// Whether the note thread is visible.
    #[must_use]
    pub fn show_notes(&self) -> bool {
        !self.layout.is_compact() || self.notes_on_compact
    }

    /// Whether a "back" control should be offered.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.layout.is_compact()
    }
}
