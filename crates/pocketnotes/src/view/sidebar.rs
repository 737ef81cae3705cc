//! The group list pane.

use std::fmt::Write as _;

use crate::model::{Group, GroupId};

use super::format::{badge, RenderOptions};

/// Title shown above the group list and on the empty note pane.
pub const APP_TITLE: &str = "Pocket Notes";

/// Shown when no groups exist yet.
pub const NO_GROUPS: &str = "No groups yet. Click the + button to create one!";

/// Render the group list, marking `selected`.
#[must_use]
pub fn render_sidebar(
    groups: &[Group],
    selected: Option<&GroupId>,
    options: RenderOptions,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{APP_TITLE}");
    let _ = writeln!(out);

    if groups.is_empty() {
        let _ = writeln!(out, "{NO_GROUPS}");
        return out;
    }

    for group in groups {
        let marker = if selected == Some(&group.id) { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {} {}", badge(group, options), group.name);
    }
    out
}
