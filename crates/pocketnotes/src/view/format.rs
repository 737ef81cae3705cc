//! Display helpers shared by the group list and the note thread.

use chrono::{DateTime, Local, Utc};

use crate::model::{Group, GroupColor};

/// Options that affect how groups and notes are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Show timestamps in UTC rather than the local time zone.
    pub utc: bool,
    /// Emit ANSI color escapes for group badges.
    pub ansi: bool,
}

/// Two-letter avatar text for a group name.
///
/// One word gives its first two characters; several words give the first
/// character of the first and of the last word. Always uppercased.
#[must_use]
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.trim().split(' ').collect();
    let picked: String = match words.as_slice() {
        [only] => only.chars().take(2).collect(),
        [first, .., last] => first.chars().take(1).chain(last.chars().take(1)).collect(),
        [] => String::new(),
    };
    picked.to_uppercase()
}

/// Calendar date such as `Jan 15, 2024`.
#[must_use]
pub fn format_date(at: &DateTime<Utc>, options: RenderOptions) -> String {
    if options.utc {
        at.format("%b %-d, %Y").to_string()
    } else {
        at.with_timezone(&Local).format("%b %-d, %Y").to_string()
    }
}

/// Twelve-hour clock time such as `09:05 PM`.
#[must_use]
pub fn format_time(at: &DateTime<Utc>, options: RenderOptions) -> String {
    if options.utc {
        at.format("%I:%M %p").to_string()
    } else {
        at.with_timezone(&Local).format("%I:%M %p").to_string()
    }
}

/// The group's initials, on its color when ANSI output is enabled.
#[must_use]
pub fn badge(group: &Group, options: RenderOptions) -> String {
    let text = initials(&group.name);
    if options.ansi {
        paint(group.color, &format!(" {text:<2} "))
    } else {
        format!("[{text:<2}]")
    }
}

fn paint(color: GroupColor, text: &str) -> String {
    let (r, g, b) = color.rgb();
    format!("\x1b[1;38;2;255;255;255;48;2;{r};{g};{b}m{text}\x1b[0m")
}
