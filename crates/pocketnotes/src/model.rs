//! Core data types for pocketnotes.
//!
//! A [`Group`] is a named, colored container holding an append-only list of
//! [`Note`]s. Both are serialized with camelCase field names so the persisted
//! blob keeps the `{id, name, color, notes, createdAt}` layout.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Opaque identifier of a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

/// Opaque identifier of a note.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            /// Wrap a raw identifier string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The raw identifier string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $ty {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $ty {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(GroupId);
string_id!(NoteId);

/// The fixed palette a group color is chosen from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum GroupColor {
    /// `#B38BFA`
    Lavender,
    /// `#FF79F2`
    Pink,
    /// `#43E6FC`
    Cyan,
    /// `#F19576`
    Peach,
    /// `#0047FF`
    Blue,
    /// `#6691FF`
    Periwinkle,
}

impl GroupColor {
    /// Every palette entry, in picker order.
    pub const PALETTE: [GroupColor; 6] = [
        Self::Lavender,
        Self::Pink,
        Self::Cyan,
        Self::Peach,
        Self::Blue,
        Self::Periwinkle,
    ];

    /// The color pre-selected when the creation surface opens.
    #[must_use]
    pub const fn default_choice() -> Self {
        Self::PALETTE[0]
    }

    /// Uppercase `#RRGGBB` form, as stored.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Lavender => "#B38BFA",
            Self::Pink => "#FF79F2",
            Self::Cyan => "#43E6FC",
            Self::Peach => "#F19576",
            Self::Blue => "#0047FF",
            Self::Periwinkle => "#6691FF",
        }
    }

    /// Lowercase palette name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lavender => "lavender",
            Self::Pink => "pink",
            Self::Cyan => "cyan",
            Self::Peach => "peach",
            Self::Blue => "blue",
            Self::Periwinkle => "periwinkle",
        }
    }

    /// Red, green and blue components.
    #[must_use]
    pub fn rgb(self) -> (u8, u8, u8) {
        let hex = &self.hex()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }
}

impl Default for GroupColor {
    fn default() -> Self {
        Self::default_choice()
    }
}

impl fmt::Display for GroupColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

/// Accepts a hex value (any case, `#` optional) or a palette name.
impl FromStr for GroupColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let bare = wanted.strip_prefix('#').unwrap_or(wanted);
        Self::PALETTE
            .into_iter()
            .find(|c| {
                c.hex()[1..].eq_ignore_ascii_case(bare) || c.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| Error::UnknownColor(s.to_string()))
    }
}

impl From<GroupColor> for String {
    fn from(color: GroupColor) -> Self {
        color.hex().to_string()
    }
}

impl TryFrom<String> for GroupColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if !value.starts_with('#') {
            return Err(format!("color must be a palette hex value, got '{value}'"));
        }
        value.parse().map_err(|e: Error| e.to_string())
    }
}

/// A single timestamped text entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier, assigned at creation.
    pub id: NoteId,
    /// Trimmed, non-empty text.
    pub text: String,
    /// When the note was written.
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
}

/// A named, colored container of notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Unique identifier, used for selection and note targeting.
    pub id: GroupId,
    /// Display name, unique ignoring case.
    pub name: String,
    /// Palette color chosen at creation.
    pub color: GroupColor,
    /// Notes in append order.
    pub notes: Vec<Note>,
    /// When the group was created.
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Whether `name` equals this group's name ignoring case.
    #[must_use]
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// The most recently appended note.
    #[must_use]
    pub fn last_note(&self) -> Option<&Note> {
        self.notes.last()
    }
}

/// Source of fresh identifiers for groups and notes.
pub trait IdGenerator: fmt::Debug {
    /// Produce an identifier never returned before by this generator.
    fn next_id(&mut self) -> String;
}

/// Millisecond wall-clock identifiers.
///
/// When two ids are requested within the same millisecond (or the clock goes
/// backwards) the previous value is bumped by one, so ids from one generator
/// are strictly increasing.
#[derive(Debug, Default)]
pub struct TimestampIds {
    last: i64,
}

impl TimestampIds {
    /// Create a generator with no history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(&mut self, now_millis: i64) -> String {
        let id = if now_millis > self.last {
            now_millis
        } else {
            self.last + 1
        };
        self.last = id;
        id.to_string()
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&mut self) -> String {
        self.issue(Utc::now().timestamp_millis())
    }
}

/// Deterministic ids `"<prefix>1"`, `"<prefix>2"`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    prefix: String,
    counter: u64,
}

impl SequentialIds {
    /// Create a generator whose ids start with `prefix`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("{}{}", self.prefix, self.counter)
    }
}

/// Source of creation timestamps.
pub trait Clock: fmt::Debug {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix.
mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_group() -> Group {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        Group {
            id: GroupId::new("1705314600000"),
            name: "Work".to_string(),
            color: GroupColor::Lavender,
            notes: vec![Note {
                id: NoteId::new("1705314660000"),
                text: "Buy milk".to_string(),
                created_at: at,
            }],
            created_at: at,
        }
    }

    #[test]
    fn test_palette_hex_values() {
        let hexes: Vec<&str> = GroupColor::PALETTE.iter().map(|c| c.hex()).collect();
        assert_eq!(
            hexes,
            ["#B38BFA", "#FF79F2", "#43E6FC", "#F19576", "#0047FF", "#6691FF"]
        );
    }

    #[test]
    fn test_default_color_is_first_palette_entry() {
        assert_eq!(GroupColor::default(), GroupColor::Lavender);
    }

    #[test]
    fn test_color_from_str() {
        assert_eq!("#b38bfa".parse::<GroupColor>().unwrap(), GroupColor::Lavender);
        assert_eq!("0047FF".parse::<GroupColor>().unwrap(), GroupColor::Blue);
        assert_eq!("Peach".parse::<GroupColor>().unwrap(), GroupColor::Peach);
        assert!("#000000".parse::<GroupColor>().is_err());
        assert!("mauve".parse::<GroupColor>().is_err());
    }

    #[test]
    fn test_color_rgb() {
        assert_eq!(GroupColor::Blue.rgb(), (0x00, 0x47, 0xFF));
        assert_eq!(GroupColor::Pink.rgb(), (0xFF, 0x79, 0xF2));
    }

    #[test]
    fn test_group_serializes_camel_case() {
        let json = serde_json::to_value(sample_group()).unwrap();
        assert_eq!(json["color"], "#B38BFA");
        assert_eq!(json["createdAt"], "2024-01-15T10:30:00.000Z");
        assert_eq!(json["notes"][0]["text"], "Buy milk");
        assert_eq!(json["notes"][0]["createdAt"], "2024-01-15T10:30:00.000Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_group_deserializes_stored_layout() {
        let raw = r##"{
            "id": "1700000000000",
            "name": "Ideas",
            "color": "#43e6fc",
            "notes": [{
                "id": "1700000000001",
                "text": "hello",
                "createdAt": "2023-11-14T22:13:20.001Z"
            }],
            "createdAt": "2023-11-14T22:13:20.000Z"
        }"##;
        let group: Group = serde_json::from_str(raw).unwrap();
        assert_eq!(group.color, GroupColor::Cyan);
        assert_eq!(group.notes.len(), 1);
        assert_eq!(group.notes[0].created_at.timestamp_subsec_millis(), 1);
    }

    #[test]
    fn test_group_rejects_unknown_color() {
        let raw = r##"{"id": "1", "name": "Ideas", "color": "#123456", "notes": [],
            "createdAt": "2023-11-14T22:13:20.000Z"}"##;
        assert!(serde_json::from_str::<Group>(raw).is_err());
    }

    #[test]
    fn test_group_rejects_color_name_in_blob() {
        let raw = r#"{"id": "1", "name": "Ideas", "color": "cyan", "notes": [],
            "createdAt": "2023-11-14T22:13:20.000Z"}"#;
        assert!(serde_json::from_str::<Group>(raw).is_err());
    }

    #[test]
    fn test_group_name_matches_ignores_case() {
        let group = sample_group();
        assert!(group.name_matches("WORK"));
        assert!(group.name_matches("work"));
        assert!(!group.name_matches("works"));
    }

    #[test]
    fn test_timestamp_ids_strictly_increase() {
        let mut ids = TimestampIds::new();
        assert_eq!(ids.issue(1000), "1000");
        assert_eq!(ids.issue(1000), "1001");
        assert_eq!(ids.issue(999), "1002");
        assert_eq!(ids.issue(2000), "2000");
    }

    #[test]
    fn test_timestamp_ids_unique_under_rapid_calls() {
        let mut ids = TimestampIds::new();
        let issued: Vec<String> = (0..100).map(|_| ids.next_id()).collect();
        let mut deduped = issued.clone();
        deduped.dedup();
        assert_eq!(issued.len(), deduped.len());
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new("g");
        assert_eq!(ids.next_id(), "g1");
        assert_eq!(ids.next_id(), "g2");
    }

    #[test]
    fn test_fixed_clock() {
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 9, 5, 0).unwrap();
        assert_eq!(FixedClock(at).now(), at);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(GroupId::new("42").to_string(), "42");
        assert_eq!(NoteId::from("7").as_str(), "7");
    }
}
