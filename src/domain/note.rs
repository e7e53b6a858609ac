//! Note records and note id generation

use super::path_component::check_component;
use crate::error::Result;
use chrono::{Duration, Local, NaiveDateTime, SubsecRound};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Extension of persisted note records
pub const RECORD_EXTENSION: &str = ".json";

/// Longest sanitized title kept in a note id, in bytes.
/// The timestamp and a disambiguation counter must still fit a path component.
const MAX_TITLE_STEM: usize = 160;

/// Behavior when a new note's id is already taken
/// (same sanitized title created within the same second)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// The new note replaces the stored one
    #[default]
    Overwrite,
    /// The new note gets a `-2`, `-3`, ... suffix
    Disambiguate,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            "disambiguate" => Ok(CollisionPolicy::Disambiguate),
            _ => Err(format!(
                "Invalid id_collision policy: '{}'. Valid policies are: overwrite, disambiguate",
                s
            )),
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionPolicy::Overwrite => f.write_str("overwrite"),
            CollisionPolicy::Disambiguate => f.write_str("disambiguate"),
        }
    }
}

/// Characters replaced when a title becomes part of a note id
fn unsafe_title_chars() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[\s/\\\x00]").unwrap())
}

/// A stored note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub content: String,
    pub color: String,
    /// Last modification time (local clock, microsecond precision)
    #[serde(with = "record_time")]
    pub time: NaiveDateTime,
}

impl Note {
    pub fn new(title: String, content: String, color: String, time: NaiveDateTime) -> Self {
        Note {
            title,
            content,
            color,
            time,
        }
    }

    /// Number of whitespace separated words in the content
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Replace content and color, keeping the title and moving `time` forward.
    pub fn revise(&mut self, content: String, color: String, now: NaiveDateTime) {
        self.content = content;
        self.color = color;
        self.time = advance(self.time, now);
    }
}

/// Identifier of a note within one account: `<sanitized title>_<YYYYMMDDHHMMSS>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(String);

impl NoteId {
    /// Derive the id for a note titled `title` created at `at`.
    pub fn generate(title: &str, at: NaiveDateTime) -> Self {
        NoteId(format!(
            "{}_{}",
            truncate_at_char_boundary(&sanitize_title(title), MAX_TITLE_STEM),
            at.format("%Y%m%d%H%M%S")
        ))
    }

    /// Parse a caller supplied id
    pub fn parse(raw: &str) -> Result<Self> {
        check_component("note id", raw)?;
        Ok(NoteId(raw.to_string()))
    }

    /// Recover the id from a record file name, if it is one
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(RECORD_EXTENSION)?;
        if stem.is_empty() {
            return None;
        }
        Some(NoteId(stem.to_string()))
    }

    /// The same id with a numeric disambiguation suffix (`<id>-<n>`)
    pub fn with_counter(&self, n: u32) -> Self {
        NoteId(format!("{}-{}", self.0, n))
    }

    pub fn file_name(&self) -> String {
        format!("{}{}", self.0, RECORD_EXTENSION)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replace whitespace and path separators in a title with `_`
pub fn sanitize_title(title: &str) -> String {
    unsafe_title_chars().replace_all(title, "_").into_owned()
}

fn truncate_at_char_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Current local time truncated to the precision records are stored with
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

/// Pick a modification time strictly after `previous`, preferring `now`.
pub fn advance(previous: NaiveDateTime, now: NaiveDateTime) -> NaiveDateTime {
    let now = now.trunc_subsecs(6);
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

/// On-disk time format: `YYYY-MM-DD HH:MM:SS.ffffff`. RFC 3339 is accepted too.
mod record_time {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid note time: '{}'", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
    }
}
