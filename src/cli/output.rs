//! Output formatting utilities

use crate::domain::Note;
use crate::infrastructure::{NamespaceUsage, NoteEntry, SkippedRecord};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a list of note entries for display
pub fn format_note_list(notes: &[NoteEntry]) -> String {
    if notes.is_empty() {
        return "No notes found".to_string();
    }

    let mut output = String::new();
    for entry in notes {
        let words = entry.note.word_count();
        output.push_str(&format!(
            "{}  {}  {}  {} ({} {})\n",
            entry.note.time.format(TIME_FORMAT),
            entry.id,
            entry.note.color,
            entry.note.title,
            words,
            if words == 1 { "word" } else { "words" }
        ));
    }
    output
}

/// Format one note with its content
pub fn format_note(note: &Note) -> String {
    format!(
        "Title: {}\nColor: {}\nTime:  {}\n\n{}\n",
        note.title,
        note.color,
        note.time.format(TIME_FORMAT),
        note.content
    )
}

/// Format stored blob names, one per line
pub fn format_blob_list(label: &str, names: &[String]) -> String {
    if names.is_empty() {
        return format!("No {}s found", label);
    }

    let mut output = String::new();
    for name in names {
        output.push_str(name);
        output.push('\n');
    }
    output
}

/// Warning lines for records a listing could not load
pub fn format_skipped(skipped: &[SkippedRecord]) -> String {
    let mut output = String::new();
    for record in skipped {
        output.push_str(&format!(
            "Warning: skipped unreadable note {}: {}\n",
            record.id, record.reason
        ));
    }
    output
}

pub fn format_usage(account: &str, usage: &NamespaceUsage) -> String {
    format!(
        "Account: {}\nNotes:   {}\nFiles:   {}\nImages:  {}\nBytes:   {}\n",
        account, usage.notes, usage.files, usage.images, usage.bytes
    )
}
