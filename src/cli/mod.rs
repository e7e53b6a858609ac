//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{BlobCommand, Cli, Commands, NoteCommand};
pub use output::{
    format_blob_list, format_note, format_note_list, format_skipped, format_usage,
};
