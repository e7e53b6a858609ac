//! CLI command definitions

use crate::application::DEFAULT_ROOT;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notevault")]
#[command(about = "Personal vault for notes, files and images", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Vault root directory
    #[arg(long, global = true, env = "NOTEVAULT_ROOT", default_value = DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Account to act as
    #[arg(short, long, global = true, env = "NOTEVAULT_USER")]
    pub user: Option<String>,

    /// Account password
    #[arg(long, global = true, env = "NOTEVAULT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the vault root and a default vault.toml
    Init,

    /// Create a new account
    Register,

    /// Check credentials
    Login,

    /// Show the account's stored notes, files and images
    Status,

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Manage notes
    Note {
        #[command(subcommand)]
        action: NoteCommand,
    },

    /// Manage uploaded files
    File {
        #[command(subcommand)]
        action: BlobCommand,
    },

    /// Manage uploaded images
    Image {
        #[command(subcommand)]
        action: BlobCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    /// Create a note
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        content: String,

        /// Note color (default from config)
        #[arg(long)]
        color: Option<String>,
    },

    /// List notes, newest first
    List,

    /// Print one note
    Show { id: String },

    /// Change a note's content and/or color
    Edit {
        id: String,

        #[arg(short, long)]
        content: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a note
    Rm { id: String },
}

#[derive(Subcommand, Debug)]
pub enum BlobCommand {
    /// Upload a local file
    Put {
        path: PathBuf,

        /// Name to store it under (default: the file's name)
        #[arg(long)]
        name: Option<String>,
    },

    /// List stored names
    List,

    /// Download a stored blob
    Get {
        name: String,

        /// Destination path, `-` for stdout (default: ./<name>)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Delete a stored blob
    Rm { name: String },
}
