//! Blob kinds and blob names

use super::path_component::check_component;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which blob subarea of a namespace an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobKind {
    /// Arbitrary uploaded files (`<account>/files`)
    Files,
    /// Uploaded pictures (`<account>/images`)
    Images,
}

impl BlobKind {
    pub const ALL: [BlobKind; 2] = [BlobKind::Files, BlobKind::Images];

    /// Directory name of this kind inside a namespace
    pub fn dir_name(&self) -> &'static str {
        match self {
            BlobKind::Files => "files",
            BlobKind::Images => "images",
        }
    }

    /// Singular noun used in messages
    pub fn label(&self) -> &'static str {
        match self {
            BlobKind::Files => "file",
            BlobKind::Images => "image",
        }
    }
}

impl fmt::Display for BlobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for BlobKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "files" | "file" => Ok(BlobKind::Files),
            "images" | "image" => Ok(BlobKind::Images),
            _ => Err(format!(
                "Invalid blob kind: '{}'. Valid kinds are: files, images",
                s
            )),
        }
    }
}

/// Check a blob name before it touches the filesystem
pub fn check_blob_name(name: &str) -> Result<()> {
    check_component("blob name", name)
}

/// True when `name` ends in one of `extensions` (case-insensitive, without dot)
pub fn has_allowed_extension(name: &str, extensions: &[String]) -> bool {
    let Some((stem, ext)) = name.rsplit_once('.') else {
        return false;
    };
    if stem.is_empty() {
        return false;
    }
    extensions
        .iter()
        .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
}
