//! Errors from compiling or decoding weapon data

use crate::reference::Affinity;
use crate::source::SourceKind;
use std::path::PathBuf;

/// Errors that can occur while loading, assembling, or decoding weapon data
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Source {} has no data rows", path.display())]
    EmptySource { path: PathBuf },

    #[error("{key} is missing from {table}")]
    MissingEntry { table: SourceKind, key: String },

    #[error("{key} has no upgrade level {level} in {table}")]
    MissingLevel {
        table: SourceKind,
        key: String,
        level: u8,
    },

    #[error("Unknown {field} for {key}: {value:?}")]
    UnknownValue {
        key: String,
        field: &'static str,
        value: String,
    },

    #[error("{name} ({affinity}) has {levels} records, expected upgrade levels 0 to {max_upgrade_level}")]
    IncompleteVariant {
        name: String,
        affinity: Affinity,
        levels: usize,
        max_upgrade_level: u8,
    },

    #[error("Weapon name {0:?} is not in the name table")]
    UnknownName(String),

    #[error("Invalid encoded weapon data: {0}")]
    Decode(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
