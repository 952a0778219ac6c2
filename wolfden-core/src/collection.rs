//! Named document collections (saves and presets) and their file naming rules.

use crate::error::{StoreError, StoreResult};

pub const JSON_SUFFIX: &str = ".json";

/// A directory of client-owned, named JSON documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Persisted game sessions.
    Saves,
    /// Reusable game setups.
    Presets,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Saves, Collection::Presets];

    /// Directory name relative to the store root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Collection::Saves => "saves",
            Collection::Presets => "presets",
        }
    }

    /// Label used in "not found" messages.
    pub fn label(self) -> &'static str {
        match self {
            Collection::Saves => "Save file",
            Collection::Presets => "Preset file",
        }
    }
}

/// Reduces a request sub-path to the document name it addresses: its last
/// `/`-separated segment.
///
/// Names that could escape the collection directory (`.`, `..`, anything
/// containing `\` or NUL) and empty names are rejected.
pub fn document_name(sub_path: &str) -> StoreResult<&str> {
    let name = sub_path.rsplit('/').next().unwrap_or(sub_path);
    if name.is_empty() || name == "." || name == ".." || name.contains(['\\', '\0']) {
        return Err(StoreError::InvalidName(sub_path.to_string()));
    }
    Ok(name)
}

/// Appends `.json` unless the name already ends with it.
pub fn with_json_suffix(name: &str) -> String {
    if name.ends_with(JSON_SUFFIX) {
        name.to_string()
    } else {
        format!("{name}{JSON_SUFFIX}")
    }
}
