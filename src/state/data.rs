//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the folder scanner and the UI layer.

use std::path::PathBuf;

/// Represents a single model file in the current folder
///
/// Built once per scan and never mutated afterwards; a folder change
/// throws the whole list away and builds a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRecord {
    /// Filename without extension (e.g., "detail_tweaker")
    pub name: String,
    /// Full content of `<name>.txt`, trimmed (empty if there is no sidecar)
    pub trigger_text: String,
    /// Non-blank lines of `<name>.txt`, in file order
    pub trigger_lines: Vec<String>,
    /// Preview image for the model, or the default placeholder.
    /// Never empty.
    pub image_path: PathBuf,
}

impl ModelRecord {
    /// Whether this model has any trigger words to copy
    pub fn has_triggers(&self) -> bool {
        !self.trigger_lines.is_empty()
    }
}
